// Copyright 2026 QRNG Contributors
// SPDX-License-Identifier: Apache-2.0

//! QRNG command line interface.
//!
//! # Usage
//!
//! ```bash
//! # Roll one of 6 outcomes with 1024 shots on the local sampler
//! qrng draw 6 --shots 1024
//!
//! # Same, printing the measured histogram
//! qrng draw 6 --shots 1024 --histogram
//!
//! # Check backend health
//! qrng health
//!
//! # Show effective configuration
//! qrng config
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use qrng::backend::ibm::IbmBackend;
use qrng::backend::LocalSamplerBackend;
use qrng::observer::{DrawObserver, TracingObserver};
use qrng::{analysis, validation, Config, Error, QuantumBackend, Result, VERSION};

/// Quantum random number generator
#[derive(Parser)]
#[command(name = "qrng")]
#[command(author = "QRNG Contributors")]
#[command(version = VERSION)]
#[command(about = "Quantum random number generation over pluggable backends")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw one random integer in [0, NUM_OUTCOMES - 1]
    Draw {
        /// Number of possible outcomes
        num_outcomes: u64,

        /// Shots for the main batch (defaults to the configured value)
        #[arg(short, long, env = "QRNG_SHOTS")]
        shots: Option<u32>,

        /// Backend to run on (local_sampler, ibm)
        #[arg(short, long)]
        backend: Option<String>,

        /// Print the measured counts as a histogram table
        #[arg(long)]
        histogram: bool,

        /// Emit the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check backend health
    Health {
        /// Specific backend to check
        #[arg(short, long)]
        backend: Option<String>,
    },

    /// Show effective configuration
    Config,

    /// Validate configuration file
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli.log_level);

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Draw {
            num_outcomes,
            shots,
            backend,
            histogram,
            json,
        } => {
            config.validate()?;
            let shots = shots.unwrap_or(config.sampling.shots);
            validation::validate_draw_request(num_outcomes, shots, &config.limits)?;

            let backend = build_backend(&config, backend.as_deref())?;
            let observer = CliObserver { histogram };

            let draw = qrng::generate(backend.as_ref(), num_outcomes, shots, &observer).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&draw)?);
            } else {
                println!("random number: {}", draw.value);
                println!("normalized spread: {:.3}", draw.normalized_spread);
            }
        }

        Commands::Health { backend } => {
            let names: Vec<String> = match backend {
                Some(name) => vec![name],
                None => enabled_backends(&config),
            };

            let mut all_healthy = true;
            for name in names {
                match build_backend(&config, Some(name.as_str())) {
                    Ok(b) => match b.health_check().await {
                        Ok(status) => {
                            println!("{}: {:?}", name, status);
                            if status != qrng::HealthStatus::Healthy {
                                all_healthy = false;
                            }
                        }
                        Err(e) => {
                            println!("{}: Error - {}", name, e);
                            all_healthy = false;
                        }
                    },
                    Err(e) => {
                        println!("{}: Error - {}", name, e);
                        all_healthy = false;
                    }
                }
            }

            if !all_healthy {
                std::process::exit(1);
            }
        }

        Commands::Config => {
            println!("{}", serde_yaml::to_string(&config)?);
        }

        Commands::Validate => match config.validate() {
            Ok(()) => {
                println!("Configuration is valid");
            }
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

/// Initialize logging with tracing.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}

/// Construct the requested backend, or the configured default.
fn build_backend(config: &Config, name: Option<&str>) -> Result<Box<dyn QuantumBackend>> {
    let name = name.unwrap_or_else(|| config.default_backend());

    match name {
        "local_sampler" => {
            if !config.backends.local_sampler.enabled {
                return Err(Error::Config("local_sampler backend is disabled".into()));
            }
            Ok(Box::new(LocalSamplerBackend::new(
                &config.backends.local_sampler,
            )))
        }
        "ibm" => {
            let backend = IbmBackend::from_config(&config.backends.ibm)?;
            Ok(Box::new(backend))
        }
        other => Err(Error::Config(format!("Unknown backend: {}", other))),
    }
}

/// Backends the configuration enables, for `health` with no argument.
fn enabled_backends(config: &Config) -> Vec<String> {
    let mut names = Vec::new();
    if config.backends.local_sampler.enabled {
        names.push("local_sampler".to_string());
    }
    if config.backends.ibm.enabled {
        names.push("ibm".to_string());
    }
    names
}

/// Observer wired to the CLI: logs progress and optionally prints the
/// measured counts as a histogram table.
struct CliObserver {
    histogram: bool,
}

impl DrawObserver for CliObserver {
    fn spec_built(&self, spec: &qrng::CircuitSpec) {
        TracingObserver.spec_built(spec);
    }

    fn execution_completed(&self, shots: u32, distinct_patterns: usize) {
        TracingObserver.execution_completed(shots, distinct_patterns);
    }

    fn counts_analyzed(&self, analysis: &analysis::OutcomeAnalysis) {
        TracingObserver.counts_analyzed(analysis);
        if self.histogram {
            println!("outcome  count");
            for (value, count) in &analysis.counts {
                println!("{:>7}  {}", value, count);
            }
        }
    }

    fn tie_detected(&self, candidates: &[u64]) {
        TracingObserver.tie_detected(candidates);
    }
}
