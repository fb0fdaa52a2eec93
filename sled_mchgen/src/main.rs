//! # mchgen
//!
//! Generates the C interface and implementation of a sled state machine
//! from its XML schema.
//!
//! # Usage
//!
//! ```bash
//! # Generate mch_mp.h / mch_mp.c
//! mchgen generate machines/mch_mp.xml machines/mch_mp.h machines/mch_mp.c
//!
//! # Generate even if validation reports errors, without the syslog trace
//! mchgen generate mch_mp.xml mch_mp.h mch_mp.c --permissive --no-trace
//!
//! # Validate only, machine-readable report
//! mchgen check machines/mch_mp.xml --format json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use sled_common::config::ConfigLoader;
use sled_common::logging::{self, LogOptions};
use sled_mchgen::validate::{Issue, Severity};
use sled_mchgen::{GenerateRequest, GeneratorConfig, MchgenError, Schema};
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

/// Sled state machine scaffolding generator
#[derive(Parser, Debug)]
#[command(name = "mchgen")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Generates C state machine scaffolding from XML schemas")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Generator configuration file (mchgen.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the interface and implementation modules
    Generate {
        /// Machine schema (XML)
        schema: PathBuf,
        /// Target interface file (.h)
        interface: PathBuf,
        /// Target implementation file (.c)
        implementation: PathBuf,
        /// Generate even when validation reports errors
        #[arg(long)]
        permissive: bool,
        /// Omit the syslog state change trace
        #[arg(long)]
        no_trace: bool,
    },
    /// Load and validate a schema without generating
    Check {
        /// Machine schema (XML)
        schema: PathBuf,
        /// Report format on stdout
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    schema: &'a Schema,
    issues: &'a [Issue],
    valid: bool,
}

fn main() {
    let args = Args::parse();

    let mut config = match GeneratorConfig::load_optional(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            logging::init(&LogOptions {
                verbose: args.verbose,
                json: args.json,
                ..Default::default()
            });
            error!("{e}");
            process::exit(1);
        }
    };

    logging::init(&LogOptions {
        verbose: args.verbose,
        json: args.json,
        level: config.shared.log_level,
    });

    if let Err(e) = run(args.command, &mut config) {
        error!("{e}");
        process::exit(1);
    }
}

fn run(command: Command, config: &mut GeneratorConfig) -> Result<(), MchgenError> {
    match command {
        Command::Generate {
            schema,
            interface,
            implementation,
            permissive,
            no_trace,
        } => {
            config.apply_overrides(permissive, no_trace);
            let request = GenerateRequest {
                schema,
                interface,
                implementation,
            };
            let report = sled_mchgen::generate(&request, config)?;
            info!(
                "'{}' generated with {} non-blocking issue(s)",
                report.prefix,
                report.issues.len()
            );
            Ok(())
        }
        Command::Check { schema, format } => {
            let (model, issues) = sled_mchgen::check(&schema)?;
            let valid = !issues.iter().any(|i| i.severity == Severity::Error);

            match format {
                ReportFormat::Text => {
                    for issue in &issues {
                        println!("{issue}");
                    }
                    println!(
                        "{}: {} ({} issue(s))",
                        schema.display(),
                        if valid { "OK" } else { "INVALID" },
                        issues.len()
                    );
                }
                ReportFormat::Json => {
                    let report = CheckReport {
                        schema: &model,
                        issues: &issues,
                        valid,
                    };
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
            }

            if valid {
                Ok(())
            } else {
                Err(MchgenError::Validation(
                    issues
                        .into_iter()
                        .filter(|i| i.severity == Severity::Error)
                        .collect(),
                ))
            }
        }
    }
}
