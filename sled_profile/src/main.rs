//! # create_profile
//!
//! Writes motion profile tables for the sled drive.
//!
//! # Usage
//!
//! ```bash
//! # Default table set to stdout, then compile for the drive
//! create_profile > profiles.txt
//! calclk4.exe profiles.txt profiles.tab
//!
//! # A single reversed minimum jerk curve with 1024 points
//! create_profile --curve min-jerk --reverse --points 1024 -o min_jerk_rev.txt
//! ```

use clap::{Parser, ValueEnum};
use sled_common::prelude::*;
use sled_profile::{DEFAULT_POINTS, Profile, ProfileError, ProfileKind, table};
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::{debug, error, info};

/// Sled motion profile table generator
#[derive(Parser, Debug)]
#[command(name = "create_profile")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Writes position/acceleration profile tables for the sled drive")]
struct Args {
    /// Curve to write (can be specified multiple times). Without it the
    /// default four-slot set is written.
    #[arg(long = "curve", value_enum, action = clap::ArgAction::Append)]
    curves: Vec<Curve>,

    /// Run the selected curves backwards
    #[arg(long)]
    reverse: bool,

    /// Samples per curve
    #[arg(short = 'n', long, default_value_t = DEFAULT_POINTS)]
    points: usize,

    /// Write tables to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Shared configuration file (log level)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Curve {
    Sinusoid,
    MinJerk,
    Rsinusoid,
}

impl From<Curve> for ProfileKind {
    fn from(curve: Curve) -> Self {
        match curve {
            Curve::Sinusoid => ProfileKind::Sinusoid,
            Curve::MinJerk => ProfileKind::MinimumJerk,
            Curve::Rsinusoid => ProfileKind::RampedSinusoid,
        }
    }
}

/// `[shared]` table of the sled configuration file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ProfileConfig {
    shared: SharedConfig,
}

fn main() {
    let args = Args::parse();

    let config = match ProfileConfig::load_optional(args.config.as_deref()) {
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

    if let Err(e) = run(&args) {
        error!("{e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ProfileError> {
    let profiles = select(args)?;
    for profile in &profiles {
        debug!(
            "{}{}: {} points",
            profile.kind().name(),
            if profile.is_reversed() { " (reversed)" } else { "" },
            profile.len()
        );
    }

    match &args.output {
        Some(path) => table::write_file(path, &profiles)?,
        None => {
            let stdout = io::stdout();
            table::write_profiles(&mut stdout.lock(), &profiles)?;
            info!("Wrote {} profile(s) to stdout", profiles.len());
        }
    }
    Ok(())
}

fn select(args: &Args) -> Result<Vec<Profile>, ProfileError> {
    if args.curves.is_empty() {
        let set = sled_profile::default_set(args.points)?;
        return Ok(if args.reverse {
            set.iter().map(Profile::reversed).collect()
        } else {
            set
        });
    }

    args.curves
        .iter()
        .map(|&curve| {
            let profile = Profile::generate(curve.into(), args.points)?;
            Ok(if args.reverse {
                profile.reversed()
            } else {
                profile
            })
        })
        .collect()
}
