//! deembed command line
//!
//! Remove the shunt loads attached to each port of a measured two-port.
//!
//! # Usage
//!
//! ```bash
//! # Same fixed 80 ohm load on both ports
//! deembed measured.s2p 80+0j 80+0j intrinsic.s2p
//!
//! # Swept antenna impedance on port 1, capacitive load on port 2
//! deembed measured.s2p antenna.s1p 50-5j intrinsic.s2p --format ma
//!
//! # Write the result at 75 ohm
//! deembed measured.s2p 80 80 intrinsic.s2p --z0 75
//! ```

use clap::{ArgAction, Parser, ValueEnum};
use deembed::config::DeembedConfig;
use deembed::enums::RFDataFormat;
use deembed::error::Result;
use deembed::frequency::FrequencyCheck;
use deembed::load::LoadSpec;
use deembed::pipeline;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser)]
#[command(name = "deembed")]
#[command(about = "Remove port load admittances from measured two-port S-parameters")]
#[command(version)]
struct Cli {
    /// Measured two-port touchstone file
    measured: PathBuf,

    /// Port 1 load: complex impedance such as 75+10j, or a one-port .s1p file
    #[arg(allow_hyphen_values = true)]
    port1: String,

    /// Port 2 load: complex impedance such as 75+10j, or a one-port .s1p file
    #[arg(allow_hyphen_values = true)]
    port2: String,

    /// Destination touchstone file
    output: PathBuf,

    /// Output reference impedance in ohm [default: reference of the measured file]
    #[arg(long)]
    z0: Option<f64>,

    /// Number format of the output records
    #[arg(long, value_enum, default_value = "ri")]
    format: Format,

    /// How closely swept load sweeps must match the measured sweep
    #[arg(long, value_enum, default_value = "values")]
    grid_check: GridCheck,

    /// More log output (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Ri,
    Ma,
    Db,
}

impl From<Format> for RFDataFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Ri => RFDataFormat::RI,
            Format::Ma => RFDataFormat::MA,
            Format::Db => RFDataFormat::DB,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GridCheck {
    /// Point count and frequency values
    Values,
    /// Point count only
    Length,
}

impl From<GridCheck> for FrequencyCheck {
    fn from(g: GridCheck) -> Self {
        match g {
            GridCheck::Values => FrequencyCheck::Values,
            GridCheck::Length => FrequencyCheck::Length,
        }
    }
}

impl Cli {
    fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    fn config(&self) -> Result<DeembedConfig> {
        DeembedConfig::builder()
            .measured(&self.measured)
            .port1(LoadSpec::from_arg(&self.port1)?)
            .port2(LoadSpec::from_arg(&self.port2)?)
            .output(&self.output)
            .z0(self.z0)
            .format(self.format.into())
            .grid_check(self.grid_check.into())
            .build()
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.config().and_then(|config| pipeline::run(&config)) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
