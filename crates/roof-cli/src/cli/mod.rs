use clap::Parser;

pub mod global;

pub use global::{ColorMode, GlobalFlags};

/// Top-level CLI parser for the `roof` binary.
#[derive(Debug, Parser)]
#[command(
    name = "roof",
    version,
    about = "Rooftop Intel - HVAC/R assessment guides and remote inspections"
)]
pub struct Cli {
    /// Quiet mode (errors only in the log)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Color output: auto, always, never
    #[arg(long, default_value = "auto")]
    pub color: ColorMode,
}

impl Cli {
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            quiet: self.quiet,
            verbose: self.verbose,
            color: self.color,
        }
    }
}
