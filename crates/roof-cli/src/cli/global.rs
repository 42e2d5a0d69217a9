use clap::ValueEnum;

/// When to color notices and headings.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Global flags shared by startup and the shell.
#[derive(Clone, Copy, Debug)]
pub struct GlobalFlags {
    pub quiet: bool,
    pub verbose: bool,
    pub color: ColorMode,
}
