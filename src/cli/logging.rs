//! Plain println-based CLI output with a quiet/normal/verbose switch

/// Log level for CLI output
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    /// Suppress all output
    Quiet,
    /// Normal output level
    Normal,
    /// Verbose output with additional details
    Verbose,
}

impl LogLevel {
    /// Whether a message at `required` level should be printed
    #[must_use]
    pub fn permits(self, required: LogLevel) -> bool {
        match self {
            Self::Quiet => false,
            Self::Normal => required == Self::Normal,
            Self::Verbose => true,
        }
    }
}

/// Print `msg` if the current level permits it
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level.permits(required) {
        println!("{msg}");
    }
}
