use serde::{Deserialize, Serialize};

/// Terse output intended for end users.
pub const USER_LEVEL: u8 = 1;
/// Very verbose output, mainly for debugging and tests.
pub const DEBUG_LEVEL: u8 = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Verbosity(pub u8);

impl Verbosity {
    pub const QUIET: Verbosity = Verbosity(0);
    pub const USER: Verbosity = Verbosity(USER_LEVEL);
    pub const DEBUG: Verbosity = Verbosity(DEBUG_LEVEL);

    pub fn at_least(self, level: u8) -> bool {
        self.0 >= level
    }

    pub fn is_debug(self) -> bool {
        self.at_least(DEBUG_LEVEL)
    }

    /// Max tracing level for a subscriber driven by this verbosity.
    pub fn tracing_level(self) -> tracing::Level {
        match self.0 {
            0 => tracing::Level::WARN,
            l if l < DEBUG_LEVEL => tracing::Level::INFO,
            DEBUG_LEVEL => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
