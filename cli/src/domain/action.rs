//! The five lifecycle actions the tool can perform.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::LifecycleError;

/// Selected once per invocation; decides which services run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Bootstrap,
    Clean,
    Start,
    Stop,
    UpdateInterpreter,
}

impl LifecycleAction {
    pub const ALL: [Self; 5] = [
        Self::Bootstrap,
        Self::Clean,
        Self::Start,
        Self::Stop,
        Self::UpdateInterpreter,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bootstrap => "bootstrap",
            Self::Clean => "clean",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::UpdateInterpreter => "update-interpreter",
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleAction {
    type Err = LifecycleError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == wanted)
            .ok_or_else(|| LifecycleError::InvalidAction(wanted))
    }
}
