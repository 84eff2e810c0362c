//! Command implementations, one per lifecycle action.

pub mod bootstrap;
pub mod clean;
pub mod start;
pub mod stop;
pub mod update_interpreter;
