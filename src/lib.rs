//! pathbox: run a command in a container with the host paths it mentions
//! mounted automatically.

pub mod args;
pub mod cli;
pub mod config;
pub mod launch;
pub mod logging;
