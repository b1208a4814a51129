//! Command implementations for the `cathedral` CLI.
//!
//! Each command takes the resolved content root and configuration and returns
//! the process exit code it wants; fatal errors propagate as `anyhow::Error`.

mod enrich;
mod export;
mod lint;

pub use enrich::execute as enrich;
pub use export::execute as export;
pub use lint::execute as lint;
