//! Process exit codes

/// Any error: configuration, usage, transport or API.
///
/// Aborted confirmations are not errors and exit with 0.
pub const FAILURE: i32 = 1;
