//! Default tuning values and process exit codes.

/// Default matrix size at or below which Strassen hands off to the classic multiplier.
pub const DEFAULT_CUTOFF: usize = 64;

/// Default matrix size above which the parallel engine runs the seven
/// sub-products on the rayon pool.
pub const DEFAULT_PARALLEL_GRAIN: usize = 128;

/// Exit codes for the command-line front end.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Algorithm results did not match during cross-validation.
    pub const ERROR_MISMATCH: i32 = 3;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// Invalid input matrices (shape or size).
    pub const ERROR_INPUT: i32 = 5;
    /// Run cancelled by the user (Ctrl+C).
    pub const ERROR_CANCELED: i32 = 130;
}
