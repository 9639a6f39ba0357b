//! Error types for treestage.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write
/// `Result<T>`. This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in treestage.
///
/// Only construction-time contract violations are surfaced as errors.
/// Absent-key lookups and erases are silent no-ops by design, and broken
/// structural invariants (a stale node handle, splitting a non-full node)
/// are programming errors defended with assertions, not recoverable values.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested minimum degree cannot form a valid multiway tree.
    #[error("invalid minimum degree {0}: must be at least 2")]
    InvalidMinDegree(usize),

    /// An animation step was given a zero or negative duration.
    ///
    /// Progress advances by `dt / duration`, so a non-positive duration
    /// would never (or instantly) complete.
    #[error("animation step duration {0} is not positive")]
    NonPositiveDuration(f32),
}
