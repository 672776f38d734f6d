/// Errors raised by fallible `TimingData` operations.
///
/// Mirrors the shape of this crate's sibling directory-scan errors: structured
/// `Debug` data, no `Display`/`std::error::Error` impl, no `thiserror`/`anyhow`.
#[derive(Debug, Clone, PartialEq)]
pub enum TimingError {
    /// A payload violates its kind's domain (non-positive BPM, empty label, ...).
    InvalidSegment(String),
    /// A row argument was negative where a row must be `>= 0`.
    OutOfRange { row: i32 },
    /// A sorted-order or uniqueness invariant was violated. Never raised by a
    /// correct caller; surfaces a bug as a typed error instead of a panic.
    AssertionFailure(String),
}
