use thiserror::Error;

/// Errors raised by [`EntryTree`](crate::EntryTree) operations.
///
/// Only malformed input is an error. A well-formed sequence that matches
/// nothing is reported through the normal return value instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryTreeError {
    /// The key sequence is non-empty but has a missing element.
    #[error("invalid argument: key sequence has a missing element at position {position}")]
    InvalidArgument {
        /// Zero-based position of the first missing element.
        position: usize,
    },
}

pub type Result<T> = std::result::Result<T, EntryTreeError>;
