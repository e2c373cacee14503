use thiserror::Error;

/// Error returned by the positional queries ([`nth_from_start`] and
/// [`nth_from_end`]) when the requested index does not fall within
/// `[0, len)`, including every query on an empty list.
///
/// No other operation fails; absence is reported through `Option` or
/// `bool` return values.
///
/// [`nth_from_start`]: crate::singly::List::nth_from_start
/// [`nth_from_end`]: crate::singly::List::nth_from_end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("index {index} out of range for list of length {len}")]
pub struct OutOfRange {
    /// The requested index.
    pub index: usize,
    /// The length of the list at the time of the query.
    pub len: usize,
}
