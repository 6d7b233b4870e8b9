//! Error types for layout computation

use thiserror::Error;

/// Failures reported by [`compute_layout`](crate::layout::compute_layout).
///
/// Every descriptor is validated before any offset is assigned, and the
/// offset walk itself uses checked arithmetic, so an error means no partial
/// layout was produced. `index` is the position of the offending field in
/// the input slice.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// A field's alignment is zero or not a power of two.
    #[error("field {index}: alignment {align} is not a power of two")]
    InvalidAlignment { index: usize, align: usize },

    /// A field's size is zero.
    #[error("field {index}: size must be at least one byte")]
    InvalidSize { index: usize },

    /// The field sequence is empty.
    #[error("aggregate has no fields")]
    EmptyStruct,

    /// The running offset or the padded total does not fit in `usize`.
    #[error("field {index}: aggregate size overflows")]
    SizeOverflow { index: usize },
}
