//! Field descriptors and computed layouts
//!
//! [`FieldDescriptor`] is the input side: how many bytes a field needs and
//! what boundary it must start on. [`Layout`] is the output side: where each
//! field landed and how big the whole aggregate came out. Both are plain
//! value types, built per call and owned by the caller.

/// Size and alignment of a single field, before layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Bytes the field occupies. Must be at least 1.
    pub size: usize,
    /// Byte boundary the field's offset must be a multiple of. Must be a
    /// nonzero power of two. May be smaller than `size` (nested aggregates)
    /// or larger (over-aligned data); neither direction is assumed.
    pub align: usize,
}

impl FieldDescriptor {
    pub const fn new(size: usize, align: usize) -> Self {
        Self { size, align }
    }
}

/// A field's placement inside a computed layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSlot {
    /// Byte offset from the start of the aggregate.
    pub offset: usize,
    /// Bytes occupied, copied from the descriptor.
    pub size: usize,
    /// Alignment requirement, copied from the descriptor.
    pub align: usize,
    /// Padding bytes inserted immediately before this field.
    pub padding_before: usize,
}

impl FieldSlot {
    /// First byte past the field.
    pub fn end(&self) -> usize {
        self.offset + self.size
    }
}

/// The computed layout of an aggregate: one slot per input field, in input
/// order, plus the padded total size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Slots in input order; offsets are non-decreasing.
    pub fields: Vec<FieldSlot>,
    /// Total padded size; always a multiple of `align`.
    pub size: usize,
    /// Largest field alignment in the aggregate.
    pub align: usize,
    /// Padding appended after the last field to round `size` up.
    pub trailing_padding: usize,
}

impl Layout {
    /// Field offsets in input order.
    pub fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.fields.iter().map(|slot| slot.offset)
    }

    /// Total padding bytes, interior and trailing.
    pub fn padding_total(&self) -> usize {
        let interior: usize = self.fields.iter().map(|slot| slot.padding_before).sum();
        interior + self.trailing_padding
    }
}
