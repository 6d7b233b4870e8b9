//! Struct layout computation
//!
//! This module is the core of structty. Given an ordered sequence of
//! [`FieldDescriptor`]s, [`compute_layout`] assigns each field a byte offset
//! satisfying its alignment and returns the total padded size of the
//! aggregate.
//!
//! # Layout Rules
//!
//! The rules are the usual C ones:
//! - A field starts at the next multiple of its alignment, with padding
//!   bytes inserted when the running cursor is not already aligned.
//! - Fields are never reordered; offsets are assigned strictly in input
//!   order. Reordering to save space is a caller decision, see
//!   [`suggest_packing`].
//! - The total size is rounded up to a multiple of the largest field
//!   alignment, so every element of an array of the aggregate stays aligned.
//!
//! # Determinism
//!
//! [`compute_layout`] is a pure function over its input slice: same
//! descriptors in, same layout out, no state anywhere else.

pub mod error;
pub mod field;

pub use error::LayoutError;
pub use field::{FieldDescriptor, FieldSlot, Layout};

/// Round `value` up to the next multiple of `align`.
///
/// `align` must be a nonzero power of two, and the rounded value must fit
/// in `usize`.
pub fn align_up(value: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    (value + align - 1) & !(align - 1)
}

/// [`align_up`] with overflow detection: `None` when the rounded value does
/// not fit in `usize`.
fn checked_align_up(value: usize, align: usize) -> Option<usize> {
    debug_assert!(align.is_power_of_two());
    value.checked_add(align - 1).map(|v| v & !(align - 1))
}

/// Compute the layout of an aggregate from its fields, in declaration order.
///
/// All descriptors are validated up front: an alignment that is zero or not
/// a power of two, or a size of zero, fails the whole call before any offset
/// is assigned. An empty field sequence is rejected as
/// [`LayoutError::EmptyStruct`]. Offsets and the padded total are computed
/// with checked arithmetic, so an aggregate that does not fit in `usize` is
/// rejected as [`LayoutError::SizeOverflow`] instead of wrapping.
///
/// # Examples
///
/// ```
/// use structty::layout::{compute_layout, FieldDescriptor};
///
/// let fields = [
///     FieldDescriptor::new(1, 1), // char
///     FieldDescriptor::new(8, 8), // double
///     FieldDescriptor::new(1, 1), // char
/// ];
/// let layout = compute_layout(&fields).unwrap();
/// assert_eq!(layout.offsets().collect::<Vec<_>>(), vec![0, 8, 16]);
/// assert_eq!(layout.size, 24);
/// ```
pub fn compute_layout(fields: &[FieldDescriptor]) -> Result<Layout, LayoutError> {
    if fields.is_empty() {
        return Err(LayoutError::EmptyStruct);
    }
    for (index, field) in fields.iter().enumerate() {
        if !field.align.is_power_of_two() {
            return Err(LayoutError::InvalidAlignment {
                index,
                align: field.align,
            });
        }
        if field.size == 0 {
            return Err(LayoutError::InvalidSize { index });
        }
    }

    let mut cursor = 0;
    let mut max_align = 1;
    let mut slots = Vec::with_capacity(fields.len());

    for (index, field) in fields.iter().enumerate() {
        let offset = checked_align_up(cursor, field.align)
            .ok_or(LayoutError::SizeOverflow { index })?;
        slots.push(FieldSlot {
            offset,
            size: field.size,
            align: field.align,
            padding_before: offset - cursor,
        });
        cursor = offset
            .checked_add(field.size)
            .ok_or(LayoutError::SizeOverflow { index })?;
        max_align = max_align.max(field.align);
    }

    // An overflowing trailing round-up blames the last field.
    let size = checked_align_up(cursor, max_align)
        .ok_or(LayoutError::SizeOverflow { index: fields.len() - 1 })?;
    Ok(Layout {
        fields: slots,
        size,
        align: max_align,
        trailing_padding: size - cursor,
    })
}

/// Suggest a space-saving field order as indices into `fields`, sorted by
/// descending alignment. Fields with equal alignment keep their relative
/// declaration order.
///
/// The result is advisory: apply the permutation yourself and re-run
/// [`compute_layout`] to see the effect. Descending alignment removes the
/// interior padding of C-shaped inputs, though it is not guaranteed optimal
/// for arbitrary descriptors.
pub fn suggest_packing(fields: &[FieldDescriptor]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..fields.len()).collect();
    order.sort_by(|&a, &b| fields[b].align.cmp(&fields[a].align));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_of(fields: &[(usize, usize)]) -> Layout {
        let descriptors: Vec<FieldDescriptor> = fields
            .iter()
            .map(|&(size, align)| FieldDescriptor::new(size, align))
            .collect();
        compute_layout(&descriptors).unwrap()
    }

    #[test]
    fn test_char_double_char() {
        let layout = layout_of(&[(1, 1), (8, 8), (1, 1)]);
        assert_eq!(layout.offsets().collect::<Vec<_>>(), vec![0, 8, 16]);
        assert_eq!(layout.size, 24);
        assert_eq!(layout.align, 8);
        assert_eq!(layout.fields[1].padding_before, 7);
        assert_eq!(layout.trailing_padding, 7);
        assert_eq!(layout.padding_total(), 14);
    }

    #[test]
    fn test_reordered_fields_shrink() {
        let layout = layout_of(&[(8, 8), (1, 1), (1, 1)]);
        assert_eq!(layout.offsets().collect::<Vec<_>>(), vec![0, 8, 9]);
        assert_eq!(layout.size, 16);
        assert_eq!(layout.trailing_padding, 6);
    }

    #[test]
    fn test_single_field() {
        let layout = layout_of(&[(4, 4)]);
        assert_eq!(layout.offsets().collect::<Vec<_>>(), vec![0]);
        assert_eq!(layout.size, 4);
        assert_eq!(layout.align, 4);
        assert_eq!(layout.padding_total(), 0);
    }

    #[test]
    fn test_alignment_below_size() {
        // A nested aggregate can be wider than its own alignment.
        let layout = layout_of(&[(1, 1), (12, 4)]);
        assert_eq!(layout.offsets().collect::<Vec<_>>(), vec![0, 4]);
        assert_eq!(layout.size, 16);
        assert_eq!(layout.align, 4);
    }

    #[test]
    fn test_alignment_above_size() {
        // Over-aligned blob: one byte that must sit on an 8-byte boundary.
        let layout = layout_of(&[(1, 8), (1, 1)]);
        assert_eq!(layout.offsets().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(layout.size, 8);
        assert_eq!(layout.align, 8);
        assert_eq!(layout.trailing_padding, 6);
    }

    #[test]
    fn test_alignment_not_power_of_two() {
        let fields = [FieldDescriptor::new(1, 1), FieldDescriptor::new(2, 3)];
        assert_eq!(
            compute_layout(&fields),
            Err(LayoutError::InvalidAlignment { index: 1, align: 3 })
        );
    }

    #[test]
    fn test_alignment_zero() {
        let fields = [FieldDescriptor::new(4, 0)];
        assert_eq!(
            compute_layout(&fields),
            Err(LayoutError::InvalidAlignment { index: 0, align: 0 })
        );
    }

    #[test]
    fn test_size_zero() {
        let fields = [FieldDescriptor::new(4, 4), FieldDescriptor::new(0, 1)];
        assert_eq!(
            compute_layout(&fields),
            Err(LayoutError::InvalidSize { index: 1 })
        );
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(compute_layout(&[]), Err(LayoutError::EmptyStruct));
    }

    #[test]
    fn test_cursor_overflow_reported() {
        // A second field cannot start past the end of the address space.
        let fields = [FieldDescriptor::new(usize::MAX, 1), FieldDescriptor::new(1, 1)];
        assert_eq!(
            compute_layout(&fields),
            Err(LayoutError::SizeOverflow { index: 1 })
        );
    }

    #[test]
    fn test_trailing_round_up_overflow_reported() {
        // The fields fit, but rounding the total to the max alignment
        // does not.
        let fields = [FieldDescriptor::new(usize::MAX - 6, 8)];
        assert_eq!(
            compute_layout(&fields),
            Err(LayoutError::SizeOverflow { index: 0 })
        );
    }

    #[test]
    fn test_maximal_layout_still_computes() {
        let fields = [FieldDescriptor::new(usize::MAX, 1)];
        let layout = compute_layout(&fields).unwrap();
        assert_eq!(layout.size, usize::MAX);
        assert_eq!(layout.trailing_padding, 0);
    }

    #[test]
    fn test_layout_properties_hold() {
        let cases: &[&[(usize, usize)]] = &[
            &[(1, 1), (8, 8), (1, 1)],
            &[(8, 8), (1, 1), (1, 1)],
            &[(2, 2), (4, 4), (1, 1), (8, 8)],
            &[(1, 1), (1, 1), (1, 1)],
            &[(16, 16), (3, 1), (4, 4)],
            &[(1, 8), (12, 4), (2, 2)],
        ];
        for &fields in cases {
            let layout = layout_of(fields);
            let mut end = 0;
            for slot in &layout.fields {
                assert!(slot.offset >= end, "fields overlap in {:?}", fields);
                assert_eq!(slot.offset % slot.align, 0, "misaligned in {:?}", fields);
                end = slot.end();
            }
            assert!(layout.size >= end);
            assert_eq!(layout.size % layout.align, 0);
        }
    }

    #[test]
    fn test_layout_is_deterministic() {
        let fields = [
            FieldDescriptor::new(2, 2),
            FieldDescriptor::new(8, 8),
            FieldDescriptor::new(1, 1),
        ];
        assert_eq!(
            compute_layout(&fields).unwrap(),
            compute_layout(&fields).unwrap()
        );
    }

    #[test]
    fn test_suggest_packing_recovers_space() {
        let fields = [
            FieldDescriptor::new(1, 1),
            FieldDescriptor::new(8, 8),
            FieldDescriptor::new(1, 1),
        ];
        let order = suggest_packing(&fields);
        assert_eq!(order, vec![1, 0, 2]);

        let packed: Vec<FieldDescriptor> = order.iter().map(|&i| fields[i]).collect();
        let layout = compute_layout(&packed).unwrap();
        assert_eq!(layout.size, 16);
        assert_eq!(layout.padding_total(), 6);
    }

    #[test]
    fn test_suggest_packing_is_stable() {
        let fields = [
            FieldDescriptor::new(4, 4),
            FieldDescriptor::new(1, 1),
            FieldDescriptor::new(4, 4),
        ];
        // Equal alignments keep declaration order: 0 before 2.
        assert_eq!(suggest_packing(&fields), vec![0, 2, 1]);
    }

    #[test]
    fn test_align_up() {
        assert_eq!(align_up(0, 8), 0);
        assert_eq!(align_up(1, 8), 8);
        assert_eq!(align_up(8, 8), 8);
        assert_eq!(align_up(9, 4), 12);
        assert_eq!(align_up(17, 1), 17);
    }
}
