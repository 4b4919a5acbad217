//! Circular offset indexing over ordered sequences.
//!
//! Every spatial move in the grid (next speech, left/right column) is expressed
//! as "the element `offset` positions away from this one, wrapping at the ends".
//! Wraparound is computed against the sequence's own length, so any offset
//! magnitude lands inside `[0, len - 1]`.

/// Error type for relative index lookups.
///
/// Both variants are programming errors: callers must not swallow them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelativeIndexError {
    #[error("invalid offset: base element not found in sequence")]
    BaseNotFound,
    #[error("invalid offset: index {index} escapes sequence of length {len}")]
    OutOfBounds { index: isize, len: usize },
}

/// Index `offset` positions away from `base` in a circular sequence of `len` elements.
///
/// `base` must be a valid index. A zero offset returns `base` unchanged.
pub fn relative_index(len: usize, base: usize, offset: isize) -> Result<usize, RelativeIndexError> {
    if base >= len {
        return Err(RelativeIndexError::BaseNotFound);
    }
    if offset == 0 {
        return Ok(base);
    }

    let len_i = len as isize;
    let index = (base as isize + offset % len_i).rem_euclid(len_i);

    if index < 0 || index >= len_i {
        return Err(RelativeIndexError::OutOfBounds { index, len });
    }
    Ok(index as usize)
}

/// Element `offset` positions away from `base` in `items`, wrapping at both ends.
pub fn relative_element<'a, T: PartialEq>(
    items: &'a [T],
    base: &T,
    offset: isize,
) -> Result<&'a T, RelativeIndexError> {
    let base_index = items
        .iter()
        .position(|item| item == base)
        .ok_or(RelativeIndexError::BaseNotFound)?;
    let index = relative_index(items.len(), base_index, offset)?;
    Ok(&items[index])
}

/// The element after `base`, wrapping to the first.
pub fn next_element<'a, T: PartialEq>(items: &'a [T], base: &T) -> Result<&'a T, RelativeIndexError> {
    relative_element(items, base, 1)
}

/// The element before `base`, wrapping to the last.
pub fn previous_element<'a, T: PartialEq>(
    items: &'a [T],
    base: &T,
) -> Result<&'a T, RelativeIndexError> {
    relative_element(items, base, -1)
}
