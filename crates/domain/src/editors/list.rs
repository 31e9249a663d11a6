//! Row editing shared by every list section.
//!
//! Editors never mutate the list they are given. Each operation returns the
//! whole new list, which the caller merges back as one section update.

use crate::error::DomainError;

/// Per-row editing for one list section.
pub trait ListEditor {
    type Item: Clone;
    type Field;

    /// List name used in errors and logs.
    const LIST: &'static str;

    /// Write one field into one row.
    fn apply_field(item: &mut Self::Item, field: Self::Field);

    /// Replace one field of the row at `index`; every other row is untouched.
    fn update(
        items: &[Self::Item],
        index: usize,
        field: Self::Field,
    ) -> Result<Vec<Self::Item>, DomainError> {
        replace_at(items, index, Self::LIST, |item| Self::apply_field(item, field))
    }

    /// Remove the row at `index`; later rows shift down by one.
    fn delete(items: &[Self::Item], index: usize) -> Result<Vec<Self::Item>, DomainError> {
        remove_at(items, index, Self::LIST)
    }
}

pub(crate) fn replace_at<T: Clone>(
    items: &[T],
    index: usize,
    list: &'static str,
    edit: impl FnOnce(&mut T),
) -> Result<Vec<T>, DomainError> {
    let mut next = items.to_vec();
    let row = next
        .get_mut(index)
        .ok_or_else(|| DomainError::index_out_of_range(list, index, items.len()))?;
    edit(row);
    Ok(next)
}

pub(crate) fn remove_at<T: Clone>(
    items: &[T],
    index: usize,
    list: &'static str,
) -> Result<Vec<T>, DomainError> {
    if index >= items.len() {
        return Err(DomainError::index_out_of_range(list, index, items.len()));
    }
    let mut next = items.to_vec();
    next.remove(index);
    Ok(next)
}

/// Append `item` built from a draft name, or do nothing when the name is empty.
///
/// On success the draft name is cleared.
pub(crate) fn append_named<T: Clone>(
    items: &[T],
    draft_name: &mut String,
    build: impl FnOnce(String) -> T,
) -> Option<Vec<T>> {
    if draft_name.is_empty() {
        return None;
    }
    let name = std::mem::take(draft_name);
    let mut next = items.to_vec();
    next.push(build(name));
    Some(next)
}
