//collections/mod.rs
// Small lookup helpers shared by the registry.

pub fn contains<T: PartialEq>(collection: &[T], value: &T) -> bool {
    collection.iter().any(|item| item == value)
}

/// Returns the stored element equal to `value`, so callers can hold the
/// canonical copy instead of their own.
pub fn find_first<'a, T: PartialEq>(collection: &'a [T], value: &T) -> Option<&'a T> {
    collection.iter().find(|item| *item == value)
}

/// Appends `value` unless an equal element is already present.
/// Returns `true` when it was inserted.
pub fn insert_unique<T: PartialEq>(collection: &mut Vec<T>, value: T) -> bool {
    if contains(collection, &value) {
        return false;
    }
    collection.push(value);
    true
}
