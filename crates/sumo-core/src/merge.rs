//! Override-biased merge of component definitions
//!
//! Every component type implements [`Merge`] explicitly, field by field, using
//! the combinators in this module. The rule is the same everywhere: a
//! non-empty value on the overriding side replaces the base value, an empty
//! value leaves the base untouched.
//!
//! | Field shape            | Rule                                         |
//! |------------------------|----------------------------------------------|
//! | `String`               | non-empty override wins                      |
//! | `Option<scalar>`       | `Some` override wins                         |
//! | `Option<struct>`       | merged recursively when both sides are set   |
//! | nested struct          | merged recursively                           |
//! | `Vec<_>`               | non-empty override replaces the whole list   |
//! | `BTreeMap<String, _>`  | merged key-wise, override wins per key       |

use std::collections::BTreeMap;

/// A value that can absorb a more specific definition of itself.
pub trait Merge {
    /// Fold `other` onto `self`; non-empty fields of `other` win.
    fn merge_from(&mut self, other: &Self);
}

/// Merge `overlay` on top of `base` without touching either input.
pub fn merge<T: Merge + Clone>(base: &T, overlay: &T) -> T {
    let mut merged = base.clone();
    merged.merge_from(overlay);
    merged
}

pub fn merge_string(base: &mut String, other: &str) {
    if !other.is_empty() {
        *base = other.to_string();
    }
}

pub fn merge_option<T: Clone>(base: &mut Option<T>, other: &Option<T>) {
    if other.is_some() {
        base.clone_from(other);
    }
}

pub fn merge_nested<T: Merge + Clone>(base: &mut Option<T>, other: &Option<T>) {
    match (base.as_mut(), other) {
        (Some(current), Some(other)) => current.merge_from(other),
        (None, Some(other)) => *base = Some(other.clone()),
        (_, None) => {}
    }
}

pub fn merge_vec<T: Clone>(base: &mut Vec<T>, other: &[T]) {
    if !other.is_empty() {
        *base = other.to_vec();
    }
}

pub fn merge_map<V: Clone>(base: &mut BTreeMap<String, V>, other: &BTreeMap<String, V>) {
    for (key, value) in other {
        base.insert(key.clone(), value.clone());
    }
}
