//! Path-addressed updates of an [`ImmutableValue`].
//!
//! Both operations are pure: they return a new tree and leave the input
//! untouched. Only the containers along the addressed path are rebuilt; every
//! other subtree is shared with the input.

use super::path::{Path, Seg};
use super::value::ImmutableValue;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Largest number of nulls a single write may pad an array with.
///
/// A write whose index lies further past the end of the array is dropped and
/// the tree is returned unchanged.
pub const MAX_ARRAY_PADDING: usize = 1024;

/// Look up the node at `path`.
pub fn get_at_path<'a>(tree: &'a ImmutableValue, path: &Path) -> Option<&'a ImmutableValue> {
    path.segments()
        .iter()
        .try_fold(tree, |node, seg| match (node, seg) {
            (ImmutableValue::Object(fields), seg) => fields.get(&seg.to_key()),
            (ImmutableValue::Array(items), Seg::Index(i)) => items.get(*i),
            _ => None,
        })
}

/// Return a copy of `tree` with `value` stored at `path`.
///
/// Missing intermediate containers are created: an array when the following
/// segment is an index, an object otherwise. A scalar sitting where a
/// container is needed gets replaced. Writing past the end of an array pads
/// the gap with nulls, up to [`MAX_ARRAY_PADDING`] of them; an index beyond
/// that leaves `tree` as is.
///
/// # Example
///
/// ```rust
/// use formstate::core::{get_at_path, set_at_path, Path};
/// use formstate::ImmutableValue;
/// use serde_json::json;
///
/// let tree = ImmutableValue::from(json!({"keep": {"x": 1}}));
/// let path: Path = "foo.bar".parse().unwrap();
/// let next = set_at_path(&tree, &path, ImmutableValue::from(false));
///
/// assert_eq!(get_at_path(&next, &path), Some(&ImmutableValue::from(false)));
/// assert!(next.get("keep").unwrap().ptr_eq(tree.get("keep").unwrap()));
/// ```
pub fn set_at_path(tree: &ImmutableValue, path: &Path, value: ImmutableValue) -> ImmutableValue {
    match set_in(tree, path.segments(), value) {
        Some(next) => next,
        None => {
            tracing::debug!(path = %path, "index out of reach, write dropped");
            tree.clone()
        }
    }
}

/// `None` when an index is too far past the end of its array.
fn set_in(node: &ImmutableValue, segs: &[Seg], value: ImmutableValue) -> Option<ImmutableValue> {
    let Some((head, rest)) = segs.split_first() else {
        return Some(value);
    };

    match (node, head) {
        (ImmutableValue::Array(items), Seg::Index(i)) => {
            let i = *i;
            if i.saturating_sub(items.len()) > MAX_ARRAY_PADDING {
                return None;
            }
            let mut items = Vec::clone(items);
            if items.len() <= i {
                items.resize(i + 1, ImmutableValue::Null);
            }
            let updated = set_in(&items[i], rest, value)?;
            items[i] = updated;
            Some(ImmutableValue::Array(Arc::new(items)))
        }
        (ImmutableValue::Object(fields), seg) => {
            let key = seg.to_key();
            let child = fields.get(&key).cloned().unwrap_or_default();
            let updated = set_in(&child, rest, value)?;
            let mut fields = BTreeMap::clone(fields);
            fields.insert(key, updated);
            Some(ImmutableValue::Object(Arc::new(fields)))
        }
        (_, Seg::Index(_)) => set_in(&ImmutableValue::empty_array(), segs, value),
        (_, Seg::Key(_)) => set_in(&ImmutableValue::empty_object(), segs, value),
    }
}

/// Return a copy of `tree` without the node at `path`.
///
/// A path that does not resolve leaves the tree as is, identity included.
/// Removing an array element shifts the following elements down.
pub fn unset_at_path(tree: &ImmutableValue, path: &Path) -> ImmutableValue {
    if path.is_root() {
        return ImmutableValue::Null;
    }
    unset_in(tree, path.segments()).unwrap_or_else(|| tree.clone())
}

/// `None` when nothing under `node` changed.
fn unset_in(node: &ImmutableValue, segs: &[Seg]) -> Option<ImmutableValue> {
    let (head, rest) = segs.split_first()?;

    match (node, head) {
        (ImmutableValue::Array(items), Seg::Index(i)) => {
            let child = items.get(*i)?;
            let mut items = Vec::clone(items);
            if rest.is_empty() {
                items.remove(*i);
            } else {
                items[*i] = unset_in(child, rest)?;
            }
            Some(ImmutableValue::Array(Arc::new(items)))
        }
        (ImmutableValue::Object(fields), seg) => {
            let key = seg.to_key();
            let child = fields.get(&key)?;
            let replacement = if rest.is_empty() {
                None
            } else {
                Some(unset_in(child, rest)?)
            };
            let mut fields = BTreeMap::clone(fields);
            match replacement {
                Some(child) => fields.insert(key, child),
                None => fields.remove(&key),
            };
            Some(ImmutableValue::Object(Arc::new(fields)))
        }
        _ => None,
    }
}
