//! bunsenId paths.
//!
//! A bunsenId is a dotted path into the value tree, optionally using bracketed
//! indices: `address.street`, `items[0].name` and `items.0.name` are all valid.
//! Parsing turns it into a [`Path`] of [`Seg`]ments.

use super::error::PathError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single segment in a bunsenId path.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seg {
    /// Object key access
    Key(String),
    /// Array index access
    Index(usize),
}

impl Seg {
    #[inline]
    pub fn key(k: impl Into<String>) -> Self {
        Seg::Key(k.into())
    }

    #[inline]
    pub fn index(i: usize) -> Self {
        Seg::Index(i)
    }

    /// The segment as an object key. Indices render as their decimal form.
    pub fn to_key(&self) -> String {
        match self {
            Seg::Key(k) => k.clone(),
            Seg::Index(i) => i.to_string(),
        }
    }
}

impl fmt::Display for Seg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seg::Key(k) => write!(f, "{}", k),
            Seg::Index(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for Seg {
    fn from(s: &str) -> Self {
        Seg::Key(s.to_owned())
    }
}

impl From<usize> for Seg {
    fn from(i: usize) -> Self {
        Seg::Index(i)
    }
}

/// A parsed bunsenId.
///
/// # Example
///
/// ```rust
/// use formstate::core::{Path, Seg};
///
/// let path: Path = "items[0].name".parse().unwrap();
/// assert_eq!(path.segments(), &[Seg::key("items"), Seg::index(0), Seg::key("name")]);
/// assert_eq!(path.to_string(), "items.0.name");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Path(Vec<Seg>);

impl Path {
    /// The empty path, addressing the whole tree.
    #[inline]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    #[inline]
    pub fn from_segments(segments: Vec<Seg>) -> Self {
        Self(segments)
    }

    /// Append a key segment (builder pattern).
    #[inline]
    pub fn key(mut self, k: impl Into<String>) -> Self {
        self.0.push(Seg::Key(k.into()));
        self
    }

    /// Append an index segment (builder pattern).
    #[inline]
    pub fn index(mut self, i: usize) -> Self {
        self.0.push(Seg::Index(i));
        self
    }

    #[inline]
    pub fn segments(&self) -> &[Seg] {
        &self.0
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a bunsenId.
    pub fn parse(bunsen_id: &str) -> Result<Self, PathError> {
        if bunsen_id.is_empty() {
            return Err(PathError::Empty);
        }

        let mut segments = Vec::new();
        let mut offset = 0;
        for part in bunsen_id.split('.') {
            parse_part(bunsen_id, part, offset, &mut segments)?;
            offset += part.len() + 1;
        }
        Ok(Self(segments))
    }
}

/// Parse one dot-separated part, e.g. `items`, `0` or `items[2][1]`.
fn parse_part(
    full: &str,
    part: &str,
    offset: usize,
    segments: &mut Vec<Seg>,
) -> Result<(), PathError> {
    let (name, mut rest) = match part.find('[') {
        Some(open) => part.split_at(open),
        None => (part, ""),
    };

    // `a..b`, `.a`, `a.` and `a.[0]`; only a leading `[0]` may omit the key
    if name.is_empty() && (rest.is_empty() || offset > 0) {
        return Err(PathError::EmptySegment {
            path: full.to_string(),
            position: offset,
        });
    }

    if !name.is_empty() {
        segments.push(numeric_segment(name).unwrap_or_else(|| Seg::Key(name.to_string())));
    }

    while !rest.is_empty() {
        let Some(stripped) = rest.strip_prefix('[') else {
            return Err(PathError::EmptySegment {
                path: full.to_string(),
                position: offset + part.len() - rest.len(),
            });
        };
        let Some(close) = stripped.find(']') else {
            return Err(PathError::UnterminatedIndex {
                path: full.to_string(),
            });
        };
        let index = &stripped[..close];
        match numeric_segment(index) {
            Some(seg) => segments.push(seg),
            None => {
                return Err(PathError::InvalidIndex {
                    path: full.to_string(),
                    index: index.to_string(),
                })
            }
        }
        rest = &stripped[close + 1..];
    }

    Ok(())
}

/// Classify an all-digit segment.
///
/// Only the canonical decimal form (`0`, or no leading zero) is an index, so
/// that it names the same field as [`Seg::to_key`]. Other digit strings such
/// as `007` are keys. `None` when `text` is not all digits.
fn numeric_segment(text: &str) -> Option<Seg> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let canonical = text == "0" || !text.starts_with('0');
    Some(match text.parse::<usize>() {
        Ok(i) if canonical => Seg::Index(i),
        _ => Seg::Key(text.to_string()),
    })
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}

impl FromIterator<Seg> for Path {
    fn from_iter<I: IntoIterator<Item = Seg>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Seg;
    type IntoIter = std::slice::Iter<'a, Seg>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
