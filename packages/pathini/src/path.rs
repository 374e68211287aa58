//! Key paths: the sequence of segments addressing a node from its section down.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// An owned sequence of key segments.
///
/// The first segment names a section, each later segment names a child of the
/// previous node. Segments are free text; nothing is validated or normalized,
/// so an empty segment is a legitimate (if unusual) key.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Split a slash-delimited key into segments.
    ///
    /// This is the same splitting applied to keys read from a file, so empty
    /// segments are kept rather than collapsed:
    ///
    /// ```rust
    /// use pathini::KeyPath;
    ///
    /// assert_eq!(KeyPath::split("window/width").len(), 2);
    /// assert_eq!(KeyPath::split("a//b").len(), 3);
    /// ```
    pub fn split(s: &str) -> Self {
        Self {
            segments: s.split('/').map(str::to_string).collect(),
        }
    }

    /// Create a path from already separated segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(|s| s.as_ref().to_string())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.segments.iter()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Append a segment in place.
    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// Join this path with another.
    #[must_use]
    pub fn join(&self, other: &KeyPath) -> KeyPath {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        KeyPath { segments }
    }

    /// The path without its last segment, or `None` for an empty path.
    #[must_use]
    pub fn parent(&self) -> Option<KeyPath> {
        let (_, rest) = self.segments.split_last()?;
        Some(KeyPath {
            segments: rest.to_vec(),
        })
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl FromStr for KeyPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::split(s))
    }
}

impl std::ops::Index<usize> for KeyPath {
    type Output = String;

    fn index(&self, i: usize) -> &Self::Output {
        &self.segments[i]
    }
}

impl<const N: usize> From<[&str; N]> for KeyPath {
    fn from(segments: [&str; N]) -> Self {
        Self::from_segments(segments)
    }
}

impl From<Vec<String>> for KeyPath {
    fn from(segments: Vec<String>) -> Self {
        Self { segments }
    }
}

impl<S: AsRef<str>> FromIterator<S> for KeyPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_segments(iter)
    }
}

impl<'a> IntoIterator for &'a KeyPath {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl IntoIterator for KeyPath {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

/// Build a [`KeyPath`] from a slash-delimited literal.
///
/// # Example
///
/// ```rust
/// use pathini::key_path;
///
/// let p = key_path!("App/window/width");
/// assert_eq!(p.len(), 3);
/// assert_eq!(&p[0], "App");
/// ```
#[macro_export]
macro_rules! key_path {
    ($s:expr) => {
        $crate::KeyPath::split($s)
    };
}
