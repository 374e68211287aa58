//! Behavior switches for loading and saving.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What `load` and `save` do when the file cannot be opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OpenFailure {
    /// Log a warning and report success, leaving tree and file untouched.
    #[default]
    Ignore,
    /// Return [`Error::Open`](crate::Error::Open).
    Report,
}

/// How `load` treats nodes already in the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LoadMode {
    /// Parse into the existing tree. Sections and keys already present are
    /// reused and their values overwritten; everything else is appended.
    #[default]
    Merge,
    /// Clear the tree before parsing.
    Replace,
}

/// Options fixed when a [`ConfigTree`](crate::ConfigTree) is constructed.
///
/// ```rust
/// use pathini::{ConfigTree, LoadMode, OpenFailure, TreeOptions};
///
/// let tree = ConfigTree::with_options(
///     TreeOptions::default()
///         .with_open_failure(OpenFailure::Report)
///         .with_load_mode(LoadMode::Replace),
/// );
/// assert_eq!(tree.options().load_mode, LoadMode::Replace);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TreeOptions {
    pub open_failure: OpenFailure,
    pub load_mode: LoadMode,
}

impl TreeOptions {
    #[must_use]
    pub fn with_open_failure(mut self, open_failure: OpenFailure) -> Self {
        self.open_failure = open_failure;
        self
    }

    #[must_use]
    pub fn with_load_mode(mut self, load_mode: LoadMode) -> Self {
        self.load_mode = load_mode;
        self
    }
}
