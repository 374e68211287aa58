//! The configuration tree: path-addressed get/set plus file load and save.

use std::convert::Infallible;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::format;
use crate::node::{descend, descend_or_create, Node};
use crate::options::{LoadMode, OpenFailure, TreeOptions};
use crate::path::KeyPath;

/// An ordered forest of sections, each a tree of nested keys.
///
/// Paths are given as any sequence of segments: arrays, slices, vectors or a
/// [`KeyPath`]. The first segment names a section.
///
/// ```rust
/// use pathini::{key_path, ConfigTree};
///
/// let mut tree = ConfigTree::new();
/// tree.set(["App", "window", "width"], "800").unwrap();
/// tree.set(&key_path!("App/window/height"), "600").unwrap();
///
/// assert_eq!(tree.get(["App", "window", "width"]).unwrap(), "800");
/// assert!(tree.get(["App", "window"]).is_err());
/// assert_eq!(
///     tree.to_string(),
///     "[App]\nwindow=\nwindow/width=800\nwindow/height=600\n\n"
/// );
/// ```
///
/// The tree holds only owned data. Sharing one across threads for mutation
/// needs external synchronization such as a `Mutex`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConfigTree {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::node::unique_siblings")
    )]
    roots: Vec<Node>,
    #[cfg_attr(feature = "serde", serde(skip))]
    source: Option<PathBuf>,
    #[cfg_attr(feature = "serde", serde(default))]
    options: TreeOptions,
}

impl ConfigTree {
    /// Create an empty tree with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TreeOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Build a tree from text using the same rules as [`load`](Self::load).
    pub fn parse_str(text: &str) -> Self {
        let mut tree = Self::new();
        format::read_str(text, &mut tree.roots);
        tree
    }

    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// The path `load` and `save` fall back to when none is given.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Set the value at `path`, creating every missing node along the way.
    ///
    /// An existing node keeps its position and children; only its value is
    /// replaced.
    pub fn set<I, S>(&mut self, path: I, value: impl Into<String>) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let path = KeyPath::from_segments(path);
        let node = descend_or_create(&mut self.roots, path.segments()).ok_or(Error::EmptyPath)?;
        node.set_value(value);
        Ok(())
    }

    /// Get the value at `path`.
    ///
    /// Fails with [`Error::KeyNotFound`] when a segment is missing or when
    /// the node exists only as a container of deeper keys.
    pub fn get<I, S>(&self, path: I) -> Result<&str>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let path = KeyPath::from_segments(path);
        if path.is_empty() {
            return Err(Error::EmptyPath);
        }

        match descend(&self.roots, path.segments()).and_then(Node::value) {
            Some(value) => Ok(value),
            None => Err(Error::KeyNotFound { path }),
        }
    }

    /// Whether `get` would succeed for `path`.
    pub fn contains<I, S>(&self, path: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.node(path).is_some_and(|node| node.value().is_some())
    }

    /// The node at `path`, whether or not it carries a value.
    pub fn node<I, S>(&self, path: I) -> Option<&Node>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let path = KeyPath::from_segments(path);
        descend(&self.roots, path.segments())
    }

    /// Section names in order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.roots.iter().map(Node::key)
    }

    /// Every node carrying a value, depth-first in file order.
    pub fn entries(&self) -> Entries<'_> {
        Entries::new(&self.roots)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Drop every node. The remembered source path is kept.
    pub fn clear(&mut self) {
        self.roots.clear();
    }

    /// Remember `path`, then [`load`](Self::load) from it.
    pub fn load_from(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.source = Some(path.into());
        self.load()
    }

    /// Parse the remembered file into the tree.
    ///
    /// Under [`LoadMode::Replace`] the parsed file replaces the tree. The
    /// tree is only touched once the whole file has been read; a failure
    /// part way through leaves it as it was.
    pub fn load(&mut self) -> Result<()> {
        let path = self.source.clone().ok_or(Error::NoSourcePath)?;

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(source) => return self.open_failed(path, source),
        };

        let mut roots = match self.options.load_mode {
            LoadMode::Merge => self.roots.clone(),
            LoadMode::Replace => Vec::new(),
        };
        let summary = format::read_into(BufReader::new(file), &mut roots).map_err(|source| {
            Error::Io {
                path: path.clone(),
                source,
            }
        })?;
        self.roots = roots;

        debug!(
            path = %path.display(),
            sections = summary.sections,
            keys = summary.keys,
            "loaded configuration"
        );
        Ok(())
    }

    /// Remember `path`, then [`save`](Self::save) to it.
    pub fn save_to(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.source = Some(path.into());
        self.save()
    }

    /// Write the tree to the remembered file, replacing its contents.
    ///
    /// The file is truncated before writing; a failure part way through
    /// leaves it incomplete.
    pub fn save(&self) -> Result<()> {
        let path = self.source.clone().ok_or(Error::NoSourcePath)?;

        let file = match File::create(&path) {
            Ok(file) => file,
            Err(source) => return self.open_failed(path, source),
        };

        let mut out = BufWriter::new(file);
        format::write_tree(&mut out, &self.roots)
            .and_then(|()| out.flush())
            .map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;

        debug!(
            path = %path.display(),
            sections = self.roots.len(),
            "saved configuration"
        );
        Ok(())
    }

    fn open_failed(&self, path: PathBuf, source: io::Error) -> Result<()> {
        match self.options.open_failure {
            OpenFailure::Ignore => {
                warn!(
                    path = %path.display(),
                    error = %source,
                    "could not open configuration file, continuing"
                );
                Ok(())
            }
            OpenFailure::Report => Err(Error::Open { path, source }),
        }
    }
}

impl fmt::Display for ConfigTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Vec::new();
        format::write_tree(&mut buf, &self.roots).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&buf))
    }
}

impl FromStr for ConfigTree {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse_str(s))
    }
}

/// Iterator over `(KeyPath, &str)` for every node carrying a value.
pub struct Entries<'a> {
    stack: Vec<(KeyPath, &'a Node)>,
}

impl<'a> Entries<'a> {
    fn new(roots: &'a [Node]) -> Self {
        Self {
            stack: roots
                .iter()
                .rev()
                .map(|node| (KeyPath::from([node.key()]), node))
                .collect(),
        }
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = (KeyPath, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((path, node)) = self.stack.pop() {
            // Reverse so children pop in insertion order
            for child in node.children().iter().rev() {
                let mut child_path = path.clone();
                child_path.push(child.key());
                self.stack.push((child_path, child));
            }

            if let Some(value) = node.value() {
                return Some((path, value));
            }
        }
        None
    }
}
