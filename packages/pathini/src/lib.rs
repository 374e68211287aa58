//! pathini: INI-style configuration trees with nested keys
//!
//! Configuration is an ordered forest. Each top-level node is a `[section]`,
//! and keys inside a section nest with `/`:
//!
//! ```text
//! [App]
//! window/width=800
//! window/height=600
//!
//! [Recent]
//! # full-line comments only
//! file=notes.txt
//! ```
//!
//! - `ConfigTree`: path-addressed get/set, load from and save to a file
//! - `KeyPath`: an owned sequence of key segments
//! - `Node`: one key, its optional value and its ordered children
//! - `TreeOptions`: how unopenable files and repeated loads are handled
//!
//! # Example
//!
//! ```rust
//! use pathini::ConfigTree;
//!
//! # fn main() -> pathini::Result<()> {
//! let dir = std::env::temp_dir().join("pathini-doc-example");
//! std::fs::create_dir_all(&dir).unwrap();
//! let file = dir.join("settings.ini");
//!
//! let mut tree = ConfigTree::new();
//! tree.set(["App", "window", "width"], "800")?;
//! tree.save_to(&file)?;
//!
//! let mut reloaded = ConfigTree::new();
//! reloaded.load_from(&file)?;
//! assert_eq!(reloaded.get(["App", "window", "width"])?, "800");
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for `ConfigTree`, `Node` and
//!   `TreeOptions`.

mod error;
mod format;
mod node;
mod options;
mod path;
mod tree;

pub use error::{Error, Result};
pub use node::Node;
pub use options::{LoadMode, OpenFailure, TreeOptions};
pub use path::KeyPath;
pub use tree::{ConfigTree, Entries};
