//! # Lens Indexer
//!
//! Fresh, stateless enumeration of a source tree.
//!
//! ## Pipeline
//!
//! ```text
//! Directory
//!     │
//!     ├──> SourceRoot (exists + is a directory, checked on every call)
//!     │
//!     ├──> File Scanner (.gitignore aware, extension allow-list)
//!     │      └─> CodeFile[] in name order
//!     │
//!     └──> Text reader (binary / unreadable → empty)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use lens_indexer::{FileScanner, SourceRoot};
//!
//! let root = SourceRoot::open("/path/to/project")?;
//! for file in FileScanner::new(root.path()).scan() {
//!     println!("{} ({} chars)", file.relative, file.read_text().len());
//! }
//! # Ok::<(), lens_indexer::IndexerError>(())
//! ```
//!
//! Nothing is cached: every scan walks the tree again.

mod error;
mod root;
mod scanner;
mod text;

pub use error::{IndexerError, Result};
pub use root::SourceRoot;
pub use scanner::{list_code_files, CodeFile, FileScanner, ScanOptions};
pub use text::{char_prefix, decode_source_bytes, read_source_text, read_window};
