//! # portmap scanner
//!
//! Best-effort structural scanning of the source and target corpora.
//!
//! ## Pipeline
//!
//! ```text
//! source tree ──> FileScanner (.java, path order)
//!                   └─> SourceExtractor ──> SourceDeclaration (+ InterfaceSignature)
//!
//! target tree ──> FileScanner (.cj, path order)
//!                   └─> TargetInventory ──> name -> [TargetDeclaration]
//! ```
//!
//! Files that cannot be read or do not match the expected shapes are skipped;
//! only an unusable scan root is reported as an error.
//!
//! ## Example
//!
//! ```no_run
//! use portmap_scanner::{SourceConfig, SourceExtractor, TargetConfig, TargetInventory};
//! use std::path::Path;
//!
//! fn main() -> portmap_scanner::Result<()> {
//!     let sources = SourceExtractor::new(SourceConfig::default())
//!         .extract_tree(Path::new("commons-lang/src/main/java"))?;
//!     let targets = TargetInventory::scan(Path::new("src"), &TargetConfig::default())?;
//!
//!     println!("{} source types, {} target types", sources.len(), targets.len());
//!     Ok(())
//! }
//! ```

mod config;
mod error;
mod extract;
mod inventory;
pub mod patterns;
mod placeholders;
mod walk;

pub use config::{SourceConfig, TargetConfig};
pub use error::{Result, ScanError};
pub use extract::{parse_interface_signature, SourceExtractor};
pub use inventory::{declarations_in, TargetInventory};
pub use placeholders::{find_placeholders, placeholder_lines, PlaceholderHit};
pub use walk::{read_lossy, FileScanner};
