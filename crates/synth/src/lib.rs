//! # portmap synth
//!
//! Skeleton generation for declarations that have no target counterpart yet.
//!
//! ```text
//! SourceDeclaration ──> RoutingTable (package + path)
//!                   └─> StubRenderer (shape by kind)
//!                         └─> create-new write (existing files are left alone)
//! ```
//!
//! Generated classes throw from their constructor with a message containing
//! the placeholder marker, so they compile but fail loudly and keep their
//! declaration classified as planned.

mod error;
mod render;
mod repackage;
mod writer;

pub use error::{Result, SynthError};
pub use render::{StubRenderer, StubStyle};
pub use repackage::{package_for_dir, repackage_tree, rewrite_package_line, RepackageReport};
pub use writer::{PlannedStub, StubSynthesizer, SynthReport};
