//! # portmap mapper
//!
//! Decides where and how a source declaration lives in the target tree:
//!
//! - [`TypeTable`] maps source types in captured signatures to target types.
//! - [`RoutingTable`] picks the target package (and directory) of a declaration.
//! - [`to_snake_case`] derives the file stem from a declaration name.

mod casing;
mod routing;
mod types;

pub use casing::to_snake_case;
pub use routing::{RouteRule, RoutingTable};
pub use types::{TypeTable, PRIMITIVE_TYPES, UNKNOWN_TYPE};
