//! Static resources
//!
//! This module owns the served directory tree: resolving request paths
//! against it and producing directory listings.

pub mod listing;
pub mod resolver;

pub use resolver::{Resource, Webroot};
