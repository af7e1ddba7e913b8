//! Shrubbery - a minimal static file server
//!
//! Core library for HTTP handling and webroot resolution.

pub mod config;
pub mod error;
pub mod http;
pub mod server;
pub mod webroot;
