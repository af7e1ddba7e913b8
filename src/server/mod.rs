//! Accept loop and connection dispatch.

pub mod listener;

pub use listener::{run, Listener};
