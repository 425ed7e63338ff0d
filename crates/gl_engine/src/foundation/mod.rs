//! Foundation module - Core utilities
//!
//! Currently only logging setup; everything else the engine needs comes
//! straight from the windowing and GL crates.

pub mod logging;
