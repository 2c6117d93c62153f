//! Core types and trait definitions for the glyphcast frame store.
//!
//! This crate is deliberately free of HTTP, filesystem, and database
//! dependencies. All other crates depend on it; it depends on nothing
//! proprietary.

pub mod frame;
pub mod media;
pub mod store;
pub mod video;
