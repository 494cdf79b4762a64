//! webgl-host: discovery and serving of precompiled Unity WebGL builds.
//!
//! The [`scan`] module walks a directory tree, recognizes build roots by their
//! marker files, and describes each build (name, URL path, size, compression).
//! The [`server`] module exposes those builds as an HTML index and serves the
//! build files with the headers browsers need to load them.

pub mod cli;
pub mod config;
pub mod error;
pub mod headers;
pub mod logging;
pub mod render;
pub mod scan;
pub mod server;
