//! # sqlci Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Organizational entry point for filesystem helpers. Functionality lives in
//! submodules and is imported from there, e.g.
//! `crate::common::fs::io::ensure_dir_exists`.
//!

/// Basic file I/O (`ensure_dir_exists`, `read_file_to_string`).
pub mod io;
