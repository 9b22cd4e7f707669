//! # sqlci Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational infrastructure shared by the pipeline and the command handlers:
//! - `config`: configuration loading, merging, validation and interpreter resolution
//! - `error`: the `SqlciError` taxonomy and the application `Result` alias
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{Result, SqlciError}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
