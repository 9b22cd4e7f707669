//! # Package File Naming (`pipeline::package`)
//!
//! File: cli/src/pipeline/package.rs
//!
//! Build artifacts are NuGet packages named `<package>.<build number>.nupkg`.
//! This is only the naming convention; nothing here creates the package.
//!

/// Extension of every database build artifact.
pub const PACKAGE_EXTENSION: &str = "nupkg";

pub fn construct_package_file_name(package_name: &str, build_number: &str) -> String {
    format!("{}.{}.{}", package_name, build_number, PACKAGE_EXTENSION)
}
