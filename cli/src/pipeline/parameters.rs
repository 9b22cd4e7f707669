//! # Cmdlet Parameters (`pipeline::parameters`)
//!
//! File: cli/src/pipeline/parameters.rs
//!
//! The flat, ordered argument list handed to the runner script. Flags are
//! single elements, `-Name value` pairs are two adjacent elements. Nothing here
//! checks that pairs are complete; the list is transported as given.
//!
use crate::core::error::SqlciError;
use std::str::FromStr;

/// Name of the parameter selecting the SQL Change Automation module version.
pub const PRODUCT_VERSION_PARAMETER: &str = "-RequiredProductVersion";

/// Ordered cmdlet arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters(Vec<String>);

impl Parameters {
    /// Appends a `-Name value` pair as two elements.
    pub fn push_pair(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push(name.into());
        self.0.push(value.into());
    }

    /// Appends `-RequiredProductVersion <version>`.
    ///
    /// No option, or [`ProductVersionOption::Latest`], selects `Latest`.
    pub fn add_product_version(&mut self, option: Option<&ProductVersionOption>) {
        let version = match option {
            Some(ProductVersionOption::Specific(version)) => version.as_str(),
            Some(ProductVersionOption::Latest) | None => "Latest",
        };
        self.push_pair(PRODUCT_VERSION_PARAMETER, version);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<String>> for Parameters {
    fn from(tokens: Vec<String>) -> Self {
        Self(tokens)
    }
}

/// Which SQL Change Automation module version the runner script installs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductVersionOption {
    Latest,
    Specific(String),
}

impl FromStr for ProductVersionOption {
    type Err = SqlciError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.is_empty() {
            return Err(SqlciError::ArgumentParsing(
                "product version must not be empty".to_string(),
            ));
        }
        if value.eq_ignore_ascii_case("latest") {
            Ok(Self::Latest)
        } else {
            Ok(Self::Specific(value.to_string()))
        }
    }
}
