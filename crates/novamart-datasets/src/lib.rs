//! # NovaMart Datasets
//!
//! Loads the eleven CSV tables behind the marketing dashboard into typed,
//! immutable record collections.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │                DatasetRegistry                 │
//! │   (write-once cache: directory → bundle)       │
//! └────────────────────────────────────────────────┘
//!                        │ miss
//!                        ▼
//! ┌────────────────────────────────────────────────┐
//! │           DatasetBundle::read_dir              │
//! │  stage CSV → check columns → typed rows →      │
//! │  domain invariants                             │
//! └────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//! ┌────────────────────────────────────────────────┐
//! │     In-memory DuckDB (read_csv_auto + CAST)    │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use novamart_datasets::DatasetRegistry;
//!
//! let registry = DatasetRegistry::shared();
//! let bundle = registry.load("data")?;
//! println!("{} campaign rows", bundle.campaigns.len());
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bundle;
pub mod catalog;
pub mod error;
pub mod registry;

mod reader;
mod tables;

#[cfg(test)]
mod fixtures;

pub use bundle::DatasetBundle;
pub use catalog::Dataset;
pub use error::{LoadError, LoadErrorKind, Result};
pub use registry::{DatasetRegistry, SharedRegistry};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
