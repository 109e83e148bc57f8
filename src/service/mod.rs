// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the layered store and its lookup engine.
//!
//! This module contains the concrete implementation of the `ConfigurationService`
//! trait, `LayeredConfig`, along with the pieces it is assembled from and a
//! process-wide instance.

pub mod alias_table;
pub mod global;
pub mod layered_config;
pub mod layered_store;
pub mod path_resolver;

// Re-export commonly used types
pub use alias_table::{AliasTable, Registration};
pub use layered_config::{LayeredConfig, LayeredConfigBuilder, MAX_FIND_DEPTH};
pub use layered_store::{Layer, LayeredStore};
pub use path_resolver::search_map;
