#![deny(missing_docs)]
//! Elements registry: provider taxonomy, provider metadata and adjacency
//! navigation over the component registry.
//!
//! All queries are pure reads over an immutable [`elements_core::Registry`].

/// Provider display metadata.
pub mod metadata;
/// Previous/next navigation.
pub mod navigation;
/// Provider classification and grouping queries.
pub mod taxonomy;

pub use metadata::{BrandColors, ProviderMetadata, provider_metadata};
pub use navigation::{Adjacent, NavLink, Navigator};
pub use taxonomy::{Taxonomy, classify_provider};
