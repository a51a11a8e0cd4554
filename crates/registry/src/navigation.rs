//! Previous/next navigation across providers.
//!
//! Providers are ordered with non-empty providers first, then by slug.
//! Components keep their registry order within a provider. Moving past the
//! end of a provider continues with the next non-empty one.

use crate::metadata::known_providers;
use crate::taxonomy::Taxonomy;
use elements_core::{Registry, RegistryRecord};
use serde::Serialize;
use std::collections::BTreeSet;

/// A component reachable from a navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    /// Provider slug.
    pub provider: String,
    /// Component name.
    pub component: String,
}

/// Neighbours of a component in the global ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Adjacent {
    /// Preceding component, `None` for the first component overall.
    pub previous: Option<NavLink>,
    /// Following component, `None` for the last component overall.
    pub next: Option<NavLink>,
}

/// Precomputed provider ordering over a registry.
#[derive(Debug, Clone)]
pub struct Navigator<'a> {
    taxonomy: Taxonomy<'a>,
    providers: Vec<(&'a str, Vec<&'a RegistryRecord>)>,
}

impl<'a> Navigator<'a> {
    /// Build the ordering for `registry`.
    pub fn new(registry: &'a Registry) -> Self {
        let taxonomy = Taxonomy::new(registry);
        let mut slugs: BTreeSet<&'a str> = taxonomy.providers().into_iter().collect();
        for slug in known_providers() {
            slugs.insert(slug);
        }
        let mut providers: Vec<_> = slugs
            .into_iter()
            .map(|slug| (slug, taxonomy.components_by_provider(slug)))
            .collect();
        providers.sort_by_key(|(slug, components)| (components.is_empty(), *slug));
        log::debug!("navigation over {} providers", providers.len());
        Self {
            taxonomy,
            providers,
        }
    }

    /// Taxonomy the ordering was built from.
    pub fn taxonomy(&self) -> &Taxonomy<'a> {
        &self.taxonomy
    }

    /// Provider slugs, non-empty providers first, each group alphabetical.
    pub fn sorted_providers(&self) -> Vec<&'a str> {
        self.providers.iter().map(|(slug, _)| *slug).collect()
    }

    /// Previous and next component of `component` within `provider`.
    ///
    /// Unknown providers or components yield no neighbours.
    pub fn adjacent_components(&self, provider: &str, component: &str) -> Adjacent {
        let Some(position) = self.providers.iter().position(|(slug, _)| *slug == provider) else {
            return Adjacent::default();
        };
        let (slug, components) = &self.providers[position];
        let Some(index) = components.iter().position(|c| c.name == component) else {
            return Adjacent::default();
        };

        let previous = match index.checked_sub(1) {
            Some(prev) => Some(link(slug, components[prev])),
            None => self.providers[..position]
                .iter()
                .rev()
                .find_map(|(slug, components)| Some(link(slug, components.last()?))),
        };
        let next = match components.get(index + 1) {
            Some(next) => Some(link(slug, next)),
            None => self.providers[position + 1..]
                .iter()
                .find_map(|(slug, components)| Some(link(slug, components.first()?))),
        };
        Adjacent { previous, next }
    }
}

fn link(provider: &str, record: &RegistryRecord) -> NavLink {
    NavLink {
        provider: provider.to_string(),
        component: record.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(names: &[&str]) -> Registry {
        Registry::from_items(
            names
                .iter()
                .map(|name| RegistryRecord {
                    name: name.to_string(),
                    ..Default::default()
                })
                .collect(),
        )
    }

    #[test]
    fn test_empty_known_providers_sort_last() {
        let registry = registry(&["zeta-one", "stripe-logo"]);
        let navigator = Navigator::new(&registry);
        let providers = navigator.sorted_providers();
        assert_eq!(&providers[..2], &["logos", "zeta"]);
        assert_eq!(providers[2], "ai-elements");
        assert_eq!(providers.len(), 2 + 7);
    }

    #[test]
    fn test_unknown_component_has_no_neighbours() {
        let registry = registry(&["alpha-one"]);
        let navigator = Navigator::new(&registry);
        assert_eq!(navigator.adjacent_components("alpha", "alpha-two"), Adjacent::default());
        assert_eq!(navigator.adjacent_components("nope", "alpha-one"), Adjacent::default());
        assert_eq!(navigator.adjacent_components("alpha", "alpha-one"), Adjacent::default());
    }
}
