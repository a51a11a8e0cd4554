//! Provider classification and grouping queries over registry items.

use crate::metadata::{ProviderMetadata, provider_metadata};
use elements_core::{Registry, RegistryRecord};
use std::collections::BTreeSet;

/// Developer-tool components grouped under the `devtools` provider.
pub const DEVTOOLS_COMPONENTS: &[&str] = &[
    "og-image-explorer",
    "json-viewer",
    "api-response-viewer",
    "code-diff-viewer",
    "cli-output",
    "env-editor",
    "error-boundary-ui",
    "webhook-tester",
    "schema-viewer",
];

/// Provider slug for a registry item name.
///
/// Rules are applied in order and the first match wins; the fallback is the
/// name up to its first hyphen, so every name has a provider.
///
/// # Examples
///
/// ```
/// use elements_registry::taxonomy::classify_provider;
///
/// assert_eq!(classify_provider("stripe-logo", None), "logos");
/// assert_eq!(classify_provider("prompt-input", Some("chat")), "ai-elements");
/// assert_eq!(classify_provider("clerk-sign-in", None), "clerk");
/// ```
pub fn classify_provider<'a>(name: &'a str, subcategory: Option<&str>) -> &'a str {
    if name.ends_with("-logo") {
        return "logos";
    }
    if name.starts_with("theme-switcher") {
        return "theme";
    }
    match name {
        "tinte-editor" => return "tinte",
        "clerk-middleware" => return "clerk",
        "github-stars" | "github-contributions" => return "github",
        _ => {}
    }
    if DEVTOOLS_COMPONENTS.contains(&name) {
        return "devtools";
    }
    if subcategory.is_some_and(|s| !s.is_empty()) || name.starts_with("ai-") {
        return "ai-elements";
    }
    if name == "text-shimmer" {
        return "animations";
    }
    name.split('-').next().unwrap_or(name)
}

/// Read-only grouping queries over a loaded registry.
#[derive(Debug, Clone, Copy)]
pub struct Taxonomy<'a> {
    registry: &'a Registry,
}

impl<'a> Taxonomy<'a> {
    /// Wrap a registry.
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Provider of a single record.
    pub fn provider_of<'r>(&self, record: &'r RegistryRecord) -> &'r str {
        classify_provider(&record.name, record.subcategory())
    }

    /// Distinct providers of all non-bundle items, sorted.
    pub fn providers(&self) -> Vec<&'a str> {
        self.registry
            .items
            .iter()
            .filter(|item| !item.is_bundle())
            .map(|item| self.provider_of(item))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Items classified under `provider`, in registry order.
    pub fn components_by_provider(&self, provider: &str) -> Vec<&'a RegistryRecord> {
        self.registry
            .items
            .iter()
            .filter(|item| self.provider_of(item) == provider)
            .collect()
    }

    /// Items with the given subcategory, in registry order.
    pub fn components_by_subcategory(&self, subcategory: &str) -> Vec<&'a RegistryRecord> {
        self.registry
            .items
            .iter()
            .filter(|item| item.subcategory() == Some(subcategory))
            .collect()
    }

    /// Items tagged with `category`, in registry order.
    pub fn components_by_category(&self, category: &str) -> Vec<&'a RegistryRecord> {
        self.registry
            .items
            .iter()
            .filter(|item| item.categories.iter().any(|c| c == category))
            .collect()
    }

    /// Distinct non-empty subcategories, sorted.
    pub fn subcategories(&self) -> Vec<&'a str> {
        self.registry
            .items
            .iter()
            .filter_map(|item| item.subcategory())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Bundle items (blocks without files of their own).
    pub fn bundles(&self) -> Vec<&'a RegistryRecord> {
        self.registry
            .items
            .iter()
            .filter(|item| item.is_bundle())
            .collect()
    }

    /// Look up an item by name.
    pub fn find_component(&self, name: &str) -> Option<&'a RegistryRecord> {
        self.registry.find(name)
    }

    /// Display metadata for `provider` with its live component count.
    pub fn provider_metadata(&self, provider: &str) -> ProviderMetadata {
        provider_metadata(provider, self.components_by_provider(provider).len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elements_core::{BUNDLE_ITEM_TYPE, RegistryFile};

    fn item(name: &str) -> RegistryRecord {
        RegistryRecord {
            name: name.to_string(),
            item_type: "registry:component".to_string(),
            files: vec![RegistryFile::default()],
            ..Default::default()
        }
    }

    #[test]
    fn test_classification_rules() {
        assert_eq!(classify_provider("stripe-logo", None), "logos");
        assert_eq!(classify_provider("theme-switcher-toggle", None), "theme");
        assert_eq!(classify_provider("theme-switcher", None), "theme");
        assert_eq!(classify_provider("tinte-editor", None), "tinte");
        assert_eq!(classify_provider("clerk-middleware", None), "clerk");
        assert_eq!(classify_provider("clerk-sign-in", None), "clerk");
        assert_eq!(classify_provider("github-stars", None), "github");
        assert_eq!(classify_provider("github-contributions", None), "github");
        assert_eq!(classify_provider("json-viewer", None), "devtools");
        assert_eq!(classify_provider("webhook-tester", None), "devtools");
        assert_eq!(classify_provider("ai-chat", None), "ai-elements");
        assert_eq!(classify_provider("message", Some("chat")), "ai-elements");
        assert_eq!(classify_provider("text-shimmer", None), "animations");
        assert_eq!(classify_provider("foobar-widget", None), "foobar");
        assert_eq!(classify_provider("standalone", None), "standalone");
    }

    #[test]
    fn test_rule_priority() {
        // Earlier rules shadow the subcategory and prefix rules.
        assert_eq!(classify_provider("ai-logo", Some("chat")), "logos");
        assert_eq!(classify_provider("json-viewer", Some("tools")), "devtools");
        assert_eq!(classify_provider("text-shimmer", Some("")), "animations");
        assert_eq!(classify_provider("text-shimmer", Some("effects")), "ai-elements");
        assert_eq!(classify_provider("github-stars-logo", None), "logos");
    }

    #[test]
    fn test_providers_skip_bundles() {
        let bundle = RegistryRecord {
            name: "starter-kit".into(),
            item_type: BUNDLE_ITEM_TYPE.into(),
            ..Default::default()
        };
        let registry = Registry::from_items(vec![
            item("stripe-logo"),
            item("clerk-sign-in"),
            bundle,
            item("vercel-logo"),
        ]);
        let taxonomy = Taxonomy::new(&registry);
        assert_eq!(taxonomy.providers(), vec!["clerk", "logos"]);
        assert_eq!(taxonomy.bundles().len(), 1);
        let logos: Vec<_> = taxonomy
            .components_by_provider("logos")
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(logos, vec!["stripe-logo", "vercel-logo"]);
    }

    #[test]
    fn test_grouping_queries() {
        let mut message = item("message");
        message.subcategory = Some("chat".into());
        message.categories = vec!["ai".into()];
        let mut tool = item("tool-call");
        tool.subcategory = Some("agents".into());
        let mut stripe = item("stripe-logo");
        stripe.categories = vec!["payments".into(), "ai".into()];
        let registry = Registry::from_items(vec![message, tool, stripe]);
        let taxonomy = Taxonomy::new(&registry);

        assert_eq!(taxonomy.subcategories(), vec!["agents", "chat"]);
        assert_eq!(taxonomy.components_by_subcategory("chat")[0].name, "message");
        assert_eq!(taxonomy.components_by_category("ai").len(), 2);
        assert_eq!(taxonomy.provider_metadata("ai-elements").component_count, 2);
        assert_eq!(taxonomy.provider_metadata("logos").component_count, 1);
        assert!(taxonomy.find_component("tool-call").is_some());
        assert!(taxonomy.find_component("missing").is_none());
    }
}
