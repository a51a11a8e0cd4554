//! Display metadata for providers.
//!
//! Well-known providers carry a curated entry; any other provider gets a
//! generic one derived from its slug.

use elements_core::case::title_case;
use serde::Serialize;

/// Brand colors shown alongside a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandColors {
    /// Primary brand color.
    pub primary: String,
    /// Secondary brand color.
    pub secondary: String,
}

/// Display information for a provider page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMetadata {
    /// Provider slug (e.g., "clerk").
    pub slug: String,
    /// Display name (e.g., "Clerk").
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Category tag used to group providers.
    pub category: String,
    /// Brand colors, for providers in the curated table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_colors: Option<BrandColors>,
    /// Number of components classified under this provider.
    pub component_count: usize,
}

struct KnownProvider {
    slug: &'static str,
    name: &'static str,
    description: &'static str,
    category: &'static str,
    colors: (&'static str, &'static str),
}

const KNOWN_PROVIDERS: &[KnownProvider] = &[
    KnownProvider {
        slug: "ai-elements",
        name: "AI Elements",
        description: "Building blocks for AI chat interfaces: messages, prompts, reasoning and tool calls.",
        category: "ai",
        colors: ("#000000", "#737373"),
    },
    KnownProvider {
        slug: "animations",
        name: "Animations",
        description: "Text and layout animation primitives.",
        category: "animation",
        colors: ("#8B5CF6", "#C4B5FD"),
    },
    KnownProvider {
        slug: "clerk",
        name: "Clerk",
        description: "Authentication and user management components for Clerk.",
        category: "auth",
        colors: ("#6C47FF", "#131316"),
    },
    KnownProvider {
        slug: "devtools",
        name: "Developer Tools",
        description: "Viewers, editors and inspectors for everyday developer workflows.",
        category: "developer-tools",
        colors: ("#0EA5E9", "#0F172A"),
    },
    KnownProvider {
        slug: "github",
        name: "GitHub",
        description: "Repository stars and contribution graphs from GitHub.",
        category: "developer-tools",
        colors: ("#181717", "#2DA44E"),
    },
    KnownProvider {
        slug: "logos",
        name: "Logos",
        description: "Brand logos with light, dark and grayscale variants.",
        category: "brand",
        colors: ("#000000", "#FFFFFF"),
    },
    KnownProvider {
        slug: "theme",
        name: "Theme",
        description: "Theme switchers for light, dark and system color modes.",
        category: "theming",
        colors: ("#F59E0B", "#1E293B"),
    },
    KnownProvider {
        slug: "tinte",
        name: "Tinte",
        description: "Theme editor for generating and previewing color palettes.",
        category: "theming",
        colors: ("#EC4899", "#831843"),
    },
];

/// Slugs of all providers with a curated entry, in table order.
pub fn known_providers() -> impl Iterator<Item = &'static str> {
    KNOWN_PROVIDERS.iter().map(|p| p.slug)
}

/// Metadata for `slug` with the given live component count.
///
/// # Examples
///
/// ```
/// use elements_registry::metadata::provider_metadata;
///
/// let clerk = provider_metadata("clerk", 3);
/// assert_eq!(clerk.name, "Clerk");
/// assert_eq!(clerk.component_count, 3);
///
/// let other = provider_metadata("acme-cloud", 0);
/// assert_eq!(other.name, "Acme Cloud");
/// assert!(other.brand_colors.is_none());
/// ```
pub fn provider_metadata(slug: &str, component_count: usize) -> ProviderMetadata {
    match KNOWN_PROVIDERS.iter().find(|p| p.slug == slug) {
        Some(known) => ProviderMetadata {
            slug: slug.to_string(),
            name: known.name.to_string(),
            description: known.description.to_string(),
            category: known.category.to_string(),
            brand_colors: Some(BrandColors {
                primary: known.colors.0.to_string(),
                secondary: known.colors.1.to_string(),
            }),
            component_count,
        },
        None => {
            let name = title_case(slug);
            ProviderMetadata {
                slug: slug.to_string(),
                description: format!("Components for {name}."),
                name,
                category: "components".to_string(),
                brand_colors: None,
                component_count,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_table_is_sorted_and_unique() {
        let slugs: Vec<_> = known_providers().collect();
        let mut sorted = slugs.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(slugs, sorted);
    }

    #[test]
    fn test_known_provider_entry() {
        let meta = provider_metadata("logos", 12);
        assert_eq!(meta.category, "brand");
        assert_eq!(meta.component_count, 12);
        assert!(meta.brand_colors.is_some());
        assert!(known_providers().any(|slug| slug == "logos"));
        assert!(!known_providers().any(|slug| slug == "stripe"));
    }

    #[test]
    fn test_fallback_entry() {
        let meta = provider_metadata("supabase", 2);
        assert_eq!(meta.name, "Supabase");
        assert_eq!(meta.description, "Components for Supabase.");
        assert_eq!(meta.category, "components");
        assert_eq!(meta.component_count, 2);
    }
}
