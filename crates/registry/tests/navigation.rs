use elements_core::Registry;
use elements_registry::{Adjacent, NavLink, Navigator, Taxonomy, classify_provider};

fn link(provider: &str, component: &str) -> Option<NavLink> {
    Some(NavLink {
        provider: provider.into(),
        component: component.into(),
    })
}

fn load(json: &str) -> Registry {
    Registry::from_json_str(json).unwrap()
}

#[test]
fn test_provider_classification() {
    assert_eq!(classify_provider("stripe-logo", None), "logos");
    assert_eq!(classify_provider("theme-switcher-toggle", None), "theme");
    assert_eq!(classify_provider("clerk-middleware", None), "clerk");
    assert_eq!(classify_provider("clerk-sign-in", None), "clerk");
    assert_eq!(classify_provider("ai-chat", None), "ai-elements");
    assert_eq!(classify_provider("foobar-widget", None), "foobar");
}

#[test]
fn test_adjacency_crosses_provider_boundaries() {
    let registry = load(
        r#"[
            {"name": "alpha-one", "type": "registry:component"},
            {"name": "alpha-two", "type": "registry:component"},
            {"name": "beta-one", "type": "registry:component"}
        ]"#,
    );
    let navigator = Navigator::new(&registry);
    assert_eq!(&navigator.sorted_providers()[..2], &["alpha", "beta"]);

    assert_eq!(
        navigator.adjacent_components("alpha", "alpha-two"),
        Adjacent {
            previous: link("alpha", "alpha-one"),
            next: link("beta", "beta-one"),
        }
    );
    assert_eq!(
        navigator.adjacent_components("beta", "beta-one"),
        Adjacent {
            previous: link("alpha", "alpha-two"),
            next: None,
        }
    );
    assert_eq!(
        navigator.adjacent_components("alpha", "alpha-one"),
        Adjacent {
            previous: None,
            next: link("alpha", "alpha-two"),
        }
    );
}

#[test]
fn test_registry_order_within_provider() {
    let registry = load(
        r#"{
            "name": "elements",
            "homepage": "https://example.com",
            "items": [
                {"name": "vercel-logo", "type": "registry:component", "files": [{"path": "v.tsx", "content": "x"}]},
                {"name": "clerk-sign-in", "type": "registry:component"},
                {"name": "apple-logo", "type": "registry:component", "files": [{"path": "a.tsx", "content": "x"}]},
                {"name": "logos", "type": "registry:block", "registryDependencies": ["vercel-logo", "apple-logo"]}
            ]
        }"#,
    );
    let taxonomy = Taxonomy::new(&registry);
    assert_eq!(taxonomy.providers(), vec!["clerk", "logos"]);
    assert_eq!(taxonomy.bundles()[0].registry_dependencies.len(), 2);

    let navigator = Navigator::new(&registry);
    assert_eq!(
        navigator.adjacent_components("logos", "vercel-logo"),
        Adjacent {
            previous: link("clerk", "clerk-sign-in"),
            next: link("logos", "apple-logo"),
        }
    );
}

#[test]
fn test_provider_metadata_serializes_camel_case() {
    let registry = load(r#"[{"name": "github-stars"}, {"name": "github-contributions"}]"#);
    let meta = Taxonomy::new(&registry).provider_metadata("github");
    let value = serde_json::to_value(&meta).unwrap();
    assert_eq!(value["name"], "GitHub");
    assert_eq!(value["componentCount"], 2);
    assert!(value["brandColors"]["primary"].is_string());
}
