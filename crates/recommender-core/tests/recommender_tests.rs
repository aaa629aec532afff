//! End-to-end tests: configure a recommender, then resolve graph edges

mod common;

use common::{create_recommender, properties_provider};
use recommender_core::conflict::highest_version;
use recommender_core::{
    DeclaredDependency, DependencyRecommender, Error, ManifestKind, MapProvider, ModuleRef,
    ModuleSelector, RecommendationStrategies, RecommenderConfig, ResolveDetails,
    StaticManifestResolver, VersionMapping,
};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn declared(version: Option<&str>) -> DeclaredDependency {
    let selector = ModuleSelector::new("org.foo", "bar");
    let selector = match version {
        Some(v) => selector.with_version(v),
        None => selector,
    };
    DeclaredDependency::new("compile", selector)
}

fn edge(version: Option<&str>) -> ResolveDetails {
    ResolveDetails::new("compile", declared(version).selector)
}

fn with_recommendation(strategy: RecommendationStrategies, strict: bool) -> DependencyRecommender {
    let mut rec = create_recommender();
    rec.set_strategy(strategy);
    rec.set_strict_mode(strict);
    rec.properties_file(properties_provider("props", "org.foo:bar=2.0\n"))
        .unwrap();
    rec
}

#[test]
fn test_override_transitives_overrides_direct_when_not_strict() {
    let mut rec = with_recommendation(RecommendationStrategies::OverrideTransitives, false);
    rec.inspect_dependency(&declared(Some("1.0")));

    let mut details = edge(Some("1.0"));
    assert!(rec.resolve_edge(&mut details).unwrap());
    assert_eq!(details.effective_version(), Some("2.0"));
}

#[test]
fn test_override_transitives_strict_conflict() {
    let mut rec = with_recommendation(RecommendationStrategies::OverrideTransitives, true);
    rec.inspect_dependency(&declared(Some("1.0")));

    let mut details = edge(Some("1.0"));
    match rec.resolve_edge(&mut details) {
        Err(Error::StrictConflict {
            coordinate,
            declared,
            recommended,
        }) => {
            assert_eq!(coordinate, "org.foo:bar");
            assert_eq!(declared, "1.0");
            assert_eq!(recommended, "2.0");
        }
        other => panic!("expected strict conflict, got {other:?}"),
    }
}

#[test]
fn test_strict_conflict_does_not_block_other_coordinates() {
    let mut rec = with_recommendation(RecommendationStrategies::OverrideTransitives, true);
    rec.map(MapProvider::new([("org.other:lib", "5.0")])).unwrap();
    rec.inspect_dependency(&declared(Some("1.0")));

    assert!(rec.resolve_edge(&mut edge(Some("1.0"))).is_err());

    let mut other = ResolveDetails::new(
        "compile",
        ModuleSelector::new("org.other", "lib").with_version("4.0"),
    );
    assert!(rec.resolve_edge(&mut other).unwrap());
    assert_eq!(other.effective_version(), Some("5.0"));
}

#[test]
fn test_conflict_resolved_keeps_declared_version() {
    let mut rec = with_recommendation(RecommendationStrategies::ConflictResolved, false);
    rec.inspect_dependency(&declared(Some("1.0")));

    let mut details = edge(Some("1.0"));
    assert!(!rec.can_recommend_version(&details.requested));
    assert!(!rec.resolve_edge(&mut details).unwrap());
    assert_eq!(details.effective_version(), Some("1.0"));
}

#[test]
fn test_strict_mode_does_not_change_conflict_resolved() {
    let mut rec = with_recommendation(RecommendationStrategies::ConflictResolved, true);
    rec.inspect_dependency(&declared(Some("1.0")));

    let mut details = edge(Some("1.0"));
    assert!(!rec.resolve_edge(&mut details).unwrap());
    assert_eq!(details.effective_version(), Some("1.0"));
}

#[test]
fn test_conflict_resolved_fills_versionless_declaration() {
    let mut rec = with_recommendation(RecommendationStrategies::ConflictResolved, false);
    rec.inspect_dependency(&declared(None));

    let mut details = edge(None);
    assert!(rec.resolve_edge(&mut details).unwrap());
    assert_eq!(details.effective_version(), Some("2.0"));
}

#[test]
fn test_conflict_resolved_transitive_then_highest_wins() {
    let rec = with_recommendation(RecommendationStrategies::ConflictResolved, false);

    // Two transitive edges asking for different versions
    let mut first = ResolveDetails::new(
        "runtime",
        ModuleSelector::new("org.foo", "bar").with_version("1.5"),
    );
    let mut second = ResolveDetails::new(
        "runtime",
        ModuleSelector::new("org.foo", "bar").with_version("3.0"),
    );
    assert!(rec.resolve_edge(&mut first).unwrap());
    assert!(rec.resolve_edge(&mut second).unwrap());

    let versions = [first.effective_version(), second.effective_version()];
    assert_eq!(highest_version(versions.into_iter().flatten()), Some("2.0"));
}

#[test]
fn test_no_recommendation_leaves_edge_alone() {
    let rec = with_recommendation(RecommendationStrategies::OverrideTransitives, false);
    let mut details = ResolveDetails::new(
        "compile",
        ModuleSelector::new("org.none", "lib").with_version("1.0"),
    );
    assert!(!rec.resolve_edge(&mut details).unwrap());
    assert_eq!(details.target_version(), None);
}

#[test]
fn test_excluded_configuration_skips_inspection() {
    let mut rec = with_recommendation(RecommendationStrategies::ConflictResolved, false);
    rec.exclude_configurations(["compile"]);
    rec.inspect_dependency(&declared(Some("1.0")));

    // Inspection skipped, so the coordinate is not pinned for other scopes
    let mut runtime = ResolveDetails::new("runtime", ModuleSelector::new("org.foo", "bar"));
    assert!(rec.resolve_edge(&mut runtime).unwrap());

    let mut compile = edge(Some("1.0"));
    assert!(!rec.resolve_edge(&mut compile).unwrap());
}

#[test]
fn test_user_override_shadows_bom() {
    let bom = ModuleRef::new("org.platform", "bom").with_version("1.0");
    let resolver = StaticManifestResolver::new().with_manifest(
        ManifestKind::MavenBom,
        &bom,
        [("org.foo/bar", "1.0"), ("org.foo/baz", "1.0")]
            .into_iter()
            .collect::<VersionMapping>(),
    );
    let mut rec = DependencyRecommender::new(Arc::new(resolver));
    rec.maven_bom("org.platform:bom:1.0").unwrap();
    rec.map(MapProvider::new([("org.foo:bar", "2.0")])).unwrap();

    assert_eq!(rec.recommended_version("org.foo", "bar"), Some("2.0".to_string()));
    assert_eq!(rec.recommended_version("org.foo", "baz"), Some("1.0".to_string()));
    assert_eq!(rec.reasons().len(), 2);
}

#[test]
fn test_config_file_drives_recommender() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("recommender.toml");
    std::fs::write(
        &path,
        "strategy = \"override-transitives\"\nstrict-mode = true\nexcluded-configurations = [\"zinc\"]\n",
    )
    .unwrap();

    let config = RecommenderConfig::load(&path).unwrap();
    let mut rec =
        DependencyRecommender::with_config(config, Arc::new(StaticManifestResolver::new()));
    rec.properties_file(properties_provider("props", "org.foo:bar=2.0"))
        .unwrap();

    assert_eq!(rec.strategy(), RecommendationStrategies::OverrideTransitives);
    assert!(rec.is_strict_mode());
    assert!(rec.excluded_configurations().contains("zinc"));

    rec.inspect_dependency(&declared(Some("1.0")));
    assert!(rec.resolve_edge(&mut edge(Some("1.0"))).is_err());
}

#[test]
fn test_invalid_config_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("recommender.toml");
    std::fs::write(&path, "strategy = \"newest-wins\"\n").unwrap();

    let err = RecommenderConfig::load(&path).unwrap_err();
    assert!(matches!(err, Error::ConfigParse { .. }));
    assert!(err.is_configuration_error());
}

#[test]
fn test_parallel_resolution_passes() {
    let mut rec = with_recommendation(RecommendationStrategies::ConflictResolved, false);
    rec.inspect_dependency(&declared(None));
    let rec = Arc::new(rec);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let rec = Arc::clone(&rec);
            thread::spawn(move || {
                let mut details = edge(None);
                rec.resolve_edge(&mut details).unwrap();
                details.target_version().map(str::to_string)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("Thread should not panic"), Some("2.0".to_string()));
    }
}
