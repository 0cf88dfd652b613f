use std::fs;
use std::path::{Path, PathBuf};

use dc20_content::{ClassLoader, ContentCatalog, ContentFactory, PathLoader};
use dc20_core::env::{ClassOracle, PathKind, PathOracle, SkillOracle};
use tempfile::TempDir;

fn bundled_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Copies the bundled data into a scratch directory.
fn scratch_copy() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    for entry in fs::read_dir(bundled_dir()).expect("bundled data dir") {
        let entry = entry.expect("dir entry");
        fs::copy(entry.path(), dir.path().join(entry.file_name())).expect("copy data file");
    }
    dir
}

#[test]
fn directory_and_bundled_data_agree() {
    let from_dir = ContentCatalog::from_dir(bundled_dir()).expect("data dir loads");
    let builtin = ContentCatalog::builtin().expect("bundled data parses");

    assert_eq!(from_dir.catalog().classes(), builtin.catalog().classes());
    assert_eq!(from_dir.catalog().traits(), builtin.catalog().traits());
    assert_eq!(from_dir.config(), builtin.config());
}

#[test]
fn factory_loads_every_catalog() {
    let dir = scratch_copy();
    let factory = ContentFactory::new(dir.path());

    let catalog = factory.load_catalog().expect("catalog loads");
    assert!(catalog.class("hunter").is_some());
    assert!(catalog.skill("influence").is_some());
    assert!(catalog.trade("arcana").is_some());
    let martial = catalog.path(PathKind::Martial).expect("martial path");
    assert_eq!(martial.bonuses_for(2).maneuvers_known, 2);
}

#[test]
fn engine_config_is_optional() {
    let dir = scratch_copy();
    fs::remove_file(dir.path().join("engine.toml")).expect("remove config");

    let content = ContentCatalog::from_dir(dir.path()).expect("loads without config");
    assert_eq!(content.config(), &dc20_core::EngineConfig::default());
}

#[test]
fn custom_config_is_read() {
    let dir = scratch_copy();
    fs::write(
        dir.path().join("engine.toml"),
        "cacheEnabled = false\ncacheTtlMs = 2000\n",
    )
    .expect("write config");

    let config = ContentFactory::new(dir.path()).load_config().expect("config loads");
    assert!(!config.cache_enabled);
    assert_eq!(config.cache_ttl_ms, 2000);
}

#[test]
fn missing_catalog_file_names_the_path() {
    let dir = scratch_copy();
    fs::remove_file(dir.path().join("talents.ron")).expect("remove talents");

    let err = ContentFactory::new(dir.path())
        .load_catalog()
        .expect_err("talents are required");
    let message = err.to_string();
    assert!(message.contains("Failed to read file"), "{message}");
    assert!(message.contains("talents.ron"), "{message}");
}

#[test]
fn malformed_ron_is_reported() {
    let err = ClassLoader::parse("(classes: [(id: \"broken\"")
        .expect_err("truncated RON must fail");
    assert!(err.to_string().contains("class catalog"), "{err}");
}

#[test]
fn duplicate_path_tables_are_rejected() {
    let ron = r#"(paths: [
        (kind: martial, name: "A", levels: []),
        (kind: martial, name: "B", levels: []),
    ])"#;
    let err = PathLoader::parse(ron).expect_err("duplicate kinds");
    assert!(err.to_string().contains("martial"), "{err}");
}

#[test]
fn minimal_class_file_loads_with_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("classes.ron");
    fs::write(
        &path,
        r#"(classes: [(id: "commoner", name: "Commoner", features: [(id: "grit", name: "Grit")])])"#,
    )
    .expect("write classes");

    let classes = ClassLoader::load(&path).expect("classes load");
    assert_eq!(classes.len(), 1);
    assert!(classes[0].progression.is_empty());
    assert_eq!(classes[0].features[0].level_gained, 1);
}
