//! Integration tests for loading style configurations from disk.
//!
//! These exercise the public API end to end: format detection, parsing,
//! validation, re-serialization and content path checks, using the fixture
//! files under `tests/fixtures/`.

use std::fs;
use std::path::{Path, PathBuf};

use stylecfg_core::{
    ColorToken, ConfigError, ConfigFormat, ConfigLoader, StyleConfig, ValidationMode,
};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_fixture(name: &str) -> StyleConfig {
    ConfigLoader::new()
        .load(fixture(name))
        .expect("fixture must load")
}

fn families(cfg: &StyleConfig, alias: &str) -> Vec<String> {
    cfg.font_stack(alias)
        .unwrap_or_else(|| panic!("alias {alias} must exist"))
        .families()
        .to_vec()
}

// ── Reference configuration ───────────────────────────────────────────────────

#[test]
fn test_reference_content_globs() {
    let cfg = load_fixture("stylecfg.toml");

    assert_eq!(
        cfg.content_globs(),
        [
            "./template/**/*.html",
            "./app/**/*.py",
            "./static/css/input.css"
        ]
    );
}

#[test]
fn test_reference_font_aliases() {
    let cfg = load_fixture("stylecfg.toml");

    assert_eq!(cfg.font_aliases().len(), 2);
    assert_eq!(families(&cfg, "poppins"), ["Poppins", "sans-serif"]);
    assert_eq!(families(&cfg, "yusei"), ["Yusei Magic", "sans-serif"]);
}

#[test]
fn test_reference_semantic_colors() {
    let cfg = load_fixture("stylecfg.toml");

    assert_eq!(cfg.semantic_colors().len(), 5);
    for role in ["primary", "secondary", "accent", "status", "bg"] {
        let token = cfg.color(role).expect("role must exist");
        assert_eq!(token, &ColorToken::var(format!("color-{role}")));
        assert_eq!(token.to_string(), format!("var(--color-{role})"));
    }
}

#[test]
fn test_reference_has_no_plugins() {
    let cfg = load_fixture("stylecfg.toml");
    assert!(cfg.plugins().is_empty());
}

#[test]
fn test_json_fixture_matches_toml_fixture() {
    assert_eq!(load_fixture("stylecfg.json"), load_fixture("stylecfg.toml"));
}

#[test]
fn test_required_custom_properties() {
    let cfg = load_fixture("stylecfg.toml");

    let props: Vec<String> = cfg.required_custom_properties().into_iter().collect();

    assert_eq!(
        props,
        [
            "--color-accent",
            "--color-bg",
            "--color-primary",
            "--color-secondary",
            "--color-status"
        ]
    );
}

// ── Round trip ────────────────────────────────────────────────────────────────

#[test]
fn test_reference_round_trips_through_both_formats() {
    let original = load_fixture("stylecfg.toml");

    for format in [ConfigFormat::Toml, ConfigFormat::Json] {
        // Act
        let text = original.render(format).expect("render");
        let reloaded = ConfigLoader::new()
            .load_str(&text, format)
            .unwrap_or_else(|e| panic!("reload {format}: {e}\n{text}"));

        // Assert
        assert_eq!(reloaded, original, "{format} round trip");
        assert_eq!(reloaded.content_globs(), original.content_globs());
    }
}

#[test]
fn test_round_trip_keeps_negated_globs_and_plugins() {
    let text = r#"
content = ["./app/**/*.py", "!./app/migrations/**"]
plugins = ["typography", "forms"]

[theme.extend.colors]
bg = "var(--color-bg, #ffffff)"
"#;
    let original = ConfigLoader::new()
        .load_str(text, ConfigFormat::Toml)
        .expect("load");

    let rendered = original.render(ConfigFormat::Toml).expect("render");
    let reloaded = ConfigLoader::new()
        .load_str(&rendered, ConfigFormat::Toml)
        .expect("reload");

    assert_eq!(reloaded, original);
    assert_eq!(reloaded.plugins().len(), 2);
}

// ── Failures ──────────────────────────────────────────────────────────────────

#[test]
fn test_missing_content_key_is_malformed() {
    let err = ConfigLoader::new()
        .load(fixture("missing_content.toml"))
        .unwrap_err();

    match err {
        ConfigError::MalformedConfig { key, .. } => assert_eq!(key, "content"),
        other => panic!("expected MalformedConfig, got {other:?}"),
    }
}

#[test]
fn test_empty_font_stack_fails_in_both_modes() {
    for mode in [ValidationMode::Strict, ValidationMode::Lenient] {
        let err = ConfigLoader::new()
            .with_mode(mode)
            .load(fixture("empty_font_stack.toml"))
            .unwrap_err();
        assert_eq!(err.key(), Some("theme.extend.fontFamily.poppins"), "{mode:?}");
    }
}

#[test]
fn test_literal_colors_rejected_when_strict() {
    let err = ConfigLoader::new()
        .load(fixture("literal_colors.toml"))
        .unwrap_err();

    assert_eq!(err.key(), Some("theme.extend.colors.accent"));
}

#[test]
fn test_uppercase_var_reference_accepted_when_strict() {
    let text = r#"
content = ["./template/**/*.html"]

[theme.extend.colors]
bg = "VAR(--color-bg)"
"#;

    let config = ConfigLoader::new()
        .load_str(text, ConfigFormat::Toml)
        .expect("strict load");

    assert_eq!(config.color("bg"), Some(&ColorToken::var("color-bg")));
}

#[test]
fn test_literal_colors_accepted_with_warnings_when_lenient() {
    let report = ConfigLoader::new()
        .with_mode(ValidationMode::Lenient)
        .load_report(fixture("literal_colors.toml"))
        .expect("lenient load");

    let keys: Vec<&str> = report.warnings.iter().map(|w| w.key.as_str()).collect();
    assert_eq!(keys, ["theme.extend.colors.accent"]);
    assert_eq!(
        report.config.color("accent"),
        Some(&ColorToken::Literal("#f59e0b".to_string()))
    );
    assert_eq!(report.source, Some(fixture("literal_colors.toml")));
}

#[test]
fn test_duplicate_json_role_is_malformed() {
    let err = ConfigLoader::new()
        .with_mode(ValidationMode::Lenient)
        .load(fixture("duplicate_role.json"))
        .unwrap_err();

    assert_eq!(err.key(), Some("theme.extend.colors.primary"));
}

#[test]
fn test_missing_config_file() {
    let path = fixture("does_not_exist.toml");

    let err = ConfigLoader::new().load(&path).unwrap_err();

    match err {
        ConfigError::MissingFile { path: reported } => assert_eq!(reported, path),
        other => panic!("expected MissingFile, got {other:?}"),
    }
}

#[test]
fn test_missing_file_wins_over_unknown_extension() {
    let path = fixture("style.yaml");

    let err = ConfigLoader::new().load(&path).unwrap_err();

    match err {
        ConfigError::MissingFile { path: reported } => assert_eq!(reported, path),
        other => panic!("expected MissingFile, got {other:?}"),
    }
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tailwind.config.js");
    fs::write(&path, "module.exports = {}\n").expect("write config");

    let err = ConfigLoader::new().load(&path).unwrap_err();

    assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
}

// ── Content paths ─────────────────────────────────────────────────────────────

fn write_project(root: &Path) -> PathBuf {
    let config = root.join("stylecfg.toml");
    fs::copy(fixture("stylecfg.toml"), &config).expect("copy fixture");
    for file in [
        "template/index.html",
        "template/pos/orders.html",
        "template/pos/notes.txt",
        "app/views.py",
        "app/management/commands/seed.py",
        "static/css/input.css",
        "static/css/output.css",
    ] {
        let path = root.join(file);
        fs::create_dir_all(path.parent().expect("has parent")).expect("mkdir");
        fs::write(&path, "").expect("write");
    }
    config
}

#[test]
fn test_literal_content_path_checked_only_when_enabled() {
    // Arrange: a project without static/css/input.css
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_project(dir.path());
    fs::remove_file(dir.path().join("static/css/input.css")).expect("remove");

    // Act / Assert: default loader does not look at content paths
    assert!(ConfigLoader::new().load(&config).is_ok());

    let err = ConfigLoader::new()
        .check_content_paths(true)
        .load(&config)
        .unwrap_err();
    match err {
        ConfigError::MissingFile { path } => {
            assert_eq!(path, dir.path().join("static/css/input.css"))
        }
        other => panic!("expected MissingFile, got {other:?}"),
    }
}

#[test]
fn test_literal_content_path_present_passes_check() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_project(dir.path());

    let result = ConfigLoader::new().check_content_paths(true).load(&config);

    assert!(result.is_ok(), "{result:?}");
}

#[test]
fn test_explicit_base_dir_overrides_config_dir() {
    let project = tempfile::tempdir().expect("tempdir");
    write_project(project.path());
    let elsewhere = tempfile::tempdir().expect("tempdir");

    let err = ConfigLoader::new()
        .check_content_paths(true)
        .with_base_dir(elsewhere.path())
        .load(project.path().join("stylecfg.toml"))
        .unwrap_err();

    assert!(matches!(err, ConfigError::MissingFile { .. }));
}

#[test]
fn test_enumerate_lists_matched_files_sorted() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_project(dir.path());
    let report = ConfigLoader::new().load_report(&config).expect("load");

    let files = report.globs.enumerate(dir.path()).expect("enumerate");

    let expected: Vec<PathBuf> = [
        "app/management/commands/seed.py",
        "app/views.py",
        "static/css/input.css",
        "template/index.html",
        "template/pos/orders.html",
    ]
    .iter()
    .map(PathBuf::from)
    .collect();
    assert_eq!(files, expected);
}

#[test]
fn test_enumerate_honours_exclusions() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_project(dir.path());
    let text = r#"
content = ["./app/**/*.py", "!./app/management/**"]
[theme.extend]
"#;
    let report = ConfigLoader::new()
        .load_str_report(text, ConfigFormat::Toml)
        .expect("load");

    let files = report.globs.enumerate(dir.path()).expect("enumerate");

    assert_eq!(files, vec![PathBuf::from("app/views.py")]);
}
