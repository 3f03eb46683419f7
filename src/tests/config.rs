use super::Config;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_defaults() {
    let cfg = Config::defaults();
    assert_eq!(cfg.initial_topic, "introduction");
    assert_eq!(cfg.compact_width, 100);
    assert_eq!(cfg.theme, "base16-ocean.dark");
    assert!((cfg.grid_gap - 24.0).abs() < f64::EPSILON);
    assert!(cfg.show_minimap);
    assert_eq!(cfg.diagram_height, 18);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "initial_topic = \"teams\"\ncompact_width = 80").unwrap();
    let cfg = Config::load_from(file.path());
    assert_eq!(cfg.initial_topic, "teams");
    assert_eq!(cfg.compact_width, 80);
    assert_eq!(cfg.theme, "base16-ocean.dark");
    assert!(cfg.show_minimap);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config::load_from(&dir.path().join("absent.toml"));
    assert_eq!(cfg.initial_topic, "introduction");
}

#[test]
fn test_invalid_file_falls_back_to_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "compact_width = \"wide\"").unwrap();
    let cfg = Config::load_from(file.path());
    assert_eq!(cfg.compact_width, 100);
}
