// Tests for reading `.quell/quell.json`.

use quell_core::config::QuellConfig;
use quell_core::types::Confidence;
use quell_enforce::handler::MessageHandler;
use quell_output::CollectingReporter;

use super::common;

#[test]
/// Missing sections take their defaults.
fn test_partial_config() {
    let (_dir, quell_dir) = common::project_with_config(
        r#"{"version": "0.1.0", "output": {"format": "json"}}"#,
    );
    let cfg = QuellConfig::load(&quell_dir);
    assert_eq!(cfg.output.format, "json");
    assert_eq!(cfg.output.path_strip_prefix, "");
    assert!(cfg.stats.persistent);
    assert_eq!(cfg.stats.db, "stats.db");
    assert!(cfg.confidence.is_empty());
}

#[test]
/// No config file at all is the same as an empty project.
fn test_missing_config() {
    let dir = tempfile::TempDir::new().unwrap();
    let cfg = QuellConfig::load(&dir.path().join(".quell"));
    assert_eq!(cfg.output.format, "text");
    assert!(cfg.enable.is_empty());
}

#[test]
/// `version` is optional: run-wide toggles still load without it.
fn test_config_without_version_keeps_toggles() {
    let (_dir, quell_dir) = common::project_with_config(
        r#"{"disable": ["C"], "enable": ["invalid-name"], "confidence": ["HIGH"]}"#,
    );
    let cfg = QuellConfig::load(&quell_dir);
    assert_eq!(cfg.version, "0.1.0");
    assert_eq!(cfg.disable, vec!["C"]);
    assert_eq!(cfg.enable, vec!["invalid-name"]);
    assert_eq!(cfg.confidence, vec!["HIGH"]);

    let h = MessageHandler::with_config(common::catalog(), CollectingReporter::new(""), &cfg)
        .unwrap();
    assert!(!h.is_enabled("line-too-long", None, None));
    assert!(h.is_enabled("invalid-name", None, Some(Confidence::High)));
}
