// Tests for run-wide toggles coming from the config file.

use quell_core::config::QuellConfig;
use quell_core::types::{Confidence, MessageArg, MessageError, Scope};
use quell_enforce::emit::Occurrence;
use quell_enforce::handler::MessageHandler;
use quell_output::CollectingReporter;

use super::common::{self, Stmt};

#[test]
/// Config disables apply before enables, so a single message can be carved out of a category.
fn test_config_enable_wins_over_category_disable() {
    let (_dir, quell_dir) = common::project_with_config(
        r#"{"version": "0.1.0", "disable": ["C"], "enable": ["invalid-name"]}"#,
    );
    let cfg = QuellConfig::load(&quell_dir);
    let h = MessageHandler::with_config(common::catalog(), CollectingReporter::new(""), &cfg)
        .unwrap();

    assert_eq!(h.config().disable, vec!["line-too-long"]);
    assert_eq!(h.config().enable, vec!["invalid-name"]);
    assert!(h.is_enabled("C0103", None, None));
    assert!(!h.is_enabled("C0301", Some(4), None));
}

#[test]
/// Messages below the configured confidence never reach the reporter or the counters.
fn test_confidence_filter() {
    let (_dir, quell_dir) = common::project_with_config(
        r#"{"version": "0.1.0", "confidence": ["HIGH", "INFERENCE"]}"#,
    );
    let cfg = QuellConfig::load(&quell_dir);
    let mut h =
        MessageHandler::with_config(common::catalog(), CollectingReporter::new(common::PREFIX), &cfg)
            .unwrap();
    h.open_file(common::views_file());

    let args = [MessageArg::from("Widget"), MessageArg::from("size")];
    let stmt = Stmt::at(14);
    h.add("no-member", Occurrence::node(&stmt).with_args(&args).with_confidence(Confidence::Inference))
        .unwrap();
    h.add("no-member", Occurrence::node(&stmt).with_args(&args).with_confidence(Confidence::InferenceFailure))
        .unwrap();
    h.add("no-member", Occurrence::node(&stmt).with_args(&args)).unwrap();

    assert_eq!(h.reporter().symbols(), vec!["no-member"]);
    let msg = &h.reporter().messages[0];
    assert_eq!(msg.msg, "Instance of 'Widget' has no 'size' member");
    assert_eq!(msg.location.obj, "render");
    assert_eq!(msg.location.column, 4);
    assert_eq!(h.stats().symbol_count("no-member"), 1);
    assert_eq!(h.msg_status(), 2);
}

#[test]
/// A broken config file falls back to defaults: everything enabled.
fn test_unparseable_config_uses_defaults() {
    let (_dir, quell_dir) = common::project_with_config("{ not json");
    let cfg = QuellConfig::load(&quell_dir);
    let h = MessageHandler::with_config(common::catalog(), CollectingReporter::new(""), &cfg)
        .unwrap();
    assert!(h.config().disable.is_empty());
    assert!(h.is_enabled("unused-import", None, None));
}

#[test]
/// An unknown message name in the config is a hard error.
fn test_unknown_message_in_config() {
    let (_dir, quell_dir) = common::project_with_config(
        r#"{"version": "0.1.0", "disable": ["not-a-message"]}"#,
    );
    let cfg = QuellConfig::load(&quell_dir);
    let err = MessageHandler::with_config(common::catalog(), CollectingReporter::new(""), &cfg)
        .err()
        .unwrap();
    assert_eq!(err, MessageError::UnknownMessage("not-a-message".to_string()));
}

#[test]
/// Run-wide toggles survive across files; file-scoped ones do not.
fn test_run_toggle_outlives_file() {
    let mut h = MessageHandler::new(
        common::catalog(),
        CollectingReporter::new(""),
        Default::default(),
    );
    h.disable("W", Scope::Run, None, false).unwrap();
    h.open_file(common::views_file());
    h.disable("invalid-name", Scope::File, Some(1), false).unwrap();
    h.close_file().unwrap();

    h.open_file(common::views_file());
    assert!(!h.is_enabled("unused-import", Some(5), None));
    assert!(h.is_enabled("invalid-name", Some(5), None));
}
