// Tests for inline directives applied the way a source pragma parser feeds them.

use quell_core::catalog::MessageStore;
use quell_core::config::RunConfig;
use quell_core::types::{MessageArg, MessageCategory, MessageError};
use quell_enforce::directive::{Directive, DirectiveAction};
use quell_enforce::emit::Occurrence;
use quell_enforce::handler::MessageHandler;
use quell_output::CollectingReporter;

use super::common::{self, Stmt};

fn handler() -> MessageHandler<MessageStore, CollectingReporter> {
    let mut h = MessageHandler::new(
        common::catalog(),
        CollectingReporter::new(common::PREFIX),
        RunConfig::default(),
    );
    h.open_file(common::views_file());
    h
}

#[test]
/// `disable-next` only covers the line after the pragma.
fn test_disable_next_covers_one_line() {
    let mut h = handler();
    h.apply_directive(&Directive::new(DirectiveAction::DisableNext, &["line-too-long"], 7))
        .unwrap();

    let args = [MessageArg::from(140u32), MessageArg::from(100u32)];
    h.add("line-too-long", Occurrence::line(8).with_args(&args)).unwrap();
    h.add("line-too-long", Occurrence::line(9).with_args(&args)).unwrap();

    let reported: Vec<u32> = h
        .reporter()
        .messages
        .iter()
        .filter(|m| m.symbol == "line-too-long")
        .map(|m| m.location.line)
        .collect();
    assert_eq!(reported, vec![9]);
    assert_eq!(h.reporter().messages.last().unwrap().msg, "Line too long (140/100)");
}

#[test]
/// Unknown tokens become `bad-option-value` and the rest of the pragma still applies.
fn test_unknown_token_reported_and_rest_applied() {
    let mut h = handler();
    h.apply_directive(&Directive::new(
        DirectiveAction::Disable,
        &["no-such-check", "unused-import"],
        4,
    ))
    .unwrap();

    let bad = &h.reporter().messages[0];
    assert_eq!(bad.symbol, "bad-option-value");
    assert_eq!(bad.msg, "Bad option value 'no-such-check'");
    assert_eq!(bad.location.line, 4);
    assert_eq!(bad.location.path, "app/views.py");
    assert!(!h.is_enabled("unused-import", Some(5), None));
    assert_eq!(h.msg_status() & MessageCategory::Error.status_bit(), 2);
}

#[test]
/// Numeric ids in pragmas are audited and reported when the file closes.
fn test_numeric_id_suggests_symbol() {
    let mut h = handler();
    h.apply_directive(&Directive::new(DirectiveAction::Disable, &["W0611"], 2))
        .unwrap();
    h.add("unused-import", Occurrence::node(&Stmt::at(3)).with_args(&[MessageArg::from("os")]))
        .unwrap();
    assert_eq!(h.managed_log().len(), 1);
    h.close_file().unwrap();

    let cryptic = h
        .reporter()
        .messages
        .iter()
        .find(|m| m.symbol == "use-symbolic-message-instead")
        .unwrap();
    assert_eq!(cryptic.msg, "'W0611' is cryptic: use 'disable=unused-import' instead");
    assert_eq!(cryptic.location.line, 2);
}

#[test]
/// A directive with no open file is a usage error, not a silent no-op.
fn test_directive_without_open_file() {
    let mut h = MessageHandler::new(
        common::catalog(),
        CollectingReporter::new(""),
        RunConfig::default(),
    );
    let err = h
        .apply_directive(&Directive::new(DirectiveAction::Enable, &["unused-import"], 1))
        .unwrap_err();
    assert_eq!(err, MessageError::NoFileOpen);
}

#[test]
/// Directives deserialize from the kebab-case actions a pragma parser emits.
fn test_directive_from_json() {
    let directive: Directive = serde_json::from_str(
        r#"{"action": "disable-next", "ids": ["C0103"], "line": 11}"#,
    )
    .unwrap();
    assert_eq!(directive, Directive::new(DirectiveAction::DisableNext, &["C0103"], 11));
}
