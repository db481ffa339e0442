// Tests for how far an inline directive reaches inside a file.

use quell_core::config::RunConfig;
use quell_core::types::{MessageArg, Scope};
use quell_enforce::emit::Occurrence;
use quell_enforce::handler::MessageHandler;
use quell_output::CollectingReporter;

use super::common::{self, Stmt};

fn handler() -> MessageHandler<quell_core::catalog::MessageStore, CollectingReporter> {
    MessageHandler::new(
        common::catalog(),
        CollectingReporter::new(common::PREFIX),
        RunConfig::default(),
    )
}

#[test]
/// A disable inside a function stops at the end of that function.
fn test_disable_in_function_ends_with_function() {
    let mut h = handler();
    h.open_file(common::views_file());
    h.disable("unused-variable", Scope::File, Some(12), false).unwrap();

    let args = [MessageArg::from("tmp")];
    h.add("unused-variable", Occurrence::node(&Stmt::at(15)).with_args(&args))
        .unwrap();
    h.add("unused-variable", Occurrence::node(&Stmt::at(25)).with_args(&args))
        .unwrap();
    h.close_file().unwrap();

    let seen: Vec<(&str, u32)> = h
        .reporter()
        .messages
        .iter()
        .map(|m| (m.symbol.as_str(), m.location.line))
        .collect();
    assert_eq!(
        seen,
        vec![
            ("locally-disabled", 12),
            ("unused-variable", 25),
            ("suppressed-message", 15),
        ]
    );
    let suppressed = &h.reporter().messages[2];
    assert_eq!(suppressed.msg, "Suppressed unused-variable (W0612) (from line 12)");
}

#[test]
/// A module-level disable covers the rest of the module, including functions.
fn test_module_level_disable_reaches_end_of_file() {
    let mut h = handler();
    h.open_file(common::views_file());
    h.disable("W0611", Scope::File, Some(2), false).unwrap();

    assert!(!h.is_enabled("unused-import", Some(2), None));
    assert!(!h.is_enabled("unused-import", Some(15), None));
    assert!(!h.is_enabled("unused-import", Some(30), None));
    assert!(h.is_enabled("unused-import", Some(1), None));
}

#[test]
/// An enable after a disable wins on the lines after it.
fn test_enable_reopens_region() {
    let mut h = handler();
    h.open_file(common::views_file());
    h.disable("unused-import", Scope::File, Some(1), false).unwrap();
    h.enable("unused-import", Scope::File, Some(22), false).unwrap();

    let args = [MessageArg::from("os")];
    h.add("W0611", Occurrence::node(&Stmt::at(5)).with_args(&args)).unwrap();
    h.add("W0611", Occurrence::node(&Stmt::at(24)).with_args(&args)).unwrap();

    let reported: Vec<u32> = h
        .reporter()
        .messages
        .iter()
        .filter(|m| m.symbol == "unused-import")
        .map(|m| m.location.line)
        .collect();
    assert_eq!(reported, vec![24]);
    assert_eq!(h.stats().symbol_count("unused-import"), 1);
}

#[test]
/// A disable that swallows nothing is reported as useless when the file closes.
fn test_useless_suppression_on_close() {
    let mut h = handler();
    h.open_file(common::views_file());
    h.disable("line-too-long", Scope::File, Some(3), false).unwrap();
    let args = [MessageArg::from(120u32), MessageArg::from(100u32)];
    h.add("C0301", Occurrence::line(1).with_args(&args)).unwrap();
    let state = h.close_file().unwrap().unwrap();

    assert_eq!(state.spurious_suppressions(), vec![("C0301".to_string(), 3)]);
    assert_eq!(h.stats().symbol_count("line-too-long"), 1);
    let useless = h
        .reporter()
        .messages
        .iter()
        .find(|m| m.symbol == "useless-suppression")
        .unwrap();
    // Line 1 precedes the directive, so it is reported and swallows nothing.
    assert_eq!(useless.msg, "Useless suppression of line-too-long (C0301)");
    assert_eq!(useless.location.line, 3);
    assert!(h.file_state().is_none());
}

#[test]
/// Lines past the parsed tree use the closest directive at or before them.
fn test_trailing_lines_fall_back_to_raw_directives() {
    let mut h = handler();
    h.open_file(common::views_file());
    h.disable("unused-import", Scope::File, Some(32), false).unwrap();

    assert!(h.is_enabled("unused-import", Some(31), None));
    assert!(!h.is_enabled("unused-import", Some(32), None));
    assert!(!h.is_enabled("unused-import", Some(40), None));
    assert!(h.is_enabled("unused-import", Some(20), None));
}
