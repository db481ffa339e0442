// Tests for the text reporter driven through the handler.

use quell_core::catalog::MessageStore;
use quell_core::config::RunConfig;
use quell_core::reporter::Reporter;
use quell_core::types::{MessageArg, Scope};
use quell_enforce::emit::Occurrence;
use quell_enforce::handler::MessageHandler;
use quell_output::{reporter_for, MessageFormatter, TextReporter};

use super::common::{self, Stmt};

#[test]
/// Paths are shown relative to the configured prefix, grouped by module.
fn test_text_report_for_one_file() {
    let mut h: MessageHandler<MessageStore, TextReporter> = MessageHandler::new(
        common::catalog(),
        TextReporter::new(common::PREFIX),
        RunConfig::default(),
    );
    h.open_file(common::views_file());
    h.add("unused-import", Occurrence::node(&Stmt::at(1)).with_args(&[MessageArg::from("os")]))
        .unwrap();
    let args = [MessageArg::from(101u32), MessageArg::from(100u32)];
    h.add("C0301", Occurrence::line(6).with_args(&args)).unwrap();
    h.close_file().unwrap();

    assert_eq!(
        h.reporter().output(),
        "************* Module app.views\n\
         app/views.py:1:4: W0611: Unused import os (unused-import)\n\
         app/views.py:6:0: C0301: Line too long (101/100) (line-too-long)\n"
    );
    assert_eq!(
        h.reporter().format_summary(h.stats(), h.msg_status()),
        "\n1 warning(s), 1 convention(s) in 1 module(s) (status 20)\n"
    );
}

#[test]
/// Messages raised with no file open are attributed to the configuration.
fn test_configuration_messages() {
    let mut h = MessageHandler::new(common::catalog(), TextReporter::new(""), RunConfig::default());
    h.add("bad-option-value", Occurrence::line(1).with_args(&[MessageArg::from("W9999")]))
        .unwrap();
    assert_eq!(
        h.reporter().output(),
        "configuration:1:0: E0012: Bad option value 'W9999' (bad-option-value)\n"
    );
}

#[test]
/// The config's format name picks the reporter; unknown names fall back to text.
fn test_reporter_from_format_name() {
    let mut h = MessageHandler::new(
        common::catalog(),
        reporter_for("yaml", common::PREFIX),
        RunConfig::default(),
    );
    assert_eq!(h.reporter().path_strip_prefix(), common::PREFIX);
    h.disable("unused-import", Scope::Run, None, false).unwrap();
    h.open_file(common::views_file());
    h.add("unused-import", Occurrence::node(&Stmt::at(1)).with_args(&[MessageArg::from("os")]))
        .unwrap();
    assert_eq!(h.stats().total(), 0);
}
