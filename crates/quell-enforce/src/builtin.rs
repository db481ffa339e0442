//! Messages raised by the handler itself rather than by a checker.

use quell_core::catalog::MessageStore;
use quell_core::definition::MessageDefinition;
use quell_core::types::{MessageError, WarningScope};

/// Owning checker name for the handler's own messages.
pub const MAIN_CHECKER: &str = "main";

pub const LOCALLY_DISABLED: &str = "locally-disabled";
pub const SUPPRESSED_MESSAGE: &str = "suppressed-message";
pub const USELESS_SUPPRESSION: &str = "useless-suppression";
pub const USE_SYMBOLIC_MESSAGE_INSTEAD: &str = "use-symbolic-message-instead";
pub const BAD_OPTION_VALUE: &str = "bad-option-value";

pub fn builtin_definitions() -> Result<Vec<MessageDefinition>, MessageError> {
    let line = |msgid: &str, symbol: &str, msg: &str, description: &str| {
        MessageDefinition::new(MAIN_CHECKER, msgid, symbol, msg, description, WarningScope::Line)
    };
    Ok(vec![
        line(
            "I0011",
            LOCALLY_DISABLED,
            "Locally disabling %s (%s)",
            "Used when an inline option disables a message or a messages category.",
        )?,
        line(
            "I0020",
            SUPPRESSED_MESSAGE,
            "Suppressed %s (from line %d)",
            "A message was triggered on a line, but suppressed explicitly by a disable= comment.",
        )?,
        line(
            "I0021",
            USELESS_SUPPRESSION,
            "Useless suppression of %s",
            "Reported when a message is explicitly disabled for a line or a block of code, but never triggered.",
        )?,
        line(
            "I0023",
            USE_SYMBOLIC_MESSAGE_INSTEAD,
            "'%s' is cryptic: use '%s=%s' instead",
            "Used when a message is enabled or disabled by id.",
        )?,
        line(
            "E0012",
            BAD_OPTION_VALUE,
            "Bad option value %r",
            "Used when a bad value for an inline option is encountered.",
        )?,
    ])
}

/// A store holding only the built-in messages; checkers register theirs on top.
pub fn builtin_store() -> Result<MessageStore, MessageError> {
    MessageStore::with_definitions(builtin_definitions()?)
}
