//! Application of inline directives that a comment parser already split
//! into an action, a list of tokens and a line.

use serde::{Deserialize, Serialize};

use quell_core::catalog::MessageCatalog;
use quell_core::reporter::Reporter;
use quell_core::types::{MessageArg, MessageError, Scope};

use crate::builtin::BAD_OPTION_VALUE;
use crate::emit::Occurrence;
use crate::handler::MessageHandler;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectiveAction {
    Disable,
    Enable,
    DisableNext,
}

/// One parsed inline pragma, e.g. `disable=unused-import,W0612` on line 4.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    pub action: DirectiveAction,
    pub ids: Vec<String>,
    pub line: Option<u32>,
}

impl Directive {
    pub fn new(action: DirectiveAction, ids: &[&str], line: u32) -> Self {
        Self {
            action,
            ids: ids.iter().map(|s| s.to_string()).collect(),
            line: Some(line),
        }
    }
}

impl<C: MessageCatalog, R: Reporter> MessageHandler<C, R> {
    /// Apply a directive to the open file. An unknown token is reported as
    /// `bad-option-value` on the directive's line and the remaining tokens
    /// are still applied; every other error propagates.
    pub fn apply_directive(&mut self, directive: &Directive) -> Result<(), MessageError> {
        for token in &directive.ids {
            let result = match directive.action {
                DirectiveAction::Disable => self.disable(token, Scope::File, directive.line, false),
                DirectiveAction::Enable => self.enable(token, Scope::File, directive.line, false),
                DirectiveAction::DisableNext => {
                    self.disable_next(token, Scope::File, directive.line, false)
                }
            };
            match result {
                Err(MessageError::UnknownMessage(unknown)) if self.knows(BAD_OPTION_VALUE) => {
                    tracing::warn!(token = unknown.as_str(), line = ?directive.line, "unknown message in directive");
                    let args = [MessageArg::from(unknown)];
                    let mut occurrence = Occurrence::default().with_args(&args);
                    occurrence.line = directive.line;
                    self.add(BAD_OPTION_VALUE, occurrence)?;
                }
                other => other?,
            }
        }
        Ok(())
    }
}
