//! Enable/disable requests: expand a token to concrete message ids and apply
//! the change run-wide or to the open file.

use quell_core::catalog::MessageCatalog;
use quell_core::definition::{is_numeric_msgid, MessageDefinition};
use quell_core::file_state::TransitionSpan;
use quell_core::reporter::Reporter;
use quell_core::types::{MessageArg, MessageCategory, MessageError, Scope};

use crate::builtin::LOCALLY_DISABLED;
use crate::emit::Occurrence;
use crate::handler::MessageHandler;

/// Token that expands to every category.
pub const ALL_TOKEN: &str = "all";

/// Tokens starting with this (any case) toggle reports instead of messages.
pub const REPORT_PREFIX: &str = "rp";

impl<C: MessageCatalog, R: Reporter> MessageHandler<C, R> {
    /// Disable a message, category, checker, report, or `all`.
    pub fn disable(
        &mut self,
        token: &str,
        scope: Scope,
        line: Option<u32>,
        ignore_unknown: bool,
    ) -> Result<(), MessageError> {
        self.set_msg_status(token, false, scope, line, ignore_unknown, TransitionSpan::Block)?;
        self.register_by_id_managed_msg(token, line, true);
        Ok(())
    }

    /// Disable on the line after `line` only. Line 0 counts as no line.
    pub fn disable_next(
        &mut self,
        token: &str,
        scope: Scope,
        line: Option<u32>,
        ignore_unknown: bool,
    ) -> Result<(), MessageError> {
        let line = line
            .filter(|&l| l > 0)
            .and_then(|l| l.checked_add(1))
            .ok_or(MessageError::NoLineSupplied)?;
        self.set_msg_status(token, false, scope, Some(line), ignore_unknown, TransitionSpan::Line)?;
        self.register_by_id_managed_msg(token, Some(line), true);
        Ok(())
    }

    pub fn enable(
        &mut self,
        token: &str,
        scope: Scope,
        line: Option<u32>,
        ignore_unknown: bool,
    ) -> Result<(), MessageError> {
        self.set_msg_status(token, true, scope, line, ignore_unknown, TransitionSpan::Block)?;
        self.register_by_id_managed_msg(token, line, false);
        Ok(())
    }

    fn set_msg_status(
        &mut self,
        token: &str,
        enable: bool,
        scope: Scope,
        line: Option<u32>,
        ignore_unknown: bool,
        span: TransitionSpan,
    ) -> Result<(), MessageError> {
        if token == ALL_TOKEN {
            for category in MessageCategory::ALL {
                let code = category.code().to_string();
                self.set_msg_status(&code, enable, scope, line, ignore_unknown, span)?;
            }
            return Ok(());
        }

        if let Some(category) = MessageCategory::parse(token) {
            for msgid in self.catalog.ids_by_category(category) {
                self.set_msg_status(&msgid, enable, scope, line, false, span)?;
            }
            return Ok(());
        }

        if self.catalog.has_checker(token) {
            for msgid in self.catalog.ids_by_checker(token) {
                self.set_msg_status(&msgid, enable, scope, line, false, span)?;
            }
            return Ok(());
        }

        if token.to_lowercase().starts_with(REPORT_PREFIX) {
            self.reports_state.insert(token.to_uppercase(), enable);
            return Ok(());
        }

        let definitions = match self.catalog.definitions_for(token) {
            Ok(defs) => defs,
            Err(MessageError::UnknownMessage(_)) if ignore_unknown => {
                tracing::debug!(token, "ignoring unknown message");
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        for def in &definitions {
            self.set_one_msg_status(scope, def, line, enable, span)?;
        }
        Ok(())
    }

    fn set_one_msg_status(
        &mut self,
        scope: Scope,
        def: &MessageDefinition,
        line: Option<u32>,
        enable: bool,
        span: TransitionSpan,
    ) -> Result<(), MessageError> {
        match scope {
            Scope::File => {
                let line = line.ok_or_else(|| {
                    MessageError::MalformedUsage(format!(
                        "file-scoped change of {} needs a line",
                        def.msgid
                    ))
                })?;
                let fs = self.file_state.as_mut().ok_or(MessageError::NoFileOpen)?;
                match span {
                    TransitionSpan::Block => fs.set_transition(def, line, enable),
                    TransitionSpan::Line => fs.set_line_transition(def, line, enable),
                }
                tracing::debug!(msgid = %def.msgid, line, enable, "file-scoped transition");

                if !enable && def.symbol != LOCALLY_DISABLED && self.knows(LOCALLY_DISABLED) {
                    let args = [
                        MessageArg::from(def.symbol.as_str()),
                        MessageArg::from(def.msgid.as_str()),
                    ];
                    self.add(LOCALLY_DISABLED, Occurrence::line(line).with_args(&args))?;
                }
            }
            Scope::Run => {
                self.msgs_state.insert(def.msgid.clone(), enable);
                self.sync_config_lists();
                tracing::debug!(msgid = %def.msgid, enable, "run-wide toggle");
            }
        }
        Ok(())
    }

    /// Rebuild the config's enable/disable lists from the toggle map.
    fn sync_config_lists(&mut self) {
        let mut enabled = Vec::new();
        let mut disabled = Vec::new();
        // BTreeMap iteration is already ordered by message id.
        for (msgid, &on) in &self.msgs_state {
            let symbols = self.message_symbols(msgid);
            if on {
                enabled.extend(symbols);
            } else {
                disabled.extend(symbols);
            }
        }
        self.config.enable = enabled;
        self.config.disable = disabled;
    }

    /// Symbols for a message id, or the id itself when it is unknown.
    fn message_symbols(&self, msgid: &str) -> Vec<String> {
        match self.catalog.definitions_for(msgid) {
            Ok(defs) => defs.into_iter().map(|d| d.symbol).collect(),
            Err(_) => vec![msgid.to_string()],
        }
    }

    /// Record a numeric-id directive in the audit log so the user can be told
    /// to prefer the symbol. Best-effort: returns `false` when the token is not
    /// numeric or its symbol cannot be resolved.
    fn register_by_id_managed_msg(&mut self, token: &str, line: Option<u32>, is_disabled: bool) -> bool {
        if !is_numeric_msgid(token) {
            return false;
        }
        let symbol = match self.catalog.symbol_for(token) {
            Ok(symbol) => symbol,
            Err(e) => {
                tracing::debug!(token, error = %e, "skipping audit of numeric directive");
                return false;
            }
        };
        let module = self.current_module();
        self.managed.record(&module, token, &symbol, line, is_disabled);
        true
    }
}
