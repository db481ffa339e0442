use std::collections::BTreeMap;

use quell_core::catalog::MessageCatalog;
use quell_core::config::{QuellConfig, RunConfig};
use quell_core::file_state::{FileContext, FileState};
use quell_core::reporter::Reporter;
use quell_core::stats::LinterStats;
use quell_core::types::{MessageArg, MessageError, Scope};

use crate::builtin::{SUPPRESSED_MESSAGE, USELESS_SUPPRESSION, USE_SYMBOLIC_MESSAGE_INSTEAD};
use crate::emit::Occurrence;
use crate::managed::ManagedMessageLog;

/// Run-wide message handler. Owns its collaborators and the state that
/// outlives a single file: the toggle map, the audit log, statistics and the
/// status accumulator. A fresh [`FileState`] is installed per file.
pub struct MessageHandler<C: MessageCatalog, R: Reporter> {
    pub(crate) catalog: C,
    pub(crate) reporter: R,
    pub(crate) config: RunConfig,
    pub(crate) stats: LinterStats,
    /// Run-wide toggles by message id; absent means enabled.
    pub(crate) msgs_state: BTreeMap<String, bool>,
    pub(crate) reports_state: BTreeMap<String, bool>,
    pub(crate) managed: ManagedMessageLog,
    pub(crate) file_state: Option<FileState>,
    pub(crate) msg_status: u32,
}

impl<C: MessageCatalog, R: Reporter> MessageHandler<C, R> {
    pub fn new(catalog: C, reporter: R, config: RunConfig) -> Self {
        Self {
            catalog,
            reporter,
            config,
            stats: LinterStats::new(),
            msgs_state: BTreeMap::new(),
            reports_state: BTreeMap::new(),
            managed: ManagedMessageLog::new(),
            file_state: None,
            msg_status: 0,
        }
    }

    /// Create a handler and apply the config file's run-wide toggles:
    /// `disable` first, then `enable`, so an explicit enable wins.
    pub fn with_config(catalog: C, reporter: R, config: &QuellConfig) -> Result<Self, MessageError> {
        let mut handler = Self::new(catalog, reporter, RunConfig::from(config));
        for token in &config.disable {
            handler.disable(token, Scope::Run, None, false)?;
        }
        for token in &config.enable {
            handler.enable(token, Scope::Run, None, false)?;
        }
        Ok(handler)
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn reporter_mut(&mut self) -> &mut R {
        &mut self.reporter
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn stats(&self) -> &LinterStats {
        &self.stats
    }

    /// Bitmask of the categories of every accepted message so far.
    pub fn msg_status(&self) -> u32 {
        self.msg_status
    }

    pub fn managed_log(&self) -> &ManagedMessageLog {
        &self.managed
    }

    pub fn managed_log_mut(&mut self) -> &mut ManagedMessageLog {
        &mut self.managed
    }

    pub fn file_state(&self) -> Option<&FileState> {
        self.file_state.as_ref()
    }

    pub fn is_report_enabled(&self, report_id: &str) -> bool {
        self.reports_state
            .get(&report_id.to_uppercase())
            .copied()
            .unwrap_or(true)
    }

    /// Module name of the open file, or empty when none is open.
    pub(crate) fn current_module(&self) -> String {
        self.file_state
            .as_ref()
            .map(|fs| fs.module().to_string())
            .unwrap_or_default()
    }

    /// Install a fresh per-file state. Any previously open file is dropped
    /// without spurious-suppression reporting.
    pub fn open_file(&mut self, context: FileContext) {
        let fs = FileState::new(context);
        tracing::debug!(module = fs.module(), max_line = ?fs.max_line(), "open file");
        self.file_state = Some(fs);
    }

    /// Report what the file's directives did, then hand back its state:
    /// - `useless-suppression` for each disable that swallowed nothing
    /// - `suppressed-message` for each swallowed occurrence
    /// - `use-symbolic-message-instead` for numeric directives in this module
    ///
    /// Each is skipped when the catalog does not define it. Every report is
    /// attempted and the file is closed even when one fails; the first error
    /// is returned.
    pub fn close_file(&mut self) -> Result<Option<FileState>, MessageError> {
        let Some(fs) = self.file_state.as_ref() else {
            return Ok(None);
        };
        let spurious = fs.spurious_suppressions();
        let ignored = fs.ignored_occurrences();
        let module = fs.module().to_string();
        let mut first_err = None;

        if self.knows(USELESS_SUPPRESSION) {
            for (msgid, line) in spurious {
                let args = [MessageArg::from(self.catalog.display_string(&msgid))];
                let result = self.add(USELESS_SUPPRESSION, Occurrence::line(line).with_args(&args));
                keep_first(&mut first_err, result);
            }
        }
        if self.knows(SUPPRESSED_MESSAGE) {
            for (msgid, origin, line) in ignored {
                let args = [
                    MessageArg::from(self.catalog.display_string(&msgid)),
                    MessageArg::from(origin),
                ];
                let result = self.add(SUPPRESSED_MESSAGE, Occurrence::line(line).with_args(&args));
                keep_first(&mut first_err, result);
            }
        }
        if self.knows(USE_SYMBOLIC_MESSAGE_INSTEAD) {
            let managed: Vec<_> = self.managed.for_module(&module).cloned().collect();
            for m in managed {
                let Some(line) = m.line else { continue };
                let action = if m.is_disabled { "disable" } else { "enable" };
                let args = [
                    MessageArg::from(m.msgid),
                    MessageArg::from(action),
                    MessageArg::from(m.symbol),
                ];
                let result =
                    self.add(USE_SYMBOLIC_MESSAGE_INSTEAD, Occurrence::line(line).with_args(&args));
                keep_first(&mut first_err, result);
            }
        }

        tracing::debug!(%module, "close file");
        let fs = self.file_state.take();
        match first_err {
            Some(e) => Err(e),
            None => Ok(fs),
        }
    }

    pub(crate) fn knows(&self, id_or_symbol: &str) -> bool {
        self.catalog.definitions_for(id_or_symbol).is_ok()
    }
}

fn keep_first(first_err: &mut Option<MessageError>, result: Result<(), MessageError>) {
    if let Err(e) = result {
        tracing::warn!(error = %e, "close-file report failed");
        first_err.get_or_insert(e);
    }
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
