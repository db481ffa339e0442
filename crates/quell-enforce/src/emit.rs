//! Message emission: decide, count, render, report.

use quell_core::catalog::MessageCatalog;
use quell_core::definition::MessageDefinition;
use quell_core::reporter::Reporter;
use quell_core::types::{
    Confidence, Message, MessageArg, MessageError, MessageLocation, SyntaxNode,
};

use crate::handler::MessageHandler;

/// Display path used when a message has no file (configuration problems).
pub const CONFIGURATION_PATH: &str = "configuration";

/// Where and how a checker raises a message.
///
/// Line-based checkers give a line, AST checkers give a node (and may
/// override its line).
#[derive(Clone, Copy, Default)]
pub struct Occurrence<'a> {
    pub line: Option<u32>,
    pub node: Option<&'a dyn SyntaxNode>,
    pub args: &'a [MessageArg],
    pub confidence: Option<Confidence>,
    pub column: Option<u32>,
}

impl<'a> Occurrence<'a> {
    pub fn line(line: u32) -> Self {
        Self {
            line: Some(line),
            ..Self::default()
        }
    }

    pub fn node(node: &'a dyn SyntaxNode) -> Self {
        Self {
            node: Some(node),
            ..Self::default()
        }
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_args(mut self, args: &'a [MessageArg]) -> Self {
        self.args = args;
        self
    }

    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_column(mut self, column: u32) -> Self {
        self.column = Some(column);
        self
    }
}

impl<C: MessageCatalog, R: Reporter> MessageHandler<C, R> {
    /// Raise a message by id, symbol or old name. Every definition the token
    /// resolves to is emitted (or ignored) independently.
    pub fn add(&mut self, msgid: &str, occurrence: Occurrence<'_>) -> Result<(), MessageError> {
        let definitions = self.catalog.definitions_for(msgid)?;
        for def in &definitions {
            self.add_one(def, occurrence)?;
        }
        Ok(())
    }

    pub fn add_one(&mut self, def: &MessageDefinition, occurrence: Occurrence<'_>) -> Result<(), MessageError> {
        def.check_usage(occurrence.line, occurrence.node.is_some())?;
        let node = occurrence.node;
        let line = occurrence.line.or_else(|| node.map(|n| n.from_line()));
        let column = occurrence.column.or_else(|| node.and_then(|n| n.col_offset()));
        let confidence = occurrence.confidence.unwrap_or_default();

        if !self.is_enabled(&def.msgid, line, Some(confidence)) {
            self.record_ignored(&def.msgid, line, confidence);
            return Ok(());
        }

        // Render before counting so a bad argument list leaves no trace.
        let msg = def.template.render(occurrence.args)?;

        self.msg_status |= def.category.status_bit();
        let module = self.current_module();
        self.stats.increase_category(def.category, 1);
        self.stats.increase_module_category(&module, def.category, 1);
        self.stats.increase_symbol(&def.symbol);

        let (module, obj, abspath) = match node {
            Some(n) => (n.module_name(), n.frame_name(), n.root_file()),
            None => (
                module,
                String::new(),
                self.file_state
                    .as_ref()
                    .and_then(|fs| fs.abspath().map(str::to_string)),
            ),
        };
        let path = match &abspath {
            Some(abspath) => abspath.replacen(self.reporter.path_strip_prefix(), "", 1),
            None => CONFIGURATION_PATH.to_string(),
        };

        self.reporter.handle_message(Message {
            msg_id: def.msgid.clone(),
            symbol: def.symbol.clone(),
            category: def.category,
            location: MessageLocation {
                abspath,
                path,
                module,
                obj,
                line: line.unwrap_or(1),
                column: column.unwrap_or(0),
            },
            msg,
            confidence,
        });
        Ok(())
    }

    /// Track an occurrence a checker chose not to raise, so suppression
    /// usefulness stays accurate. Never touches statistics or the reporter.
    pub fn add_ignored(
        &mut self,
        msgid: &str,
        line: Option<u32>,
        node: Option<&dyn SyntaxNode>,
        confidence: Option<Confidence>,
    ) -> Result<(), MessageError> {
        let definitions = self.catalog.definitions_for(msgid)?;
        let line = line.or_else(|| node.map(|n| n.from_line()));
        let confidence = confidence.unwrap_or_default();
        for def in &definitions {
            def.check_usage(line, node.is_some())?;
            self.record_ignored(&def.msgid, line, confidence);
        }
        Ok(())
    }

    fn record_ignored(&mut self, msgid: &str, line: Option<u32>, confidence: Confidence) {
        let scope = self.scope_of(msgid, line, confidence);
        tracing::debug!(msgid, ?line, ?scope, "message ignored");
        if let Some(fs) = self.file_state.as_mut() {
            fs.record_ignored(scope, msgid, line);
        }
    }
}
