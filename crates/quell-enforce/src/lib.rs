//! Suppression resolution and message emission for quell.
//!
//! [`MessageHandler`](handler::MessageHandler) is the entry point checkers
//! and directive parsers talk to:
//! - [`scope`]: `disable` / `enable` / `disable_next` over ids, categories, checkers, `all`
//! - [`decision`]: whether a message is enabled on a line, including the
//!   fallback for lines past the parsed tree
//! - [`emit`]: `add` / `add_ignored`: statistics, rendering, reporting
//! - [`managed`]: audit log of directives that used numeric ids
//! - [`directive`]: applying parsed inline pragmas
//! - [`builtin`]: the handler's own messages (`locally-disabled`, ...)

pub mod builtin;
pub mod decision;
pub mod directive;
pub mod emit;
pub mod handler;
pub mod managed;
pub mod scope;
