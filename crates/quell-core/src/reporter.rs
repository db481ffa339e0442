use crate::types::Message;

/// Receives every accepted message.
///
/// Reporters own rendering; the emission pipeline only builds the
/// [`Message`] and hands it over once.
pub trait Reporter {
    fn handle_message(&mut self, msg: Message);

    /// Prefix removed (once) from absolute paths to build the display path.
    fn path_strip_prefix(&self) -> &str {
        ""
    }
}

impl<R: Reporter + ?Sized> Reporter for Box<R> {
    fn handle_message(&mut self, msg: Message) {
        (**self).handle_message(msg)
    }

    fn path_strip_prefix(&self) -> &str {
        (**self).path_strip_prefix()
    }
}
