use crate::domain::models::CommandBinding;

/// Receives formatting intents and applies them to the real document
/// selection. Invoked synchronously; the return value is never consulted.
#[cfg_attr(test, mockall::automock)]
pub trait CommandSink {
    fn on_format(&mut self, binding: CommandBinding);
}

impl<F> CommandSink for F
where
    F: FnMut(CommandBinding),
{
    fn on_format(&mut self, binding: CommandBinding) {
        self(binding);
    }
}
