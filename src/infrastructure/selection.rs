use crate::domain::format::CommandSink;
use crate::domain::models::{CommandBinding, CssColor, FormatCommand};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Default)]
struct Inner {
    active: BTreeMap<FormatCommand, CssColor>,
    history: Vec<CommandBinding>,
}

/// In-memory formatting of the current selection. Clones share the same
/// selection, so one handle can be given to each picker and another kept
/// for reading.
#[derive(Debug, Clone, Default)]
pub struct SelectionFormatter {
    inner: Arc<Mutex<Inner>>,
}

impl SelectionFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self, command: &FormatCommand) -> Option<CssColor> {
        self.inner.lock().active.get(command).cloned()
    }

    pub fn active_formats(&self) -> BTreeMap<FormatCommand, CssColor> {
        self.inner.lock().active.clone()
    }

    /// Every binding received, oldest first.
    pub fn history(&self) -> Vec<CommandBinding> {
        self.inner.lock().history.clone()
    }

    pub fn apply(&self, binding: CommandBinding) {
        let mut inner = self.inner.lock();
        match &binding.value {
            Some(color) => {
                inner.active.insert(binding.command.clone(), color.clone());
            }
            None => {
                inner.active.remove(&binding.command);
            }
        }
        inner.history.push(binding);
    }
}

impl CommandSink for SelectionFormatter {
    fn on_format(&mut self, binding: CommandBinding) {
        self.apply(binding);
    }
}
