use crate::domain::models::{CommandBinding, CssColor, FormatCommand};

/// Which swatch of one picker is active. Owned by exactly one button and
/// never read back from the document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaletteState {
    selected: Option<CssColor>,
}

impl PaletteState {
    pub fn selected(&self) -> Option<&CssColor> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn is_selected(&self, color: &CssColor) -> bool {
        self.selected.as_ref() == Some(color)
    }

    /// Picking the active color clears it, picking any other color switches
    /// to it. Returns the binding to emit.
    pub fn toggle(&mut self, command: &FormatCommand, candidate: CssColor) -> CommandBinding {
        if self.is_selected(&candidate) {
            self.selected = None;
            CommandBinding::clear(command.clone())
        } else {
            self.selected = Some(candidate.clone());
            CommandBinding::apply(command.clone(), candidate)
        }
    }

    pub fn reset(&mut self) {
        self.selected = None;
    }
}
