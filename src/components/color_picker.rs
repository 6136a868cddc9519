use crate::app::state::PaletteState;
use crate::domain::format::CommandSink;
use crate::domain::models::{CommandBinding, CssColor, FormatCommand};
use std::fmt;

/// One palette entry as the popover should draw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swatch<'a> {
    pub color: &'a CssColor,
    pub active: bool,
    pub aria_label: String,
}

/// A toolbar button bound to one color command (`foreColor`, `backColor`,
/// ...). It only decides between "apply" and "clear" and tells the sink;
/// it never touches the document itself.
pub struct ColorPickerButton {
    command: FormatCommand,
    label: String,
    colors: Vec<CssColor>,
    palette: PaletteState,
    sink: Box<dyn CommandSink + Send>,
}

impl ColorPickerButton {
    pub fn new(
        command: FormatCommand,
        label: impl Into<String>,
        colors: Vec<CssColor>,
        sink: Box<dyn CommandSink + Send>,
    ) -> Self {
        debug_assert!(!colors.is_empty(), "a color picker needs at least one color");
        Self {
            command,
            label: label.into(),
            colors,
            palette: PaletteState::default(),
            sink,
        }
    }

    pub fn command(&self) -> &FormatCommand {
        &self.command
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn colors(&self) -> &[CssColor] {
        &self.colors
    }

    pub fn selected(&self) -> Option<&CssColor> {
        self.palette.selected()
    }

    pub fn is_active(&self, color: &CssColor) -> bool {
        self.palette.is_selected(color)
    }

    /// The trigger is outlined in the active color, if any.
    pub fn trigger_border(&self) -> Option<&CssColor> {
        self.palette.selected()
    }

    pub fn swatches(&self) -> Vec<Swatch<'_>> {
        self.colors
            .iter()
            .map(|color| Swatch {
                color,
                active: self.palette.is_selected(color),
                aria_label: format!("Color {color}"),
            })
            .collect()
    }

    /// Handles a click on a swatch. Emits exactly one binding to the sink and
    /// returns it. Colors outside the palette are ignored.
    pub fn activate(&mut self, color: &CssColor) -> Option<CommandBinding> {
        if !self.colors.contains(color) {
            tracing::warn!(command = %self.command, %color, "ignoring color outside the palette");
            return None;
        }

        let binding = self.palette.toggle(&self.command, color.clone());
        tracing::debug!(command = %self.command, value = ?binding.value, "emitting format command");
        self.sink.on_format(binding.clone());
        Some(binding)
    }

    /// Replaces the offered colors without emitting anything. A selection
    /// that is no longer offered is dropped.
    pub fn set_colors(&mut self, colors: Vec<CssColor>) {
        if let Some(selected) = self.palette.selected() {
            if !colors.contains(selected) {
                self.palette.reset();
            }
        }
        self.colors = colors;
    }
}

impl fmt::Debug for ColorPickerButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorPickerButton")
            .field("command", &self.command)
            .field("label", &self.label)
            .field("colors", &self.colors)
            .field("palette", &self.palette)
            .finish_non_exhaustive()
    }
}
