use crate::app::config::{EditorConfig, InsertMode, PickerConfig};
use crate::components::{AiGenerateButton, ColorPickerButton};
use crate::infrastructure::SelectionFormatter;

pub mod error;
pub mod generation;
pub mod palette;

// Re-exports
pub use error::{ErrorSeverity, ErrorState};
pub use generation::{GenerationState, SettlementPolicy};
pub use palette::PaletteState;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PickerSlot {
    Foreground, // foreColor
    Background, // backColor
}

#[derive(Debug)]
pub struct EditorState {
    // --- Lifecycle ---
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub last_error: Option<ErrorState>,

    // --- Generation ---
    // Mirrors the controller; `in_flight` counts requests this editor issued.
    pub loading: bool,
    pub in_flight: usize,
    pub insert_mode: InsertMode,

    // --- Document ---
    pub content: String,
    pub selection: SelectionFormatter,

    // --- Toolbar ---
    pub foreground: ColorPickerButton,
    pub background: ColorPickerButton,
}

impl EditorState {
    #[must_use]
    pub fn new(config: &EditorConfig) -> Self {
        let selection = SelectionFormatter::new();
        Self {
            should_quit: false,
            status_message: None,
            last_error: None,
            loading: false,
            in_flight: 0,
            insert_mode: config.generation.insert,
            content: String::new(),
            foreground: picker(&config.toolbar.foreground, &selection),
            background: picker(&config.toolbar.background, &selection),
            selection,
        }
    }

    pub fn picker(&self, slot: PickerSlot) -> &ColorPickerButton {
        match slot {
            PickerSlot::Foreground => &self.foreground,
            PickerSlot::Background => &self.background,
        }
    }

    pub fn picker_mut(&mut self, slot: PickerSlot) -> &mut ColorPickerButton {
        match slot {
            PickerSlot::Foreground => &mut self.foreground,
            PickerSlot::Background => &mut self.background,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.loading || self.in_flight > 0
    }

    pub fn ai_button(&self) -> AiGenerateButton {
        AiGenerateButton::view(self.is_busy())
    }
}

fn picker(config: &PickerConfig, selection: &SelectionFormatter) -> ColorPickerButton {
    ColorPickerButton::new(
        config.command.clone(),
        config.label.clone(),
        config.colors.clone(),
        Box::new(selection.clone()),
    )
}
