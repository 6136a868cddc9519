use crate::app::state::PickerSlot;
use crate::domain::errors::GenerationError;
use crate::domain::models::CssColor;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- Toolbar ---
    PickColor(PickerSlot, CssColor), // swatch clicked
    GenerateRequested(String),       // AI button clicked with a prompt

    // --- Async Results ---
    GenerationSettled(Result<String, GenerationError>),
    LoadingChanged(bool),

    // --- UI ---
    DismissError,
    Quit,
}
