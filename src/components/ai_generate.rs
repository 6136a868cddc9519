pub const AI_BUTTON_LABEL: &str = "Generate content with AI";
pub const AI_BUTTON_BUSY_TOOLTIP: &str = "Generating content...";

/// Render data for the "generate with AI" trigger. While a generation is
/// loading the trigger is disabled and shows a spinner instead of its icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiGenerateButton {
    pub disabled: bool,
    pub show_spinner: bool,
    pub tooltip: &'static str,
    pub aria_label: &'static str,
}

impl AiGenerateButton {
    #[must_use]
    pub fn view(loading: bool) -> Self {
        Self {
            disabled: loading,
            show_spinner: loading,
            tooltip: if loading {
                AI_BUTTON_BUSY_TOOLTIP
            } else {
                AI_BUTTON_LABEL
            },
            aria_label: AI_BUTTON_LABEL,
        }
    }

    /// Whether a click should be forwarded.
    pub fn accepts_click(&self) -> bool {
        !self.disabled
    }
}
