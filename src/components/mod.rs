pub mod ai_generate;
pub mod color_picker;

pub use ai_generate::AiGenerateButton;
pub use color_picker::{ColorPickerButton, Swatch};
