pub mod scripted;
pub mod selection;

pub use scripted::{Reply, ScriptedProvider};
pub use selection::SelectionFormatter;
