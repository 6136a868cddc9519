pub mod action;
pub mod command;
pub mod config;
pub mod features;
pub mod generation;
pub mod logging;
pub mod r#loop;
pub mod recovery;
pub mod reducer;
pub mod state;
