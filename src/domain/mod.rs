pub mod errors;
pub mod format;
pub mod generation;
pub mod models;
