use crate::domain::errors::{ErrorKind, GenerationError};

#[must_use]
pub fn get_suggestions(err: &GenerationError) -> Vec<String> {
    let mut suggestions = Vec::new();
    let msg_lower = err.message().to_lowercase();

    match err.kind() {
        ErrorKind::Connectivity => {
            suggestions.push("Check your network connection and try again".to_string());
        }
        ErrorKind::Unknown => {
            suggestions
                .push("Try again; if it keeps failing, restart the editor".to_string());
        }
        ErrorKind::Provider => {}
    }

    if msg_lower.contains("rate limit") || msg_lower.contains("quota") {
        suggestions.push("Wait a moment before generating again".to_string());
    }

    if msg_lower.contains("api key")
        || msg_lower.contains("unauthorized")
        || msg_lower.contains("401")
    {
        suggestions
            .push("Check the credentials configured for the generation service".to_string());
    }

    if msg_lower.contains("context length") || msg_lower.contains("too long") {
        suggestions.push("Try a shorter prompt".to_string());
    }

    suggestions
}
