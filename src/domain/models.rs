use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque formatting command identifier, e.g. `foreColor` or `backColor`.
/// Never validated; the command sink decides what it means.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatCommand(pub String);

impl fmt::Display for FormatCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for FormatCommand {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A CSS color string (`#ff0000`, `red`, `rgb(...)`). Taken as given.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CssColor(pub String);

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CssColor {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One formatting intent. `value: None` always means "remove the formatting
/// for this command"; `Some` always means "apply it".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBinding {
    pub command: FormatCommand,
    pub value: Option<CssColor>,
}

impl CommandBinding {
    #[must_use]
    pub fn apply(command: FormatCommand, color: CssColor) -> Self {
        Self {
            command,
            value: Some(color),
        }
    }

    #[must_use]
    pub fn clear(command: FormatCommand) -> Self {
        Self {
            command,
            value: None,
        }
    }

    pub fn is_removal(&self) -> bool {
        self.value.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Issued by a controller for every `generate` call, strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestId(pub u64);

impl RequestId {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_removal_flag() {
        let apply = CommandBinding::apply("foreColor".into(), "#ff0000".into());
        assert!(!apply.is_removal());
        assert_eq!(apply.value, Some(CssColor("#ff0000".to_string())));

        let clear = CommandBinding::clear("foreColor".into());
        assert!(clear.is_removal());
        assert_eq!(clear.command.to_string(), "foreColor");
    }

    #[test]
    fn test_request_ids_increase() {
        let first = RequestId::default().next();
        let second = first.next();
        assert!(second > first);
        assert_eq!(second.to_string(), "#2");
    }
}
