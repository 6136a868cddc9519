#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Generate(String),
}
