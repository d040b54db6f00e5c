//! Parameter metadata derived from command struct fields

/// Metadata about one command parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamMeta {
    /// Field name
    pub name: &'static str,
    /// Description taken from the field's doc comment
    pub description: &'static str,
    /// Whether the field is required (not an `Option`)
    pub required: bool,
}
