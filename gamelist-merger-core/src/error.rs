/// Configuration errors raised while building merge policies.
///
/// Merging and filtering themselves never fail; only assembling a comparer or
/// a filter rule from bad input does.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("At least one property must be specified for a game comparer")]
    EmptyComparer,

    #[error("Unknown filter property: {0}")]
    UnknownFilterProperty(String),

    #[error("Unknown filter operation: {0}")]
    UnknownFilterOperation(String),

    #[error("Unknown folder match: {0} (expected path, name or id)")]
    UnknownFolderMatch(String),

    #[error("Invalid filter rule '{0}': expected PROPERTY:OPERATION[:VALUE,...]")]
    InvalidFilterRule(String),
}

impl MergeError {
    pub fn unknown_property(name: impl Into<String>) -> Self {
        Self::UnknownFilterProperty(name.into())
    }

    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::UnknownFilterOperation(name.into())
    }

    pub fn invalid_rule(rule: impl Into<String>) -> Self {
        Self::InvalidFilterRule(rule.into())
    }
}
