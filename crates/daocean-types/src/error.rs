/// Errors from parsing shared model types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypesError {
    #[error("unknown event: {0}")]
    UnknownEvent(String),
    #[error("invalid {kind} value: {value:?}")]
    InvalidValue { kind: &'static str, value: String },
}

impl TypesError {
    pub(crate) fn invalid(kind: &'static str, value: &str) -> Self {
        Self::InvalidValue {
            kind,
            value: value.to_string(),
        }
    }
}
