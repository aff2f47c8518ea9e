#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("no attribute named '{0}' is defined")]
    UndefinedAttribute(String),

    #[error("expression failed: {0}")]
    Failed(String),
}
