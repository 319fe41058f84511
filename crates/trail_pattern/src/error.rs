/// Raised while compiling a template. Fatal to the route being registered.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatternError {
    #[error("optional segment opened at byte {position} is never closed")]
    UnclosedOptional { position: usize },
    #[error("unexpected `]` at byte {position}")]
    UnexpectedClose { position: usize },
    #[error("placeholder at byte {position} is missing its closing `>`")]
    UnterminatedPlaceholder { position: usize },
    #[error("placeholder at byte {position} does not start with a valid identifier")]
    InvalidPlaceholder { position: usize },
    #[error("constraint given for undeclared variable {name:?}")]
    UnknownConstraint { name: String },
    #[error("compiled expression is invalid: {0}")]
    Regex(#[from] regex::Error),
}

#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("value for {name:?} is a {kind} and has no textual form")]
    Unrepresentable { name: String, kind: &'static str },
}
