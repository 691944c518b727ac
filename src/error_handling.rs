use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("invalid character, '{0}', encountered")]
    invalid_character(String),

    #[error("'{0}' is not a valid number")]
    invalid_number(String),

    #[error("did not expect '{0}'")]
    did_not_expect(String),

    #[error("could not find '{0}'")]
    could_not_find(String),

    #[error("function, '{0}', is not defined")]
    undefined(String),

    #[error("expression ended abruptly")]
    abrupt_end,

    #[error("currency literal, '{0}', was never resolved")]
    unresolved(String),

    #[error("expression is nested deeper than {0} levels")]
    too_deep(usize),

    #[error("result of '{0}' is not a finite number")]
    not_finite(String),

    #[error("'{0}' is not a valid exchange rate, expected a positive number")]
    invalid_rate(String),

    #[error("could not read exchange rate from '{path}'")]
    unreadable_config {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    malformed_expression,
    nesting_too_deep,
    numeric_overflow,
    invalid_configuration,
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        use CalcError::*;
        match self {
            invalid_character(_) | invalid_number(_) | did_not_expect(_) | could_not_find(_)
            | undefined(_) | abrupt_end | unresolved(_) => ErrorKind::malformed_expression,
            too_deep(_) => ErrorKind::nesting_too_deep,
            not_finite(_) => ErrorKind::numeric_overflow,
            invalid_rate(_) | unreadable_config { .. } => ErrorKind::invalid_configuration,
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
