use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("value out of range")]
    ValueOutOfRange,
    #[error("invalid length")]
    InvalidLength,
    #[error("operation unsupported")]
    Unsupported,
    #[error("value of kind '{found}' is not of type '{expected}'")]
    TypeMismatch {
        found: &'static str,
        expected: &'static str,
    },
    #[error("{operation} is not implemented for {type_name}")]
    Unimplemented {
        type_name: &'static str,
        operation: &'static str,
    },
    #[error("{0}")]
    Message(&'static str),
}

/// Decode failure.
///
/// Each layer boundary wraps the error it received in [`DecodeError::Context`],
/// so the rendered message reads as a trail from the outermost layer down to
/// the primitive read that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid tag")]
    InvalidTag,
    #[error("invalid length")]
    InvalidLength,
    #[error("invalid value")]
    InvalidValue,
    #[error("operation unsupported")]
    Unsupported,
    #[error("{0}")]
    Message(&'static str),
    #[error("{component} - {method}: Parse - {source}")]
    Context {
        component: &'static str,
        method: &'static str,
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    pub fn context(self, component: &'static str, method: &'static str) -> Self {
        Self::Context {
            component,
            method,
            source: Box::new(self),
        }
    }

    /// The innermost error under any number of context wrappers.
    pub fn root_cause(&self) -> &DecodeError {
        let mut err = self;
        while let Self::Context { source, .. } = err {
            err = source;
        }
        err
    }
}

/// Adds layer context to a decode result.
pub trait DecodeContext<T> {
    fn context(self, component: &'static str, method: &'static str) -> Result<T, DecodeError>;
}

impl<T> DecodeContext<T> for Result<T, DecodeError> {
    fn context(self, component: &'static str, method: &'static str) -> Result<T, DecodeError> {
        self.map_err(|e| e.context(component, method))
    }
}
