use std::io;

/// Why a DN failed the structural check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DnSyntax {
    #[error("empty RDN segment")]
    EmptySegment,

    #[error("RDN segment without '='")]
    MissingEquals,

    #[error("attribute type is not a keystring")]
    InvalidKey,

    #[error("RDN segment has an empty value")]
    EmptyValue,

    #[error("unterminated escape sequence")]
    UnterminatedEscape,
}

/// An entry broke one of the structural rules checked before rendering.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("entry DN cannot be empty")]
    EmptyDn,

    #[error("invalid DN {dn:?}: {reason}")]
    InvalidDn { dn: String, reason: DnSyntax },

    #[error("entry must have at least one object class")]
    NoObjectClasses,

    #[error("invalid objectClass name {value:?}")]
    InvalidObjectClass { value: String },

    #[error("invalid attribute name {name:?}")]
    InvalidAttributeName { name: String },

    #[error("attribute {name} has no values")]
    EmptyAttribute { name: String },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyDn | ValidationError::InvalidDn { .. } => "dn",
            ValidationError::NoObjectClasses | ValidationError::InvalidObjectClass { .. } => {
                "objectClass"
            }
            ValidationError::InvalidAttributeName { .. } => "attributes",
            ValidationError::EmptyAttribute { name } => name.as_str(),
        }
    }

    /// The value that was rejected (empty when the field is missing altogether).
    pub fn value(&self) -> &str {
        match self {
            ValidationError::InvalidDn { dn, .. } => dn.as_str(),
            ValidationError::InvalidObjectClass { value } => value.as_str(),
            ValidationError::InvalidAttributeName { name } => name.as_str(),
            ValidationError::EmptyDn
            | ValidationError::NoObjectClasses
            | ValidationError::EmptyAttribute { .. } => "",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LdifError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LdifError>;
