use crate::transformation::Direction;
use manifold_types::FormatId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("invalid manifest format: {reason}")]
    InvalidFormat { reason: String },

    #[error("manifest format is not recognized: {format}")]
    FormatNotRecognized { format: FormatId },

    #[error("{direction} is not implemented for format {format}")]
    DirectionNotImplemented {
        format: FormatId,
        direction: Direction,
    },

    #[error("{format} manifest is missing required member `{field}`")]
    MissingField { format: FormatId, field: String },

    #[error("{format} manifest does not fit its schema: {message}")]
    Schema { format: FormatId, message: String },

    #[error("could not read the manifest template {path}: {message}")]
    Template { path: String, message: String },
}

impl ConvertError {
    pub(crate) fn missing(format: &str, field: &str) -> Self {
        Self::MissingField {
            format: FormatId::new(format),
            field: field.to_string(),
        }
    }

    pub(crate) fn schema(format: &str, message: impl ToString) -> Self {
        Self::Schema {
            format: FormatId::new(format),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("format {0} is registered more than once")]
    DuplicateFormat(FormatId),

    #[error("the base format `{}` is not registered", FormatId::W3C)]
    MissingBaseFormat,
}
