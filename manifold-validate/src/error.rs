use manifold_formats::ConvertError;
use manifold_types::FormatId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no validation rules are registered for platform `{platform}`")]
    UnknownPlatform { platform: String },

    #[error("validation requires a {} manifest, got {format}", FormatId::W3C)]
    NotCanonical { format: FormatId },

    #[error(transparent)]
    InvalidManifest(#[from] ConvertError),
}
