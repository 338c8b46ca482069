use crate::error::ConvertError;
use crate::registry::FormatRegistry;
use crate::transformation::Direction;
use manifold_types::{FormatId, ManifestInfo};
use tracing::debug;

/// Converts manifests between registered formats through the base format.
#[derive(Debug, Clone, Copy)]
pub struct Converter<'r> {
    registry: &'r FormatRegistry,
}

impl<'r> Converter<'r> {
    pub fn new(registry: &'r FormatRegistry) -> Self {
        Self { registry }
    }

    /// Convert `info` into `target`.
    ///
    /// Returns the fully converted manifest or an error; a failing first stage never reaches the
    /// second. When the input is already in the target format it is returned unchanged, apart
    /// from stamping a missing format tag.
    pub fn convert_to(
        &self,
        mut info: ManifestInfo,
        target: &FormatId,
    ) -> Result<ManifestInfo, ConvertError> {
        if info.is_empty() {
            return Err(ConvertError::InvalidFormat {
                reason: "manifest content is empty or not initialized".to_string(),
            });
        }

        let source = info.format_or_base();
        let target = FormatId::new(target.as_str());

        if source == target {
            if info.format.is_none() {
                info.format = Some(target);
            }
            debug!(format = %source, "conversion skipped, already in target format");
            return Ok(info);
        }

        let from = self
            .registry
            .lookup(&source)
            .ok_or_else(|| ConvertError::FormatNotRecognized {
                format: source.clone(),
            })?;
        let to = self
            .registry
            .lookup(&target)
            .ok_or_else(|| ConvertError::FormatNotRecognized {
                format: target.clone(),
            })?;

        if !from.supports(Direction::ToBase) {
            return Err(ConvertError::DirectionNotImplemented {
                format: source,
                direction: Direction::ToBase,
            });
        }
        if !to.supports(Direction::FromBase) {
            return Err(ConvertError::DirectionNotImplemented {
                format: target,
                direction: Direction::FromBase,
            });
        }

        debug!(from = %source, to = %target, "converting manifest");
        let base = from.to_base(&info)?;
        let converted = to.from_base(&base)?;
        debug!(
            from = %source,
            to = %target,
            members = converted.content.len(),
            "conversion complete"
        );
        Ok(converted)
    }

    /// Convert into the base format.
    pub fn to_base(&self, info: ManifestInfo) -> Result<ManifestInfo, ConvertError> {
        self.convert_to(info, &FormatId::base())
    }
}
