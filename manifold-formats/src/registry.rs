use crate::detect;
use crate::error::RegistryError;
use crate::formats::{ChromeOs, Firefox, W3c, Windows10};
use crate::transformation::{Direction, Transformation};
use manifold_types::{FormatId, ManifestContent};
use serde::Serialize;

/// Immutable `FormatId -> Transformation` table.
///
/// Built once at startup and shared read-only afterwards. Entries are kept in detection priority
/// order: the base format first, then the remaining formats in registration order.
pub struct FormatRegistry {
    entries: Vec<Box<dyn Transformation>>,
}

/// Collects transformations before freezing them into a [`FormatRegistry`].
#[derive(Default)]
pub struct FormatRegistryBuilder {
    entries: Vec<Box<dyn Transformation>>,
}

/// Listing view of one registered format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatSummary {
    pub id: String,
    pub summary: String,
    pub to_base: bool,
    pub from_base: bool,
    pub base: bool,
}

impl FormatRegistryBuilder {
    pub fn register(mut self, transformation: impl Transformation + 'static) -> Self {
        self.entries.push(Box::new(transformation));
        self
    }

    pub fn register_boxed(mut self, transformation: Box<dyn Transformation>) -> Self {
        self.entries.push(transformation);
        self
    }

    pub fn build(self) -> Result<FormatRegistry, RegistryError> {
        let mut seen: Vec<FormatId> = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let id = entry.format();
            if seen.contains(&id) {
                return Err(RegistryError::DuplicateFormat(id));
            }
            seen.push(id);
        }

        let (mut base, rest): (Vec<_>, Vec<_>) =
            self.entries.into_iter().partition(|t| t.format().is_base());
        if base.is_empty() {
            return Err(RegistryError::MissingBaseFormat);
        }
        base.extend(rest);
        Ok(FormatRegistry { entries: base })
    }
}

impl FormatRegistry {
    pub fn builder() -> FormatRegistryBuilder {
        FormatRegistryBuilder::default()
    }

    /// Registry with every built-in format: w3c, chromeos, firefox, windows10.
    pub fn builtin() -> Self {
        Self::with_windows10(Windows10::new())
    }

    /// Built-in formats with a caller-configured Windows 10 transformation.
    pub fn with_windows10(windows10: Windows10) -> Self {
        Self {
            entries: vec![
                Box::new(W3c),
                Box::new(ChromeOs),
                Box::new(Firefox),
                Box::new(windows10),
            ],
        }
    }

    pub fn lookup(&self, id: &FormatId) -> Option<&dyn Transformation> {
        self.entries
            .iter()
            .find(|t| t.format() == *id)
            .map(|t| t.as_ref())
    }

    pub fn contains(&self, id: &FormatId) -> bool {
        self.lookup(id).is_some()
    }

    pub fn detect(&self, content: &ManifestContent) -> Option<FormatId> {
        detect::detect(self, content)
    }

    /// Transformations in detection priority order.
    pub fn transformations(&self) -> impl Iterator<Item = &dyn Transformation> {
        self.entries.iter().map(|t| t.as_ref())
    }

    pub fn ids(&self) -> Vec<FormatId> {
        self.entries.iter().map(|t| t.format()).collect()
    }

    pub fn summaries(&self) -> Vec<FormatSummary> {
        self.entries
            .iter()
            .map(|t| {
                let id = t.format();
                FormatSummary {
                    base: id.is_base(),
                    id: id.to_string(),
                    summary: t.summary().to_string(),
                    to_base: t.supports(Direction::ToBase),
                    from_base: t.supports(Direction::FromBase),
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("formats", &self.ids())
            .finish()
    }
}
