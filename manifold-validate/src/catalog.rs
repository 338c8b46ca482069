use crate::rule::ValidationRule;
use crate::rules;
use manifold_types::ValidationLevel;
use serde::Serialize;

type RuleSet = Vec<Box<dyn ValidationRule>>;

/// Immutable `platform id -> rule set` mapping.
///
/// Platforms keep their registration order, and rules keep their order within a platform. An
/// empty rule set is a valid registration.
#[derive(Default)]
pub struct RuleCatalog {
    sets: Vec<(String, RuleSet)>,
}

#[derive(Default)]
pub struct RuleCatalogBuilder {
    sets: Vec<(String, RuleSet)>,
}

/// Listing view of one registered rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    pub platform: String,
    pub id: String,
    pub level: ValidationLevel,
    pub summary: String,
}

impl RuleCatalogBuilder {
    /// Declare a platform, with no rules if none are registered for it later.
    pub fn platform(mut self, platform: &str) -> Self {
        self.set_mut(platform);
        self
    }

    pub fn register(mut self, platform: &str, rule: impl ValidationRule + 'static) -> Self {
        self.set_mut(platform).push(Box::new(rule));
        self
    }

    pub fn register_boxed(mut self, platform: &str, rule: Box<dyn ValidationRule>) -> Self {
        self.set_mut(platform).push(rule);
        self
    }

    pub fn build(self) -> RuleCatalog {
        RuleCatalog { sets: self.sets }
    }

    fn set_mut(&mut self, platform: &str) -> &mut RuleSet {
        let key = platform.trim().to_ascii_lowercase();
        let idx = match self.sets.iter().position(|(p, _)| *p == key) {
            Some(idx) => idx,
            None => {
                self.sets.push((key, Vec::new()));
                self.sets.len() - 1
            }
        };
        &mut self.sets[idx].1
    }
}

impl RuleCatalog {
    pub fn builder() -> RuleCatalogBuilder {
        RuleCatalogBuilder::default()
    }

    /// Common rules plus the rule sets for web, windows10, chrome, firefox, android and ios.
    pub fn builtin() -> Self {
        rules::register_builtin(Self::builder()).build()
    }

    /// Rule set for `platform`, compared case-insensitively.
    pub fn rules_for(&self, platform: &str) -> Option<&[Box<dyn ValidationRule>]> {
        let key = platform.trim().to_ascii_lowercase();
        self.sets
            .iter()
            .find(|(p, _)| *p == key)
            .map(|(_, rules)| rules.as_slice())
    }

    pub fn contains(&self, platform: &str) -> bool {
        self.rules_for(platform).is_some()
    }

    pub fn platforms(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(|(p, _)| p.as_str())
    }

    pub fn summaries(&self) -> Vec<RuleSummary> {
        self.sets
            .iter()
            .flat_map(|(platform, rules)| {
                rules.iter().map(move |rule| RuleSummary {
                    platform: platform.clone(),
                    id: rule.id().to_string(),
                    level: rule.level(),
                    summary: rule.summary().to_string(),
                })
            })
            .collect()
    }
}

impl std::fmt::Debug for RuleCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.sets.iter().map(|(p, rules)| (p, rules.len())))
            .finish()
    }
}
