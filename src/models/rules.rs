use crate::models::{DocumentFields, MrzFields};
use crate::utils::AcceptanceError;
use std::fmt;
use std::sync::Arc;

pub type RulePredicate = Arc<dyn Fn(&DocumentFields, &MrzFields) -> bool + Send + Sync>;

pub const PERSONAL_ID_MATCHES_OPT1: &str = "personal_id_matches_opt1";
pub const NAME_CONTAINS_SECONDARY_ID: &str = "name_contains_secondary_id";

#[derive(Clone)]
pub enum RuleKind {
    /// Front personal ID number, hyphens removed, equals MRZ opt1.
    PersonalIdMatchesOpt1,
    /// MRZ secondary ID is non-empty and appears in the upper-cased full name.
    NameContainsSecondaryId,
    Custom { name: String, predicate: RulePredicate },
}

impl fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RuleKind::PersonalIdMatchesOpt1 => write!(f, "PersonalIdMatchesOpt1"),
            RuleKind::NameContainsSecondaryId => write!(f, "NameContainsSecondaryId"),
            RuleKind::Custom { name, .. } => write!(f, "Custom({})", name),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CrossMatchRule {
    pub kind: RuleKind,
    pub enabled: bool,
}

impl CrossMatchRule {
    pub fn name(&self) -> &str {
        match &self.kind {
            RuleKind::PersonalIdMatchesOpt1 => PERSONAL_ID_MATCHES_OPT1,
            RuleKind::NameContainsSecondaryId => NAME_CONTAINS_SECONDARY_ID,
            RuleKind::Custom { name, .. } => name.as_str(),
        }
    }
}

/// Ordered cross-match policy. Every enabled rule must pass.
#[derive(Clone, Debug)]
pub struct CrossMatchRules {
    rules: Vec<CrossMatchRule>,
}

impl CrossMatchRules {
    pub fn new() -> Self {
        let rules = vec![
            CrossMatchRule {
                kind: RuleKind::PersonalIdMatchesOpt1,
                enabled: true,
            },
            // Part of the data contract but off in the current policy.
            CrossMatchRule {
                kind: RuleKind::NameContainsSecondaryId,
                enabled: false,
            },
        ];

        CrossMatchRules { rules }
    }

    /// Appends an enabled host-supplied rule after the built-in ones.
    pub fn push_custom<F>(&mut self, name: impl Into<String>, predicate: F)
    where
        F: Fn(&DocumentFields, &MrzFields) -> bool + Send + Sync + 'static,
    {
        self.rules.push(CrossMatchRule {
            kind: RuleKind::Custom {
                name: name.into(),
                predicate: Arc::new(predicate),
            },
            enabled: true,
        });
    }

    pub fn get_rule(&self, name: &str) -> Result<&CrossMatchRule, AcceptanceError> {
        self.rules
            .iter()
            .find(|rule| rule.name() == name)
            .ok_or_else(|| AcceptanceError::Config(format!("No cross-match rule named: {}", name)))
    }

    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<(), AcceptanceError> {
        let rule = self
            .rules
            .iter_mut()
            .find(|rule| rule.name() == name)
            .ok_or_else(|| AcceptanceError::Config(format!("No cross-match rule named: {}", name)))?;
        rule.enabled = enabled;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CrossMatchRule> {
        self.rules.iter()
    }

    pub fn enabled(&self) -> impl Iterator<Item = &CrossMatchRule> {
        self.rules.iter().filter(|rule| rule.enabled)
    }
}

impl Default for CrossMatchRules {
    fn default() -> Self {
        Self::new()
    }
}
