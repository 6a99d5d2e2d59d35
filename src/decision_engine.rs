use crate::config::AcceptanceConfig;
use crate::models::*;
use crate::utils::AcceptanceError;
use crate::validation::*;

/// Pure verdict over one front/MRZ field pair.
#[derive(Clone, Debug, Default)]
pub struct DecisionEngine {
    rules: CrossMatchRules,
}

impl DecisionEngine {
    pub fn new() -> Self {
        DecisionEngine {
            rules: CrossMatchRules::new(),
        }
    }

    pub fn with_rules(rules: CrossMatchRules) -> Self {
        DecisionEngine { rules }
    }

    pub fn from_config(config: &AcceptanceConfig) -> Result<Self, AcceptanceError> {
        Ok(Self::with_rules(config.cross_match_rules()?))
    }

    pub fn rules(&self) -> &CrossMatchRules {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut CrossMatchRules {
        &mut self.rules
    }

    // Field shape is checked before cross-matching, so an empty ID number is
    // reported as malformed rather than matching an empty opt1.
    pub fn decide(&self, document: &DocumentFields, mrz: &MrzFields) -> Decision {
        // Step 1: Validate field shape
        let format_issues = FieldValidator::validate(document);
        if !format_issues.is_empty() {
            return Decision::Rejected {
                reason: RejectionReason::DataMalformed,
                issues: format_issues,
            };
        }

        // Step 2: Cross-match front against MRZ
        let match_issues = CrossMatcher::check(&self.rules, document, mrz);
        if !match_issues.is_empty() {
            return Decision::Rejected {
                reason: RejectionReason::DataMismatch,
                issues: match_issues,
            };
        }

        Decision::Accepted(document.clone())
    }
}
