use crate::models::{
    CrossMatchRule, CrossMatchRules, DocumentFields, MrzFields, RuleKind, ValidationIssue,
    ValidationIssueType,
};

/// Compares front-side fields with the MRZ.
pub struct CrossMatcher;

impl CrossMatcher {
    /// Hyphens are stripped from the printed ID number and the rest compared
    /// verbatim with MRZ opt1. Case, whitespace and other punctuation count.
    pub fn matches(personal_id_number: &str, mrz_opt1: &str) -> bool {
        let cleaned: String = personal_id_number.chars().filter(|&c| c != '-').collect();
        cleaned == mrz_opt1
    }

    pub fn name_contains_secondary_id(full_name: &str, mrz_secondary_id: &str) -> bool {
        !mrz_secondary_id.is_empty() && full_name.to_uppercase().contains(mrz_secondary_id)
    }

    pub fn evaluate(rule: &CrossMatchRule, document: &DocumentFields, mrz: &MrzFields) -> bool {
        match &rule.kind {
            RuleKind::PersonalIdMatchesOpt1 => {
                Self::matches(&document.personal_id_number, &mrz.opt1)
            }
            RuleKind::NameContainsSecondaryId => {
                Self::name_contains_secondary_id(&document.full_name, &mrz.secondary_id)
            }
            RuleKind::Custom { predicate, .. } => predicate(document, mrz),
        }
    }

    /// One issue per enabled rule that fails, in rule order.
    pub fn check(
        rules: &CrossMatchRules,
        document: &DocumentFields,
        mrz: &MrzFields,
    ) -> Vec<ValidationIssue> {
        rules
            .enabled()
            .filter(|rule| !Self::evaluate(rule, document, mrz))
            .map(|rule| ValidationIssue {
                issue_type: ValidationIssueType::CrossMatch,
                message: format!("Cross-match rule '{}' failed", rule.name()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NAME_CONTAINS_SECONDARY_ID, PERSONAL_ID_MATCHES_OPT1};

    #[test]
    fn hyphens_are_removed_before_comparing() {
        assert!(CrossMatcher::matches("12-34-56", "123456"));
        assert!(CrossMatcher::matches("123456", "123456"));
        assert!(CrossMatcher::matches("--1-2-3456--", "123456"));
        assert!(!CrossMatcher::matches("12-34-56", "654321"));
    }

    #[test]
    fn no_other_normalization() {
        assert!(!CrossMatcher::matches("ab-12", "AB12"));
        assert!(!CrossMatcher::matches("12 34", "1234"));
        assert!(!CrossMatcher::matches("12.34", "1234"));
        // Only the left side is normalized.
        assert!(!CrossMatcher::matches("1234", "12-34"));
    }

    #[test]
    fn hyphen_insensitive_on_left_operand() {
        let pins = ["12-34-56", "-", "", "A-B", "1--2", "x y-z"];
        let opts = ["123456", "", "AB", "12", "x yz", "-"];
        for pin in pins {
            for opt in opts {
                assert_eq!(
                    CrossMatcher::matches(pin, opt),
                    CrossMatcher::matches(&pin.replace('-', ""), opt),
                    "{:?} vs {:?}",
                    pin,
                    opt
                );
            }
        }
    }

    #[test]
    fn empty_against_empty_matches() {
        assert!(CrossMatcher::matches("", ""));
        assert!(CrossMatcher::matches("---", ""));
        assert!(!CrossMatcher::matches("", "123"));
        assert!(!CrossMatcher::matches("123", ""));
    }

    #[test]
    fn secondary_id_must_be_present_in_upper_cased_name() {
        assert!(CrossMatcher::name_contains_secondary_id("Jane Doe", "JANE"));
        assert!(!CrossMatcher::name_contains_secondary_id("Jane Doe", "jane"));
        assert!(!CrossMatcher::name_contains_secondary_id("Jane Doe", ""));
        assert!(!CrossMatcher::name_contains_secondary_id("Jane Doe", "JOHN"));
    }

    #[test]
    fn check_reports_each_failing_enabled_rule() {
        let document = DocumentFields::new("Jane Doe", "12-34-56");
        let mrz = MrzFields::new("654321", "JOHN");

        let mut rules = CrossMatchRules::new();
        let issues = CrossMatcher::check(&rules, &document, &mrz);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains(PERSONAL_ID_MATCHES_OPT1));

        rules.set_enabled(NAME_CONTAINS_SECONDARY_ID, true).unwrap();
        let issues = CrossMatcher::check(&rules, &document, &mrz);
        assert_eq!(issues.len(), 2);
        assert!(issues[1].message.contains(NAME_CONTAINS_SECONDARY_ID));
    }

    #[test]
    fn disabled_rules_are_skipped() {
        let document = DocumentFields::new("Jane Doe", "12-34-56");
        let mrz = MrzFields::new("654321", "");

        let mut rules = CrossMatchRules::new();
        rules.set_enabled(PERSONAL_ID_MATCHES_OPT1, false).unwrap();
        assert!(CrossMatcher::check(&rules, &document, &mrz).is_empty());
    }
}
