use crate::models::{DocumentFields, ValidationIssue, ValidationIssueType};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // English letters, hyphen and ASCII whitespace only. Accented and other
    // non-ASCII letters are rejected on purpose: this is a strict allow-list,
    // not a name plausibility check.
    static ref FULL_NAME_PATTERN: Regex = Regex::new(r"^[A-Za-z\-\t\n\x0B\x0C\r ]+$")
        .unwrap_or_else(|_| Regex::new(r"a^a").unwrap());
}

/// Shape and charset checks on individual front-side fields.
pub struct FieldValidator;

impl FieldValidator {
    /// A full name is valid iff it is non-empty and made only of English
    /// letters, `-` and whitespace.
    pub fn is_valid_full_name(full_name: &str) -> bool {
        FULL_NAME_PATTERN.is_match(full_name)
    }

    pub fn validate(document: &DocumentFields) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if document.full_name.is_empty() {
            issues.push(ValidationIssue {
                issue_type: ValidationIssueType::Format,
                message: "Full name is missing".to_string(),
            });
        } else if !Self::is_valid_full_name(&document.full_name) {
            issues.push(ValidationIssue {
                issue_type: ValidationIssueType::Format,
                message: format!(
                    "Full name contains characters other than letters, '-' and whitespace: {:?}",
                    document.full_name
                ),
            });
        }

        // Separators alone do not make an ID number.
        if document.personal_id_number.chars().all(|c| c == '-') {
            issues.push(ValidationIssue {
                issue_type: ValidationIssueType::Format,
                message: "Personal ID number is missing".to_string(),
            });
        }

        issues
    }
}
