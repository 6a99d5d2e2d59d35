use crate::models::{
    CrossMatchRules, RejectionReason, RetryPrompt, NAME_CONTAINS_SECONDARY_ID,
    PERSONAL_ID_MATCHES_OPT1,
};
use crate::utils::AcceptanceError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Session policy. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AcceptanceConfig {
    pub rules: RuleToggles,
    /// Bundle the full document image into the accepted scan.
    pub return_full_document_image: bool,
    /// Bundle the face image into the accepted scan.
    pub return_face_image: bool,
    pub prompts: PromptTexts,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleToggles {
    pub personal_id_matches_opt1: bool,
    pub name_contains_secondary_id: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PromptTexts {
    pub title: String,
    pub data_mismatch: String,
    pub data_malformed: String,
    pub acknowledge_label: String,
}

impl Default for AcceptanceConfig {
    fn default() -> Self {
        AcceptanceConfig {
            rules: RuleToggles::default(),
            return_full_document_image: true,
            return_face_image: true,
            prompts: PromptTexts::default(),
        }
    }
}

impl Default for RuleToggles {
    fn default() -> Self {
        RuleToggles {
            personal_id_matches_opt1: true,
            name_contains_secondary_id: false,
        }
    }
}

impl Default for PromptTexts {
    fn default() -> Self {
        PromptTexts {
            title: "Scanning failed".to_string(),
            data_mismatch: "Data from the front side does not match the data from the back side. \
                            Please scan the document again."
                .to_string(),
            data_malformed: "Scanned data is not valid. Please scan the document again.".to_string(),
            acknowledge_label: "Retry".to_string(),
        }
    }
}

impl AcceptanceConfig {
    pub fn from_json_str(json: &str) -> Result<Self, AcceptanceError> {
        serde_json::from_str(json)
            .map_err(|e| AcceptanceError::Config(format!("Invalid acceptance config: {}", e)))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, AcceptanceError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Built-in rules in their fixed order, toggled per this config.
    pub fn cross_match_rules(&self) -> Result<CrossMatchRules, AcceptanceError> {
        let mut rules = CrossMatchRules::new();
        rules.set_enabled(PERSONAL_ID_MATCHES_OPT1, self.rules.personal_id_matches_opt1)?;
        rules.set_enabled(NAME_CONTAINS_SECONDARY_ID, self.rules.name_contains_secondary_id)?;
        Ok(rules)
    }

    pub fn retry_prompt(&self, reason: RejectionReason) -> RetryPrompt {
        let message = match reason {
            RejectionReason::DataMismatch => &self.prompts.data_mismatch,
            RejectionReason::DataMalformed => &self.prompts.data_malformed,
        };

        RetryPrompt {
            reason,
            title: self.prompts.title.clone(),
            message: message.clone(),
            acknowledge_label: self.prompts.acknowledge_label.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_object_gives_defaults() {
        let config = AcceptanceConfig::from_json_str("{}").unwrap();
        assert_eq!(config, AcceptanceConfig::default());
        assert!(config.return_face_image);
        assert!(!config.rules.name_contains_secondary_id);
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config = AcceptanceConfig::from_json_str(
            r#"{ "rules": { "name_contains_secondary_id": true }, "return_face_image": false }"#,
        )
        .unwrap();
        assert!(config.rules.personal_id_matches_opt1);
        assert!(config.rules.name_contains_secondary_id);
        assert!(!config.return_face_image);
        assert!(config.return_full_document_image);

        let rules = config.cross_match_rules().unwrap();
        assert_eq!(rules.enabled().count(), 2);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = AcceptanceConfig::from_json_str(r#"{ "retries": 3 }"#).unwrap_err();
        assert!(matches!(err, AcceptanceError::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "prompts": {{ "title": "Try again" }} }}"#).unwrap();

        let config = AcceptanceConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.prompts.title, "Try again");
        assert_eq!(config.prompts.acknowledge_label, "Retry");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AcceptanceConfig::from_json_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, AcceptanceError::Io(_)));
    }

    #[test]
    fn prompts_differ_per_reason() {
        let config = AcceptanceConfig::default();
        let mismatch = config.retry_prompt(RejectionReason::DataMismatch);
        let malformed = config.retry_prompt(RejectionReason::DataMalformed);
        assert_ne!(mismatch.message, malformed.message);
        assert_eq!(mismatch.title, malformed.title);
        assert_eq!(malformed.reason, RejectionReason::DataMalformed);
    }
}
