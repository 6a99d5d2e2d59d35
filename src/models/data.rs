use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of the document a field set was read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    #[default]
    Front,
    Mrz,
}

/// Fields read from the visual (front) side of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFields {
    pub full_name: String,
    /// As printed, separators included (e.g. `12-34-56`).
    pub personal_id_number: String,
    #[serde(default)]
    pub source: FieldSource,
}

impl DocumentFields {
    pub fn new(full_name: impl Into<String>, personal_id_number: impl Into<String>) -> Self {
        DocumentFields {
            full_name: full_name.into(),
            personal_id_number: personal_id_number.into(),
            source: FieldSource::Front,
        }
    }
}

/// Fields decoded from the machine readable zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MrzFields {
    /// Optional data slot 1, carries the personal ID number without separators.
    pub opt1: String,
    #[serde(default)]
    pub secondary_id: String,
}

impl MrzFields {
    pub fn new(opt1: impl Into<String>, secondary_id: impl Into<String>) -> Self {
        MrzFields {
            opt1: opt1.into(),
            secondary_id: secondary_id.into(),
        }
    }
}

/// Images the scanning engine captured together with a valid result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannedArtifacts {
    #[serde(
        default,
        with = "base64_bytes",
        skip_serializing_if = "Option::is_none"
    )]
    pub full_document_image: Option<Vec<u8>>,
    #[serde(
        default,
        with = "base64_bytes",
        skip_serializing_if = "Option::is_none"
    )]
    pub face_image: Option<Vec<u8>>,
}

impl ScannedArtifacts {
    pub fn is_empty(&self) -> bool {
        self.full_document_image.is_none() && self.face_image.is_none()
    }
}

/// One notification from the scanning engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanAttemptResult {
    Valid {
        document: DocumentFields,
        mrz: MrzFields,
        #[serde(default)]
        artifacts: ScannedArtifacts,
    },
    Invalid,
    NoDocument,
}

impl ScanAttemptResult {
    pub fn valid(document: DocumentFields, mrz: MrzFields) -> Self {
        ScanAttemptResult::Valid {
            document,
            mrz,
            artifacts: ScannedArtifacts::default(),
        }
    }

    /// Attaches artifacts to a `Valid` result; other variants are returned as is.
    pub fn with_artifacts(self, artifacts: ScannedArtifacts) -> Self {
        match self {
            ScanAttemptResult::Valid { document, mrz, .. } => ScanAttemptResult::Valid {
                document,
                mrz,
                artifacts,
            },
            other => other,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ScanAttemptResult::Valid { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub issue_type: ValidationIssueType,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssueType {
    Format,
    CrossMatch,
}

/// Why a scan was rejected. Each reason gets its own retry message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    DataMismatch,
    DataMalformed,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RejectionReason::DataMismatch => write!(f, "data mismatch"),
            RejectionReason::DataMalformed => write!(f, "malformed data"),
        }
    }
}

/// Verdict for one `(DocumentFields, MrzFields)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accepted(DocumentFields),
    Rejected {
        reason: RejectionReason,
        issues: Vec<ValidationIssue>,
    },
}

impl Decision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Decision::Accepted(_))
    }

    pub fn rejection_reason(&self) -> Option<RejectionReason> {
        match self {
            Decision::Accepted(_) => None,
            Decision::Rejected { reason, .. } => Some(*reason),
        }
    }
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        bytes: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|s| STANDARD.decode(s.as_bytes()).map_err(serde::de::Error::custom))
            .transpose()
    }
}
