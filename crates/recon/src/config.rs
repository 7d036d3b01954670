use serde::{Deserialize, Serialize};

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Column mapping and output policy for one reconciliation.
///
/// Every field has a default matching the production export formats, so an
/// empty TOML document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReconConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub candidate: CandidateColumns,
    #[serde(default)]
    pub reference: ReferenceColumns,
    #[serde(default)]
    pub output: OutputPolicy,
}

fn default_name() -> String {
    "address-recon".into()
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            candidate: CandidateColumns::default(),
            reference: ReferenceColumns::default(),
            output: OutputPolicy::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Candidate dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CandidateColumns {
    /// Free-text management comment carrying the job identifier.
    pub comment: String,
    /// Prefecture + municipality.
    pub city: String,
    /// Street number / building text.
    pub street: String,
    pub postal_code: String,
    /// Bulk-import operation column. Optional in the input.
    pub operation_code: String,
}

impl Default for CandidateColumns {
    fn default() -> Self {
        Self {
            comment: "管理コメント".into(),
            city: "都道府県市区町村".into(),
            street: "番地".into(),
            postal_code: "郵便番号".into(),
            operation_code: "操作コード".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Reference dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReferenceColumns {
    /// Bracketed job code, e.g. `[251073560040]`.
    pub identifier: String,
    pub postal_code: String,
    pub prefecture: String,
    pub city: String,
    pub street: String,
    /// Descriptive columns carried on each record but never matched on.
    pub passthrough: Vec<String>,
}

impl Default for ReferenceColumns {
    fn default() -> Self {
        Self {
            identifier: "求人コード".into(),
            postal_code: "勤務地(郵便番号)".into(),
            prefecture: "勤務地(都道府県)".into(),
            city: "勤務地(市区町村)".into(),
            street: "勤務地(番地、ビル名)".into(),
            passthrough: [
                "データ区分",
                "拠点コード",
                "企業名",
                "部署",
                "求人タイトル",
                "業種(職種)小カテゴリコード",
                "業種(職種)備考",
                "勤務地(市区町村コード)",
                "勤務地備考",
                "勤務地(企業)住所",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Output policy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputPolicy {
    /// Literal written to the operation column of every correction row.
    pub update_operation_code: String,
    /// Reference address reported when the identifier has no reference row.
    pub no_reference_sentinel: String,
}

impl Default for OutputPolicy {
    fn default() -> Self {
        Self {
            update_operation_code: "02".into(),
            no_reference_sentinel: "(データなし)".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ReconError> {
        toml::to_string_pretty(self).map_err(|e| ReconError::ConfigParse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        let named = [
            ("candidate.comment", &self.candidate.comment),
            ("candidate.city", &self.candidate.city),
            ("candidate.street", &self.candidate.street),
            ("candidate.postal_code", &self.candidate.postal_code),
            ("candidate.operation_code", &self.candidate.operation_code),
            ("reference.identifier", &self.reference.identifier),
            ("reference.postal_code", &self.reference.postal_code),
            ("reference.prefecture", &self.reference.prefecture),
            ("reference.city", &self.reference.city),
            ("reference.street", &self.reference.street),
        ];
        for (key, value) in named {
            if value.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!("{key} must not be blank")));
            }
        }

        if self.reference.passthrough.iter().any(|c| c.trim().is_empty()) {
            return Err(ReconError::ConfigValidation(
                "reference.passthrough must not contain blank column names".into(),
            ));
        }

        // Each overwritten output column must be a different header, otherwise
        // one rewrite silently shadows another.
        let overwritten = self.overwritten_candidate_columns();
        for (i, a) in overwritten.iter().enumerate() {
            if overwritten[i + 1..].contains(a) {
                return Err(ReconError::ConfigValidation(format!(
                    "candidate column '{a}' is mapped to more than one output field"
                )));
            }
        }

        if self.output.update_operation_code.is_empty() {
            return Err(ReconError::ConfigValidation(
                "output.update_operation_code must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Columns the candidate table must declare before a run.
    pub fn required_candidate_columns(&self) -> Vec<&str> {
        vec![
            self.candidate.comment.as_str(),
            self.candidate.city.as_str(),
            self.candidate.street.as_str(),
            self.candidate.postal_code.as_str(),
        ]
    }

    /// Columns the reference table must declare before a run.
    pub fn required_reference_columns(&self) -> Vec<&str> {
        vec![
            self.reference.identifier.as_str(),
            self.reference.postal_code.as_str(),
            self.reference.prefecture.as_str(),
            self.reference.city.as_str(),
            self.reference.street.as_str(),
        ]
    }

    fn overwritten_candidate_columns(&self) -> [&str; 4] {
        [
            self.candidate.operation_code.as_str(),
            self.candidate.postal_code.as_str(),
            self.candidate.city.as_str(),
            self.candidate.street.as_str(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
