use std::path::Path;

use anyhow::{Context, Result};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::RankError;

pub const DEFAULT_TOP_K: u32 = 10;
pub const MAX_TOP_K: u32 = 50;
pub const DEFAULT_SKILL_VS_EXP_WEIGHT: f64 = 0.5;
const DEFAULT_ZIP_NAME: &str = "resumes.zip";

// ────────────────────────────────────────────────────────────────────────────
// Request
// ────────────────────────────────────────────────────────────────────────────

/// The zip archive of resumes, plus the file name reported in the upload.
#[derive(Debug, Clone)]
pub struct ZipUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

impl ZipUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a zip from disk. The upload keeps the file's own name.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read zip archive '{}'", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(DEFAULT_ZIP_NAME)
            .to_string();
        Ok(Self::new(file_name, bytes))
    }
}

/// Inputs for one ranking call. Built fresh per submission.
#[derive(Debug, Clone)]
pub struct RankRequest {
    pub zip_file: Option<ZipUpload>,
    pub job_description: String,
    /// Number of candidates to return, 1..=50.
    pub top_k: u32,
    /// 1.0 ranks purely on skills, 0.0 purely on experience.
    pub skill_vs_exp_weight: f64,
}

impl RankRequest {
    pub fn new(zip_file: ZipUpload, job_description: impl Into<String>) -> Self {
        Self {
            zip_file: Some(zip_file),
            job_description: job_description.into(),
            top_k: DEFAULT_TOP_K,
            skill_vs_exp_weight: DEFAULT_SKILL_VS_EXP_WEIGHT,
        }
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_skill_vs_exp_weight(mut self, weight: f64) -> Self {
        self.skill_vs_exp_weight = weight;
        self
    }

    /// Checks every local precondition. Runs before anything is sent.
    pub fn validate(&self) -> Result<(), RankError> {
        match &self.zip_file {
            None => return Err(RankError::validation("ZIP file is required")),
            Some(zip) if zip.bytes.is_empty() => {
                return Err(RankError::validation("ZIP file is empty"))
            }
            Some(_) => {}
        }

        if self.job_description.trim().is_empty() {
            return Err(RankError::validation("Job description is required"));
        }

        if !(1..=MAX_TOP_K).contains(&self.top_k) {
            return Err(RankError::validation(format!(
                "top_k must be between 1 and {MAX_TOP_K}, got {}",
                self.top_k
            )));
        }

        if !(0.0..=1.0).contains(&self.skill_vs_exp_weight) {
            return Err(RankError::validation(format!(
                "skill_vs_exp_weight must be between 0 and 1, got {}",
                self.skill_vs_exp_weight
            )));
        }

        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Response
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default)]
    pub job_skills: Vec<String>,
    #[serde(default)]
    pub results: Vec<CandidateResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateResult {
    pub candidate_id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub overall_score: f64,
    pub skill_match_score: f64,
    pub experience_score: f64,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub demonstrated_experiences: Vec<Evidence>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub explainability: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Value>,
}

impl CandidateResult {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Candidate")
    }
}

/// A resume line the service cites as demonstrated experience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
