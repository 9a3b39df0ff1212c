//! Completion payload returned once an attempt is scored

use serde::{Deserialize, Deserializer};

/// Personality type assigned by the server
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PersonalityType {
    pub mbti_type: String,
    pub name: String,
    pub description: String,
    pub strengths: String,
    pub weaknesses: String,
    pub career_recommendations: String,
}

/// Result of a completed assessment.
///
/// Scores are decimal fields on the server and arrive either as JSON
/// numbers or as strings such as `"12.50"`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssessmentResult {
    pub id: Option<i64>,
    pub personality_type: Option<PersonalityType>,
    #[serde(deserialize_with = "decimal")]
    pub ei_score: Option<f64>,
    #[serde(deserialize_with = "decimal")]
    pub sn_score: Option<f64>,
    #[serde(deserialize_with = "decimal")]
    pub tf_score: Option<f64>,
    #[serde(deserialize_with = "decimal")]
    pub jp_score: Option<f64>,
    #[serde(deserialize_with = "decimal")]
    pub confidence: Option<f64>,
    pub created_at: Option<String>,
}

impl AssessmentResult {
    /// Dimension label and score pairs that are present
    pub fn dimension_scores(&self) -> Vec<(&'static str, f64)> {
        [
            ("E/I", self.ei_score),
            ("S/N", self.sn_score),
            ("T/F", self.tf_score),
            ("J/P", self.jp_score),
        ]
        .into_iter()
        .filter_map(|(label, score)| score.map(|s| (label, s)))
        .collect()
    }
}

fn decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
