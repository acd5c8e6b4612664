//! Inputs for the quick health-assessment report.

use serde::{Deserialize, Serialize};

use super::enums::RiskLevel;
use super::report::TimelineEntry;
use super::{deserialize_score, nullable};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    #[serde(default, deserialize_with = "nullable")]
    pub personal_info: AssessmentPersonalInfo,
    #[serde(default, deserialize_with = "nullable")]
    pub primary_symptom: String,
    #[serde(default, deserialize_with = "nullable")]
    pub secondary_symptoms: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub medications: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub conditions: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub family_history: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub duration: String,
    /// 1-10.
    #[serde(default, deserialize_with = "nullable")]
    pub severity: u8,
    #[serde(default, deserialize_with = "nullable")]
    pub lifestyle: super::patient::LifestyleProfile,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentPersonalInfo {
    #[serde(default, deserialize_with = "nullable")]
    pub age: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub gender: String,
    #[serde(default, deserialize_with = "nullable")]
    pub weight: f32,
    #[serde(default, deserialize_with = "nullable")]
    pub height: f32,
}

/// Recommendation payload from the health-assessment endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecommendation {
    /// 0-100, higher is healthier.
    #[serde(default, deserialize_with = "deserialize_score")]
    pub health_score: u8,
    #[serde(default, deserialize_with = "deserialize_score")]
    pub confidence_score: u8,
    #[serde(default, deserialize_with = "nullable")]
    pub risk_level: RiskLevel,
    #[serde(default, deserialize_with = "nullable")]
    pub recommendations: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub medication_suggestions: Vec<MedicationSuggestion>,
    #[serde(default, deserialize_with = "nullable")]
    pub lifestyle_suggestions: Vec<LifestyleSuggestion>,
    #[serde(default, deserialize_with = "nullable")]
    pub follow_up_timeline: Vec<TimelineEntry>,
    #[serde(default, deserialize_with = "nullable")]
    pub emergency_warnings: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub next_steps: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub safety_alerts: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationSuggestion {
    #[serde(default, deserialize_with = "nullable")]
    pub medication: SuggestedMedication,
    #[serde(default, deserialize_with = "nullable")]
    pub dosage: String,
    #[serde(default, deserialize_with = "nullable")]
    pub timing: String,
    #[serde(default, deserialize_with = "nullable")]
    pub duration: String,
    /// Rupees saved by choosing the generic.
    #[serde(default, deserialize_with = "nullable")]
    pub cost_saving: f32,
    #[serde(default, deserialize_with = "nullable")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedMedication {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub category: String,
    #[serde(default, deserialize_with = "nullable")]
    pub prescription_required: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifestyleSuggestion {
    #[serde(default, deserialize_with = "nullable")]
    pub category: String,
    #[serde(default, deserialize_with = "nullable")]
    pub recommendations: Vec<String>,
}
