//! AI-produced report sections, as returned by the AI backend.
//!
//! Every list and sub-section tolerates `null` or absence. The executive
//! summary stays optional so the builder can reject a report without one.

use serde::{Deserialize, Serialize};

use super::enums::{Priority, RiskLevel};
use super::{deserialize_score, nullable};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiReport {
    #[serde(default)]
    pub executive_summary: Option<ExecutiveSummary>,
    #[serde(default, deserialize_with = "nullable")]
    pub symptom_analysis: SymptomAnalysis,
    #[serde(default, deserialize_with = "nullable")]
    pub risk_assessment: RiskAssessment,
    #[serde(default, deserialize_with = "nullable")]
    pub medication_recommendations: MedicationRecommendations,
    #[serde(default, deserialize_with = "nullable")]
    pub lifestyle_modifications: LifestyleModifications,
    #[serde(default, deserialize_with = "nullable")]
    pub follow_up_plan: FollowUpPlan,
    #[serde(default, deserialize_with = "nullable")]
    pub emergency_protocols: EmergencyProtocols,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveSummary {
    #[serde(default, deserialize_with = "nullable")]
    pub content: String,
    /// 0-100.
    #[serde(default, deserialize_with = "deserialize_score")]
    pub confidence_score: u8,
    #[serde(default, deserialize_with = "nullable")]
    pub key_findings: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomAnalysis {
    #[serde(default, deserialize_with = "nullable")]
    pub primary_diagnosis: Diagnosis,
    #[serde(default, deserialize_with = "nullable")]
    pub differential_diagnosis: Vec<Diagnosis>,
    #[serde(default, deserialize_with = "nullable")]
    pub risk_factors: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnosis {
    #[serde(default, deserialize_with = "nullable")]
    pub condition: String,
    /// 0-100.
    #[serde(default, deserialize_with = "deserialize_score")]
    pub confidence: u8,
    #[serde(default, deserialize_with = "nullable")]
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    #[serde(default, deserialize_with = "nullable")]
    pub overall_risk: RiskLevel,
    /// 0-100.
    #[serde(default, deserialize_with = "deserialize_score")]
    pub risk_score: u8,
    #[serde(default, deserialize_with = "nullable")]
    pub specific_risks: Vec<SpecificRisk>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecificRisk {
    #[serde(default, deserialize_with = "nullable")]
    pub category: String,
    #[serde(default, deserialize_with = "nullable")]
    pub level: RiskLevel,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRecommendations {
    #[serde(default, deserialize_with = "nullable")]
    pub primary_medications: Vec<MedicationRecommendation>,
    #[serde(default, deserialize_with = "nullable")]
    pub alternatives: Vec<AlternativeMedication>,
    #[serde(default, deserialize_with = "nullable")]
    pub interactions: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub contraindications: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRecommendation {
    #[serde(default, deserialize_with = "nullable")]
    pub medication: String,
    /// Locally available brand names.
    #[serde(default, alias = "brands", deserialize_with = "nullable")]
    pub indian_brands: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub dosage: String,
    #[serde(default, deserialize_with = "nullable")]
    pub duration: String,
    #[serde(default, deserialize_with = "nullable")]
    pub cost: String,
    #[serde(default, deserialize_with = "nullable")]
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlternativeMedication {
    #[serde(default, deserialize_with = "nullable")]
    pub medication: String,
    #[serde(default, deserialize_with = "nullable")]
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifestyleModifications {
    #[serde(default, deserialize_with = "nullable")]
    pub diet: DietPlan,
    #[serde(default, deserialize_with = "nullable")]
    pub exercise: RecommendationList,
    #[serde(default, deserialize_with = "nullable")]
    pub lifestyle: RecommendationList,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlan {
    #[serde(default, deserialize_with = "nullable")]
    pub recommendations: Vec<String>,
    /// Regionally relevant foods; the backend calls these `indianFoods`.
    #[serde(default, alias = "indianFoods", deserialize_with = "nullable")]
    pub regional_foods: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub restrictions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationList {
    #[serde(default, deserialize_with = "nullable")]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpPlan {
    #[serde(default, deserialize_with = "nullable")]
    pub timeline: Vec<TimelineEntry>,
    #[serde(default, deserialize_with = "nullable")]
    pub monitoring: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub red_flags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineEntry {
    #[serde(default, deserialize_with = "nullable")]
    pub timeframe: String,
    #[serde(default, deserialize_with = "nullable")]
    pub action: String,
    #[serde(default, deserialize_with = "nullable")]
    pub priority: Priority,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyProtocols {
    #[serde(default, deserialize_with = "nullable")]
    pub warning_signs_immediate: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub warning_signs_urgent: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub emergency_contacts: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub action_steps: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_shape() {
        let json = r#"{
            "executiveSummary": {"content": "Likely tension headache.", "confidenceScore": 82, "keyFindings": ["No red flags"]},
            "symptomAnalysis": {
                "primaryDiagnosis": {"condition": "Tension headache", "confidence": 78, "reasoning": "Bilateral, pressing"},
                "differentialDiagnosis": [{"condition": "Migraine", "confidence": 40, "reasoning": "No aura"}],
                "riskFactors": ["Stress"]
            },
            "riskAssessment": {"overallRisk": "Moderate", "riskScore": 45, "specificRisks": [{"category": "Cardio", "level": "Low", "description": "Normal BP"}]},
            "medicationRecommendations": {
                "primaryMedications": [{"medication": "Paracetamol", "indianBrands": ["Crocin", "Dolo"], "dosage": "500mg", "duration": "3 days", "cost": "Rs. 30", "reasoning": "First line"}],
                "alternatives": null,
                "interactions": [],
                "contraindications": ["Liver disease"]
            },
            "lifestyleModifications": {
                "diet": {"recommendations": ["Hydrate"], "indianFoods": ["Dal"], "restrictions": []},
                "exercise": {"recommendations": ["Walk"]},
                "lifestyle": {"recommendations": ["Sleep 8h"]}
            },
            "followUpPlan": {"timeline": [{"timeframe": "3 days", "action": "Reassess", "priority": "High"}], "monitoring": ["Pain diary"], "redFlags": null},
            "emergencyProtocols": {"warningSignsImmediate": ["Worst headache of life"], "warningSignsUrgent": [], "emergencyContacts": [], "actionSteps": ["Call 108"]}
        }"#;
        let report: AiReport = serde_json::from_str(json).unwrap();
        let summary = report.executive_summary.as_ref().unwrap();
        assert_eq!(summary.confidence_score, 82);
        assert_eq!(report.risk_assessment.overall_risk, RiskLevel::Moderate);
        assert_eq!(report.risk_assessment.specific_risks[0].level, RiskLevel::Low);
        assert_eq!(
            report.medication_recommendations.primary_medications[0].indian_brands,
            vec!["Crocin", "Dolo"]
        );
        assert!(report.medication_recommendations.alternatives.is_empty());
        assert_eq!(report.lifestyle_modifications.diet.regional_foods, vec!["Dal"]);
        assert_eq!(report.follow_up_plan.timeline[0].priority, Priority::High);
        assert!(report.follow_up_plan.red_flags.is_empty());
    }

    #[test]
    fn missing_summary_stays_none() {
        let report: AiReport = serde_json::from_str(r#"{"riskAssessment": null}"#).unwrap();
        assert!(report.executive_summary.is_none());
        assert!(!report.risk_assessment.overall_risk.is_recognized());
    }

    #[test]
    fn unknown_priority_survives_parsing() {
        let entry: TimelineEntry =
            serde_json::from_str(r#"{"timeframe": "1 week", "action": "Call", "priority": "ASAP"}"#)
                .unwrap();
        assert_eq!(entry.priority, Priority::Unrecognized("ASAP".into()));
    }
}
