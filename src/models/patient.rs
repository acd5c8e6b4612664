use serde::{Deserialize, Serialize};

use super::nullable;

/// Demographics, symptoms, history and lifestyle supplied by the end user.
///
/// Serializes demographics under the front-end's `personalInfo` key, which
/// is what the report generator endpoint reads. `personal` is also accepted
/// when reading.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    #[serde(default, rename = "personalInfo", alias = "personal", deserialize_with = "nullable")]
    pub personal: PersonalInfo,
    #[serde(default, deserialize_with = "nullable")]
    pub symptoms: SymptomProfile,
    #[serde(default, deserialize_with = "nullable")]
    pub medical_history: MedicalHistory,
    #[serde(default, deserialize_with = "nullable")]
    pub lifestyle: LifestyleProfile,
}

impl PatientRecord {
    /// Patient name if present and non-blank.
    pub fn name(&self) -> Option<&str> {
        self.personal
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub age: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub gender: String,
    /// Kilograms.
    #[serde(default, deserialize_with = "nullable")]
    pub weight: f32,
    /// Centimetres.
    #[serde(default, deserialize_with = "nullable")]
    pub height: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymptomProfile {
    #[serde(default, deserialize_with = "nullable")]
    pub primary: String,
    #[serde(default, deserialize_with = "nullable")]
    pub secondary: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub duration: String,
    /// 1-10.
    #[serde(default, deserialize_with = "nullable")]
    pub severity: u8,
    #[serde(default, deserialize_with = "nullable")]
    pub onset: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalHistory {
    #[serde(default, deserialize_with = "nullable")]
    pub conditions: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub medications: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub allergies: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub family_history: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifestyleProfile {
    #[serde(default, deserialize_with = "nullable")]
    pub exercise: String,
    #[serde(default, deserialize_with = "nullable")]
    pub diet: String,
    #[serde(default, deserialize_with = "nullable")]
    pub sleep: String,
    /// 1-10.
    #[serde(default, deserialize_with = "nullable")]
    pub stress: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_front_end_shape() {
        let json = r#"{
            "personalInfo": {"name": "Asha Rao", "age": 42, "gender": "Female", "weight": 61.5, "height": 162},
            "symptoms": {"primary": "Headache", "secondary": ["Nausea"], "duration": "3 days", "severity": 6, "onset": "gradual"},
            "medicalHistory": {"conditions": [], "medications": ["Metformin"], "allergies": null, "familyHistory": ["Diabetes"]},
            "lifestyle": {"exercise": "light", "diet": "vegetarian", "sleep": "6h", "stress": 7}
        }"#;
        let patient: PatientRecord = serde_json::from_str(json).unwrap();
        assert_eq!(patient.name(), Some("Asha Rao"));
        assert_eq!(patient.personal.age, 42);
        assert_eq!(patient.symptoms.secondary, vec!["Nausea"]);
        assert!(patient.medical_history.allergies.is_empty());
        assert_eq!(patient.medical_history.family_history, vec!["Diabetes"]);
        assert_eq!(patient.lifestyle.stress, 7);
    }

    #[test]
    fn blank_name_counts_as_missing() {
        let mut patient = PatientRecord::default();
        assert_eq!(patient.name(), None);
        patient.personal.name = Some("   ".into());
        assert_eq!(patient.name(), None);
    }

    #[test]
    fn null_sections_default() {
        let patient: PatientRecord =
            serde_json::from_str(r#"{"personal": {"name": "X"}, "symptoms": null}"#).unwrap();
        assert!(patient.symptoms.primary.is_empty());
        assert_eq!(patient.symptoms.severity, 0);
    }
}
