//! Client for the AI analysis backend.
//!
//! Every endpoint answers with the same envelope: `{ success: true, data }`
//! on success and `{ success: false, error }` on failure. The report
//! generator endpoint puts its payload under `report` and `insights`
//! instead of `data`.
//!
//! Nothing in [`crate::report`] calls this module; callers fetch an
//! [`AiReport`] here and hand it to the builder themselves.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BackendError;
use crate::models::{AiReport, PatientRecord};

const REPORT_ENDPOINT: &str = "ai-report-generator";

/// Which analysis the backend should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisType {
    SymptomAnalysis,
    MedicationAnalysis,
    HealthAssessment,
    General,
}

impl AnalysisType {
    /// Path segment under `/api/`.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::SymptomAnalysis => "ai-symptom-analyzer",
            Self::MedicationAnalysis => "ai-medication-analyzer",
            Self::HealthAssessment => "health-assessment",
            Self::General => "ai-integration",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(rename = "type")]
    pub analysis_type: AnalysisType,
    pub data: Value,
}

impl AnalysisRequest {
    pub fn new(analysis_type: AnalysisType, data: Value) -> Self {
        Self {
            analysis_type,
            data,
        }
    }
}

/// Response wrapper shared by all endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BackendEnvelope {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            ..Default::default()
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// The `data` payload, or the backend's own error message.
    pub fn into_result(self) -> Result<Value, BackendError> {
        if !self.success {
            return Err(BackendError::Upstream(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        match self.data {
            Some(Value::Null) | None => Err(BackendError::EmptyData),
            Some(data) => Ok(data),
        }
    }
}

/// A report as returned by the report generator endpoint.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub report: AiReport,
    /// Free-text supplementary insights, if the backend produced any.
    pub insights: Option<String>,
}

/// Transport to the backend. Implementors provide `send`; the typed calls
/// are built on top of it.
pub trait AiBackend: Send + Sync {
    /// POST `body` to `/api/<endpoint>` and decode the envelope.
    fn send(&self, endpoint: &str, body: &Value) -> Result<BackendEnvelope, BackendError>;

    fn analyze(&self, request: &AnalysisRequest) -> Result<Value, BackendError> {
        let body = serde_json::to_value(request).map_err(|e| BackendError::Request(e.to_string()))?;
        tracing::debug!(endpoint = request.analysis_type.endpoint(), "requesting analysis");
        self.send(request.analysis_type.endpoint(), &body)?.into_result()
    }

    /// Runs an analysis whose `data` is an AI report.
    fn fetch_report(&self, request: &AnalysisRequest) -> Result<AiReport, BackendError> {
        let data = self.analyze(request)?;
        serde_json::from_value(data).map_err(|e| BackendError::ResponseParsing(e.to_string()))
    }

    /// Asks the report generator for a full report on `patient`.
    fn generate_report(&self, patient: &PatientRecord) -> Result<GeneratedReport, BackendError> {
        let body = serde_json::to_value(patient).map_err(|e| BackendError::Request(e.to_string()))?;
        let envelope = self.send(REPORT_ENDPOINT, &body)?;
        if !envelope.success {
            return Err(BackendError::Upstream(
                envelope.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        let raw = match envelope.report.or(envelope.data) {
            Some(Value::Null) | None => return Err(BackendError::EmptyData),
            Some(raw) => raw,
        };
        let report = serde_json::from_value(raw)
            .map_err(|e| BackendError::ResponseParsing(e.to_string()))?;
        let insights = envelope.insights.filter(|s| !s.trim().is_empty());
        tracing::info!(has_insights = insights.is_some(), "AI report received");
        Ok(GeneratedReport { report, insights })
    }
}

/// Blocking HTTP backend.
pub struct HttpAiBackend {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpAiBackend {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, BackendError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| BackendError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/api/{}", self.base_url, endpoint)
    }
}

impl AiBackend for HttpAiBackend {
    fn send(&self, endpoint: &str, body: &Value) -> Result<BackendEnvelope, BackendError> {
        let url = self.endpoint_url(endpoint);

        let response = self.client.post(&url).json(body).send().map_err(|e| {
            if e.is_connect() {
                BackendError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                BackendError::HttpClient(format!(
                    "Request timed out after {}s",
                    self.timeout_secs
                ))
            } else {
                BackendError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| BackendError::ResponseParsing(e.to_string()))?;

        if status.is_success() {
            return serde_json::from_str(&text)
                .map_err(|e| BackendError::ResponseParsing(e.to_string()));
        }
        // Failures still carry the envelope; prefer its error message.
        match serde_json::from_str::<BackendEnvelope>(&text) {
            Ok(envelope) if !envelope.success => Ok(envelope),
            _ => Err(BackendError::Status {
                status: status.as_u16(),
                body: text,
            }),
        }
    }
}

/// In-memory backend that answers every call with one envelope.
pub struct MockAiBackend {
    envelope: BackendEnvelope,
    calls: Mutex<Vec<(String, Value)>>,
}

impl MockAiBackend {
    pub fn new(envelope: BackendEnvelope) -> Self {
        Self {
            envelope,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Endpoints and bodies received so far.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl AiBackend for MockAiBackend {
    fn send(&self, endpoint: &str, body: &Value) -> Result<BackendEnvelope, BackendError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((endpoint.to_string(), body.clone()));
        }
        Ok(self.envelope.clone())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn report_json() -> Value {
        json!({
            "executiveSummary": {
                "content": "Likely viral upper respiratory infection.",
                "confidenceScore": 74,
                "keyFindings": ["No red flags"]
            },
            "riskAssessment": {"overallRisk": "Low", "riskScore": 22, "specificRisks": null}
        })
    }

    #[test]
    fn analysis_type_serializes_kebab_case() {
        let request = AnalysisRequest::new(AnalysisType::SymptomAnalysis, json!({"symptoms": ["cough"]}));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["type"], "symptom-analysis");
        assert_eq!(value["data"]["symptoms"][0], "cough");

        let parsed: AnalysisType = serde_json::from_str("\"health-assessment\"").unwrap();
        assert_eq!(parsed, AnalysisType::HealthAssessment);
    }

    #[test]
    fn each_type_has_an_endpoint() {
        assert_eq!(AnalysisType::SymptomAnalysis.endpoint(), "ai-symptom-analyzer");
        assert_eq!(AnalysisType::MedicationAnalysis.endpoint(), "ai-medication-analyzer");
        assert_eq!(AnalysisType::HealthAssessment.endpoint(), "health-assessment");
        assert_eq!(AnalysisType::General.endpoint(), "ai-integration");
    }

    #[test]
    fn envelope_success_yields_data() {
        let data = BackendEnvelope::ok(json!({"x": 1})).into_result().unwrap();
        assert_eq!(data["x"], 1);
    }

    #[test]
    fn envelope_failure_carries_message() {
        let err = BackendEnvelope::failed("quota exceeded").into_result().unwrap_err();
        assert!(matches!(err, BackendError::Upstream(ref m) if m == "quota exceeded"));
    }

    #[test]
    fn envelope_without_data_is_empty() {
        let envelope: BackendEnvelope = serde_json::from_str(r#"{"success": true, "data": null}"#).unwrap();
        assert!(matches!(envelope.into_result(), Err(BackendError::EmptyData)));
    }

    #[test]
    fn fetch_report_decodes_partial_report() {
        let backend = MockAiBackend::new(BackendEnvelope::ok(report_json()));
        let request = AnalysisRequest::new(AnalysisType::HealthAssessment, json!({}));
        let report = backend.fetch_report(&request).unwrap();
        assert!(report.executive_summary.is_some());
        assert!(report.risk_assessment.specific_risks.is_empty());

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "health-assessment");
        assert_eq!(calls[0].1["type"], "health-assessment");
    }

    #[test]
    fn generate_report_reads_report_and_insights() {
        let envelope = BackendEnvelope {
            success: true,
            report: Some(report_json()),
            insights: Some("Hydration advised.".into()),
            ..Default::default()
        };
        let backend = MockAiBackend::new(envelope);
        let generated = backend.generate_report(&PatientRecord::default()).unwrap();
        assert_eq!(generated.insights.as_deref(), Some("Hydration advised."));
        assert_eq!(backend.calls()[0].0, REPORT_ENDPOINT);
    }

    #[test]
    fn generate_report_sends_personal_info_key() {
        let backend = MockAiBackend::new(BackendEnvelope {
            success: true,
            report: Some(report_json()),
            ..Default::default()
        });
        let patient: PatientRecord = serde_json::from_value(json!({
            "personal": {"name": "Meera Iyer", "age": 58},
            "symptoms": {"primary": "Chest tightness"}
        }))
        .unwrap();
        backend.generate_report(&patient).unwrap();

        let calls = backend.calls();
        let body = &calls[0].1;
        assert_eq!(body["personalInfo"]["name"], "Meera Iyer");
        assert_eq!(body["personalInfo"]["age"], 58);
        assert!(body.get("personal").is_none());
        assert_eq!(body["symptoms"]["primary"], "Chest tightness");
    }

    #[test]
    fn generate_report_surfaces_backend_failure() {
        let backend = MockAiBackend::new(BackendEnvelope::failed("Failed to generate AI medical report"));
        let err = backend.generate_report(&PatientRecord::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to generate"));
    }

    #[test]
    fn http_backend_trims_trailing_slash() {
        let backend = HttpAiBackend::new("https://mymedi.ai/", 30).unwrap();
        assert_eq!(backend.base_url(), "https://mymedi.ai");
        assert_eq!(
            backend.endpoint_url("health-assessment"),
            "https://mymedi.ai/api/health-assessment"
        );
    }
}
