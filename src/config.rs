use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Application-level constants
pub const APP_NAME: &str = "MyMedi.AI";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "mymedi_report=info"
}

/// Get the application data directory
/// ~/MyMediAI/ on all platforms. Falls back to the working directory when
/// no home directory can be resolved.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("MyMediAI")
}

/// Default directory for exported PDF reports.
pub fn reports_dir() -> PathBuf {
    app_data_dir().join("reports")
}

/// Physical page layout, in millimetres. Coordinates grow downward from the
/// top edge of the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    /// Left and right margin.
    pub margin_mm: f32,
    /// Cursor start on every continuation page.
    pub top_mm: f32,
    /// Nothing may be drawn below `height_mm - bottom_margin_mm`.
    pub bottom_margin_mm: f32,
}

impl PageGeometry {
    /// ISO A4 portrait with 20 mm margins.
    pub const A4: PageGeometry = PageGeometry {
        width_mm: 210.0,
        height_mm: 297.0,
        margin_mm: 20.0,
        top_mm: 20.0,
        bottom_margin_mm: 20.0,
    };

    pub fn content_width(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    /// Lowest y coordinate content may reach.
    pub fn content_bottom(&self) -> f32 {
        self.height_mm - self.bottom_margin_mm
    }

    /// Vertical space available on a fresh continuation page.
    pub fn usable_height(&self) -> f32 {
        self.content_bottom() - self.top_mm
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

/// Branding and labels stamped into every generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub brand_name: String,
    pub tagline: String,
    /// Verification links resolve to `<base_url>/report/<report id>`.
    pub base_url: String,
    pub model_label: String,
    pub language_label: String,
    pub region_label: String,
    /// Free-text label embedded in the verification payload.
    pub analysis_label: String,
    pub platform_line: String,
    pub contact_line: String,
    /// Number patients are told to call for immediate emergencies.
    pub emergency_number: String,
    pub emergency_contacts_line: String,
    pub page: PageGeometry,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            brand_name: APP_NAME.into(),
            tagline: "AI-Powered Medical Assessment Report".into(),
            base_url: "https://mymedi.ai".into(),
            model_label: "GPT-4 Medical".into(),
            language_label: "English (India)".into(),
            region_label: "India".into(),
            analysis_label: "MyMedi.AI Generated Report".into(),
            platform_line: "MyMedi.AI - India's Most Advanced AI Healthcare Platform".into(),
            contact_line: "www.mymedi.ai | support@mymedi.ai | WhatsApp: +91-9876543210".into(),
            emergency_number: "108".into(),
            emergency_contacts_line: "Emergency: 108 | Medical: 102 | Police: 100 | Fire: 101".into(),
            page: PageGeometry::A4,
        }
    }
}

impl ReportConfig {
    /// Verification URL for a report id. Trailing slashes on the base are ignored.
    pub fn verification_url(&self, report_id: &str) -> String {
        format!("{}/report/{}", self.base_url.trim_end_matches('/'), report_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_dir_under_app_data() {
        let reports = reports_dir();
        assert!(reports.starts_with(app_data_dir()));
        assert!(reports.ends_with("reports"));
    }

    #[test]
    fn app_name_is_brand() {
        assert_eq!(APP_NAME, "MyMedi.AI");
        assert_eq!(ReportConfig::default().brand_name, APP_NAME);
    }

    #[test]
    fn a4_geometry_budget() {
        let page = PageGeometry::A4;
        assert!((page.content_width() - 170.0).abs() < f32::EPSILON);
        assert!((page.content_bottom() - 277.0).abs() < f32::EPSILON);
        assert!((page.usable_height() - 257.0).abs() < f32::EPSILON);
    }

    #[test]
    fn verification_url_trims_trailing_slash() {
        let config = ReportConfig {
            base_url: "https://example.org/".into(),
            ..Default::default()
        };
        assert_eq!(
            config.verification_url("AI-RPT-1"),
            "https://example.org/report/AI-RPT-1"
        );
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: ReportConfig =
            serde_json::from_str(r#"{"base_url":"https://x.test"}"#).unwrap();
        assert_eq!(config.base_url, "https://x.test");
        assert_eq!(config.emergency_number, "108");
        assert_eq!(config.page, PageGeometry::A4);
    }
}
