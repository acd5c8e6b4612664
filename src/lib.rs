pub mod ai_backend;
pub mod assessment;
pub mod config;
pub mod error;
pub mod models;
pub mod report;

pub use ai_backend::{AiBackend, AnalysisRequest, AnalysisType, HttpAiBackend, MockAiBackend};
pub use assessment::AssessmentReportBuilder;
pub use config::ReportConfig;
pub use error::{AssetError, BackendError, ReportError};
pub use report::{ReportDocument, ReportDocumentBuilder};

use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber. `RUST_LOG` overrides the default filter.
/// Later calls are no-ops.
pub fn init_logging() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} v{} logging initialized", config::APP_NAME, config::APP_VERSION);
    }
}
