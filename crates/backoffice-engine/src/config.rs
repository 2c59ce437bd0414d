//! Engine configuration.

/// Configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct BackofficeConfig {
    /// Path to the `RocksDB` data directory (default: "/data/backoffice").
    pub data_dir: String,

    /// Base URL of the VTS report viewer used for presentation links
    /// (default: "http://localhost:3000").
    pub vts_base_url: String,
}

impl BackofficeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "/data/backoffice".into()),
            vts_base_url: std::env::var("VTS_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
        }
    }
}

impl Default for BackofficeConfig {
    fn default() -> Self {
        Self {
            data_dir: "/data/backoffice".into(),
            vts_base_url: "http://localhost:3000".into(),
        }
    }
}
