//! Startup configuration for the backend origin.
//!
//! The origin is fixed per build: `SINERGI_API_BASE` may override the default at
//! compile time, nothing mutates it at runtime. Platform crates construct one
//! [`ApiConfig`] in `App()` and hand it to the data layer through context.

const DEFAULT_API_BASE: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Build-time configuration (`SINERGI_API_BASE`, else localhost).
    pub fn from_build_env() -> Self {
        Self::new(option_env!("SINERGI_API_BASE").unwrap_or(DEFAULT_API_BASE))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join an absolute endpoint path (`/dashboard/stats`) onto the origin.
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = ApiConfig::new("https://api.example.test///");
        assert_eq!(config.base_url(), "https://api.example.test");
        assert_eq!(
            config.endpoint("/dashboard/stats"),
            "https://api.example.test/dashboard/stats"
        );
    }

    #[test]
    fn relative_paths_get_a_separator() {
        let config = ApiConfig::default();
        assert_eq!(
            config.endpoint("dashboard/trend"),
            "http://localhost:8000/dashboard/trend"
        );
    }
}
