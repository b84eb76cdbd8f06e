use std::time::Duration;

const DEFAULT_FORM_ENDPOINT: &str = "https://formspree.io/f/portfolio";
const DEFAULT_CONTACT_EMAIL: &str = "contact@portfolio.dev";

/// Build-time site settings. Override with `PORTFOLIO_FORM_ENDPOINT` and
/// `PORTFOLIO_CONTACT_EMAIL` when compiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub form_endpoint: String,
    pub contact_email: String,
    pub fallback_delay: Duration,
    pub success_dismiss: Duration,
    pub notice_dismiss: Duration,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            form_endpoint: DEFAULT_FORM_ENDPOINT.to_string(),
            contact_email: DEFAULT_CONTACT_EMAIL.to_string(),
            fallback_delay: Duration::from_millis(1000),
            success_dismiss: Duration::from_millis(5000),
            notice_dismiss: Duration::from_millis(3000),
        }
    }
}

impl SiteConfig {
    pub fn from_build_env() -> Self {
        let mut config = Self::default();
        if let Some(endpoint) = option_env!("PORTFOLIO_FORM_ENDPOINT") {
            config.form_endpoint = endpoint.to_string();
        }
        if let Some(email) = option_env!("PORTFOLIO_CONTACT_EMAIL") {
            config.contact_email = email.to_string();
        }
        config
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.form_endpoint = endpoint.into();
        self
    }

    pub fn with_contact_email(mut self, email: impl Into<String>) -> Self {
        self.contact_email = email.into();
        self
    }
}

/// Timestamp stamped by build.rs.
pub fn build_time() -> &'static str {
    env!("BUILD_TIME")
}

/// Year of the build, used for the footer copyright.
pub fn build_year() -> i32 {
    use chrono::{DateTime, Datelike, Utc};

    DateTime::parse_from_rfc3339(build_time())
        .map(|t| t.year())
        .unwrap_or_else(|_| Utc::now().year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timings() {
        let config = SiteConfig::default();
        assert_eq!(config.fallback_delay.as_millis(), 1000);
        assert_eq!(config.success_dismiss.as_millis(), 5000);
        assert_eq!(config.notice_dismiss.as_millis(), 3000);
    }

    #[test]
    fn test_builders_override() {
        let config = SiteConfig::default()
            .with_endpoint("https://example.com/f/abc")
            .with_contact_email("me@example.com");
        assert_eq!(config.form_endpoint, "https://example.com/f/abc");
        assert_eq!(config.contact_email, "me@example.com");
    }

    #[test]
    fn test_build_year_is_sane() {
        assert!(build_year() >= 2024);
    }
}
