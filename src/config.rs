//! API Configuration
//!
//! Where the catalog backend lives and which tenant to act as.
//! Values are baked in at build time (`CATALOG_API_BASE=... trunk build`).

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "/api";
pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const MAX_PAGE_SIZE: u32 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Sent as `X-Tenant-ID`
    pub tenant_id: Option<String>,
    /// Sent as a bearer token
    pub auth_token: Option<String>,
    pub page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            tenant_id: None,
            auth_token: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

impl ApiConfig {
    /// Configuration from variables captured at compile time
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("CATALOG_API_BASE"),
            option_env!("CATALOG_TENANT_ID"),
            option_env!("CATALOG_API_TOKEN"),
            option_env!("CATALOG_PAGE_SIZE"),
        )
    }

    fn from_values(
        base_url: Option<&str>,
        tenant_id: Option<&str>,
        auth_token: Option<&str>,
        page_size: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        let page_size = match non_blank(page_size).map(|raw| raw.parse::<u32>()) {
            Some(Ok(size)) => size,
            Some(Err(_)) => {
                log::warn!("[CONFIG] Ignoring invalid CATALOG_PAGE_SIZE");
                defaults.page_size
            }
            None => defaults.page_size,
        };
        Self {
            base_url: non_blank(base_url).unwrap_or(defaults.base_url),
            tenant_id: non_blank(tenant_id),
            auth_token: non_blank(auth_token),
            page_size,
        }
        .normalized()
    }

    #[cfg(test)]
    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    #[cfg(test)]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Prefix an origin-relative base URL with the page origin
    pub fn with_origin(mut self, origin: &str) -> Self {
        if self.base_url.is_empty() || self.base_url.starts_with('/') {
            self.base_url = format!("{}{}", origin.trim_end_matches('/'), self.base_url);
        }
        self
    }

    /// Clamp the page size and drop trailing slashes from the base URL
    pub fn normalized(mut self) -> Self {
        self.page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);
        let trimmed = self.base_url.trim_end_matches('/');
        self.base_url = if trimmed.is_empty() { String::new() } else { trimmed.to_string() };
        self
    }

    /// Absolute or origin-relative URL for `path`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_values(None, Some("  "), None, None);
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.endpoint("categories"), "/api/categories");

        let config = config.with_origin("https://admin.example.com/");
        assert_eq!(config.endpoint("categories"), "https://admin.example.com/api/categories");
        // Absolute URLs are left alone
        assert_eq!(config.clone().with_origin("http://other").base_url, config.base_url);
    }

    #[test]
    fn test_values_are_normalized() {
        let config = ApiConfig::from_values(
            Some("https://erp.example.com/v1/"),
            Some("acme"),
            Some("secret"),
            Some("10000"),
        );
        assert_eq!(config.base_url, "https://erp.example.com/v1");
        assert_eq!(config.tenant_id.as_deref(), Some("acme"));
        assert_eq!(config.page_size, MAX_PAGE_SIZE);
        assert_eq!(config.endpoint("/categories/7"), "https://erp.example.com/v1/categories/7");
    }

    #[test]
    fn test_invalid_page_size_falls_back() {
        let config = ApiConfig::from_values(None, None, None, Some("lots"));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(ApiConfig { page_size: 0, ..ApiConfig::default() }.normalized().page_size, 1);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ApiConfig = serde_json::from_str(r#"{"tenant_id": "acme"}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.tenant_id.as_deref(), Some("acme"));
        let config = config.with_token("t0k3n");
        assert_eq!(config.auth_token.as_deref(), Some("t0k3n"));
    }
}
