use std::env;
use std::fmt;
use std::time::Duration;

use crate::workflows::{AssociationTarget, OptionTarget};

pub const DEFAULT_BASE_URL: &str = "https://api.hubapi.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub hubspot: HubSpotConfig,
    pub option_target: OptionTarget,
    pub association_target: AssociationTarget,
}

/// Connection settings for the HubSpot CRM API
#[derive(Clone)]
pub struct HubSpotConfig {
    pub access_token: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

// Keep the token out of logs and panic messages.
impl fmt::Debug for HubSpotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubSpotConfig")
            .field("access_token", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl HubSpotConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        // `api_key` is the secret name workflow custom-code actions were set up with
        let access_token = env::var("HUBSPOT_ACCESS_TOKEN")
            .or_else(|_| env::var("api_key"))
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("HUBSPOT_ACCESS_TOKEN is not set"))?;

        let hubspot = HubSpotConfig {
            access_token,
            base_url: env::var("HUBSPOT_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout_secs: env::var("HUBSPOT_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            user_agent: env::var("HUBSPOT_USER_AGENT").unwrap_or_else(|_| default_user_agent()),
        };

        let mut option_target = OptionTarget::default();
        if let Ok(object_type) = env::var("OPTION_OBJECT_TYPE") {
            option_target.object_type = object_type;
        }
        if let Ok(property_name) = env::var("OPTION_PROPERTY_NAME") {
            option_target.property_name = property_name;
        }

        let mut association_target = AssociationTarget::default();
        if let Ok(object_type) = env::var("COURSE_OBJECT_TYPE") {
            association_target.search_object_type = object_type;
        }
        if let Ok(association_type) = env::var("COURSE_ASSOCIATION_TYPE") {
            association_target.association_type = association_type;
        }

        Ok(Config {
            hubspot,
            option_target,
            association_target,
        })
    }
}

fn default_user_agent() -> String {
    format!("course-actions/{}", env!("CARGO_PKG_VERSION"))
}
