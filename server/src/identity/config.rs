//! Identity provider configuration parsed from environment variables.

use super::types::IdentityError;

pub const DEFAULT_IDENTITY_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_IDENTITY_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Hosted-UI settings needed for federated sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedUiConfig {
    /// Base URL of the hosted UI, e.g. `https://wayfarer.auth.ap-northeast-2.amazoncognito.com`.
    pub domain: String,
    /// Callback registered with the app client.
    pub redirect_uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    pub region: String,
    pub client_id: String,
    /// JSON API endpoint; derived from the region unless overridden.
    pub endpoint: String,
    pub hosted_ui: Option<HostedUiConfig>,
    pub timeouts: IdentityTimeouts,
}

impl IdentityConfig {
    /// Build typed identity config from environment variables.
    ///
    /// Required:
    /// - `COGNITO_REGION`
    /// - `COGNITO_CLIENT_ID` (public app client, no secret)
    ///
    /// Optional:
    /// - `COGNITO_ENDPOINT`: override for the JSON API (local emulators)
    /// - `COGNITO_DOMAIN` + `COGNITO_REDIRECT_URI`: enable federated sign-in
    /// - `COGNITO_REQUEST_TIMEOUT_SECS`: default 15
    /// - `COGNITO_CONNECT_TIMEOUT_SECS`: default 5
    pub fn from_env() -> Result<Self, IdentityError> {
        let region = required("COGNITO_REGION")?;
        let client_id = required("COGNITO_CLIENT_ID")?;
        if !region
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(IdentityError::ConfigParse(format!("invalid COGNITO_REGION: {region}")));
        }

        let endpoint = std::env::var("COGNITO_ENDPOINT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default_endpoint(&region))
            .trim_end_matches('/')
            .to_owned();

        let hosted_ui = parse_hosted_ui(
            std::env::var("COGNITO_DOMAIN").ok().as_deref(),
            std::env::var("COGNITO_REDIRECT_URI").ok().as_deref(),
        )?;

        let timeouts = IdentityTimeouts {
            request_secs: env_parse_u64("COGNITO_REQUEST_TIMEOUT_SECS", DEFAULT_IDENTITY_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("COGNITO_CONNECT_TIMEOUT_SECS", DEFAULT_IDENTITY_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { region, client_id, endpoint, hosted_ui, timeouts })
    }
}

fn required(key: &str) -> Result<String, IdentityError> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| IdentityError::MissingConfig { var: key.to_owned() })
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

pub(crate) fn default_endpoint(region: &str) -> String {
    format!("https://cognito-idp.{region}.amazonaws.com")
}

fn parse_hosted_ui(domain: Option<&str>, redirect_uri: Option<&str>) -> Result<Option<HostedUiConfig>, IdentityError> {
    let domain = domain.map(str::trim).filter(|v| !v.is_empty());
    let redirect_uri = redirect_uri.map(str::trim).filter(|v| !v.is_empty());
    match (domain, redirect_uri) {
        (None, None) => Ok(None),
        (Some(domain), Some(redirect_uri)) => {
            let domain = if domain.starts_with("https://") || domain.starts_with("http://") {
                domain.trim_end_matches('/').to_owned()
            } else {
                format!("https://{}", domain.trim_end_matches('/'))
            };
            Ok(Some(HostedUiConfig { domain, redirect_uri: redirect_uri.to_owned() }))
        }
        (Some(_), None) => Err(IdentityError::MissingConfig { var: "COGNITO_REDIRECT_URI".into() }),
        (None, Some(_)) => Err(IdentityError::MissingConfig { var: "COGNITO_DOMAIN".into() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
