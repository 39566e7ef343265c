//! Amazon Cognito user-pool client.
//!
//! Thin HTTP wrapper over the JSON 1.1 API (`X-Amz-Target` dispatch) and the
//! hosted-UI OAuth endpoints. Pure parsing lives in `parse_*` functions for
//! testability.

use std::time::Duration;

use serde::Deserialize;

use super::config::{HostedUiConfig, IdentityConfig};
use super::types::{AuthTokens, FederatedProvider, IdentityError, IdentityProvider, Principal, SignUpOutcome};

const TARGET_PREFIX: &str = "AWSCognitoIdentityProviderService";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const OAUTH_SCOPES: &str = "openid email profile";

// =============================================================================
// CLIENT
// =============================================================================

pub struct CognitoClient {
    http: reqwest::Client,
    config: IdentityConfig,
}

impl CognitoClient {
    /// Build a client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: IdentityConfig) -> Result<Self, IdentityError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| IdentityError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, config })
    }

    /// Return the configured region (e.g. `"ap-northeast-2"`).
    #[must_use]
    pub fn region(&self) -> &str {
        &self.config.region
    }

    fn hosted_ui(&self) -> Result<&HostedUiConfig, IdentityError> {
        self.config
            .hosted_ui
            .as_ref()
            .ok_or(IdentityError::FederationNotConfigured)
    }

    async fn call(&self, action: &str, body: serde_json::Value) -> Result<String, IdentityError> {
        let response = self
            .http
            .post(format!("{}/", self.config.endpoint))
            .header("Content-Type", CONTENT_TYPE)
            .header("X-Amz-Target", format!("{TARGET_PREFIX}.{action}"))
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(parse_api_error(status, &text));
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl IdentityProvider for CognitoClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, IdentityError> {
        let body = serde_json::json!({
            "ClientId": self.config.client_id,
            "Username": email,
            "Password": password,
            "UserAttributes": [{ "Name": "email", "Value": email }],
        });
        let text = self.call("SignUp", body).await?;
        parse_sign_up(&text)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthTokens, IdentityError> {
        let body = serde_json::json!({
            "ClientId": self.config.client_id,
            "AuthFlow": "USER_PASSWORD_AUTH",
            "AuthParameters": { "USERNAME": email, "PASSWORD": password },
        });
        let text = self.call("InitiateAuth", body).await?;
        parse_initiate_auth(&text)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        let body = serde_json::json!({ "AccessToken": access_token });
        self.call("GlobalSignOut", body).await?;
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<Principal, IdentityError> {
        let body = serde_json::json!({ "AccessToken": access_token });
        let text = self.call("GetUser", body).await?;
        parse_get_user(&text)
    }

    fn authorize_url(&self, provider: FederatedProvider, state: &str) -> Result<String, IdentityError> {
        let hosted = self.hosted_ui()?;
        build_authorize_url(hosted, &self.config.client_id, provider, state)
    }

    async fn exchange_code(&self, code: &str) -> Result<AuthTokens, IdentityError> {
        let hosted = self.hosted_ui()?;
        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", self.config.client_id.as_str()),
            ("code", code),
            ("redirect_uri", hosted.redirect_uri.as_str()),
        ];
        let response = self
            .http
            .post(format!("{}/oauth2/token", hosted.domain))
            .form(&params)
            .send()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| IdentityError::Request(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(parse_oauth_error(status, &text));
        }
        parse_token_response(&text)
    }
}

/// Build the hosted-UI authorize URL that redirects straight to `provider`.
pub(crate) fn build_authorize_url(
    hosted: &HostedUiConfig,
    client_id: &str,
    provider: FederatedProvider,
    state: &str,
) -> Result<String, IdentityError> {
    let base = format!("{}/oauth2/authorize", hosted.domain);
    let url = url::Url::parse_with_params(
        &base,
        &[
            ("identity_provider", provider.provider_name()),
            ("redirect_uri", hosted.redirect_uri.as_str()),
            ("response_type", "code"),
            ("client_id", client_id),
            ("scope", OAUTH_SCOPES),
            ("state", state),
        ],
    )
    .map_err(|e| IdentityError::ConfigParse(format!("hosted UI domain: {e}")))?;
    Ok(url.into())
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SignUpResponse {
    user_confirmed: bool,
    user_sub: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthResponse {
    authentication_result: Option<AuthenticationResult>,
    challenge_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResult {
    access_token: String,
    id_token: String,
    expires_in: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetUserResponse {
    username: String,
    #[serde(default)]
    user_attributes: Vec<AttributeType>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AttributeType {
    name: String,
    value: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinkedIdentity {
    provider_name: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(rename = "__type")]
    kind: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    id_token: String,
    expires_in: u64,
}

#[derive(Deserialize)]
struct OAuthErrorBody {
    error: String,
    error_description: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_sign_up(json: &str) -> Result<SignUpOutcome, IdentityError> {
    let resp: SignUpResponse = serde_json::from_str(json).map_err(|e| IdentityError::Parse(e.to_string()))?;
    Ok(SignUpOutcome { user_confirmed: resp.user_confirmed, user_sub: resp.user_sub })
}

fn parse_initiate_auth(json: &str) -> Result<AuthTokens, IdentityError> {
    let resp: InitiateAuthResponse = serde_json::from_str(json).map_err(|e| IdentityError::Parse(e.to_string()))?;
    match (resp.authentication_result, resp.challenge_name) {
        (Some(result), _) => Ok(AuthTokens {
            access_token: result.access_token,
            id_token: result.id_token,
            expires_in: result.expires_in,
        }),
        (None, Some(challenge)) => Err(IdentityError::ChallengeRequired(challenge)),
        (None, None) => Err(IdentityError::Parse("missing AuthenticationResult".into())),
    }
}

fn parse_get_user(json: &str) -> Result<Principal, IdentityError> {
    let resp: GetUserResponse = serde_json::from_str(json).map_err(|e| IdentityError::Parse(e.to_string()))?;

    let attr = |name: &str| {
        resp.user_attributes
            .iter()
            .find(|a| a.name == name)
            .and_then(|a| a.value.clone())
    };

    let user_id = attr("sub").ok_or_else(|| IdentityError::Parse("missing sub attribute".into()))?;
    let email = attr("email");
    let sign_in_method = attr("identities")
        .and_then(|raw| federated_provider_name(&raw))
        .map_or_else(|| "password".to_owned(), |name| format!("federated:{name}"));

    Ok(Principal { user_id, username: resp.username, email, sign_in_method })
}

/// Provider name of the first linked identity, if the attribute parses.
fn federated_provider_name(identities: &str) -> Option<String> {
    let linked: Vec<LinkedIdentity> = serde_json::from_str(identities).ok()?;
    linked.into_iter().next().map(|l| l.provider_name)
}

fn parse_api_error(status: u16, body: &str) -> IdentityError {
    let parsed: Option<ApiErrorBody> = serde_json::from_str(body).ok();
    let (kind, message) = parsed.map_or((None, None), |b| (b.kind, b.message));
    // `__type` is sometimes namespaced: `com.amazonaws...#NotAuthorizedException`.
    let kind = kind
        .as_deref()
        .map(|k| k.rsplit('#').next().unwrap_or(k).to_owned())
        .unwrap_or_else(|| "UnknownError".to_owned());
    IdentityError::Rejected { status, kind, message: message.unwrap_or_default() }
}

fn parse_token_response(json: &str) -> Result<AuthTokens, IdentityError> {
    let resp: TokenResponse = serde_json::from_str(json).map_err(|e| IdentityError::Parse(e.to_string()))?;
    Ok(AuthTokens {
        access_token: resp.access_token,
        id_token: resp.id_token,
        expires_in: resp.expires_in,
    })
}

fn parse_oauth_error(status: u16, body: &str) -> IdentityError {
    match serde_json::from_str::<OAuthErrorBody>(body) {
        Ok(err) => IdentityError::Rejected {
            status,
            kind: err.error,
            message: err.error_description.unwrap_or_default(),
        },
        Err(_) => IdentityError::Rejected { status, kind: "UnknownError".into(), message: body.to_owned() },
    }
}

#[cfg(test)]
#[path = "cognito_test.rs"]
mod tests;
