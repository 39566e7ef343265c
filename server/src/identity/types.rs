//! Identity types: provider-neutral principal, token, and error types.
//!
//! The route layer only sees these types; `cognito` translates its wire
//! format into them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by identity provider operations.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// A required configuration variable is not set.
    #[error("missing config: env var {var} not set")]
    MissingConfig { var: String },

    /// Federated sign-in was requested but no hosted UI is configured.
    #[error("federated sign-in not configured")]
    FederationNotConfigured,

    /// The requested federated provider name is not recognized.
    #[error("unsupported federated provider: {0}")]
    UnsupportedProvider(String),

    /// The HTTP request to the provider failed before a response arrived.
    #[error("identity request failed: {0}")]
    Request(String),

    /// The provider answered with an error document.
    #[error("identity provider rejected request: {kind} (status {status}): {message}")]
    Rejected { status: u16, kind: String, message: String },

    /// Sign-in needs an additional challenge this application does not handle.
    #[error("sign-in challenge required: {0}")]
    ChallengeRequired(String),

    /// The provider response body could not be deserialized.
    #[error("identity response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Coarse classification of a provider rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    InvalidCredentials,
    UserExists,
    UserNotConfirmed,
    InvalidParameter,
    TooManyRequests,
    Other,
}

impl RejectionKind {
    /// Classify a provider error type name (e.g. `NotAuthorizedException`).
    #[must_use]
    pub fn classify(kind: &str) -> Self {
        match kind {
            "NotAuthorizedException" | "UserNotFoundException" | "invalid_grant" => Self::InvalidCredentials,
            "UsernameExistsException" | "AliasExistsException" => Self::UserExists,
            "UserNotConfirmedException" => Self::UserNotConfirmed,
            "InvalidParameterException" | "InvalidPasswordException" | "invalid_request" => Self::InvalidParameter,
            "TooManyRequestsException" | "LimitExceededException" | "TooManyFailedAttemptsException" => {
                Self::TooManyRequests
            }
            _ => Self::Other,
        }
    }

    /// Stable machine-readable code for API error bodies.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidCredentials => "E_INVALID_CREDENTIALS",
            Self::UserExists => "E_USER_EXISTS",
            Self::UserNotConfirmed => "E_USER_NOT_CONFIRMED",
            Self::InvalidParameter => "E_INVALID_PARAMETER",
            Self::TooManyRequests => "E_TOO_MANY_REQUESTS",
            Self::Other => "E_REJECTED",
        }
    }
}

impl IdentityError {
    /// Rejection classification, if this error came from the provider.
    #[must_use]
    pub fn rejection(&self) -> Option<RejectionKind> {
        match self {
            Self::Rejected { kind, .. } => Some(RejectionKind::classify(kind)),
            _ => None,
        }
    }

    /// Stable machine-readable code for API error bodies.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) | Self::MissingConfig { .. } => "E_CONFIG",
            Self::FederationNotConfigured => "E_FEDERATION_NOT_CONFIGURED",
            Self::UnsupportedProvider(_) => "E_UNSUPPORTED_PROVIDER",
            Self::Request(_) => "E_IDENTITY_REQUEST",
            Self::Rejected { kind, .. } => RejectionKind::classify(kind).code(),
            Self::ChallengeRequired(_) => "E_CHALLENGE_REQUIRED",
            Self::Parse(_) => "E_IDENTITY_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }
}

// =============================================================================
// PRINCIPAL + TOKENS
// =============================================================================

/// The authenticated principal as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable provider subject identifier.
    pub user_id: String,
    /// Provider username (email for password accounts).
    pub username: String,
    pub email: Option<String>,
    /// `"password"` or `"federated:<Provider>"`.
    pub sign_in_method: String,
}

/// Tokens issued by a successful sign-in or code exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthTokens {
    pub access_token: String,
    pub id_token: String,
    /// Lifetime of the access token in seconds.
    pub expires_in: u64,
}

/// Result of registering an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOutcome {
    /// `true` when the account can sign in immediately.
    pub user_confirmed: bool,
    pub user_sub: String,
}

// =============================================================================
// FEDERATED PROVIDERS
// =============================================================================

/// External identity providers reachable through the hosted UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FederatedProvider {
    Google,
    Facebook,
    Apple,
    Amazon,
}

impl FederatedProvider {
    /// Provider name as the hosted UI expects it in `identity_provider`.
    #[must_use]
    pub fn provider_name(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Facebook => "Facebook",
            Self::Apple => "SignInWithApple",
            Self::Amazon => "LoginWithAmazon",
        }
    }
}

impl FromStr for FederatedProvider {
    type Err = IdentityError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "facebook" => Ok(Self::Facebook),
            "apple" | "signinwithapple" => Ok(Self::Apple),
            "amazon" | "loginwithamazon" => Ok(Self::Amazon),
            other => Err(IdentityError::UnsupportedProvider(other.to_owned())),
        }
    }
}

impl fmt::Display for FederatedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.provider_name())
    }
}

// =============================================================================
// PROVIDER TRAIT
// =============================================================================

/// The operations this application delegates to the managed identity service.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new account keyed by email.
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, IdentityError>;

    /// Authenticate with email + password.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthTokens, IdentityError>;

    /// Revoke every token issued to the user behind `access_token`.
    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError>;

    /// Fetch the principal that owns `access_token`.
    async fn get_user(&self, access_token: &str) -> Result<Principal, IdentityError>;

    /// Hosted-UI URL that starts the federated redirect flow.
    fn authorize_url(&self, provider: FederatedProvider, state: &str) -> Result<String, IdentityError>;

    /// Exchange an authorization code from the federated callback for tokens.
    async fn exchange_code(&self, code: &str) -> Result<AuthTokens, IdentityError>;
}
