//! Identity: adapter for the managed identity provider.
//!
//! DESIGN
//! ======
//! Route handlers talk to `dyn IdentityProvider` only. `IdentityClient::from_env`
//! builds the Cognito implementation; tests substitute a mock.

pub mod cognito;
pub mod config;
pub mod types;

use config::IdentityConfig;
pub use types::IdentityProvider;
use types::IdentityError;

/// Concrete identity client used by the binary.
pub type IdentityClient = cognito::CognitoClient;

impl IdentityClient {
    /// Build the identity client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, IdentityError> {
        let config = IdentityConfig::from_env()?;
        Self::new(config)
    }
}
