pub mod bearer;
pub mod claims;
pub mod error;
pub mod id_token;
pub mod local_bridge;
pub mod login_outcome;
pub mod login_rate_limiter;
pub mod oidc_bridge;
pub mod oidc_discovery;
pub mod password;
pub mod pkce;
pub mod session_issuer;
pub mod ticket_bridge;
pub mod ticket_response;

pub use bearer::bearer_token;
pub use claims::Claims;
pub use error::{AuthError, Result};
pub use id_token::IdTokenClaims;
pub use local_bridge::LocalBridge;
pub use login_outcome::LoginOutcome;
pub use login_rate_limiter::LoginRateLimiter;
pub use oidc_bridge::{LoginRedirect, OidcBridge};
pub use oidc_discovery::{DiscoveryCache, ProviderMetadata};
pub use password::MIN_PASSWORD_LENGTH;
pub use pkce::Pkce;
pub use session_issuer::SessionIssuer;
pub use ticket_bridge::TicketBridge;
pub use ticket_response::TicketResponse;

#[cfg(test)]
mod tests;
