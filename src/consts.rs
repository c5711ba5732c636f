//! Fixed protocol constants shared by every client instance.

// crates.io
use jsonwebtoken::Algorithm;

/// Exact length of a Duo client identifier.
pub const CLIENT_ID_LENGTH: usize = 20;
/// Exact length of a Duo client secret.
pub const CLIENT_SECRET_LENGTH: usize = 40;
/// Length of values produced by [`Client::generate_state`](crate::Client::generate_state).
pub const DEFAULT_STATE_LENGTH: usize = 36;
/// Shortest caller-supplied state accepted by authorization requests.
pub const MINIMUM_STATE_LENGTH: usize = 22;
/// Longest caller-supplied state accepted by authorization requests.
pub const MAXIMUM_STATE_LENGTH: usize = 1024;
/// Length of the `jti` claim embedded in client assertions.
pub const JTI_LENGTH: usize = 36;
/// Lifetime, in seconds, of every JWT this crate signs.
pub const JWT_EXPIRATION: i64 = 300;
/// Clock skew tolerated when verifying provider-issued ID tokens.
pub const JWT_LEEWAY: i64 = 60;
/// Symmetric algorithm used for every signature in the flow.
pub const SIG_ALGORITHM: Algorithm = Algorithm::HS512;

/// Provider health check endpoint path.
pub const HEALTH_CHECK_ENDPOINT: &str = "/oauth/v1/health_check";
/// Provider authorize endpoint path.
pub const AUTHORIZE_ENDPOINT: &str = "/oauth/v1/authorize";
/// Provider token endpoint path.
pub const TOKEN_ENDPOINT: &str = "/oauth/v1/token";

/// `grant_type` sent to the token endpoint.
pub const GRANT_TYPE: &str = "authorization_code";
/// `client_assertion_type` sent alongside every client assertion.
pub const CLIENT_ASSERTION_TYPE: &str = "urn:ietf:params:oauth:client-assertion-type:jwt-bearer";
/// `user-agent` header attached to outbound requests.
pub const USER_AGENT: &str = concat!("duo_universal_rust/", env!("CARGO_PKG_VERSION"));

pub(crate) const INVALID_CLIENT_ID_ERROR: &str = "The Duo client id is invalid.";
pub(crate) const INVALID_CLIENT_SECRET_ERROR: &str = "The Duo client secret is invalid.";
pub(crate) const PARSING_CONFIG_ERROR: &str = "Error parsing config";
pub(crate) const MALFORMED_RESPONSE: &str = "Result missing expected data.";
