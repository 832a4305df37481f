//! Identity-provider token verification.
//!
//! The identity provider issues HS256-signed JWTs whose [`Claims`] carry the
//! caller's external id and profile. The server only verifies them;
//! [`generate_token`] exists for local tooling and tests.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims embedded in every identity token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the caller's external identity id.
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Avatar URL.
    #[serde(default)]
    pub picture: Option<String>,
    /// Provider-assigned role; `staff` unlocks waitlist administration.
    #[serde(default)]
    pub role: Option<String>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Configuration for identity-token validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the identity provider.
    pub secret: String,
    /// Expected `iss` claim, when the provider sets one.
    pub issuer: Option<String>,
    /// Clock-skew tolerance in seconds (default: 60).
    pub leeway_secs: u64,
}

/// Default clock-skew tolerance in seconds.
const DEFAULT_LEEWAY_SECS: u64 = 60;

impl JwtConfig {
    /// Load identity settings from environment variables.
    ///
    /// | Env Var            | Required | Default |
    /// |--------------------|----------|---------|
    /// | `AUTH_JWT_SECRET`  | **yes**  | --      |
    /// | `AUTH_JWT_ISSUER`  | no       | --      |
    /// | `AUTH_LEEWAY_SECS` | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `AUTH_JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("AUTH_JWT_SECRET")
            .expect("AUTH_JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "AUTH_JWT_SECRET must not be empty");

        let issuer = std::env::var("AUTH_JWT_ISSUER")
            .ok()
            .filter(|s| !s.is_empty());

        let leeway_secs: u64 = std::env::var("AUTH_LEEWAY_SECS")
            .unwrap_or_else(|_| DEFAULT_LEEWAY_SECS.to_string())
            .parse()
            .expect("AUTH_LEEWAY_SECS must be a valid u64");

        Self {
            secret,
            issuer,
            leeway_secs,
        }
    }
}

/// Sign `claims` with the configured secret (HS256).
pub fn generate_token(
    claims: &Claims,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an identity token, returning the embedded [`Claims`].
///
/// Checks the signature and expiration (with leeway). When an issuer is
/// configured, `iss` becomes mandatory and must match it.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = config.leeway_secs;
    match &config.issuer {
        Some(issuer) => {
            validation.set_required_spec_claims(&["exp", "sub", "iss"]);
            validation.set_issuer(&[issuer]);
        }
        None => validation.set_required_spec_claims(&["exp", "sub"]),
    }

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            issuer: None,
            leeway_secs: 60,
        }
    }

    fn claims(exp_offset: i64) -> Claims {
        let now = chrono::Utc::now().timestamp();
        Claims {
            sub: "ext_123".to_string(),
            email: "ada@example.com".to_string(),
            name: Some("Ada".to_string()),
            picture: None,
            role: Some("staff".to_string()),
            exp: now + exp_offset,
            iat: now,
            iss: None,
        }
    }

    #[test]
    fn test_generate_and_validate_token() {
        let config = test_config();
        let token = generate_token(&claims(900), &config).expect("token generation should succeed");

        let decoded = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(decoded.sub, "ext_123");
        assert_eq!(decoded.email, "ada@example.com");
        assert_eq!(decoded.role.as_deref(), Some("staff"));
    }

    #[test]
    fn test_expired_token_fails() {
        let config = test_config();
        // Well past the 60-second leeway.
        let token = generate_token(&claims(-300), &config).expect("encoding should succeed");
        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_different_secrets_fail() {
        let config_a = test_config();
        let config_b = JwtConfig {
            secret: "another-secret".to_string(),
            ..test_config()
        };
        let token = generate_token(&claims(900), &config_a).expect("encoding should succeed");
        assert!(validate_token(&token, &config_b).is_err());
    }

    #[test]
    fn test_issuer_is_enforced_when_configured() {
        let config = JwtConfig {
            issuer: Some("https://id.example.com".to_string()),
            ..test_config()
        };
        let mut c = claims(900);
        let token = generate_token(&c, &config).unwrap();
        assert!(validate_token(&token, &config).is_err(), "missing iss must fail");

        c.iss = Some("https://other.example.com".to_string());
        let token = generate_token(&c, &config).unwrap();
        assert!(validate_token(&token, &config).is_err(), "foreign iss must fail");

        c.iss = Some("https://id.example.com".to_string());
        let token = generate_token(&c, &config).unwrap();
        assert!(validate_token(&token, &config).is_ok());
    }
}
