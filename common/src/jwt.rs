use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    env_config::TokenConfig,
    error::{AppError, Res},
};

/// Claims carried by both access and refresh tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub email: String,
    pub role: String,
    pub exp: usize,
}

pub struct ClaimsSpec {
    pub user_id: Uuid,
    pub email: String,
    pub role: String,
}

/// A freshly issued access/refresh token pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

fn encode(spec: &ClaimsSpec, secret: &str, lifetime: Duration) -> Res<String> {
    let expiration = Utc::now()
        .checked_add_signed(lifetime)
        .expect("valid timestamp")
        .timestamp();

    let claims = TokenClaims {
        user_id: spec.user_id,
        email: spec.email.clone(),
        role: spec.role.clone(),
        exp: expiration as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AppError::from)
}

/// Generates a short-lived access token and a longer-lived refresh token
/// for the same principal. The refresh token is the one persisted on the
/// user record; the access token is never stored.
pub fn generate_token_pair(spec: &ClaimsSpec, config: &TokenConfig) -> Res<TokenPair> {
    let access_token = encode(
        spec,
        &config.access_secret,
        Duration::minutes(config.access_expires_minutes),
    )?;
    let refresh_token = encode(
        spec,
        &config.refresh_secret,
        Duration::days(config.refresh_expires_days),
    )?;
    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

/// Extracts claims from a token, verifying signature and expiry.
pub fn validate_token(token: &str, secret: &str) -> Res<TokenClaims> {
    let token_data = jsonwebtoken::decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> TokenConfig {
        TokenConfig {
            access_secret: "access-secret-for-tests".to_string(),
            access_expires_minutes: 10,
            refresh_secret: "refresh-secret-for-tests".to_string(),
            refresh_expires_days: 15,
        }
    }

    fn test_spec() -> ClaimsSpec {
        ClaimsSpec {
            user_id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            role: "user".to_string(),
        }
    }

    #[test]
    fn access_token_round_trips_claims() {
        let config = test_config();
        let spec = test_spec();
        let pair = generate_token_pair(&spec, &config).unwrap();

        let claims = validate_token(&pair.access_token, &config.access_secret).unwrap();
        assert_eq!(claims.user_id, spec.user_id);
        assert_eq!(claims.email, spec.email);
        assert_eq!(claims.role, spec.role);
    }

    #[test]
    fn refresh_token_rejected_by_access_secret() {
        let config = test_config();
        let pair = generate_token_pair(&test_spec(), &config).unwrap();

        // The two token kinds are signed with different secrets; one must
        // not validate as the other.
        assert!(validate_token(&pair.refresh_token, &config.access_secret).is_err());
        assert!(validate_token(&pair.access_token, &config.refresh_secret).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let config = test_config();
        assert!(validate_token("not-a-jwt", &config.access_secret).is_err());
    }
}
