//! Authentication and authorization

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::{ActorContext, ActorRole, PartyId};

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (party ID)
    pub sub: String,
    /// Role the party acts in: "client" or "lawyer"
    pub role: String,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Invalid subject or role claim")]
    InvalidClaims,
}

/// Creates a new JWT token
pub fn create_token(
    party_id: PartyId,
    role: ActorRole,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: party_id.to_string(),
        role: role.as_str().to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        if e.to_string().contains("ExpiredSignature") {
            AuthError::TokenExpired
        } else {
            AuthError::InvalidToken
        }
    })?;

    Ok(token_data.claims)
}

impl Claims {
    /// Resolves the claims into the acting party and role
    pub fn actor_context(&self) -> Result<ActorContext, AuthError> {
        let actor_id: PartyId = self.sub.parse().map_err(|_| AuthError::InvalidClaims)?;
        let role: ActorRole = self.role.parse().map_err(|_| AuthError::InvalidClaims)?;
        Ok(ActorContext::new(actor_id, role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        let party_id = PartyId::new();
        let token = create_token(party_id, ActorRole::Lawyer, "secret", 600).unwrap();

        let claims = validate_token(&token, "secret").unwrap();
        let actor = claims.actor_context().unwrap();
        assert_eq!(actor.actor_id, party_id);
        assert_eq!(actor.role, ActorRole::Lawyer);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(PartyId::new(), ActorRole::Client, "secret", 600).unwrap();
        assert!(matches!(
            validate_token(&token, "other"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_role_rejected() {
        let claims = Claims {
            sub: PartyId::new().to_string(),
            role: "paralegal".to_string(),
            exp: 0,
            iat: 0,
        };
        assert!(matches!(
            claims.actor_context(),
            Err(AuthError::InvalidClaims)
        ));
    }
}
