//! Shared JWT authentication utilities.
//!
//! Trailhead never issues tokens; the club's login service signs them and we
//! only verify. The claims carry what the access gate needs: group names, the
//! superuser flag, and the state of the holder's participant profile.

use jsonwebtoken::{decode, errors::ErrorKind, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::TrailheadError;
use crate::models::ProfileStatus;

/// JWT claims embedded in access tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as string)
    pub sub: String,
    /// Username
    pub username: String,
    /// Auth groups the user belongs to (e.g. `users_with_info`, `leaders`, `WSC`)
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub is_superuser: bool,
    /// State of the user's participant profile at token issue time
    pub profile: ProfileStatus,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// Token type ("access" or "refresh")
    pub token_type: String,
}

/// Validate and decode a JWT token.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, TrailheadError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TrailheadError::TokenExpired,
        _ => TrailheadError::InvalidToken,
    })?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(exp_offset: i64, secret: &str) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: uuid::Uuid::nil().to_string(),
            username: "alex".into(),
            groups: vec!["users_with_info".into()],
            is_superuser: false,
            profile: ProfileStatus::Current,
            iat: now,
            exp: now + exp_offset,
            token_type: "access".into(),
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn test_round_trips_groups() {
        let claims = validate_token(&token(600, "s3cret"), "s3cret").unwrap();
        assert_eq!(claims.groups, vec!["users_with_info".to_string()]);
        assert_eq!(claims.profile, ProfileStatus::Current);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let err = validate_token(&token(600, "s3cret"), "other").unwrap_err();
        assert!(matches!(err, TrailheadError::InvalidToken));
    }

    #[test]
    fn test_expired_token_is_reported_as_expired() {
        let err = validate_token(&token(-3600, "s3cret"), "s3cret").unwrap_err();
        assert!(matches!(err, TrailheadError::TokenExpired));
    }
}
