use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::Error};
use uuid::Uuid;

use super::models::{AccessTokenClaims, Role};

pub fn create_token(user_id: Uuid, role: Role, secret: &str, ttl_secs: i64) -> Result<String, Error> {
    let now = Utc::now().timestamp();
    let claims = AccessTokenClaims {
        sub: user_id.to_string(),
        role,
        iat: now,
        exp: now + ttl_secs,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn decode_token(token: &str, secret: &str) -> Result<AccessTokenClaims, Error> {
    let data = decode::<AccessTokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_decode_with_the_same_secret() {
        let user_id = Uuid::new_v4();
        let token = create_token(user_id, Role::Pro, "secret", 60).unwrap();
        let claims = decode_token(&token, "secret").unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.role, Role::Pro);
        assert!(decode_token(&token, "other").is_err());
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let token = create_token(Uuid::new_v4(), Role::Free, "secret", -3600).unwrap();
        assert!(decode_token(&token, "secret").is_err());
    }
}
