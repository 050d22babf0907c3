use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bearer token claims. `role` is the role at issuance time; role changes
/// take effect on the next login, not on existing tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: usize,
}

impl Claims {
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

pub fn issue_token(
    secret: &str,
    user_id: Uuid,
    email: &str,
    role: &str,
    ttl_hours: i64,
) -> jsonwebtoken::errors::Result<String> {
    let exp = chrono::Utc::now() + chrono::Duration::hours(ttl_hours);
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        exp: exp.timestamp() as usize,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn verify_token(secret: &str, token: &str) -> jsonwebtoken::errors::Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_then_verify_preserves_identity() {
        let id = Uuid::new_v4();
        let token = issue_token("secret", id, "ops@example.com", "operations", 8).unwrap();
        let claims = verify_token("secret", &token).unwrap();
        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.email, "ops@example.com");
        assert_eq!(claims.role, "operations");
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = issue_token("secret", Uuid::new_v4(), "a@b.c", "user", 8).unwrap();
        assert!(verify_token("other", &token).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let token = issue_token("secret", Uuid::new_v4(), "a@b.c", "user", -1).unwrap();
        assert!(verify_token("secret", &token).is_err());
    }

    #[test]
    fn rejects_garbage() {
        assert!(verify_token("secret", "not.a.token").is_err());
    }
}
