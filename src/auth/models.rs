use crate::schema::users;
use crate::utils::{error::ApiError, forbidden, unauthorized};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

#[derive(Queryable, Selectable, Insertable, Debug, PartialEq)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Queryable, Selectable, Debug, Serialize)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SafeUser {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Free,
    Pro,
    Investor,
    Entrepreneur,
    Admin,
}

impl Role {
    /// Investor, entrepreneur and admin accounts are granted, never chosen at signup.
    pub fn can_self_register(&self) -> bool {
        matches!(self, Role::Free | Role::Pro)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Free => "free",
            Role::Pro => "pro",
            Role::Investor => "investor",
            Role::Entrepreneur => "entrepreneur",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Role::Free),
            "pro" => Ok(Role::Pro),
            "investor" => Ok(Role::Investor),
            "entrepreneur" => Ok(Role::Entrepreneur),
            "admin" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct SignupPayload {
    #[validate(email, length(max = 100))]
    pub email: String,
    #[validate(length(min = 8, max = 72))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::Free
}

#[derive(Deserialize, Validate)]
pub struct LoginPayload {
    #[validate(email, length(max = 100))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub user: SafeUser,
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl AccessTokenClaims {
    pub fn user_id(&self) -> Result<Uuid, ApiError> {
        Uuid::parse_str(&self.sub).map_err(|_| unauthorized("Malformed token subject"))
    }

    pub fn require_role(&self, role: Role) -> Result<(), ApiError> {
        if self.role == role {
            Ok(())
        } else {
            Err(forbidden(&format!("Only {} accounts can do this", role)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_parse_case_insensitively() {
        assert_eq!("PRO".parse::<Role>().unwrap(), Role::Pro);
        assert_eq!("entrepreneur".parse::<Role>().unwrap(), Role::Entrepreneur);
        assert!("vendor".parse::<Role>().is_err());
    }

    #[test]
    fn role_gate_rejects_other_roles() {
        let claims = AccessTokenClaims {
            sub: Uuid::new_v4().to_string(),
            role: Role::Free,
            iat: 0,
            exp: 0,
        };

        assert!(claims.require_role(Role::Free).is_ok());
        assert_eq!(
            claims.require_role(Role::Admin).unwrap_err().0,
            axum::http::StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn only_free_and_pro_are_open_at_signup() {
        assert!(Role::Free.can_self_register());
        assert!(Role::Pro.can_self_register());
        assert!(!Role::Investor.can_self_register());
        assert!(!Role::Entrepreneur.can_self_register());
        assert!(!Role::Admin.can_self_register());
    }

    #[test]
    fn overlong_emails_fail_validation() {
        let signup = |email: String| SignupPayload {
            email,
            password: "long-enough".to_owned(),
            full_name: "Sara".to_owned(),
            role: Role::Free,
        };

        assert!(signup("sara@hub.sa".to_owned()).validate().is_ok());

        let long = format!("sara@{}.{}.sa", "a".repeat(60), "b".repeat(40));
        assert!(long.len() > 100);
        assert!(signup(long).validate().is_err());
    }
}
