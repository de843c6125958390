use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::{
    error::{AppError, Res},
    misc::UserRole,
};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    // Credentials and session secrets never leave the service.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: String,
    pub verified: bool,
    #[serde(skip_serializing, default)]
    pub otp_hash: Option<String>,
    #[serde(skip_serializing, default)]
    pub otp_expires_at: Option<NaiveDateTime>,
    #[serde(skip_serializing, default)]
    pub refresh_token: Option<String>,
    pub pincode: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub gender: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    pub fn is_admin(&self) -> bool {
        UserRole::from_str(&self.role) == Some(UserRole::Admin)
    }

    /// Gate for admin-only operations.
    pub fn require_admin(&self) -> Res<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Access denied".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_are_not_serialized() {
        let user = User {
            id: Uuid::new_v4(),
            first_name: "Ada".to_string(),
            last_name: None,
            email: "ada@example.com".to_string(),
            password_hash: "argon2-hash".to_string(),
            role: "user".to_string(),
            verified: true,
            otp_hash: Some("otp-hash".to_string()),
            otp_expires_at: None,
            refresh_token: Some("refresh".to_string()),
            pincode: None,
            state: None,
            city: None,
            gender: None,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: chrono::Utc::now().naive_utc(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("otp_hash").is_none());
        assert!(json.get("refresh_token").is_none());
        assert_eq!(json["email"], "ada@example.com");
    }

    #[test]
    fn admin_gate_rejects_plain_users() {
        let mut user = User {
            id: Uuid::new_v4(),
            first_name: "Ada".to_string(),
            last_name: None,
            email: "ada@example.com".to_string(),
            password_hash: String::new(),
            role: "user".to_string(),
            verified: true,
            otp_hash: None,
            otp_expires_at: None,
            refresh_token: None,
            pincode: None,
            state: None,
            city: None,
            gender: None,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: chrono::Utc::now().naive_utc(),
        };

        assert!(user.require_admin().is_err());
        user.role = "admin".to_string();
        assert!(user.require_admin().is_ok());
    }
}
