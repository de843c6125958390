use chrono::NaiveDateTime;

pub struct UserCreateRequest {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub otp_hash: String,
    pub otp_expires_at: NaiveDateTime,
}

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub pincode: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub gender: Option<String>,
}
