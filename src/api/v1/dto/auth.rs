/*
 * Responsibility
 * - signup / login の request/response DTO
 * - validation (形式チェック) 用の validate() を持たせる
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

impl SignUpRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        let name_len = self.user_name.trim().chars().count();
        if !(2..=24).contains(&name_len) {
            return Err("user_name must be 2 to 24 chars");
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err("email must be a valid address");
        }
        let pw_len = self.password.chars().count();
        if !(6..=24).contains(&pw_len) {
            return Err("password must be 6 to 24 chars");
        }
        let has_lower = self.password.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = self.password.chars().any(|c| c.is_ascii_uppercase());
        let has_digit = self.password.chars().any(|c| c.is_ascii_digit());
        if !(has_lower && has_upper && has_digit) {
            return Err("password must contain a lowercase, an uppercase and a digit");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub user_name_or_email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.user_name_or_email.trim().is_empty() {
            return Err("user_name_or_email is required");
        }
        if self.password.is_empty() {
            return Err("password is required");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_name_or_email: String,
    pub jwt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> SignUpRequest {
        SignUpRequest {
            user_name: "alice".into(),
            email: "alice@example.com".into(),
            password: "Passw0rd".into(),
        }
    }

    #[test]
    fn valid_signup_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn password_without_uppercase_is_rejected() {
        let mut req = valid();
        req.password = "passw0rd".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn password_without_digit_is_rejected() {
        let mut req = valid();
        req.password = "Password".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn short_user_name_is_rejected() {
        let mut req = valid();
        req.user_name = "a".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn email_without_at_is_rejected() {
        let mut req = valid();
        req.email = "alice.example.com".into();
        assert!(req.validate().is_err());
    }
}
