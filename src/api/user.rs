use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// The sign-up form as entered by the user, before it is sent.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    const MIN_PASSWORD_LEN: usize = 8;

    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty()
            || self.email.is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            bail!("All fields are required");
        }

        if self.password != self.confirm_password {
            bail!("Passwords do not match");
        }

        if self.password.chars().count() < Self::MIN_PASSWORD_LEN {
            bail!(
                "Password must be at least {} characters",
                Self::MIN_PASSWORD_LEN
            );
        }

        Ok(())
    }

    pub fn into_request(self) -> RegisterRequest {
        RegisterRequest {
            username: self.username,
            email: self.email,
            password: self.password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_form(password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            username: String::from("alice"),
            email: String::from("alice@example.com"),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_validate() {
        build_form("longenough", "longenough").validate().unwrap();

        let err = build_form("", "").validate().unwrap_err();
        assert_eq!(err.to_string(), "All fields are required");

        let mut form = build_form("longenough", "longenough");
        form.email.clear();
        let err = form.validate().unwrap_err();
        assert_eq!(err.to_string(), "All fields are required");

        let err = build_form("longenough", "longenougH").validate().unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");

        let err = build_form("short", "short").validate().unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 8 characters");
    }
}
