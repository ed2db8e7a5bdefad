use serde::{Deserialize, Serialize};

use super::upload::ImageFile;
use crate::constants::MIN_PASSWORD_LEN;
use crate::error::{TaskdeskError, TaskdeskResult};

/// The signed-in account, as returned by `GET /account/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_active: bool,
}

impl User {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();

        if !full.is_empty() {
            full.to_string()
        } else if !self.user_name.is_empty() {
            self.user_name.clone()
        } else {
            self.email.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of a successful `POST /account/login/`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// What the sign-up form collects.
///
/// `confirm_password` and `agree_to_terms` are checked locally and never
/// sent to the server.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub agree_to_terms: bool,
}

/// Wire body for `POST /account/register/`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub user_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

impl RegisterForm {
    pub fn validate(&self) -> TaskdeskResult<RegisterRequest<'_>> {
        if self.password != self.confirm_password {
            return Err(TaskdeskError::InvalidInput("Passwords do not match".into()));
        }

        if !self.agree_to_terms {
            return Err(TaskdeskError::InvalidInput(
                "Please agree to the terms and conditions".into(),
            ));
        }

        Ok(RegisterRequest {
            first_name: &self.first_name,
            last_name: &self.last_name,
            user_name: &self.user_name,
            email: &self.email,
            password: &self.password,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordChangeRequest<'a> {
    pub old_password: &'a str,
    pub new_password: &'a str,
}

impl PasswordChange {
    pub fn validate(&self) -> TaskdeskResult<PasswordChangeRequest<'_>> {
        if self.new_password != self.confirm_password {
            return Err(TaskdeskError::InvalidInput("New passwords do not match".into()));
        }

        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(TaskdeskError::InvalidInput(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LEN
            )));
        }

        Ok(PasswordChangeRequest {
            old_password: &self.old_password,
            new_password: &self.new_password,
        })
    }
}

/// Editable profile fields for `PUT /account/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    pub phone: String,
    pub position: String,
    pub image: Option<ImageFile>,
}

impl ProfileUpdate {
    pub fn from_user(user: &User) -> Self {
        ProfileUpdate {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            user_name: user.user_name.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            position: user.position.clone().unwrap_or_default(),
            image: None,
        }
    }

    pub(crate) fn text_fields(&self) -> [(&'static str, &str); 5] {
        [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("user_name", &self.user_name),
            ("phone", &self.phone),
            ("position", &self.position),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegisterForm {
        RegisterForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            user_name: "ada".into(),
            email: "ada@example.com".into(),
            password: "analytical".into(),
            confirm_password: "analytical".into(),
            agree_to_terms: true,
        }
    }

    #[test]
    fn register_request_omits_confirmation() {
        let form = form();
        let body = serde_json::to_value(form.validate().unwrap()).unwrap();

        assert_eq!(body["email"], "ada@example.com");
        assert!(body.get("confirm_password").is_none());
        assert!(body.get("agree_to_terms").is_none());
    }

    #[test]
    fn register_checks_confirmation_then_terms() {
        let mut mismatch = form();
        mismatch.confirm_password = "other".into();
        mismatch.agree_to_terms = false;
        let err = mismatch.validate().unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");

        let mut no_terms = form();
        no_terms.agree_to_terms = false;
        let err = no_terms.validate().unwrap_err();
        assert_eq!(err.to_string(), "Please agree to the terms and conditions");
    }

    #[test]
    fn password_change_rules() {
        let change = PasswordChange {
            old_password: "old".into(),
            new_password: "short".into(),
            confirm_password: "short".into(),
        };
        assert!(change.validate().is_err());

        let change = PasswordChange {
            old_password: "old".into(),
            new_password: "long enough".into(),
            confirm_password: "long enougH".into(),
        };
        assert_eq!(
            change.validate().unwrap_err().to_string(),
            "New passwords do not match"
        );

        let change = PasswordChange {
            old_password: "old".into(),
            new_password: "long enough".into(),
            confirm_password: "long enough".into(),
        };
        assert_eq!(change.validate().unwrap().new_password, "long enough");
    }

    #[test]
    fn display_name_falls_back() {
        let mut user: User = serde_json::from_str(r#"{"id": 1, "email": "a@b.com"}"#).unwrap();
        assert_eq!(user.display_name(), "a@b.com");

        user.user_name = "ab".into();
        assert_eq!(user.display_name(), "ab");

        user.first_name = "Ann".into();
        assert_eq!(user.display_name(), "Ann");
    }
}
