use serde::Deserialize;

pub const USERNAME_MIN_CHARS: usize = 3;
pub const USERNAME_MAX_CHARS: usize = 50;
pub const EMAIL_MAX_CHARS: usize = 255;
pub const FULL_NAME_MAX_CHARS: usize = 100;
pub const PASSWORD_MIN_CHARS: usize = 8;

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), String> {
        let username_len = self.username.chars().count();
        if !(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&username_len) {
            return Err(format!(
                "username must be between {USERNAME_MIN_CHARS} and {USERNAME_MAX_CHARS} characters"
            ));
        }
        if self.email.chars().count() > EMAIL_MAX_CHARS || !is_plausible_email(&self.email) {
            return Err("email is not a valid address".to_string());
        }
        if self.password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(format!("password must be at least {PASSWORD_MIN_CHARS} characters"));
        }
        if let Some(full_name) = &self.full_name {
            if full_name.chars().count() > FULL_NAME_MAX_CHARS {
                return Err(format!("full_name must be at most {FULL_NAME_MAX_CHARS} characters"));
            }
        }
        Ok(())
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}
