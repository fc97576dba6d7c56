use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl RegistrationRequest {
    pub fn has_empty_field(&self) -> bool {
        self.fullname.is_empty() || self.email.is_empty() || self.password.is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn has_empty_field(&self) -> bool {
        self.email.is_empty() || self.password.is_empty()
    }
}
