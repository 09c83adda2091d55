use rh_core::{Error, Result};

const DEMO_USERNAME: &str = "admin";
const DEMO_PASSWORD: &str = "admin";
const TOKEN: &str = "authenticated";

/// Hardcoded demo login guarding the admin views. Not a security boundary.
#[derive(Debug, Clone, Default)]
pub struct AdminSession {
    token: Option<String>,
}

impl AdminSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        if username == DEMO_USERNAME && password == DEMO_PASSWORD {
            self.token = Some(TOKEN.to_string());
            Ok(())
        } else {
            Err(Error::InvalidCredentials)
        }
    }

    pub fn logout(&mut self) {
        self.token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
