use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use std::fmt;

/// Bot token read from the environment at startup.
#[derive(Clone)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    pub fn from_env(var_name: &str) -> Result<Self> {
        Self::from_lookup(var_name, |name| std::env::var(name).ok())
    }

    /// 空白的 token 視同未設定
    pub fn from_lookup<F>(var_name: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(var_name)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        let token = validate_required_field(var_name, &token)?;

        Ok(Self {
            token: token.clone(),
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"***")
            .finish()
    }
}
