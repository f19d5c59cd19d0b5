use std::env;

/// Deployment environment, selected via `APP_ENV`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn from_env() -> Self {
        match env::var("APP_ENV").as_deref() {
            Ok("production" | "prod") => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub env: Environment,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            jwt_secret: env::var("JWT_SECRET")?,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            env: Environment::from_env(),
        })
    }
}
