use axum::extract::FromRef;
use sqlx::PgPool;

use crate::config::{ApiConfig, Environment};

/// Settings the auth extractor needs, shared through `FromRef`.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct ApiState {
    pub pool: PgPool,
    pub auth: AuthConfig,
    pub environment: Environment,
}

impl ApiState {
    pub async fn new(config: ApiConfig) -> anyhow::Result<Self> {
        lq_db::ensure_database(&config.database_url).await?;
        let pool = lq_db::create_pool(&config.database_url, 10).await?;
        lq_db::migrate(&pool).await?;

        Ok(Self {
            pool,
            auth: AuthConfig {
                jwt_secret: config.jwt_secret,
            },
            environment: config.env,
        })
    }
}

impl FromRef<ApiState> for AuthConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.auth.clone()
    }
}
