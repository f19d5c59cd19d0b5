use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use lq_api::{auth::jwt::generate_jwt_token, config::Environment, state::{ApiState, AuthConfig}};
use tower::ServiceExt;
use uuid::Uuid;

pub const JWT_SECRET: &str = "test_jwt_secret_minimum_32_characters_long";

/// Build a test `ApiState` against a real database, or `None` when
/// `TEST_DATABASE_URL` is not configured (the DB-backed tests skip then).
pub async fn state() -> Option<ApiState> {
    dotenvy::dotenv().ok();
    let Ok(database_url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping database-backed test");
        return None;
    };

    lq_db::ensure_database(&database_url)
        .await
        .expect("failed to create the test database");
    let pool = lq_db::create_pool(&database_url, 10)
        .await
        .expect("failed to connect to the test database");
    lq_db::migrate(&pool).await.expect("failed to run migrations");

    Some(ApiState {
        pool,
        auth: AuthConfig {
            jwt_secret: JWT_SECRET.to_string(),
        },
        environment: Environment::Development,
    })
}

/// Mint a bearer token for a user, the way the collaborating subsystems do.
pub fn bearer_token(user_id: Uuid) -> String {
    let token = generate_jwt_token(user_id, JWT_SECRET).expect("failed to generate test token");
    format!("Bearer {token}")
}

/// Helper to make requests to the test app
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(state: ApiState) -> Self {
        Self {
            router: lq_api::router::router().with_state(state),
        }
    }

    pub async fn post_json(
        &self,
        uri: &str,
        authorization: Option<&str>,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(authorization) = authorization {
            builder = builder.header(header::AUTHORIZATION, authorization);
        }
        let request = builder
            .body(Body::from(body.to_string()))
            .expect("failed to build request");

        self.send(request).await
    }

    pub async fn get(
        &self,
        uri: &str,
        authorization: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(authorization) = authorization {
            builder = builder.header(header::AUTHORIZATION, authorization);
        }
        let request = builder
            .body(Body::empty())
            .expect("failed to build request");

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, json)
    }
}
