#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx_migrator::{Migrate, Plan};
use temp_dir::TempDir;
use tower::ServiceExt;
use yummio::{
    AppState, Config,
    config::{
        DatabaseConfig, EmailConfig, JwtConfig, ObservabilityConfig, PasswordConfig,
        RateLimitConfig, ServerConfig, UploadConfig,
    },
    upload::{FsBlobStore, UploadService},
};

pub const BOUNDARY: &str = "yummio-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub dir: TempDir,
}

pub fn test_config(dir: &TempDir) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        database: DatabaseConfig {
            url: format!("sqlite:{}", dir.child("db.sqlite3").display()),
            max_connections: 4,
        },
        jwt: JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_string(),
            access_ttl_secs: 3600,
            refresh_ttl_secs: 7200,
            reset_ttl_secs: 600,
        },
        password: PasswordConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        },
        rate_limit: RateLimitConfig {
            enabled: false,
            ..Default::default()
        },
        upload: UploadConfig {
            dir: dir.child("uploads").display().to_string(),
            base_url: "http://cdn.test".to_string(),
            max_bytes: 1024,
            ..Default::default()
        },
        email: EmailConfig::default(),
        observability: ObservabilityConfig::default(),
    }
}

pub async fn spawn() -> anyhow::Result<TestApp> {
    spawn_with(|_| {}).await
}

pub async fn spawn_with(configure: impl FnOnce(&mut Config)) -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let mut config = test_config(&dir);
    configure(&mut config);

    let write_db = yummio_db::create_write_pool(&config.database.url).await?;
    let mut conn = write_db.acquire().await?;
    yummio_db::migrator::<sqlx::Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;
    drop(conn);
    let read_db =
        yummio_db::create_read_pool(&config.database.url, config.database.max_connections).await?;

    let upload = UploadService::new(
        Arc::new(FsBlobStore::new(
            &config.upload.dir,
            config.upload.base_url.clone(),
        )),
        &config.upload,
    );

    let state = AppState::new(
        config,
        yummio_shared::State::new(read_db, write_db),
        Arc::new(yummio_user::LogNotifier),
        upload,
    )?;

    Ok(TestApp {
        router: yummio::router(state.clone()),
        state,
        dir,
    })
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok((status, body))
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> anyhow::Result<(StatusCode, Value)> {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(
        &self,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> anyhow::Result<(StatusCode, Value)> {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    /// Registers `name` and returns its access token.
    pub async fn register(&self, name: &str) -> anyhow::Result<String> {
        let (status, body) = self
            .post(
                "/api/v1/auth/register",
                None,
                json!({
                    "name": name,
                    "email": format!("{name}@example.com"),
                    "password": "secret123",
                }),
            )
            .await?;

        anyhow::ensure!(status == StatusCode::CREATED, "register failed: {body}");

        body["access_token"]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| anyhow::anyhow!("missing access token"))
    }

    pub async fn create_recipe(
        &self,
        token: &str,
        title: &str,
        is_public: bool,
    ) -> anyhow::Result<String> {
        let (status, body) = self
            .post("/api/v1/recipes", Some(token), recipe_payload(title, is_public))
            .await?;

        anyhow::ensure!(status == StatusCode::CREATED, "create recipe failed: {body}");

        body["id"]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| anyhow::anyhow!("missing recipe id"))
    }
}

pub fn recipe_payload(title: &str, is_public: bool) -> Value {
    json!({
        "title": title,
        "description": "A weeknight favourite",
        "prep_time": 10,
        "cook_time": 20,
        "servings": 4,
        "difficulty": "easy",
        "type": "dinner",
        "is_public": is_public,
        "ingredients": [
            { "name": "flour", "amount": 2.0, "unit": "cup" },
            { "name": "salt", "unit": "pinch" }
        ],
        "instructions": [
            { "step": 1, "instruction": "Mix everything" },
            { "step": 2, "instruction": "Bake for 20 minutes", "timer_minutes": 20 }
        ],
        "tags": ["quick", "vegetarian"],
        "nutrition": { "calories": 320 }
    })
}

pub fn multipart_body(field: &str, filename: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}
