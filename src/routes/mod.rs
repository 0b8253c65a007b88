use std::sync::Arc;

use axum::{
    Router,
    extract::{DefaultBodyLimit, FromRequest, FromRequestParts},
    middleware,
    routing::{get, post, put},
};

use crate::{
    config::Config,
    error::AppError,
    rate_limit::{RateLimiter, rate_limit},
    upload::UploadService,
};

mod auth;
mod collections;
mod health;
mod recipes;
mod shopping;
mod upload;
mod users;

/// JSON body whose rejections render as [`AppError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query string (repeated keys allowed) whose rejections render as [`AppError`].
#[derive(FromRequestParts)]
#[from_request(via(axum_extra::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: yummio_shared::State,
    pub user_command: Arc<yummio_user::Command>,
    pub recipe_command: Arc<yummio_recipe::Command>,
    pub recipe_query: yummio_recipe::Query,
    pub collection_command: Arc<yummio_collection::Command>,
    pub collection_query: yummio_collection::Query,
    pub shopping_command: Arc<yummio_shopping::Command>,
    pub shopping_query: yummio_shopping::Query,
    pub upload: UploadService,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(
        config: Config,
        db: yummio_shared::State,
        notifier: Arc<dyn yummio_user::Notifier>,
        upload: UploadService,
    ) -> anyhow::Result<Self> {
        let hasher = yummio_user::password::Hasher::new(
            config.password.memory_kib,
            config.password.iterations,
            config.password.parallelism,
        )?;
        let tokens = config.jwt.tokens();
        let rate_limiter = Arc::new(RateLimiter::new(&config.rate_limit));

        Ok(Self {
            user_command: Arc::new(yummio_user::Command::new(
                db.clone(),
                hasher,
                tokens,
                notifier,
            )),
            recipe_command: Arc::new(yummio_recipe::Command::new(db.clone())),
            recipe_query: yummio_recipe::Query(db.clone()),
            collection_command: Arc::new(yummio_collection::Command::new(db.clone())),
            collection_query: yummio_collection::Query(db.clone()),
            shopping_command: Arc::new(yummio_shopping::Command::new(db.clone())),
            shopping_query: yummio_shopping::Query(db.clone()),
            config: Arc::new(config),
            db,
            upload,
            rate_limiter,
        })
    }
}

fn api(state: &AppState) -> Router<AppState> {
    // Multipart framing on top of the largest accepted file.
    let upload_body_limit = state.upload.max_bytes().saturating_add(64 * 1024);

    Router::new()
        .route("/health", get(health::health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password", post(auth::reset_password))
        .route(
            "/upload/image",
            post(upload::image).layer(DefaultBodyLimit::max(upload_body_limit)),
        )
        .route(
            "/users/profile",
            get(users::get_profile)
                .put(users::update_profile)
                .delete(users::delete_profile),
        )
        .route("/users/change-password", post(users::change_password))
        .route("/recipes", get(recipes::list).post(recipes::create))
        .route("/recipes/search", get(recipes::search))
        .route("/recipes/featured", get(recipes::featured))
        .route("/recipes/my-recipes", get(recipes::mine))
        .route("/recipes/favorites", get(recipes::favorites))
        .route(
            "/recipes/{id}",
            get(recipes::detail)
                .put(recipes::update)
                .delete(recipes::delete),
        )
        .route(
            "/recipes/{id}/favorite",
            post(recipes::add_favorite).delete(recipes::remove_favorite),
        )
        .route("/recipes/{id}/rate", post(recipes::rate))
        .route(
            "/collections",
            get(collections::list).post(collections::create),
        )
        .route(
            "/collections/{id}",
            get(collections::detail)
                .put(collections::update)
                .delete(collections::delete),
        )
        .route(
            "/collections/{id}/recipes/{recipe_id}",
            post(collections::add_recipe).delete(collections::remove_recipe),
        )
        .route(
            "/shopping-lists",
            get(shopping::list).post(shopping::create),
        )
        .route(
            "/shopping-lists/{id}",
            get(shopping::detail)
                .put(shopping::update)
                .delete(shopping::delete),
        )
        .route("/shopping-lists/{id}/items", post(shopping::add_item))
        .route(
            "/shopping-lists/{id}/items/{item_id}",
            put(shopping::update_item).delete(shopping::delete_item),
        )
}

pub fn router(state: AppState) -> Router {
    let mut api = api(&state);

    if state.config.rate_limit.enabled {
        api = api.layer(middleware::from_fn_with_state(
            state.rate_limiter.clone(),
            rate_limit,
        ));
    }

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", api)
        .with_state(state)
}
