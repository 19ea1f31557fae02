use std::sync::Arc;

use axum::{
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post, MethodRouter},
    Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::handlers;
use crate::middleware::jwt_auth_middleware;

/// Process-wide context handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, db: PgPool) -> Self {
        let tokens = TokenService::new(
            &config.security.jwt_secret,
            chrono::Duration::minutes(config.security.token_expire_minutes),
        );
        Self {
            db,
            tokens: Arc::new(tokens),
            config: Arc::new(config),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        // Bearer token required
        .merge(protected_routes(state.clone()));

    if state.config.security.enable_cors {
        router = router.layer(cors_layer(&state.config.security.cors_origins));
    }
    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

/// Register a route under both `/path` and `/path/`.
fn route_both(router: Router<AppState>, path: &str, method_router: MethodRouter<AppState>) -> Router<AppState> {
    router
        .route(path, method_router.clone())
        .route(&format!("{}/", path), method_router)
}

fn public_routes() -> Router<AppState> {
    use handlers::public;

    let router = Router::new().route("/token", post(public::auth::login_for_access_token));
    route_both(router, "/users", post(public::users::register))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::{definitions, scores, subjects, users};

    let mut router = Router::new();
    router = route_both(router, "/users/me", get(users::read_me));
    router = route_both(router, "/subjects", get(subjects::list).post(subjects::create));
    router = route_both(
        router,
        "/subjects/:subject_id/definitions",
        get(definitions::list).post(definitions::create),
    );
    router = route_both(router, "/subjects/:subject_id/scores", get(scores::list));
    router = route_both(router, "/subjects/:subject_id/scores/averages", get(scores::averages));
    router = route_both(router, "/scores", post(scores::create));

    router.route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the BHV3 API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health(axum::extract::State(state): axum::extract::State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check(&state.db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
