use axum::routing::{delete, get, post, put};
use axum::{middleware, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use devlink_api::config::config;
use devlink_api::database::DatabaseManager;
use devlink_api::handlers;
use devlink_api::middleware::jwt_auth_middleware;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up MONGODB_URI, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config();
    tracing::info!("Starting DevLink API in {:?} mode", config.environment);

    // Unique indexes back the one-profile-per-user and one-account-per-email
    // guarantees. An unreachable database at boot is logged, not fatal;
    // requests surface 500s until it comes back.
    if let Err(e) = DatabaseManager::ensure_indexes().await {
        tracing::warn!("Index bootstrap skipped: {}", e);
    }

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("DEVLINK_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(5000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 DevLink API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    let config = config();

    let mut app = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Resources
        .merge(users_routes())
        .merge(auth_routes())
        .merge(profile_routes())
        .merge(posts_routes());

    // Global middleware
    if config.security.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    app
}

fn users_routes() -> Router {
    use handlers::users;

    Router::new().route("/api/users", post(users::register))
}

fn auth_routes() -> Router {
    use handlers::auth;

    // Same path, split by method: login is public, identity lookup is not.
    let protected = Router::new()
        .route("/api/auth", get(auth::current_user))
        .route_layer(middleware::from_fn(jwt_auth_middleware));

    Router::new()
        .route("/api/auth", post(auth::login))
        .merge(protected)
}

fn profile_routes() -> Router {
    use handlers::profile;

    let protected = Router::new()
        .route("/api/profile/me", get(profile::me))
        .route(
            "/api/profile",
            post(profile::upsert).delete(profile::delete_account),
        )
        .route("/api/profile/experience", put(profile::experience::add))
        .route(
            "/api/profile/experience/:id",
            delete(profile::experience::remove),
        )
        .route("/api/profile/education", put(profile::education::add))
        .route(
            "/api/profile/education/:id",
            delete(profile::education::remove),
        )
        .route_layer(middleware::from_fn(jwt_auth_middleware));

    Router::new()
        .route("/api/profile", get(profile::list))
        .route("/api/profile/user/:user_id", get(profile::by_user))
        .route("/api/profile/github/:username", get(profile::github::repos))
        .merge(protected)
}

fn posts_routes() -> Router {
    use handlers::posts;

    Router::new()
        .route("/api/posts", get(posts::list).post(posts::create))
        .route("/api/posts/:id", get(posts::get_by_id).delete(posts::delete))
        .route("/api/posts/like/:id", put(posts::likes::like))
        .route("/api/posts/unlike/:id", put(posts::likes::unlike))
        .route("/api/posts/comments/:id", post(posts::comments::add))
        .route(
            "/api/posts/comments/:id/:comment_id",
            delete(posts::comments::remove),
        )
        .route_layer(middleware::from_fn(jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "DevLink API",
            "version": version,
            "description": "Developer network API: accounts, profiles, posts",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "users": "POST /api/users (public - registration)",
                "auth": "POST /api/auth (public - login), GET /api/auth (protected)",
                "profile": "/api/profile, /api/profile/me, /api/profile/user/:id, /api/profile/experience, /api/profile/education, /api/profile/github/:username",
                "posts": "/api/posts[/:id], /api/posts/like/:id, /api/posts/unlike/:id, /api/posts/comments/:id[/:comment_id] (protected)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
