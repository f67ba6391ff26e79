use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::SharedSecretVerifier;
use crate::config::{self, SecurityConfig};
use crate::handlers::{protected, public};
use crate::middleware::{require_session_middleware, session_middleware};

/// Full router with the shared pool, session and CORS layers applied.
/// Sign-in tokens are checked against the configured shared secret.
pub fn app(pool: PgPool) -> Router {
    let verifier = SharedSecretVerifier::from_config(&config::config().security);
    app_with_verifier(pool, Arc::new(verifier))
}

/// Same router with a caller-supplied identity verifier.
pub fn app_with_verifier(pool: PgPool, verifier: public::Verifier) -> Router {
    let config = config::config();

    let mut router = Router::new()
        .merge(deal_routes())
        .merge(public_routes())
        .merge(protected_routes())
        .layer(middleware::from_fn(session_middleware))
        .layer(Extension(pool))
        .layer(Extension(verifier))
        .layer(cors_layer(&config.security));

    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

/// Deal paths mix public reads with poster-only writes; the write handlers
/// enforce the session themselves.
fn deal_routes() -> Router {
    Router::new()
        .route("/api/deals", get(public::deals_list).post(protected::deal_create))
        .route("/api/deals/search", get(public::deals_search))
        .route("/api/deals/categories", get(public::categories_list))
        .route(
            "/api/deal/:dealId",
            get(public::deal_get)
                .put(protected::deal_update)
                .delete(protected::deal_delete),
        )
}

fn public_routes() -> Router {
    Router::new()
        .route("/heartbeat", get(public::heartbeat))
        .route("/health", get(public::health))
        .route("/api/login/email", post(public::login))
        .route("/api/login/social", post(public::login))
        .route("/api/register/email", post(public::register_email))
        .route("/api/register/social_media", post(public::register_social))
        .route("/api/deal/:dealId/memberships", get(public::deal_members))
        .route("/api/deal/:dealId/membership/:userId", get(public::deal_membership_get))
        .route("/api/deal/:dealId/likes", get(public::deal_likes))
        .route("/api/deal/:dealId/like/:userId", get(public::deal_like_get))
        .route("/api/deal/:dealId/images", get(public::deal_images))
        .route("/api/deal/:dealId/comments", get(public::deal_comments))
        .route("/api/suggestions", get(public::suggestions_list))
        .route("/api/user/:userId", get(public::user_get))
}

fn protected_routes() -> Router {
    use axum::routing::put;

    Router::new()
        .route(
            "/api/deal_membership",
            post(protected::membership_join).delete(protected::membership_leave),
        )
        .route("/api/deal_like", post(protected::like_vote).delete(protected::like_clear))
        .route("/api/deal_image", post(protected::image_add).delete(protected::image_remove))
        .route(
            "/api/deal_comment",
            post(protected::comment_add)
                .put(protected::comment_edit)
                .delete(protected::comment_remove),
        )
        .route("/api/deal_hidden", post(protected::deal_hide).delete(protected::deal_unhide))
        .route("/api/user", put(protected::user_update))
        .route("/api/user_blocked", post(protected::user_block).delete(protected::user_unblock))
        .route("/api/user_reported", post(protected::user_report))
        .route("/api/user_banned", get(protected::user_banned))
        .route("/api/logout", post(protected::logout))
        .route_layer(middleware::from_fn(require_session_middleware))
}

/// Cookies need credentialed CORS, so origins are listed explicitly.
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
