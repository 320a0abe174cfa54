use crate::config::rate_limit::{RateLimitConfig, RateLimitRule};
use crate::handlers;
use crate::middleware::auth::auth_middleware;
use axum::{middleware, routing, Router};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

pub fn create_routes() -> Router {
    Router::new().nest("/api", api_routes())
}

fn api_routes() -> Router {
    let rate_limit_config = RateLimitConfig::from_env();

    let auth = auth_routes(&rate_limit_config);
    let public = public_routes(&rate_limit_config);
    let protected =
        protected_routes(&rate_limit_config).layer(middleware::from_fn(auth_middleware));

    auth.merge(public).merge(protected)
}

/// Auth routes: register and login.
fn auth_routes(config: &RateLimitConfig) -> Router {
    let router = Router::new()
        .route("/auth/register", routing::post(handlers::register))
        .route("/auth/login", routing::post(handlers::login));

    with_optional_rate_limit(router, config.enabled, config.auth)
}

/// Public routes: category and blog reads plus the like counter.
fn public_routes(config: &RateLimitConfig) -> Router {
    let router = Router::new()
        // Categories
        .route(
            "/categories",
            routing::get(handlers::category::list_categories),
        )
        .route(
            "/categories/{slug}",
            routing::get(handlers::category::get_category),
        )
        .route(
            "/categories/{slug}/posts",
            routing::get(handlers::category::get_category_posts),
        )
        // Blog posts
        .route(
            "/blog-posts",
            routing::get(handlers::blog_post::list_posts),
        )
        .route(
            "/blog-posts/featured",
            routing::get(handlers::blog_post::get_featured),
        )
        .route(
            "/blog-posts/{slug}",
            routing::get(handlers::blog_post::get_post),
        )
        // Likes are counted without authentication; the server keeps no
        // per-viewer state.
        .route(
            "/blog-posts/{slug}/like",
            routing::post(handlers::blog_post::like_post),
        );

    with_optional_rate_limit(router, config.enabled, config.public_read)
}

/// Protected routes: authoring and admin writes.
fn protected_routes(config: &RateLimitConfig) -> Router {
    let router = Router::new()
        // Auth
        .route("/auth/me", routing::get(handlers::get_profile))
        // Blog posts (editor/admin - checked in handler)
        .route(
            "/blog-posts",
            routing::post(handlers::blog_post::create_post),
        )
        .route(
            "/blog-posts/{slug}",
            routing::patch(handlers::blog_post::update_post)
                .delete(handlers::blog_post::delete_post),
        )
        // Categories (admin only - checked in handler)
        .route(
            "/categories",
            routing::post(handlers::category::create_category),
        )
        .route(
            "/categories/{slug}",
            routing::put(handlers::category::update_category)
                .delete(handlers::category::delete_category),
        );

    with_optional_rate_limit(router, config.enabled, config.protected)
}

fn with_optional_rate_limit(router: Router, enabled: bool, rule: RateLimitRule) -> Router {
    if !enabled {
        return router;
    }

    let governor_conf = GovernorConfigBuilder::default()
        .per_second(rule.per_second)
        .burst_size(rule.burst_size)
        .finish()
        .expect("Invalid rate limit configuration");

    router.layer(GovernorLayer::new(governor_conf))
}
