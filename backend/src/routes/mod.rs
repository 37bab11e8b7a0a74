//! Route definitions for the VendyX backend
//!
//! Paths are mounted at the root to preserve the original API contract
//! (`/sales`, `/products`, ...).

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Protected routes - product catalog
        .nest("/products", product_routes())
        // Protected routes - categories
        .nest("/categories", category_routes())
        // Protected routes - clients
        .nest("/clients", client_routes())
        // Protected routes - sale workflow
        .nest("/sales", sale_routes())
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
        // The only protected auth route
        .route(
            "/me",
            get(handlers::me).layer(middleware::from_fn(auth_middleware)),
        )
}

/// Product catalog routes (protected)
fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Category routes (protected)
fn category_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/:category_id",
            get(handlers::get_category).put(handlers::update_category),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Client routes (protected)
fn client_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_clients).post(handlers::create_client),
        )
        .route(
            "/:client_id",
            get(handlers::get_client)
                .put(handlers::update_client)
                .delete(handlers::delete_client),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Sale workflow routes (protected)
fn sale_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_sales).post(handlers::create_sale))
        .route("/report", get(handlers::sales_report))
        .route(
            "/:sale_id",
            get(handlers::get_sale).delete(handlers::delete_sale),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}
