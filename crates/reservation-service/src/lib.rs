//! Reservation Service
//!
//! Restaurant table reservations: account registration with dual phone/email
//! identity, restaurant catalog, favorites, and the booking lifecycle with
//! pre-order pricing and time-gated cancellation.

pub mod catalog;
pub mod config;
pub mod favorites;
pub mod handlers;
pub mod identity;
pub mod ledger;
pub mod notifications;
pub mod notifier;
pub mod schedule;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use catalog::Catalog;
pub use config::Config;
pub use handlers::AppState;
pub use notifier::{LogNotifier, Notifier, WebhookNotifier};

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    Router::new()
        .route("/health", get(handlers::health_handler))
        // Identity
        .route("/register", post(handlers::register_handler))
        .route("/login", post(handlers::login_handler))
        .route("/verify", post(handlers::verify_handler))
        // Catalog
        .route("/restaurants", get(handlers::list_restaurants_handler))
        .route("/restaurants/{id}", get(handlers::get_restaurant_handler))
        // Favorites
        .route("/favorites/toggle", post(handlers::toggle_favorite_handler))
        .route("/favorites/{user_id}", get(handlers::get_favorites_handler))
        // Bookings
        .route(
            "/bookings",
            get(handlers::list_bookings_handler).post(handlers::create_booking_handler),
        )
        .route("/bookings/user/{user_id}", get(handlers::user_bookings_handler))
        .route("/bookings/{id}", delete(handlers::cancel_booking_handler))
        .with_state(shared_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
