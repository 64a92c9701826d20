//! API request handlers for the Reservation Service

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Local, NaiveDateTime};
use reserve_common::{Account, Booking, BookingCreate, EnrichedBooking, Error, Restaurant};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    catalog::Catalog,
    favorites::FavoriteToggle,
    identity::IdentityRegistry,
    ledger::BookingLedger,
    notifications::{self, Notification},
    notifier::{self, Notifier},
};

/// Shared application state
///
/// Each mutable store sits behind its own lock, held for the whole
/// read-modify-write of a request. The catalog is read-only.
pub struct AppState {
    pub catalog: Catalog,
    pub identity: Mutex<IdentityRegistry>,
    pub ledger: Mutex<BookingLedger>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(catalog: Catalog, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            catalog,
            identity: Mutex::new(IdentityRegistry::new()),
            ledger: Mutex::new(BookingLedger::new()),
            notifier,
        }
    }

    fn notify(&self, notification: Option<Notification>) {
        if let Some(notification) = notification {
            notifier::dispatch(self.notifier.clone(), notification);
        }
    }
}

/// API Error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Any failure reported as 401
    fn unauthorized(err: Error) -> Self {
        ApiError {
            status: StatusCode::UNAUTHORIZED,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.message
        });

        (self.status, Json(body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::InvalidInput(_) | Error::DuplicateIdentifier(_) | Error::InvalidState(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidCredential => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
        };

        ApiError {
            status,
            message: err.to_string(),
        }
    }
}

/// Request to create an account
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub password: String,
}

/// Login with a phone or email
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// Email verification attempt
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub verified: bool,
}

#[derive(Debug, Deserialize)]
pub struct FavoriteToggleRequest {
    pub user_id: u64,
    pub restaurant_id: u64,
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: BTreeSet<u64>,
}

/// Query of a cancellation request
#[derive(Debug, Deserialize)]
pub struct CancelParams {
    pub user_id: u64,
}

#[derive(Debug, Serialize)]
pub struct CancelBookingResponse {
    pub message: String,
    pub deleted_booking: Booking,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "reservation-service"
    }))
}

/// Register a new account
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<Account>, ApiError> {
    info!("Registering account for {}", payload.name);

    let registration = state.identity.lock().await.register(
        &payload.name,
        payload.phone.as_deref(),
        payload.email.as_deref(),
        &payload.password,
    )?;

    if let Some(code) = &registration.verification_code {
        state.notify(notifications::welcome(&registration.account, code));
    }

    Ok(Json(registration.account))
}

/// Log in by phone or email
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Account>, ApiError> {
    let identity = state.identity.lock().await;
    let account = identity
        .authenticate(&payload.identifier, &payload.password)
        .map_err(|e| {
            warn!("Login failed: {}", e);
            ApiError::unauthorized(e)
        })?;

    info!("Account {} logged in", account.id);
    Ok(Json(account))
}

/// Confirm an email with the code sent at registration
pub async fn verify_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, ApiError> {
    state
        .identity
        .lock()
        .await
        .verify_email(&payload.email, &payload.code)?;

    Ok(Json(VerifyResponse { verified: true }))
}

/// List all restaurants
pub async fn list_restaurants_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Restaurant>> {
    Json(state.catalog.list().to_vec())
}

/// Get a restaurant by ID
pub async fn get_restaurant_handler(
    State(state): State<Arc<AppState>>,
    Path(restaurant_id): Path<u64>,
) -> Result<Json<Restaurant>, ApiError> {
    state
        .catalog
        .get(restaurant_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| Error::NotFound("Restaurant".to_string()).into())
}

/// Add or remove a restaurant from a user's favorites
pub async fn toggle_favorite_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<FavoriteToggleRequest>,
) -> Result<Json<FavoriteToggle>, ApiError> {
    let toggle = state
        .identity
        .lock()
        .await
        .toggle_favorite(payload.user_id, payload.restaurant_id)?;

    Ok(Json(toggle))
}

/// Get a user's favorites
pub async fn get_favorites_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<u64>,
) -> Result<Json<FavoritesResponse>, ApiError> {
    let identity = state.identity.lock().await;
    let favorites = identity.favorites(user_id)?.clone();

    Ok(Json(FavoritesResponse { favorites }))
}

/// Create a booking and send a confirmation
pub async fn create_booking_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BookingCreate>,
) -> Result<Json<Booking>, ApiError> {
    info!(
        "Creating booking for user {} at restaurant {}",
        payload.user_id, payload.restaurant_id
    );

    let owner = state.identity.lock().await.account(payload.user_id).cloned();
    let booking = state.ledger.lock().await.create(payload, &state.catalog)?;

    if let Some(owner) = owner {
        state.notify(notifications::booking_confirmed(&owner, &booking, &state.catalog));
    }

    Ok(Json(booking))
}

/// List all bookings
pub async fn list_bookings_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Booking>> {
    Json(state.ledger.lock().await.list().to_vec())
}

/// A user's booking history, newest first
pub async fn user_bookings_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<u64>,
) -> Json<Vec<EnrichedBooking>> {
    let history = state
        .ledger
        .lock()
        .await
        .list_for_user(user_id, &state.catalog, local_now());

    Json(history)
}

/// Cancel an upcoming booking
pub async fn cancel_booking_handler(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<u64>,
    Query(params): Query<CancelParams>,
) -> Result<Json<CancelBookingResponse>, ApiError> {
    info!("User {} cancelling booking {}", params.user_id, booking_id);

    let deleted_booking = state
        .ledger
        .lock()
        .await
        .cancel(booking_id, params.user_id, local_now())?;

    let owner = state.identity.lock().await.account(params.user_id).cloned();
    if let Some(owner) = owner {
        state.notify(notifications::booking_cancelled(
            &owner,
            &deleted_booking,
            &state.catalog,
        ));
    }

    Ok(Json(CancelBookingResponse {
        message: "Booking cancelled".to_string(),
        deleted_booking,
    }))
}
