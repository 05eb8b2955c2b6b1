//! Sweet Shop API routes
//!
//! Three layers of routing: public (health, register, login), token-gated
//! (browse, search, purchase), and admin-gated (create, update, delete,
//! restock). Gating is applied with route layers so no handler has to
//! re-check credentials.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    error::ApiError,
    middleware::{auth_middleware, require_admin},
    models::{
        AuthResponse, LoginRequest, NewSweet, NewUser, RegisterRequest, RestockRequest, Role,
        SweetPatch, SweetSearch, UserResponse,
    },
    state::AppState,
    validation,
};

/// Create the router for the Sweet Shop service
pub fn create_router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route("/api/sweets", get(list_sweets))
        .route("/api/sweets/search", get(search_sweets))
        .route("/api/sweets/:id", get(get_sweet))
        .route("/api/sweets/:id/purchase", post(purchase_sweet));

    let admin_routes = Router::new()
        .route("/api/sweets", post(create_sweet))
        .route("/api/sweets/:id", put(update_sweet).delete(delete_sweet))
        .route("/api/sweets/:id/restock", post(restock_sweet))
        .route_layer(middleware::from_fn(require_admin));

    let protected_routes = user_routes.merge(admin_routes).route_layer(
        middleware::from_fn_with_state(state.clone(), auth_middleware),
    );

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_ok = common::database::health_check(&state.db_pool)
        .await
        .unwrap_or(false);

    Json(json!({
        "status": if db_ok { "OK" } else { "DEGRADED" },
        "message": "Server is running"
    }))
}

/// Register a new user and issue a token
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let errors = validation::validate_registration(&payload);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let new_user = NewUser {
        name: payload.name,
        email: payload.email,
        password: payload.password,
        role: payload.role.unwrap_or(Role::User),
    };

    let user = state
        .user_repository
        .create(&new_user)
        .await
        .map_err(|e| {
            error!("Failed to register user: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::Conflict("User already exists with this email".to_string()))?;

    let token = state.jwt_service.issue(&user).map_err(|e| {
        error!("Failed to issue token: {}", e);
        ApiError::Internal
    })?;

    info!("Registered user {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserResponse::from(user),
        }),
    ))
}

/// Verify credentials and issue a token
///
/// Unknown email and wrong password produce the identical response so
/// accounts cannot be enumerated.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let invalid = || ApiError::Auth("Invalid credentials".to_string());

    let user = state
        .user_repository
        .find_by_email(&payload.email)
        .await
        .map_err(|e| {
            error!("Failed to look up user: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(invalid)?;

    let verified = state
        .user_repository
        .verify_password(&user, &payload.password)
        .map_err(|e| {
            error!("Failed to verify password: {}", e);
            ApiError::Internal
        })?;

    if !verified {
        return Err(invalid());
    }

    let token = state.jwt_service.issue(&user).map_err(|e| {
        error!("Failed to issue token: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(user),
    }))
}

/// Create a new sweet (admin only)
pub async fn create_sweet(
    State(state): State<AppState>,
    Json(payload): Json<NewSweet>,
) -> Result<impl IntoResponse, ApiError> {
    let errors = validation::validate_new_sweet(&payload);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let sweet = state.sweet_repository.create(&payload).await.map_err(|e| {
        error!("Failed to create sweet: {}", e);
        ApiError::Internal
    })?;

    Ok((StatusCode::CREATED, Json(sweet)))
}

/// Get all sweets, newest first
pub async fn list_sweets(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let sweets = state.sweet_repository.list().await.map_err(|e| {
        error!("Failed to list sweets: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(sweets))
}

/// Search sweets by name, category, or price range
pub async fn search_sweets(
    State(state): State<AppState>,
    Query(query): Query<SweetSearch>,
) -> Result<impl IntoResponse, ApiError> {
    let errors = validation::validate_search(&query);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let sweets = state.sweet_repository.search(&query).await.map_err(|e| {
        error!("Failed to search sweets: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(sweets))
}

/// Get a single sweet
pub async fn get_sweet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let sweet = state
        .sweet_repository
        .find_by_id(id)
        .await
        .map_err(|e| {
            error!("Failed to get sweet: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("Sweet not found".to_string()))?;

    Ok(Json(sweet))
}

/// Update any subset of a sweet's fields (admin only)
pub async fn update_sweet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SweetPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let errors = validation::validate_sweet_patch(&payload);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let sweet = state
        .sweet_repository
        .update(id, &payload)
        .await
        .map_err(|e| {
            error!("Failed to update sweet: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("Sweet not found".to_string()))?;

    Ok(Json(sweet))
}

/// Delete a sweet (admin only)
pub async fn delete_sweet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state.sweet_repository.delete(id).await.map_err(|e| {
        error!("Failed to delete sweet: {}", e);
        ApiError::Internal
    })?;

    if !deleted {
        return Err(ApiError::NotFound("Sweet not found".to_string()));
    }

    Ok(Json(json!({ "message": "Sweet deleted successfully" })))
}

/// Purchase one unit of a sweet
///
/// The decrement is a single conditional UPDATE in the repository; a miss
/// is disambiguated here into 404 (unknown id) or 400 (out of stock).
pub async fn purchase_sweet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let purchased = state.sweet_repository.purchase(id).await.map_err(|e| {
        error!("Failed to purchase sweet: {}", e);
        ApiError::Internal
    })?;

    match purchased {
        Some(sweet) => Ok(Json(json!({
            "message": "Purchase successful",
            "sweet": sweet
        }))),
        None => {
            let exists = state
                .sweet_repository
                .find_by_id(id)
                .await
                .map_err(|e| {
                    error!("Failed to check sweet after purchase miss: {}", e);
                    ApiError::Internal
                })?
                .is_some();

            if exists {
                Err(ApiError::Conflict("Sweet is out of stock".to_string()))
            } else {
                Err(ApiError::NotFound("Sweet not found".to_string()))
            }
        }
    }
}

/// Restock a sweet by a positive amount (admin only)
pub async fn restock_sweet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RestockRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let errors = validation::validate_restock(payload.quantity);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let sweet = state
        .sweet_repository
        .restock(id, payload.quantity)
        .await
        .map_err(|e| {
            error!("Failed to restock sweet: {}", e);
            ApiError::Internal
        })?
        .ok_or_else(|| ApiError::NotFound("Sweet not found".to_string()))?;

    Ok(Json(json!({
        "message": "Restock successful",
        "sweet": sweet
    })))
}
