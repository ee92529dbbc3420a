//! API service routes

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use parking::models::{LoginCredentials, NewUser, UpdateUser};
use parking::reports::{SpaceFilter, parse_report_date};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    models::{
        ChangePasswordRequest, DateRangeQuery, EmailRequest, ExtendRequest, FineIssuedResponse,
        FineResponse, InspectionRequest, InspectionResponse, MenuResponse, RentRequest,
        RentResponse, RentalResponse, SettingsPayload, SpaceRequest, SpaceResponse, SpacesQuery,
        TemporaryPasswordRequest, UserResponse, VehiclePayload,
    },
    state::AppState,
};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/spaces", get(list_spaces))
        .route("/spaces/:id", put(upsert_space))
        .route("/settings", get(get_settings).put(update_settings))
        .route("/sweep", post(run_sweep))
        .route("/reports/income", get(income_report))
        .route("/reports/fines", get(fines_report))
        .route("/reports/spaces", get(spaces_report));

    Router::new()
        .route("/health", get(health_check))
        .route("/users", post(register))
        .route("/auth/login", post(login))
        .route("/auth/temporary-password", post(temporary_password))
        .route("/auth/reminder", post(password_reminder))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/:id/password", post(change_password))
        .route("/users/:id/vehicles", post(add_vehicle))
        .route("/users/:id/vehicles/:plate", delete(remove_vehicle))
        .route("/users/:id/menu", get(user_menu))
        .route("/users/:id/history", get(user_history))
        .route("/spaces/available", get(available_spaces))
        .route("/spaces/:id/status", get(space_status))
        .route("/rentals", post(rent))
        .route("/rentals/:id/extend", post(extend))
        .route("/rentals/:id/release", post(release))
        .route("/inspections", post(inspect))
        .nest("/admin", admin_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let writable = state.run(|p| p.health_check()).await?;

    Ok(Json(json!({
        "status": if writable { "ok" } else { "degraded" },
        "service": "parking-api"
    })))
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> ApiResult<impl IntoResponse> {
    let user = state.run(|p| p.accounts().register(payload)).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginCredentials>,
) -> ApiResult<impl IntoResponse> {
    info!("Login attempt for user: {}", payload.identification);
    let user = state.run(|p| p.accounts().authenticate(&payload)).await?;

    Ok(Json(UserResponse::from(user)))
}

/// Set and mail a temporary password
pub async fn temporary_password(
    State(state): State<AppState>,
    Json(payload): Json<TemporaryPasswordRequest>,
) -> ApiResult<impl IntoResponse> {
    let notified = state
        .run(|p| {
            p.accounts()
                .set_temporary_password(&payload.email, &payload.password)
        })
        .await?;

    Ok(Json(json!({ "notified": notified })))
}

/// Mail password recovery instructions
pub async fn password_reminder(
    State(state): State<AppState>,
    Json(payload): Json<EmailRequest>,
) -> ApiResult<impl IntoResponse> {
    let notified = state
        .run(|p| p.accounts().password_reminder(&payload.email))
        .await?;

    Ok(Json(json!({ "notified": notified })))
}

/// Get a user by identification
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let user = state.run(|p| p.accounts().find(&id)).await?;

    Ok(Json(UserResponse::from(user)))
}

/// Update a user's profile
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUser>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .run(|p| p.accounts().update_profile(&id, payload))
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Delete a user
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.run(|p| p.accounts().delete(&id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Change a user's password
pub async fn change_password(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ChangePasswordRequest>,
) -> ApiResult<impl IntoResponse> {
    state
        .run(|p| {
            p.accounts()
                .change_password(&id, &payload.current_password, &payload.new_password)
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Register a vehicle for a user
pub async fn add_vehicle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<VehiclePayload>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .run(|p| p.accounts().add_vehicle(&id, payload.into()))
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Remove a vehicle from a user
pub async fn remove_vehicle(
    State(state): State<AppState>,
    Path((id, plate)): Path<(String, String)>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .run(|p| p.accounts().remove_vehicle(&id, &plate))
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Sweep expired rentals, then show the user's rental and the free spaces
pub async fn user_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let menu = state
        .run(|p| {
            let user = p.accounts().find(&id)?;
            let fines_issued = p.lifecycle().sweep()?;
            let active_rental = p.lifecycle().active_rental_for(&user.email)?;
            let available_spaces = p.lifecycle().list_available_spaces()?;

            Ok(MenuResponse {
                active_rental: active_rental.map(Into::into),
                available_spaces,
                fines_issued: fines_issued.into_iter().map(Into::into).collect(),
            })
        })
        .await?;

    Ok(Json(menu))
}

/// Every rental of a user, newest first
pub async fn user_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let history = state
        .run(|p| {
            let user = p.accounts().find(&id)?;
            p.reports().user_history(&user.email)
        })
        .await?;

    Ok(Json(
        history
            .into_iter()
            .map(RentalResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// Ids of the spaces that can be rented now
pub async fn available_spaces(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let spaces = state
        .run(|p| p.lifecycle().list_available_spaces())
        .await?;

    Ok(Json(spaces))
}

/// Whether one space can be rented now
pub async fn space_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let status = state.run(|p| p.lifecycle().space_status(&id)).await?;

    Ok(Json(json!({ "id": id, "status": status })))
}

/// Rent a space
pub async fn rent(
    State(state): State<AppState>,
    Json(payload): Json<RentRequest>,
) -> ApiResult<impl IntoResponse> {
    let rental_id = state
        .run(|p| {
            p.lifecycle().rent(
                &payload.user,
                &payload.space_id,
                payload.minutes,
                &payload.plate,
            )
        })
        .await?;

    Ok((StatusCode::CREATED, Json(RentResponse { rental_id })))
}

/// Add time to a rental
pub async fn extend(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ExtendRequest>,
) -> ApiResult<impl IntoResponse> {
    state
        .run(|p| p.lifecycle().extend(id, payload.minutes))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Release a rental
pub async fn release(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    state.run(|p| p.lifecycle().release(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Inspector check of a space
pub async fn inspect(
    State(state): State<AppState>,
    Json(payload): Json<InspectionRequest>,
) -> ApiResult<impl IntoResponse> {
    let outcome = state
        .run(|p| p.inspector().inspect(&payload.space_id, &payload.plate))
        .await?;

    Ok(Json(InspectionResponse::from(outcome)))
}

/// Every space, enabled or not
pub async fn list_spaces(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let spaces = state.run(|p| p.admin().list_spaces()).await?;

    Ok(Json(
        spaces
            .into_iter()
            .map(|(id, space)| SpaceResponse::new(id, space))
            .collect::<Vec<_>>(),
    ))
}

/// Create a space or toggle whether it is enabled
pub async fn upsert_space(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<SpaceRequest>,
) -> ApiResult<impl IntoResponse> {
    let (id, space) = state
        .run(|p| p.admin().upsert_space(&id, payload.enabled))
        .await?;

    Ok(Json(SpaceResponse::new(id, space)))
}

/// Current settings
pub async fn get_settings(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let settings = state.run(|p| p.admin().settings()).await?;

    Ok(Json(SettingsPayload::from(settings)))
}

/// Validate and save settings
pub async fn update_settings(
    State(state): State<AppState>,
    Json(payload): Json<SettingsPayload>,
) -> ApiResult<impl IntoResponse> {
    let settings = state
        .run(|p| p.admin().update_settings(payload.into()))
        .await?;

    Ok(Json(SettingsPayload::from(settings)))
}

/// Run the expiry sweep now
pub async fn run_sweep(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let issued = state.run(|p| p.lifecycle().sweep()).await?;

    Ok(Json(
        issued
            .into_iter()
            .map(FineIssuedResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// Rental income per day
pub async fn income_report(
    State(state): State<AppState>,
    Query(range): Query<DateRangeQuery>,
) -> ApiResult<impl IntoResponse> {
    let from = parse_report_date(&range.from)?;
    let to = parse_report_date(&range.to)?;
    let report = state
        .run(|p| p.reports().income_by_day(from, to))
        .await?;

    Ok(Json(report))
}

/// Fines issued in a date range
pub async fn fines_report(
    State(state): State<AppState>,
    Query(range): Query<DateRangeQuery>,
) -> ApiResult<impl IntoResponse> {
    let from = parse_report_date(&range.from)?;
    let to = parse_report_date(&range.to)?;
    let fines = state
        .run(|p| p.reports().fines_between(from, to))
        .await?;

    Ok(Json(
        fines
            .into_iter()
            .map(FineResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// Spaces listing by occupancy
pub async fn spaces_report(
    State(state): State<AppState>,
    Query(query): Query<SpacesQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter: SpaceFilter = query
        .filter
        .parse()
        .map_err(|e: parking::ParkingError| ApiError::BadRequest(e.to_string()))?;
    let lines = state
        .run(|p| p.reports().spaces_listing(filter, p.clock().now()))
        .await?;

    Ok(Json(lines))
}
