use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tracing::instrument;

use crate::error::{ApiError, ApiErrorResponse};
use crate::serializer::{serialize_restaurant_details, RestaurantDetails, RestaurantSummary};
use crate::service;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route(
            "/restaurants/{id}",
            get(get_restaurant).delete(delete_restaurant),
        )
}

/// Non-numeric ids can never match a row, so they are reported as missing.
fn restaurant_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::restaurant_not_found())
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "List of restaurants", body = Vec<RestaurantSummary>),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantSummary>>, ApiError> {
    let restaurants = service::interact(&state.pool, service::list_restaurants).await?;

    Ok(Json(
        restaurants.into_iter().map(RestaurantSummary::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    responses(
        (status = 200, description = "Restaurant with its pizza offerings", body = RestaurantDetails),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<RestaurantDetails>, ApiError> {
    let id = restaurant_id(path)?;

    let (restaurant, offerings) =
        service::interact(&state.pool, move |conn| service::get_restaurant(conn, id)).await?;

    Ok(Json(serialize_restaurant_details(restaurant, offerings)))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    responses(
        (status = 204, description = "Restaurant and its offerings deleted"),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = restaurant_id(path)?;

    service::interact(&state.pool, move |conn| service::delete_restaurant(conn, id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
