use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::error::{ApiError, ValidationErrorResponse};
use crate::models::{NewRestaurantPizza, ValidationError};
use crate::serializer::{serialize_restaurant_pizza_details, RestaurantPizzaDetails};
use crate::service;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    /// Price between 1 and 30
    pub price: Option<i64>,
    /// Pizza being offered
    pub pizza_id: Option<i32>,
    /// Restaurant offering the pizza
    pub restaurant_id: Option<i32>,
}

impl CreateRestaurantPizzaRequest {
    /// Checks presence first, then the price range. An id of 0 never names a
    /// row and counts as missing; a price of 0 is present and out of range.
    pub fn validate(self) -> Result<NewRestaurantPizza, ValidationError> {
        let pizza_id = self.pizza_id.filter(|id| *id != 0);
        let restaurant_id = self.restaurant_id.filter(|id| *id != 0);
        match (self.price, pizza_id, restaurant_id) {
            (Some(price), Some(pizza_id), Some(restaurant_id)) => {
                NewRestaurantPizza::new(price, pizza_id, restaurant_id)
            }
            _ => Err(ValidationError::MissingFields),
        }
    }
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Offering created", body = RestaurantPizzaDetails),
        (status = 400, description = "Validation failed", body = ValidationErrorResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    payload: Result<Json<CreateRestaurantPizzaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantPizzaDetails>), ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!(reason = %rejection.body_text(), "rejected request body");
        ApiError::invalid_payload()
    })?;

    let new_offering = payload.validate()?;

    let (offering, pizza, restaurant) = service::interact(&state.pool, move |conn| {
        service::create_restaurant_pizza(conn, &new_offering)
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(serialize_restaurant_pizza_details(offering, pizza, restaurant)),
    ))
}
