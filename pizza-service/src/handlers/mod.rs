pub mod index;
pub mod pizza;
pub mod restaurant;
pub mod restaurant_pizza;

use axum::{response::Json, routing::get, Router};
use utoipa::OpenApi;

use crate::DbPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(index::router())
        .merge(restaurant::router())
        .merge(pizza::router())
        .merge(restaurant_pizza::router())
        .route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        restaurant::list_restaurants,
        restaurant::get_restaurant,
        restaurant::delete_restaurant,
        pizza::list_pizzas,
        restaurant_pizza::create_restaurant_pizza,
    ),
    components(
        schemas(
            crate::serializer::RestaurantSummary,
            crate::serializer::RestaurantDetails,
            crate::serializer::RestaurantPizzaWithPizza,
            crate::serializer::RestaurantPizzaDetails,
            crate::serializer::PizzaSummary,
            restaurant_pizza::CreateRestaurantPizzaRequest,
            crate::error::ApiErrorResponse,
            crate::error::ValidationErrorResponse
        )
    ),
    tags(
        (name = "restaurants", description = "Restaurant endpoints"),
        (name = "pizzas", description = "Pizza endpoints"),
        (name = "restaurant_pizzas", description = "Restaurant pizza offerings")
    ),
    info(
        title = "Pizza Restaurants API",
        description = "Restaurants, pizzas and the prices restaurants offer them at",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;
