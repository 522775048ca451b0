use serde::Serialize;
use utoipa::ToSchema;

use crate::models;

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct RestaurantSummary {
    /// Unique identifier for the restaurant
    pub id: i32,
    /// Name of the restaurant
    pub name: String,
    /// Address of the restaurant
    pub address: String,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct PizzaSummary {
    /// Unique identifier for the pizza
    pub id: i32,
    /// Name of the pizza
    pub name: String,
    /// Free-form ingredient list
    pub ingredients: String,
}

/// An offering as listed under its restaurant.
#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct RestaurantPizzaWithPizza {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    pub pizza: PizzaSummary,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct RestaurantDetails {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub restaurant_pizzas: Vec<RestaurantPizzaWithPizza>,
}

/// A newly created offering with both sides of the join resolved.
#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct RestaurantPizzaDetails {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    pub pizza: PizzaSummary,
    pub restaurant: RestaurantSummary,
}

impl From<models::Restaurant> for RestaurantSummary {
    fn from(r: models::Restaurant) -> Self {
        Self {
            id: r.id,
            name: r.name,
            address: r.address,
        }
    }
}

impl From<models::Pizza> for PizzaSummary {
    fn from(p: models::Pizza) -> Self {
        Self {
            id: p.id,
            name: p.name,
            ingredients: p.ingredients,
        }
    }
}

pub fn serialize_restaurant_details(
    restaurant: models::Restaurant,
    offerings: Vec<(models::RestaurantPizza, models::Pizza)>,
) -> RestaurantDetails {
    RestaurantDetails {
        id: restaurant.id,
        name: restaurant.name,
        address: restaurant.address,
        restaurant_pizzas: offerings
            .into_iter()
            .map(|(offering, pizza)| RestaurantPizzaWithPizza {
                id: offering.id,
                price: offering.price,
                pizza_id: offering.pizza_id,
                restaurant_id: offering.restaurant_id,
                pizza: pizza.into(),
            })
            .collect(),
    }
}

pub fn serialize_restaurant_pizza_details(
    offering: models::RestaurantPizza,
    pizza: models::Pizza,
    restaurant: models::Restaurant,
) -> RestaurantPizzaDetails {
    RestaurantPizzaDetails {
        id: offering.id,
        price: offering.price,
        pizza_id: offering.pizza_id,
        restaurant_id: offering.restaurant_id,
        pizza: pizza.into(),
        restaurant: restaurant.into(),
    }
}
