use std::ops::RangeInclusive;

use diesel::prelude::*;

use crate::schema::{pizzas, restaurant_pizzas, restaurants};

pub const PRICE_RANGE: RangeInclusive<i64> = 1..=30;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Price must be between 1 and 30, got {0}")]
    PriceOutOfRange(i64),
    #[error("Pizza or restaurant does not exist")]
    UnresolvedReference,
    #[error("Constraint violated: {0}")]
    Constraint(String),
}

/// Checks an offering price against [`PRICE_RANGE`].
pub fn validate_price(value: i64) -> Result<i32, ValidationError> {
    if !PRICE_RANGE.contains(&value) {
        return Err(ValidationError::PriceOutOfRange(value));
    }
    i32::try_from(value).map_err(|_| ValidationError::PriceOutOfRange(value))
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurant<'a> {
    pub name: &'a str,
    pub address: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = pizzas)]
pub struct Pizza {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = pizzas)]
pub struct NewPizza<'a> {
    pub name: &'a str,
    pub ingredients: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Restaurant))]
#[diesel(belongs_to(Pizza))]
#[diesel(table_name = restaurant_pizzas)]
pub struct RestaurantPizza {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
}

/// An offering that has passed price validation and is ready to insert.
///
/// Fields are private so the only way to obtain one is through
/// [`NewRestaurantPizza::new`].
#[derive(Insertable, Debug, Clone, Copy, PartialEq)]
#[diesel(table_name = restaurant_pizzas)]
pub struct NewRestaurantPizza {
    price: i32,
    pizza_id: i32,
    restaurant_id: i32,
}

impl NewRestaurantPizza {
    pub fn new(price: i64, pizza_id: i32, restaurant_id: i32) -> Result<Self, ValidationError> {
        Ok(Self {
            price: validate_price(price)?,
            pizza_id,
            restaurant_id,
        })
    }

    pub fn price(&self) -> i32 {
        self.price
    }

    pub fn pizza_id(&self) -> i32 {
        self.pizza_id
    }

    pub fn restaurant_id(&self) -> i32 {
        self.restaurant_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_price_bounds() {
        assert_eq!(validate_price(1), Ok(1));
        assert_eq!(validate_price(30), Ok(30));
        assert_eq!(validate_price(12), Ok(12));
    }

    #[test]
    fn test_validate_price_out_of_range() {
        assert_eq!(validate_price(0), Err(ValidationError::PriceOutOfRange(0)));
        assert_eq!(validate_price(31), Err(ValidationError::PriceOutOfRange(31)));
        assert_eq!(validate_price(-5), Err(ValidationError::PriceOutOfRange(-5)));
        assert_eq!(
            validate_price(i64::MAX),
            Err(ValidationError::PriceOutOfRange(i64::MAX))
        );
    }

    #[test]
    fn test_new_restaurant_pizza_rejects_invalid_price() {
        assert!(NewRestaurantPizza::new(0, 1, 1).is_err());

        let offering = NewRestaurantPizza::new(12, 3, 4).unwrap();
        assert_eq!(offering.price(), 12);
        assert_eq!(offering.pizza_id(), 3);
        assert_eq!(offering.restaurant_id(), 4);
    }
}
