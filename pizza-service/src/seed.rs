use diesel::{prelude::*, SqliteConnection};
use tracing::info;

use crate::{
    models::{NewPizza, NewRestaurant, NewRestaurantPizza},
    schema::{pizzas, restaurant_pizzas, restaurants},
    service::{self, ServiceError},
};

const RESTAURANTS: &[(&str, &str)] = &[
    ("Karen's Pizza Shack", "address1"),
    ("Sanjay's Pizza", "address2"),
    ("Kiki's Pizza", "address3"),
];

const PIZZAS: &[(&str, &str)] = &[
    ("Emma", "Dough, Tomato Sauce, Cheese"),
    ("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni"),
    ("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard"),
];

/// (restaurant index, pizza index, price)
const OFFERINGS: &[(usize, usize, i64)] = &[(0, 0, 1), (1, 1, 4), (2, 2, 5)];

#[derive(Debug, Default, PartialEq)]
pub struct SeedSummary {
    pub restaurants: usize,
    pub pizzas: usize,
    pub restaurant_pizzas: usize,
}

/// Replaces all rows with a small sample data set.
pub fn seed(conn: &mut SqliteConnection) -> Result<SeedSummary, ServiceError> {
    conn.transaction(|conn| {
        diesel::delete(restaurant_pizzas::table).execute(conn)?;
        diesel::delete(restaurants::table).execute(conn)?;
        diesel::delete(pizzas::table).execute(conn)?;

        let restaurants = RESTAURANTS
            .iter()
            .map(|&(name, address)| {
                service::create_restaurant(conn, &NewRestaurant { name, address })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let pizzas = PIZZAS
            .iter()
            .map(|&(name, ingredients)| {
                service::create_pizza(conn, &NewPizza { name, ingredients })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut summary = SeedSummary {
            restaurants: restaurants.len(),
            pizzas: pizzas.len(),
            ..Default::default()
        };

        for &(restaurant, pizza, price) in OFFERINGS {
            let offering =
                NewRestaurantPizza::new(price, pizzas[pizza].id, restaurants[restaurant].id)?;
            service::create_restaurant_pizza(conn, &offering)?;
            summary.restaurant_pizzas += 1;
        }

        info!(?summary, "seeded database");
        Ok(summary)
    })
}
