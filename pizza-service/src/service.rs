use diesel::{
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
    SqliteConnection,
};
use tracing::debug;

use crate::{
    models::{self, NewRestaurantPizza, ValidationError},
    schema::{pizzas, restaurant_pizzas, restaurants},
    DbPool,
};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database error: {0}")]
    Database(#[from] DieselError),
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("migration failed: {0}")]
    Migration(String),
}

/// Runs `f` with a pooled connection on the blocking thread pool.
pub async fn interact<F, T>(pool: &DbPool, f: F) -> Result<T, ServiceError>
where
    F: FnOnce(&mut SqliteConnection) -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut conn = pool.get()?;
        f(&mut conn)
    })
    .await?
}

pub fn list_restaurants(
    conn: &mut SqliteConnection,
) -> Result<Vec<models::Restaurant>, ServiceError> {
    Ok(restaurants::table
        .order(restaurants::id)
        .select(models::Restaurant::as_select())
        .load(conn)?)
}

/// Loads a restaurant together with its offerings and the pizza of each.
pub fn get_restaurant(
    conn: &mut SqliteConnection,
    restaurant_id: i32,
) -> Result<(models::Restaurant, Vec<(models::RestaurantPizza, models::Pizza)>), ServiceError> {
    let restaurant = restaurants::table
        .find(restaurant_id)
        .select(models::Restaurant::as_select())
        .first(conn)
        .optional()?
        .ok_or(ServiceError::NotFound("Restaurant"))?;

    let offerings = models::RestaurantPizza::belonging_to(&restaurant)
        .inner_join(pizzas::table)
        .order(restaurant_pizzas::id)
        .select((
            models::RestaurantPizza::as_select(),
            models::Pizza::as_select(),
        ))
        .load(conn)?;

    Ok((restaurant, offerings))
}

/// Deletes a restaurant and every offering that references it.
pub fn delete_restaurant(
    conn: &mut SqliteConnection,
    restaurant_id: i32,
) -> Result<(), ServiceError> {
    conn.immediate_transaction(|conn| {
        let offerings = diesel::delete(
            restaurant_pizzas::table.filter(restaurant_pizzas::restaurant_id.eq(restaurant_id)),
        )
        .execute(conn)?;

        let deleted = diesel::delete(restaurants::table.find(restaurant_id)).execute(conn)?;
        if deleted == 0 {
            return Err(ServiceError::NotFound("Restaurant"));
        }

        debug!(restaurant_id, offerings, "deleted restaurant");
        Ok(())
    })
}

pub fn list_pizzas(conn: &mut SqliteConnection) -> Result<Vec<models::Pizza>, ServiceError> {
    Ok(pizzas::table
        .order(pizzas::id)
        .select(models::Pizza::as_select())
        .load(conn)?)
}

/// Inserts an offering together with the pizza and restaurant it points to.
///
/// Both references are resolved inside the same transaction as the insert,
/// so a caller never observes an offering without them. The write lock is
/// taken at `BEGIN`; upgrading a read lock under contention fails with
/// `SQLITE_BUSY` without waiting on the busy timeout.
pub fn create_restaurant_pizza(
    conn: &mut SqliteConnection,
    new_offering: &NewRestaurantPizza,
) -> Result<(models::RestaurantPizza, models::Pizza, models::Restaurant), ServiceError> {
    conn.immediate_transaction(|conn| {
        let pizza = pizzas::table
            .find(new_offering.pizza_id())
            .select(models::Pizza::as_select())
            .first(conn)
            .optional()?
            .ok_or(ValidationError::UnresolvedReference)?;

        let restaurant = restaurants::table
            .find(new_offering.restaurant_id())
            .select(models::Restaurant::as_select())
            .first(conn)
            .optional()?
            .ok_or(ValidationError::UnresolvedReference)?;

        let offering = diesel::insert_into(restaurant_pizzas::table)
            .values(new_offering)
            .returning(models::RestaurantPizza::as_returning())
            .get_result(conn)
            .map_err(constraint_violation)?;

        Ok((offering, pizza, restaurant))
    })
}

pub fn create_restaurant(
    conn: &mut SqliteConnection,
    new_restaurant: &models::NewRestaurant,
) -> Result<models::Restaurant, ServiceError> {
    Ok(diesel::insert_into(restaurants::table)
        .values(new_restaurant)
        .returning(models::Restaurant::as_returning())
        .get_result(conn)?)
}

pub fn create_pizza(
    conn: &mut SqliteConnection,
    new_pizza: &models::NewPizza,
) -> Result<models::Pizza, ServiceError> {
    Ok(diesel::insert_into(pizzas::table)
        .values(new_pizza)
        .returning(models::Pizza::as_returning())
        .get_result(conn)?)
}

fn constraint_violation(err: DieselError) -> ServiceError {
    match err {
        DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::CheckViolation
            | DatabaseErrorKind::NotNullViolation,
            info,
        ) => ValidationError::Constraint(info.message().to_string()).into(),
        other => other.into(),
    }
}
