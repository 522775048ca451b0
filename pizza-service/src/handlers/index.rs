use axum::{response::Html, routing::get, Router};

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

pub async fn index() -> Html<&'static str> {
    Html("<h1>Code challenge</h1>")
}
