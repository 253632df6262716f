use axum::{routing::get, Router};

use crate::api::handlers::summary;
use crate::api::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/summary/comparison", get(summary::comparison))
        .route("/summary/evolution", get(summary::evolution))
        .route("/summary/evolution/export", get(summary::export_evolution))
        .route("/summary/countries", get(summary::countries))
}
