use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handler::AppModule;

pub use self::{
    book::BookRouter, rent::RentRouter, session::SessionRouter, stats::StatsRouter,
    user::UserRouter,
};

mod auth;
mod book;
mod rent;
mod session;
mod stats;
mod user;

pub fn app_router(app: AppModule) -> Router {
    Router::new()
        .route_book()
        .route_rent()
        .route_user()
        .route_session()
        .route_stats()
        .layer(TraceLayer::new_for_http())
        // TODO: allow the frontend origin once its host is configurable.
        .layer(CorsLayer::new())
        .with_state(app)
}
