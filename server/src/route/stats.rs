use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use application::service::StatsService;
use application::transfer::StatsDto;

use crate::controller::{Controller, Exhaust};
use crate::error::ErrorStatus;
use crate::handler::AppModule;

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    total_books: usize,
    available_books: usize,
    borrowed_books: usize,
    total_users: usize,
}

pub struct Presenter;

impl Exhaust<StatsDto> for Presenter {
    type To = Json<StatsResponse>;
    fn emit(&self, input: StatsDto) -> Self::To {
        Json(StatsResponse {
            total_books: input.total_books,
            available_books: input.available_books,
            borrowed_books: input.borrowed_books,
            total_users: input.total_users,
        })
    }
}

pub trait StatsRouter {
    fn route_stats(self) -> Self;
}

impl StatsRouter for Router<AppModule> {
    fn route_stats(self) -> Self {
        self.route(
            "/stats",
            get(|State(module): State<AppModule>| async move {
                Controller::new((), Presenter)
                    .bypass(|| async move { module.get_stats().await })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
    }
}
