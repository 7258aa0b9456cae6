use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::Router;
use uuid::Uuid;

use application::service::{GetBorrowedBookService, RentService};

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::auth::{Admin, Authenticated};
use crate::route::book::Presenter as BookPresenter;

use self::request::{BorrowRequest, Transformer};
use self::response::Presenter;

mod request;
mod response;

pub trait RentRouter {
    fn route_rent(self) -> Self;
}

impl RentRouter for Router<AppModule> {
    fn route_rent(self) -> Self {
        self.route(
            "/books/:id/borrow",
            post(
                |State(module): State<AppModule>,
                 Authenticated(user): Authenticated,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, BookPresenter)
                        .intake(BorrowRequest::new(id, user.id))
                        .handle(|dto| async move { module.borrow_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/:id/return",
            post(
                |State(module): State<AppModule>,
                 Authenticated(user): Authenticated,
                 Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, BookPresenter)
                        .intake(BorrowRequest::new(id, user.id))
                        .handle(|dto| async move { module.return_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/borrowed",
            get(|State(module): State<AppModule>, _: Admin| async move {
                Controller::new((), Presenter)
                    .bypass(|| async move { module.get_borrowed_books().await })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
    }
}
