use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use error_stack::Report;
use uuid::Uuid;

use application::service::{
    CreateBookService, DeleteBookService, GetBookService, GetBorrowedBookService,
    UpdateBookService,
};
use kernel::KernelError;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::auth::Admin;

use self::request::{
    BookFilter, CreateRequest, DeleteRequest, GetAllRequest, GetRequest, Transformer,
    UpdateRequest,
};
pub(super) use self::response::{BookResponse, Presenter};
use self::response::CreatedPresenter;

mod request;
mod response;

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl BookRouter for Router<AppModule> {
    fn route_book(self) -> Self {
        self.route(
            "/books",
            get(
                |State(module): State<AppModule>, Query(req): Query<GetAllRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|filter| async move {
                            match filter {
                                BookFilter::All => module.get_books().await,
                                BookFilter::Search(dto) => module.search_books(dto).await,
                                BookFilter::Title(dto) => module.search_books_by_title(dto).await,
                                BookFilter::Author(dto) => module.search_books_by_author(dto).await,
                                BookFilter::Category(dto) => {
                                    module.get_books_by_category(dto).await
                                }
                                BookFilter::Borrower(dto) => {
                                    module.get_books_by_borrower(dto).await
                                }
                                BookFilter::Available(true) => module.get_available_books().await,
                                BookFilter::Available(false) => {
                                    module.get_unavailable_books().await
                                }
                            }
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .post(
                |State(module): State<AppModule>,
                 _: Admin,
                 Json(req): Json<CreateRequest>| async move {
                    Controller::new(Transformer, CreatedPresenter)
                        .intake(req)
                        .handle(|dto| async move { module.create_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(GetRequest::new(id))
                        .handle(|dto| async move {
                            module.get_book(dto).await?.ok_or_else(|| {
                                Report::new(KernelError::NotFound)
                                    .attach_printable(format!("No book with id {id}"))
                            })
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .patch(
                |State(module): State<AppModule>,
                 _: Admin,
                 Path(id): Path<Uuid>,
                 Json(req): Json<UpdateRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.update_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule>, _: Admin, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(DeleteRequest::new(id))
                        .handle(|dto| async move { module.delete_book(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
