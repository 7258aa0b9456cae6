use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use error_stack::Report;
use uuid::Uuid;

use application::service::{GetBorrowedBookService, GetUserService, UpdateUserService};
use kernel::KernelError;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::auth::{Admin, Authenticated};
use crate::route::book::Presenter as BookPresenter;

use self::request::{GetBooksRequest, Transformer, UpdateRequest};
pub(super) use self::response::{Presenter, UserResponse};

mod request;
mod response;

pub trait UserRouter {
    fn route_user(self) -> Self;
}

impl UserRouter for Router<AppModule> {
    fn route_user(self) -> Self {
        self.route(
            "/users",
            get(|State(module): State<AppModule>, _: Admin| async move {
                Controller::new((), Presenter)
                    .bypass(|| async move { module.get_users().await })
                    .await
                    .map_err(ErrorStatus::from)
            }),
        )
        .route(
            "/users/:id",
            get(
                |State(module): State<AppModule>,
                 caller: Authenticated,
                 Path(id): Path<Uuid>| async move {
                    caller.ensure_self_or_admin(id)?;
                    Controller::new((), Presenter)
                        .bypass(|| async move {
                            module.get_user(id).await?.ok_or_else(|| {
                                Report::new(KernelError::NotFound)
                                    .attach_printable(format!("No user with id {id}"))
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
                        .handle(|dto| async move { module.update_user(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/users/:id/books",
            get(
                |State(module): State<AppModule>,
                 caller: Authenticated,
                 Path(id): Path<Uuid>| async move {
                    caller.ensure_self_or_admin(id)?;
                    Controller::new(Transformer, BookPresenter)
                        .intake(GetBooksRequest::new(id))
                        .handle(|dto| async move { module.get_books_by_borrower(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
