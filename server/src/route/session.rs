use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use application::service::SessionService;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;

use self::request::{LoginRequest, TokenRequest, Transformer};
use self::response::Presenter;

mod request;
mod response;

pub trait SessionRouter {
    fn route_session(self) -> Self;
}

impl SessionRouter for Router<AppModule> {
    fn route_session(self) -> Self {
        self.route(
            "/sessions",
            post(
                |State(module): State<AppModule>, Json(req): Json<LoginRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(req)
                        .handle(|dto| async move { module.login(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/sessions/:token",
            get(
                |State(module): State<AppModule>, Path(token): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(TokenRequest::new(token))
                        .handle(|dto| async move { module.current_user(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule>, Path(token): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(TokenRequest::new(token))
                        .handle(|dto| async move { module.logout(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
