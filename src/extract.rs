use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::{error::AppError, services::todo_service::TODO_NOT_FOUND};

/// JSON body whose rejections (bad syntax, wrong types, wrong content type)
/// are reported as 400 with the decoder's message.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection_to_error(rejection)),
        }
    }
}

fn json_rejection_to_error(rejection: JsonRejection) -> AppError {
    AppError::bad_request(rejection.body_text())
}

/// Integer id from the `{id}` path segment. Anything else does not name a todo.
#[derive(Debug, Clone, Copy)]
pub struct TodoId(pub i64);

impl<S> FromRequestParts<S> for TodoId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found(TODO_NOT_FOUND))?;
        raw.parse::<i64>()
            .map(Self)
            .map_err(|_| AppError::not_found(TODO_NOT_FOUND))
    }
}
