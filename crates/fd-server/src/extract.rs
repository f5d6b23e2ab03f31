//! Body extractors that reject with the API error shape.
//!
//! Axum's own `Json` and `Multipart` rejections render as plain text. These
//! wrappers turn them into [`fd_core::Error::Validation`] so a malformed
//! body gets the same 400 `{error, code, request_id}` response as any other
//! bad request.

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Multipart, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::middleware::request_id::RequestId;

fn rejected(request_id: Option<RequestId>, message: String) -> AppError {
    let err = fd_core::Error::Validation(message);
    match request_id {
        Some(id) => id.reject(err),
        None => AppError::new(err),
    }
}

/// JSON body extractor; see the module docs.
#[derive(Debug, Clone, Copy)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let request_id = req.extensions().get::<RequestId>().cloned();
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejected(
                request_id,
                format!("invalid request body: {}", rejection.body_text()),
            )),
        }
    }
}

/// Multipart body extractor; see the module docs.
pub struct ApiMultipart(pub Multipart);

impl<S> FromRequest<S> for ApiMultipart
where
    S: Send + Sync,
    Multipart: FromRequest<S, Rejection = MultipartRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let request_id = req.extensions().get::<RequestId>().cloned();
        match Multipart::from_request(req, state).await {
            Ok(multipart) => Ok(Self(multipart)),
            Err(rejection) => Err(rejected(
                request_id,
                format!("invalid multipart body: {}", rejection.body_text()),
            )),
        }
    }
}
