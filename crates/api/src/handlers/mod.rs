pub mod auth;
pub mod health;
pub mod home;
pub mod person;
pub mod phone;
pub mod report;
pub mod resume;

use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, FromRequestParts, Multipart, Path, Query, Request};
use axum::http::request::Parts;
use axum::Form;
use cadastro_core::types::DbId;
use serde::de::DeserializeOwned;

use crate::error::AppError;

// Wrappers over axum's extractors whose rejections render as JSON `AppError`s.

/// Single numeric id path segment; a non-numeric id is a 400 JSON error.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub DbId);

impl<S: Send + Sync> FromRequestParts<S> for IdPath {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::rejection(e.status(), e.body_text()))?;
        Ok(IdPath(id))
    }
}

/// Query string parameters.
#[derive(Debug, Clone)]
pub struct AppQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::rejection(e.status(), e.body_text()))?;
        Ok(AppQuery(value))
    }
}

/// `application/x-www-form-urlencoded` body.
#[derive(Debug, Clone)]
pub struct AppForm<T>(pub T);

impl<T, S> FromRequest<S> for AppForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::rejection(e.status(), e.body_text()))?;
        Ok(AppForm(value))
    }
}

/// `multipart/form-data` body.
pub struct AppMultipart(pub Multipart);

impl<S: Send + Sync> FromRequest<S> for AppMultipart {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::rejection(e.status(), e.body_text()))?;
        Ok(AppMultipart(multipart))
    }
}

/// An error while reading a multipart field; exceeding the body limit is 413.
pub(crate) fn multipart_error(e: MultipartError) -> AppError {
    AppError::rejection(e.status(), e.body_text())
}

/// Quote a filename for a `Content-Disposition` header.
pub(crate) fn attachment_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("attachment; filename=\"{safe}\"")
}
