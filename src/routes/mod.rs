//! HTTP handlers, one module per resource.
//!
//! Extractor rejections are taken as `Result` and turned into
//! [`crate::error::Error`] so every failure shares the JSON error body.

use axum::extract::{
    rejection::{JsonRejection, PathRejection, QueryRejection},
    Json, Path, Query,
};

use crate::dto::pagination::ListQuery;

pub mod application;
pub mod auth;
pub mod company;
pub mod docs;
pub mod health;
pub mod listing;
pub mod recipe;
pub mod recruiter;
pub mod seeker;

pub type JsonBody<T> = Result<Json<T>, JsonRejection>;
pub type IdPath = Result<Path<i64>, PathRejection>;
pub type ListParams = Result<Query<ListQuery>, QueryRejection>;
