#![allow(dead_code)] // OpenAPI doc stubs are only referenced by utoipa macros.

use crate::{
    error::ErrorResponse,
    models::password_reset::{ResetPasswordPayload, ResetPasswordResponse},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(reset_password_doc, reset_password_preflight_doc),
    components(schemas(ResetPasswordPayload, ResetPasswordResponse, ErrorResponse)),
    tags((name = "password-reset", description = "Self-service password reset"))
)]
pub struct ApiDoc;

#[utoipa::path(
    post,
    path = "/api/reset-password",
    tag = "password-reset",
    request_body = ResetPasswordPayload,
    responses(
        (status = 200, description = "Password replaced", body = ResetPasswordResponse),
        (status = 400, description = "Bad payload or update rejected upstream", body = ErrorResponse),
        (status = 401, description = "Caller outside the origin allow-list", body = ErrorResponse),
        (status = 404, description = "Email inconnu", body = ErrorResponse),
        (status = 500, description = "Server misconfigured or internal error", body = ErrorResponse)
    )
)]
fn reset_password_doc() {}

#[utoipa::path(
    options,
    path = "/api/reset-password",
    tag = "password-reset",
    responses((status = 200, description = "CORS preflight"))
)]
fn reset_password_preflight_doc() {}
