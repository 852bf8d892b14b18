//! [`IntoResponses`] wrappers for Pokedex REST API endpoints.
//!
//! These helper types are used to document the possible API responses using [`utoipa::path`].

use utoipa::IntoResponses;

use crate::api::errors::ErrorResponse;

/// [`IntoResponses`] wrapper for bad `id` path parameter errors.
///
/// Can be used to document 400 API error responses using [`utoipa::path`].
#[derive(Debug, IntoResponses)]
#[response(status = BAD_REQUEST, description = "Invalid value for id path parameter")]
pub struct InvalidIdParamResponse;

/// [`IntoResponses`] wrapper for malformed request body errors.
///
/// Can be used to document 400 API error responses using [`utoipa::path`].
#[derive(Debug, IntoResponses)]
#[response(
    status = BAD_REQUEST,
    description = "Invalid value for id path parameter OR malformed JSON in request body",
)]
pub struct MalformedBodyResponse;

/// [`IntoResponses`] wrapper for field validation errors.
///
/// Can be used to document 422 API error responses using [`utoipa::path`].
#[derive(Debug, IntoResponses)]
#[response(
    status = UNPROCESSABLE_ENTITY,
    description = "Invalid field values in request body; see `field_errors`",
)]
pub struct InvalidFieldsResponse(#[to_response] ErrorResponse);

/// [`IntoResponses`] wrapper for `entity not found` errors.
///
/// Can be used to document 404 API error responses using [`utoipa::path`].
#[derive(Debug, IntoResponses)]
#[response(status = NOT_FOUND, description = "Requested entity not found in database")]
pub struct IdNotFoundResponse;

/// [`IntoResponses`] wrapper for missing or invalid bearer token errors.
///
/// Can be used to document 401 API error responses using [`utoipa::path`].
#[derive(Debug, IntoResponses)]
#[response(status = UNAUTHORIZED, description = "Missing, invalid or expired bearer token")]
pub struct UnauthenticatedResponse;

/// [`IntoResponses`] wrapper for insufficient token scope errors.
///
/// Can be used to document 403 API error responses using [`utoipa::path`].
#[derive(Debug, IntoResponses)]
#[response(status = FORBIDDEN, description = "Bearer token lacks the `read` and `write` scopes")]
pub struct InsufficientScopeResponse;

/// [`IntoResponses`] wrapper for internal server errors.
///
/// Can be used to document 5XX API error responses using [`utoipa::path`].
#[derive(Debug, IntoResponses)]
#[response(status = "5XX")]
pub struct ServerErrorResponse(#[to_response] ErrorResponse);
