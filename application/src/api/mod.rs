//! REST API definitions.

pub mod auth;
pub mod inquiry;
pub mod operator;
pub mod payment;
pub mod report;
pub mod reservation;
pub mod room;

use std::{fmt, str::FromStr};

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::Error;

/// Builds the [`Router`] of the whole REST API surface.
///
/// The [`crate::Service`] is expected to be provided as a request
/// extension.
pub fn router() -> Router {
    Router::new()
        // Public surface.
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/user/rooms", get(room::list_available))
        .route("/api/user/inquiries", post(inquiry::create))
        // Provider-invoked, unauthenticated by design.
        .route("/api/payments/notifications", post(payment::notifications))
        // Authenticated user surface.
        .route("/api/user/reservations", post(reservation::create))
        // Operator surface.
        .route("/api/operator/rooms", get(room::map))
        .route("/api/operator/rooms/:id/status", put(room::override_status))
        .route("/api/operator/reservations", get(reservation::list_active))
        .route(
            "/api/operator/reservations/:id/release",
            put(reservation::release),
        )
        .route("/api/operator/inquiries", get(inquiry::list_open))
        .route("/api/operator/inquiries/:id/answer", put(inquiry::answer))
        // Administrator surface.
        .route("/api/admin/rooms", post(room::create).get(room::list_all))
        .route(
            "/api/admin/rooms/:id",
            get(room::find).put(room::update).delete(room::remove),
        )
        .route(
            "/api/admin/operators",
            post(operator::create).get(operator::list),
        )
        .route(
            "/api/admin/operators/:id",
            put(operator::update).delete(operator::remove),
        )
        .route("/api/admin/reports/monthly-sales", get(report::monthly_sales))
}

/// Parses the `input` of the named request field into a `T`, reporting a
/// 400-class [`Error`] on failure.
pub(crate) fn parse<T>(field: &'static str, input: &str) -> Result<T, Error>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    input.parse().map_err(|e| {
        Error::invalid_input(&format_args!("invalid `{field}`: {e}"))
    })
}
