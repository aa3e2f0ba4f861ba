//! [`Reservation`]-related REST handlers.

use axum::{extract::Path, Extension, Json};
use common::{Date, Money};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{payment, reservation, user::Role, Reservation},
    query, Query as _,
};
use uuid::Uuid;

use crate::{api, define_error, AsError, Error, Service, Session};

/// Serializable representation of a [`Reservation`].
#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    /// ID of the reservation.
    pub id: reservation::Id,

    /// ID of the owning user.
    pub user_id: service::domain::user::Id,

    /// ID of the reserved room.
    pub room_id: service::domain::room::Id,

    /// Check-in date.
    pub check_in: Date,

    /// Check-out date.
    pub check_out: Date,

    /// Number of guests.
    pub guests: reservation::Guests,

    /// Status of the reservation.
    pub status: String,

    /// Total price, `{amount}{currency}` formatted.
    pub total: String,

    /// Payment method of the reservation.
    pub payment_method: String,

    /// RFC 3339 timestamp of the reservation creation.
    pub created_at: String,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            room_id: r.room_id,
            check_in: r.check_in,
            check_out: r.check_out,
            guests: r.guests,
            status: r.status.to_string(),
            total: r.total.to_string(),
            payment_method: r.payment_method.to_string(),
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

/// Serializable redirect handle to a provider checkout page.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// Provider-assigned preference ID.
    pub preference_id: String,

    /// URL of the checkout page to redirect the payer to.
    pub url: String,
}

impl From<payment::Checkout> for CheckoutResponse {
    fn from(checkout: payment::Checkout) -> Self {
        Self {
            preference_id: checkout.preference_id.into(),
            url: checkout.url.into(),
        }
    }
}

/// Request body of the reservation creation endpoint.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    /// ID of the room to reserve.
    pub room_id: Uuid,

    /// Check-in date, `YYYY-MM-DD` formatted.
    pub check_in: String,

    /// Check-out date, `YYYY-MM-DD` formatted.
    pub check_out: String,

    /// Number of guests.
    pub guests: i16,

    /// Computed total price, `{amount}{currency}` formatted.
    pub total: String,

    /// Payment method.
    pub payment_method: String,
}

/// Response body of the reservation creation endpoint.
#[derive(Debug, Serialize)]
pub struct CreateResponse {
    /// Created reservation.
    pub reservation: ReservationResponse,

    /// Redirect handle to the provider checkout page, when the payment
    /// method settles online.
    pub checkout: Option<CheckoutResponse>,
}

/// `POST /api/user/reservations` handler.
///
/// Any authenticated user may book; the reservation is owned by the
/// session user.
pub async fn create(
    Extension(service): Extension<Service>,
    session: Session,
    Json(req): Json<CreateRequest>,
) -> Result<(StatusCode, Json<CreateResponse>), Error> {
    let CreateRequest {
        room_id,
        check_in,
        check_out,
        guests,
        total,
        payment_method,
    } = req;

    let output = service
        .execute(command::CreateReservation {
            user_id: session.user_id,
            room_id: room_id.into(),
            check_in: api::parse::<Date>("check_in", &check_in)?,
            check_out: api::parse::<Date>("check_out", &check_out)?,
            guests: reservation::Guests::new(guests).ok_or_else(|| {
                Error::invalid_input(&"invalid `guests`: must be positive")
            })?,
            total: api::parse::<Money>("total", &total)?,
            method: api::parse::<reservation::Method>(
                "payment_method",
                &payment_method,
            )?,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateResponse {
            reservation: output.reservation.into(),
            checkout: output.checkout.map(Into::into),
        }),
    ))
}

/// `GET /api/operator/reservations` handler: all the active reservations.
pub async fn list_active(
    Extension(service): Extension<Service>,
    session: Session,
) -> Result<Json<Vec<ReservationResponse>>, Error> {
    session.require(&[Role::Operator, Role::Administrator])?;

    let reservations = service
        .execute(query::reservations::Active::by(()))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(
        reservations
            .into_iter()
            .map(|active| active.0.into())
            .collect(),
    ))
}

/// `PUT /api/operator/reservations/:id/release` handler.
///
/// Checks the reservation out and frees its room, regardless of the
/// current reservation status.
pub async fn release(
    Extension(service): Extension<Service>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<ReservationResponse>, Error> {
    session.require(&[Role::Operator, Role::Administrator])?;

    let reservation = service
        .execute(command::ReleaseReservation {
            reservation_id: id.into(),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(reservation.into()))
}

impl AsError for command::create_reservation::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvalidPeriod { .. } => {
                Some(ReservationApiError::InvalidPeriod.into())
            }
            Self::Payments(e) => e.try_as_error(),
            Self::RoomNotExists(_) => {
                Some(ReservationApiError::RoomNotFound.into())
            }
            Self::UserNotExists(_) => None,
        }
    }
}

impl AsError for command::release_reservation::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ReservationNotExists(_) => {
                Some(ReservationApiError::NotFound.into())
            }
        }
    }
}

define_error! {
    enum ReservationApiError {
        #[code = "RESERVATION_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Reservation not found"]
        NotFound,

        #[code = "ROOM_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Room not found"]
        RoomNotFound,

        #[code = "INVALID_PERIOD"]
        #[status = BAD_REQUEST]
        #[message = "Check-out date must be after the check-in date"]
        InvalidPeriod,
    }
}
