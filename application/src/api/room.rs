//! [`Room`]-related REST handlers.

use axum::{extract::Path, Extension, Json};
use common::Money;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{room, user::Role, Room},
    query, Query as _,
};
use uuid::Uuid;

use crate::{api, define_error, AsError, Error, Service, Session};

/// Serializable representation of a [`Room`].
#[derive(Debug, Serialize)]
pub struct RoomResponse {
    /// ID of the room.
    pub id: room::Id,

    /// Door number of the room.
    pub number: room::Number,

    /// Category of the room.
    pub category: String,

    /// Nightly price of the room, `{amount}{currency}` formatted.
    pub price_per_night: String,

    /// Status of the room.
    pub status: String,

    /// RFC 3339 timestamp of the room creation.
    pub created_at: String,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            number: room.number,
            category: room.category.to_string(),
            price_per_night: room.price_per_night.to_string(),
            status: room.status.to_string(),
            created_at: room.created_at.to_rfc3339(),
        }
    }
}

/// Request body of the room creation endpoint.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    /// Door number of a new room.
    pub number: i32,

    /// Category of a new room.
    pub category: String,

    /// Nightly price of a new room, `{amount}{currency}` formatted.
    pub price_per_night: String,
}

/// Request body of the room update endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// New door number of the room, if any.
    pub number: Option<i32>,

    /// New category of the room, if any.
    pub category: Option<String>,

    /// New nightly price of the room, if any.
    pub price_per_night: Option<String>,
}

/// Request body of the room status override endpoint.
#[derive(Debug, Deserialize)]
pub struct OverrideStatusRequest {
    /// Target status of the room.
    pub status: String,
}

/// `GET /api/user/rooms` handler: publicly lists bookable rooms.
pub async fn list_available(
    Extension(service): Extension<Service>,
) -> Result<Json<Vec<RoomResponse>>, Error> {
    let rooms = service
        .execute(query::rooms::List::by(query::rooms::Filter {
            status: Some(room::Status::Available),
        }))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(rooms.into_iter().map(Into::into).collect()))
}

/// `GET /api/operator/rooms` handler: the full room map, all statuses.
pub async fn map(
    Extension(service): Extension<Service>,
    session: Session,
) -> Result<Json<Vec<RoomResponse>>, Error> {
    session.require(&[Role::Operator, Role::Administrator])?;

    let rooms = service
        .execute(query::rooms::List::by(query::rooms::Filter::default()))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(rooms.into_iter().map(Into::into).collect()))
}

/// `GET /api/admin/rooms` handler.
pub async fn list_all(
    Extension(service): Extension<Service>,
    session: Session,
) -> Result<Json<Vec<RoomResponse>>, Error> {
    session.require(&[Role::Administrator, Role::Operator])?;

    let rooms = service
        .execute(query::rooms::List::by(query::rooms::Filter::default()))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(rooms.into_iter().map(Into::into).collect()))
}

/// `GET /api/admin/rooms/:id` handler.
pub async fn find(
    Extension(service): Extension<Service>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<RoomResponse>, Error> {
    session.require(&[Role::Administrator, Role::Operator])?;

    let room = service
        .execute(query::room::ById::by(id.into()))
        .await
        .map_err(AsError::into_error)?
        .ok_or_else(|| Error::from(RoomApiError::NotFound))?;

    Ok(Json(room.into()))
}

/// `POST /api/admin/rooms` handler.
pub async fn create(
    Extension(service): Extension<Service>,
    session: Session,
    Json(req): Json<CreateRequest>,
) -> Result<(StatusCode, Json<RoomResponse>), Error> {
    session.require(&[Role::Administrator])?;

    let CreateRequest {
        number,
        category,
        price_per_night,
    } = req;

    let room = service
        .execute(command::CreateRoom {
            number: room::Number::new(number).ok_or_else(|| {
                Error::invalid_input(&"invalid `number`: must be positive")
            })?,
            category: api::parse::<room::Category>("category", &category)?,
            price_per_night: api::parse::<Money>(
                "price_per_night",
                &price_per_night,
            )?,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Json(room.into())))
}

/// `PUT /api/admin/rooms/:id` handler.
pub async fn update(
    Extension(service): Extension<Service>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<RoomResponse>, Error> {
    session.require(&[Role::Administrator])?;

    let UpdateRequest {
        number,
        category,
        price_per_night,
    } = req;

    let room = service
        .execute(command::UpdateRoom {
            room_id: id.into(),
            number: number
                .map(|n| {
                    room::Number::new(n).ok_or_else(|| {
                        Error::invalid_input(
                            &"invalid `number`: must be positive",
                        )
                    })
                })
                .transpose()?,
            category: category
                .map(|c| api::parse::<room::Category>("category", &c))
                .transpose()?,
            price_per_night: price_per_night
                .map(|p| api::parse::<Money>("price_per_night", &p))
                .transpose()?,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(room.into()))
}

/// `DELETE /api/admin/rooms/:id` handler.
pub async fn remove(
    Extension(service): Extension<Service>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Error> {
    session.require(&[Role::Administrator, Role::Operator])?;

    service
        .execute(command::DeleteRoom { room_id: id.into() })
        .await
        .map_err(AsError::into_error)
        .map(drop)?;

    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /api/operator/rooms/:id/status` handler: manual status override.
pub async fn override_status(
    Extension(service): Extension<Service>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(req): Json<OverrideStatusRequest>,
) -> Result<Json<RoomResponse>, Error> {
    session.require(&[Role::Operator, Role::Administrator])?;

    let status = api::parse::<room::Status>("status", &req.status)?;

    let room = service
        .execute(command::UpdateRoomStatus {
            room_id: id.into(),
            status,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(room.into()))
}

impl AsError for command::create_room::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NumberOccupied(_) => {
                Some(RoomApiError::NumberOccupied.into())
            }
        }
    }
}

impl AsError for command::update_room::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NumberOccupied(_) => {
                Some(RoomApiError::NumberOccupied.into())
            }
            Self::RoomNotExists(_) => Some(RoomApiError::NotFound.into()),
        }
    }
}

impl AsError for command::delete_room::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::RoomNotExists(_) => Some(RoomApiError::NotFound.into()),
        }
    }
}

impl AsError for command::update_room_status::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::RoomNotExists(_) => Some(RoomApiError::NotFound.into()),
            Self::StatusNotSettable(_) => {
                Some(RoomApiError::StatusNotSettable.into())
            }
        }
    }
}

define_error! {
    enum RoomApiError {
        #[code = "ROOM_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Room not found"]
        NotFound,

        #[code = "ROOM_NUMBER_OCCUPIED"]
        #[status = CONFLICT]
        #[message = "Room number is already occupied"]
        NumberOccupied,

        #[code = "ROOM_STATUS_NOT_SETTABLE"]
        #[status = BAD_REQUEST]
        #[message = "Room status cannot be set manually"]
        StatusNotSettable,
    }
}
