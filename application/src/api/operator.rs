//! Operator-account REST handlers.

use axum::{extract::Path, Extension, Json};
use http::StatusCode;
use serde::Deserialize;
use service::{
    command::{self, Command as _},
    domain::user::{self, Role},
    query, Query as _,
};
use uuid::Uuid;

use crate::{
    api::{self, auth::UserResponse},
    define_error, AsError, Error, Service, Session,
};

/// Request body of the operator creation endpoint.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    /// Name of a new operator.
    pub name: String,

    /// Surname of a new operator.
    pub surname: String,

    /// Email of a new operator.
    pub email: String,

    /// Password of a new operator.
    pub password: String,

    /// Phone of a new operator, if any.
    pub phone: Option<String>,
}

/// Request body of the operator update endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// New name of the operator, if any.
    pub name: Option<String>,

    /// New surname of the operator, if any.
    pub surname: Option<String>,

    /// New email of the operator, if any.
    pub email: Option<String>,

    /// New phone of the operator, if any.
    pub phone: Option<String>,
}

/// `POST /api/admin/operators` handler: administrator-issued operator
/// account creation.
pub async fn create(
    Extension(service): Extension<Service>,
    session: Session,
    Json(req): Json<CreateRequest>,
) -> Result<(StatusCode, Json<UserResponse>), Error> {
    session.require(&[Role::Administrator])?;

    let CreateRequest {
        name,
        surname,
        email,
        password,
        phone,
    } = req;

    let password = api::parse::<user::Password>("password", &password)?;
    let user = service
        .execute(command::CreateUser {
            name: api::parse::<user::Name>("name", &name)?,
            surname: api::parse::<user::Surname>("surname", &surname)?,
            email: api::parse::<user::Email>("email", &email)?,
            password: secrecy::SecretBox::init_with(move || password),
            role: Role::Operator,
            phone: phone
                .map(|p| api::parse::<user::Phone>("phone", &p))
                .transpose()?,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// `GET /api/admin/operators` handler.
pub async fn list(
    Extension(service): Extension<Service>,
    session: Session,
) -> Result<Json<Vec<UserResponse>>, Error> {
    session.require(&[Role::Administrator])?;

    let operators = service
        .execute(query::operators::ByRole::by(Role::Operator))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(operators.into_iter().map(Into::into).collect()))
}

/// `PUT /api/admin/operators/:id` handler.
///
/// Contact data only: the role and the password are never updated this
/// way.
pub async fn update(
    Extension(service): Extension<Service>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<UserResponse>, Error> {
    session.require(&[Role::Administrator])?;

    let UpdateRequest {
        name,
        surname,
        email,
        phone,
    } = req;

    let user = service
        .execute(command::UpdateOperator {
            user_id: id.into(),
            name: name
                .map(|n| api::parse::<user::Name>("name", &n))
                .transpose()?,
            surname: surname
                .map(|s| api::parse::<user::Surname>("surname", &s))
                .transpose()?,
            email: email
                .map(|e| api::parse::<user::Email>("email", &e))
                .transpose()?,
            phone: phone
                .map(|p| api::parse::<user::Phone>("phone", &p))
                .transpose()?,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(user.into()))
}

/// `DELETE /api/admin/operators/:id` handler.
pub async fn remove(
    Extension(service): Extension<Service>,
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Error> {
    session.require(&[Role::Administrator])?;

    service
        .execute(command::DeleteOperator { user_id: id.into() })
        .await
        .map_err(AsError::into_error)
        .map(drop)?;

    Ok(StatusCode::NO_CONTENT)
}

impl AsError for command::update_operator::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EmailOccupied(_) => {
                Some(OperatorApiError::EmailOccupied.into())
            }
            Self::OperatorNotExists(_) => {
                Some(OperatorApiError::NotFound.into())
            }
        }
    }
}

impl AsError for command::delete_operator::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::OperatorNotExists(_) => {
                Some(OperatorApiError::NotFound.into())
            }
        }
    }
}

define_error! {
    enum OperatorApiError {
        #[code = "OPERATOR_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Operator not found"]
        NotFound,

        #[code = "EMAIL_OCCUPIED"]
        #[status = CONFLICT]
        #[message = "Email is already registered"]
        EmailOccupied,
    }
}
