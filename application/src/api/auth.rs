//! Authentication REST handlers.

use axum::{Extension, Json};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{user, User},
};

use crate::{api, define_error, AsError, Error, Service};

/// Request body of the registration endpoint.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Name of a new user.
    pub name: String,

    /// Surname of a new user.
    pub surname: String,

    /// Email of a new user.
    pub email: String,

    /// Password of a new user.
    pub password: String,

    /// Phone of a new user, if any.
    pub phone: Option<String>,
}

/// Request body of the login endpoint.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email of the user.
    pub email: String,

    /// Password of the user.
    pub password: String,
}

/// Response body of the registration and login endpoints.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Bearer token of the created session.
    pub token: String,

    /// Unix timestamp of the session expiration.
    pub expires_at: i64,

    /// The user the session belongs to.
    pub user: UserResponse,
}

/// Serializable representation of a [`User`].
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// ID of the user.
    pub id: user::Id,

    /// Name of the user.
    pub name: String,

    /// Surname of the user.
    pub surname: String,

    /// Email of the user.
    pub email: String,

    /// Role of the user.
    pub role: String,

    /// Phone of the user, if any.
    pub phone: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name.to_string(),
            surname: user.surname.to_string(),
            email: user.email.to_string(),
            role: user.role.to_string(),
            phone: user.phone.map(|p| p.to_string()),
        }
    }
}

impl From<command::create_user_session::Output> for SessionResponse {
    fn from(output: command::create_user_session::Output) -> Self {
        Self {
            token: output.token.to_string(),
            expires_at: output.expires_at.unix_timestamp(),
            user: output.user.into(),
        }
    }
}

/// `POST /api/auth/register` handler.
///
/// Public registration always creates a [`user::Role::User`] account:
/// operator accounts are administrator-issued only.
pub async fn register(
    Extension(service): Extension<Service>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), Error> {
    let RegisterRequest {
        name,
        surname,
        email,
        password,
        phone,
    } = req;

    let name = api::parse::<user::Name>("name", &name)?;
    let surname = api::parse::<user::Surname>("surname", &surname)?;
    let email = api::parse::<user::Email>("email", &email)?;
    let password = api::parse::<user::Password>("password", &password)?;
    let phone = phone
        .map(|p| api::parse::<user::Phone>("phone", &p))
        .transpose()?;

    let user = service
        .execute(command::CreateUser {
            name,
            surname,
            email,
            password: secrecy::SecretBox::init_with(move || password),
            role: user::Role::User,
            phone,
        })
        .await
        .map_err(AsError::into_error)?;

    let output = service
        .execute(command::CreateUserSession::ByUserId(user.id))
        .await
        .map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Json(output.into())))
}

/// `POST /api/auth/login` handler.
pub async fn login(
    Extension(service): Extension<Service>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, Error> {
    let LoginRequest { email, password } = req;

    let email = api::parse::<user::Email>("email", &email)?;
    let password = api::parse::<user::Password>("password", &password)?;

    let output = service
        .execute(command::CreateUserSession::ByCredentials {
            email,
            password: secrecy::SecretBox::init_with(move || password),
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(output.into()))
}

impl AsError for command::create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EmailOccupied(_) => Some(AuthApiError::EmailOccupied.into()),
            Self::HashPassword(_) => None,
        }
    }
}

impl AsError for command::create_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            // Same answer for an unknown email and a wrong password: no
            // account enumeration.
            Self::WrongCredentials => {
                Some(AuthApiError::WrongCredentials.into())
            }
            Self::JsonWebTokenEncodeError(_) | Self::UserNotExists(_) => None,
        }
    }
}

define_error! {
    enum AuthApiError {
        #[code = "EMAIL_OCCUPIED"]
        #[status = CONFLICT]
        #[message = "Email is already registered"]
        EmailOccupied,

        #[code = "WRONG_CREDENTIALS"]
        #[status = BAD_REQUEST]
        #[message = "Invalid credentials"]
        WrongCredentials,
    }
}
