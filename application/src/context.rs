//! Request authentication and authorization definitions.

use axum::{async_trait, extract::FromRequestParts, RequestPartsExt as _};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use common::DateTime;
use service::{
    command::{self, Command as _},
    domain::user::{self, session},
};

use crate::{define_error, AsError, Error, Service};

/// Authenticated user session of the current request.
///
/// Extracting it performs the authentication: the bearer token is decoded
/// and the referenced [`user`] re-fetched, so the [`user::Role`] is always
/// the current one.
#[derive(Clone, Debug)]
pub struct Session {
    /// ID of the [`user`] this [`Session`] belongs to.
    pub user_id: user::Id,

    /// Current [`user::Role`] of the [`user`].
    pub role: user::Role,

    /// Authentication token.
    pub token: session::Token,

    /// [`DateTime`] when this [`Session`] expires.
    pub expires_at: DateTime,
}

impl Session {
    /// Authorizes the current request: continues only if the [`Session`]'s
    /// [`user::Role`] is a member of the provided set.
    ///
    /// # Errors
    ///
    /// Errors with [`AuthError::PermissionDenied`] on a role mismatch.
    pub fn require(&self, allowed: &[user::Role]) -> Result<(), Error> {
        if self.role.any_of(allowed) {
            Ok(())
        } else {
            Err(AuthError::PermissionDenied.into())
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _: &S,
    ) -> Result<Self, Self::Rejection> {
        let service =
            parts.extensions.get::<Service>().cloned().ok_or_else(|| {
                Error::internal(&"missing `Service` extension")
            })?;

        let bearer = match parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
        {
            Ok(TypedHeader(Authorization(bearer))) => bearer,
            Err(e) => {
                return Err(if e.is_missing() {
                    AuthError::AuthorizationRequired.into()
                } else {
                    e.into_error()
                });
            }
        };

        #[expect(unsafe_code, reason = "specified in correct header")]
        let token = unsafe {
            session::Token::new_unchecked(bearer.token().to_owned())
        };
        service
            .execute(command::AuthorizeUserSession {
                token: token.clone(),
            })
            .await
            .map(|s| Session {
                user_id: s.user_id,
                role: s.role,
                token,
                expires_at: s.expires_at.coerce(),
            })
            .map_err(AsError::into_error)
    }
}

impl AsError for command::authorize_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            // An expired/garbled token and a token of a deleted `user`
            // read the same from outside.
            Self::JsonWebTokenDecodeError(_) | Self::UserNotExists(_) => {
                Some(AuthError::AuthorizationRequired.into())
            }
        }
    }
}

define_error! {
    enum AuthError {
        #[code = "AUTHORIZATION_REQUIRED"]
        #[status = UNAUTHORIZED]
        #[message = "Authorization required"]
        AuthorizationRequired,

        #[code = "PERMISSION_DENIED"]
        #[status = FORBIDDEN]
        #[message = "Insufficient permissions"]
        PermissionDenied,
    }
}
