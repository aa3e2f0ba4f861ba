//! [`Command`] for creating a new [`User`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret as _, SecretBox};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::{Email, Name, Password, Phone, Role, Surname};
use crate::{
    domain::{user, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`User`].
///
/// Serves both self-registration and administrator-issued operator
/// creation: the caller decides the [`Role`].
#[derive(Clone, Debug)]
pub struct CreateUser {
    /// [`Name`] of a new [`User`].
    pub name: user::Name,

    /// [`Surname`] of a new [`User`].
    pub surname: user::Surname,

    /// [`Email`] of a new [`User`].
    pub email: user::Email,

    /// [`Password`] of a new [`User`].
    pub password: SecretBox<user::Password>,

    /// [`Role`] of a new [`User`].
    pub role: user::Role,

    /// [`Phone`] of a new [`User`].
    pub phone: Option<user::Phone>,
}

impl<Db, Gw> Command<CreateUser> for Service<Db, Gw>
where
    Db: for<'e> Database<
            Select<By<Option<User>, &'e user::Email>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<User>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUser {
            name,
            surname,
            email,
            password,
            role,
            phone,
        } = cmd;

        let u = self
            .database()
            .execute(Select(By::new(&email)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if u.is_some() {
            return Err(tracerr::new!(E::EmailOccupied(email)));
        }

        let password_hash = user::PasswordHash::new(password.expose_secret())
            .map_err(|e| tracerr::new!(E::HashPassword(e)))?;

        let user = User {
            id: user::Id::new(),
            name,
            surname,
            email,
            password_hash,
            role,
            phone,
            created_at: DateTime::now().coerce(),
            deleted_at: None,
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(user.clone())).await.map_err(|e| {
            // Backstop for a registration racing this one past the
            // select above.
            if e.as_ref().is_unique_violation(Some("users_email_unique")) {
                tracerr::new!(E::EmailOccupied(user.email.clone()))
            } else {
                tracerr::map_from(e)
            }
        })?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(user)
    }
}

/// Error of [`CreateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`user::Email`] is already registered.
    #[display("`{_0}` email is already registered")]
    EmailOccupied(#[error(not(source))] user::Email),

    /// Failed to hash the provided [`Password`].
    #[display("Failed to hash the provided `Password`: {_0}")]
    HashPassword(#[error(not(source))] argon2::password_hash::Error),
}
