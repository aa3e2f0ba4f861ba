//! [`Command`] for updating an [`user::Role::Operator`] account.

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::{Email, Name, Phone, Surname};
use crate::{
    domain::{user, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an [`user::Role::Operator`] account.
///
/// Touches contact data only: neither the [`user::Role`] nor the password
/// is ever changed this way. Absent fields are left untouched.
#[derive(Clone, Debug)]
pub struct UpdateOperator {
    /// ID of the [`User`] to update.
    pub user_id: user::Id,

    /// New [`Name`] of the [`User`], if any.
    pub name: Option<user::Name>,

    /// New [`Surname`] of the [`User`], if any.
    pub surname: Option<user::Surname>,

    /// New [`Email`] of the [`User`], if any.
    pub email: Option<user::Email>,

    /// New [`Phone`] of the [`User`], if any.
    pub phone: Option<user::Phone>,
}

impl<Db, Gw> Command<UpdateOperator> for Service<Db, Gw>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + for<'e> Database<
            Select<By<Option<User>, &'e user::Email>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<
            Lock<By<User, user::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Update<User>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateOperator,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateOperator {
            user_id,
            name,
            surname,
            email,
            phone,
        } = cmd;

        if let Some(email) = &email {
            let occupant = self
                .database()
                .execute(Select(By::new(email)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if occupant.is_some_and(|u| u.id != user_id) {
                return Err(tracerr::new!(E::EmailOccupied(email.clone())));
            }
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `User`.
        tx.execute(Lock(By::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut user = tx
            .execute(Select(By::<Option<User>, _>::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|u| u.role == user::Role::Operator)
            .ok_or(E::OperatorNotExists(user_id))
            .map_err(tracerr::wrap!())?;

        if let Some(name) = name {
            user.name = name;
        }
        if let Some(surname) = surname {
            user.surname = surname;
        }
        if let Some(email) = email {
            user.email = email;
        }
        if let Some(phone) = phone {
            user.phone = Some(phone);
        }

        tx.execute(Update(user.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(user)
    }
}

/// Error of [`UpdateOperator`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`user::Email`] is already registered to another [`User`].
    #[display("`{_0}` email is already registered")]
    EmailOccupied(#[error(not(source))] user::Email),

    /// No [`user::Role::Operator`] exists with the provided ID.
    #[display("`Operator(id: {_0})` does not exist")]
    OperatorNotExists(#[error(not(source))] user::Id),
}
