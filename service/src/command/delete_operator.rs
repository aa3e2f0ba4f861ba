//! [`Command`] for soft-deleting an [`user::Role::Operator`] account.

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for soft-deleting an [`user::Role::Operator`] account.
///
/// Only operators are deletable this way, so an administrator cannot
/// remove regular guests or other administrators by a mistyped ID.
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteOperator {
    /// ID of the [`User`] to delete.
    pub user_id: user::Id,
}

impl<Db, Gw> Command<DeleteOperator> for Service<Db, Gw>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
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
        cmd: DeleteOperator,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DeleteOperator { user_id } = cmd;

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

        user.deleted_at = Some(DateTime::now().coerce());
        tx.execute(Update(user.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(user)
    }
}

/// Error of [`DeleteOperator`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// No [`user::Role::Operator`] exists with the provided ID.
    #[display("`Operator(id: {_0})` does not exist")]
    OperatorNotExists(#[error(not(source))] user::Id),
}
