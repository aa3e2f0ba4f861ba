//! [`Command`] for creating a new [`Room`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{room, Room},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Room`].
#[derive(Clone, Debug)]
pub struct CreateRoom {
    /// [`room::Number`] of a new [`Room`].
    pub number: room::Number,

    /// [`room::Category`] of a new [`Room`].
    pub category: room::Category,

    /// Nightly price of a new [`Room`].
    pub price_per_night: Money,
}

impl<Db, Gw> Command<CreateRoom> for Service<Db, Gw>
where
    Db: Database<
            Select<By<Option<Room>, room::Number>>,
            Ok = Option<Room>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Room>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Room;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateRoom) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateRoom {
            number,
            category,
            price_per_night,
        } = cmd;

        let existing = self
            .database()
            .execute(Select(By::new(number)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::NumberOccupied(number)));
        }

        let room = Room {
            id: room::Id::new(),
            number,
            category,
            price_per_night,
            status: room::Status::Available,
            created_at: DateTime::now().coerce(),
            deleted_at: None,
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(room.clone())).await.map_err(|e| {
            // Backstop for a creation racing this one past the select
            // above.
            if e.as_ref().is_unique_violation(Some("rooms_number_unique")) {
                tracerr::new!(E::NumberOccupied(number))
            } else {
                tracerr::map_from(e)
            }
        })?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(room)
    }
}

/// Error of [`CreateRoom`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`room::Number`] is already occupied by another [`Room`].
    #[display("`Room` number {_0} is already occupied")]
    NumberOccupied(#[error(not(source))] room::Number),
}
