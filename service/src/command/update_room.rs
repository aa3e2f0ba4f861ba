//! [`Command`] for updating a [`Room`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{room, Room},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating a [`Room`].
///
/// Absent fields are left untouched.
#[derive(Clone, Debug)]
pub struct UpdateRoom {
    /// ID of the [`Room`] to update.
    pub room_id: room::Id,

    /// New [`room::Number`] of the [`Room`], if any.
    pub number: Option<room::Number>,

    /// New [`room::Category`] of the [`Room`], if any.
    pub category: Option<room::Category>,

    /// New nightly price of the [`Room`], if any.
    pub price_per_night: Option<Money>,
}

impl<Db, Gw> Command<UpdateRoom> for Service<Db, Gw>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Room>, room::Number>>,
            Ok = Option<Room>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<
            Lock<By<Room, room::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Room>, room::Id>>,
            Ok = Option<Room>,
            Err = Traced<database::Error>,
        > + Database<Update<Room>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Room;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateRoom) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateRoom {
            room_id,
            number,
            category,
            price_per_night,
        } = cmd;

        if let Some(number) = number {
            let occupant = self
                .database()
                .execute(Select(By::new(number)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if occupant.is_some_and(|r| r.id != room_id) {
                return Err(tracerr::new!(E::NumberOccupied(number)));
            }
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Room`.
        tx.execute(Lock(By::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut room = tx
            .execute(Select(By::<Option<Room>, _>::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RoomNotExists(room_id))
            .map_err(tracerr::wrap!())?;

        if let Some(number) = number {
            room.number = number;
        }
        if let Some(category) = category {
            room.category = category;
        }
        if let Some(price) = price_per_night {
            room.price_per_night = price;
        }

        tx.execute(Update(room.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(room)
    }
}

/// Error of [`UpdateRoom`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`room::Number`] is already occupied by another [`Room`].
    #[display("`Room` number {_0} is already occupied")]
    NumberOccupied(#[error(not(source))] room::Number),

    /// [`Room`] with the provided ID does not exist.
    #[display("`Room(id: {_0})` does not exist")]
    RoomNotExists(#[error(not(source))] room::Id),
}
