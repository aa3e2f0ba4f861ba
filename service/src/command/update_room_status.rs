//! [`Command`] for manually overriding a [`room::Status`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{room, Room},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for manually overriding a [`room::Status`].
///
/// Only [`room::Status::Available`], [`room::Status::Cleaning`] and
/// [`room::Status::Closed`] are settable: [`room::Status::Occupied`] is a
/// derived consequence of an active reservation, never an operator input.
#[derive(Clone, Copy, Debug)]
pub struct UpdateRoomStatus {
    /// ID of the [`Room`] to override.
    pub room_id: room::Id,

    /// Target [`room::Status`].
    pub status: room::Status,
}

impl<Db, Gw> Command<UpdateRoomStatus> for Service<Db, Gw>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
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

    async fn execute(
        &self,
        cmd: UpdateRoomStatus,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateRoomStatus { room_id, status } = cmd;

        if !status.is_manually_settable() {
            return Err(tracerr::new!(E::StatusNotSettable(status)));
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
        if room.status == status {
            return Ok(room);
        }

        room.status = status;
        tx.execute(Update(room.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(room)
    }
}

/// Error of [`UpdateRoomStatus`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Room`] with the provided ID does not exist.
    #[display("`Room(id: {_0})` does not exist")]
    RoomNotExists(#[error(not(source))] room::Id),

    /// Provided [`room::Status`] is not settable manually.
    #[display("`Status::{_0}` cannot be set manually")]
    StatusNotSettable(#[error(not(source))] room::Status),
}
