//! [`Command`] for releasing (checking out) a [`Reservation`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{reservation, room, Reservation, Room},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for releasing (checking out) a [`Reservation`].
///
/// Deliberately unconditional on the current [`reservation::Status`]: an
/// operator may release a [`Reservation`] in any state, and redundant
/// releases are harmless.
#[derive(Clone, Copy, Debug, From)]
pub struct ReleaseReservation {
    /// ID of the [`Reservation`] to release.
    pub reservation_id: reservation::Id,
}

impl<Db, Gw> Command<ReleaseReservation> for Service<Db, Gw>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<Reservation>, reservation::Id>>,
            Ok = Option<Reservation>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<
            Lock<By<Room, room::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Room>, room::Id>>,
            Ok = Option<Room>,
            Err = Traced<database::Error>,
        > + Database<Update<Reservation>, Err = Traced<database::Error>>
        + Database<Update<Room>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Reservation;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ReleaseReservation,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ReleaseReservation { reservation_id } = cmd;

        let mut reservation = self
            .database()
            .execute(Select(By::<Option<Reservation>, _>::new(reservation_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ReservationNotExists(reservation_id))
            .map_err(tracerr::wrap!())?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Room`.
        tx.execute(Lock(By::new(reservation.room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        reservation.status = reservation::Status::CheckedOut;
        tx.execute(Update(reservation.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        // A soft-deleted `Room` is skipped rather than failing the
        // release.
        let room = tx
            .execute(Select(By::<Option<Room>, _>::new(reservation.room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if let Some(mut room) = room {
            room.status = room::Status::Available;
            tx.execute(Update(room))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(reservation)
    }
}

/// Error of [`ReleaseReservation`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Reservation`] with the provided ID does not exist.
    #[display("`Reservation(id: {_0})` does not exist")]
    ReservationNotExists(#[error(not(source))] reservation::Id),
}
