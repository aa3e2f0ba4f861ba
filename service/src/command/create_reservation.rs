//! [`Command`] for creating a new [`Reservation`].

use common::{
    operations::{
        By, Commit, Insert, Lock, Select, Transact, Transacted, Update,
    },
    Date, DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{payment, reservation, room, user, Reservation, Room, User},
    infra::{database, payment as gateway, Database, Gateway},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Reservation`].
#[derive(Clone, Copy, Debug)]
pub struct CreateReservation {
    /// ID of the [`User`] booking the [`Room`].
    pub user_id: user::Id,

    /// ID of the [`Room`] to book.
    pub room_id: room::Id,

    /// Check-in [`Date`] of a new [`Reservation`].
    pub check_in: Date,

    /// Check-out [`Date`] of a new [`Reservation`].
    pub check_out: Date,

    /// Number of guests of a new [`Reservation`].
    pub guests: reservation::Guests,

    /// Total price of a new [`Reservation`], as computed by the caller.
    pub total: Money,

    /// Payment [`reservation::Method`] of a new [`Reservation`].
    pub method: reservation::Method,
}

/// Output of [`CreateReservation`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// Created [`Reservation`].
    pub reservation: Reservation,

    /// Redirect handle to the provider checkout page, when the payment
    /// [`reservation::Method`] settles online.
    pub checkout: Option<payment::Checkout>,
}

impl<Db, Gw> Command<CreateReservation> for Service<Db, Gw>
where
    Db: Database<Transact, Err = Traced<database::Error>>
        + Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Room>, room::Id>>,
            Ok = Option<Room>,
            Err = Traced<database::Error>,
        >,
    Transacted<Db>: Database<
            Lock<By<Room, room::Id>>,
            Err = Traced<database::Error>,
        > + Database<Insert<Reservation>, Err = Traced<database::Error>>
        + Database<Update<Room>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    Gw: Gateway<
        Insert<payment::Preference>,
        Ok = payment::Checkout,
        Err = Traced<gateway::Error>,
    >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateReservation,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateReservation {
            user_id,
            room_id,
            check_in,
            check_out,
            guests,
            total,
            method,
        } = cmd;

        if check_out <= check_in {
            return Err(tracerr::new!(E::InvalidPeriod {
                check_in,
                check_out,
            }));
        }

        let user = self
            .database()
            .execute(Select(By::<Option<User>, _>::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;

        let room = self
            .database()
            .execute(Select(By::<Option<Room>, _>::new(room_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RoomNotExists(room_id))
            .map_err(tracerr::wrap!())?;

        let reservation = Reservation {
            id: reservation::Id::new(),
            user_id: user.id,
            room_id: room.id,
            check_in,
            check_out,
            guests,
            // Settlement arrives later: either a provider callback or an
            // operator action.
            status: reservation::Status::Pending,
            total,
            payment_method: method,
            created_at: DateTime::now().coerce(),
            deleted_at: None,
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Room`.
        tx.execute(Lock(By::new(room.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Insert(reservation.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        // The `Room` is held right away, before any payment settlement.
        let mut room = room;
        room.status = room::Status::Occupied;
        tx.execute(Update(room))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let checkout = if method.is_online() {
            // A failed registration leaves the `Pending` reservation and
            // the `Occupied` room behind: the provider callback or an
            // operator release reconciles it later.
            // SAFETY: the formatted title is non-empty and far below the
            //         length limit.
            #[expect(unsafe_code, reason = "invariants are preserved")]
            let title = unsafe {
                payment::Title::new_unchecked(format!(
                    "Reservation {} ({check_in} to {check_out})",
                    reservation.id,
                ))
            };
            Some(
                self.payments()
                    .execute(Insert(payment::Preference {
                        external_reference: reservation.id,
                        title,
                        total,
                    }))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?,
            )
        } else {
            None
        };

        Ok(Output {
            reservation,
            checkout,
        })
    }
}

/// Error of [`CreateReservation`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Check-out [`Date`] is not after the check-in one.
    #[display("Check-out `{check_out}` is not after check-in `{check_in}`")]
    InvalidPeriod {
        /// Requested check-in [`Date`].
        check_in: Date,

        /// Requested check-out [`Date`].
        check_out: Date,
    },

    /// Payment-provider [`Gateway`] error.
    #[display("Payment provider operation failed: {_0}")]
    #[from]
    Payments(gateway::Error),

    /// [`Room`] with the provided ID does not exist.
    #[display("`Room(id: {_0})` does not exist")]
    RoomNotExists(#[error(not(source))] room::Id),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    UserNotExists(#[error(not(source))] user::Id),
}
