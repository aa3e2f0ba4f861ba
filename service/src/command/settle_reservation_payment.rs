//! [`Command`] reconciling a [`Reservation`] with a provider-reported
//! payment.

use common::operations::{By, Perform, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{payment, reservation, Reservation},
    infra::{database, payment as gateway, Database, Gateway},
    Service,
};

use super::Command;

/// [`Command`] reconciling a [`Reservation`] with a provider-reported
/// payment.
///
/// The notification that triggers this [`Command`] is never trusted: the
/// authoritative [`payment::Record`] is re-fetched from the provider by the
/// reported [`payment::Id`], and the transition is applied as a single
/// conditioned write, so duplicate or out-of-order deliveries are no-ops.
#[derive(Clone, Debug, From)]
pub struct SettleReservationPayment {
    /// Provider-reported [`payment::Id`] to reconcile by.
    pub payment_id: payment::Id,
}

impl<Db, Gw> Command<SettleReservationPayment> for Service<Db, Gw>
where
    Db: Database<
        Perform<reservation::Settlement>,
        Ok = Option<Reservation>,
        Err = Traced<database::Error>,
    >,
    Gw: Gateway<
        Select<By<Option<payment::Record>, payment::Id>>,
        Ok = Option<payment::Record>,
        Err = Traced<gateway::Error>,
    >,
{
    type Ok = Option<Reservation>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SettleReservationPayment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SettleReservationPayment { payment_id } = cmd;

        let record = self
            .payments()
            .execute(Select(By::<Option<payment::Record>, _>::new(
                payment_id.clone(),
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::PaymentNotExists(payment_id))
            .map_err(tracerr::wrap!())?;

        let reservation_id = record
            .external_reference
            .ok_or(E::NoCorrelation(record.id))
            .map_err(tracerr::wrap!())?;

        let Some(to) = reservation::Status::Pending
            .on_settlement(record.status)
        else {
            // Not a final outcome: the reservation stays `Pending` until
            // the provider reports one.
            return Ok(None);
        };

        let method = (to == reservation::Status::Confirmed)
            .then_some(reservation::Method::MercadoPago);

        let reservation = self
            .database()
            .execute(Perform(reservation::Settlement {
                id: reservation_id,
                from: reservation::Status::Pending,
                to,
                method,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        match &reservation {
            Some(r) => tracing::info!(
                reservation_id = %r.id,
                status = %r.status,
                "reservation settled",
            ),
            // Absent, already settled, or a concurrent delivery won.
            None => tracing::info!(
                reservation_id = %reservation_id,
                "settlement skipped",
            ),
        }

        Ok(reservation)
    }
}

/// Error of [`SettleReservationPayment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// Provider [`payment::Record`] carries no correlation token.
    #[display("Payment `{_0}` carries no external reference")]
    NoCorrelation(#[error(not(source))] payment::Id),

    /// Provider knows no payment with the reported [`payment::Id`].
    #[display("Payment `{_0}` does not exist")]
    PaymentNotExists(#[error(not(source))] payment::Id),

    /// Payment-provider [`Gateway`] error.
    #[display("Payment provider operation failed: {_0}")]
    #[from]
    Payments(gateway::Error),
}
