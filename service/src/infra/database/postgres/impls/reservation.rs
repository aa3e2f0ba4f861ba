//! [`Reservation`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Perform, Select, Update},
    Money,
};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{reservation, Reservation},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Constructs a [`Reservation`] from the provided [`Row`].
fn from_row(row: &Row) -> Reservation {
    Reservation {
        id: row.get("id"),
        user_id: row.get("user_id"),
        room_id: row.get("room_id"),
        check_in: row.get("check_in"),
        check_out: row.get("check_out"),
        guests: row.get("guests"),
        status: row.get("status"),
        total: Money {
            amount: row.get("total"),
            currency: row.get("total_currency"),
        },
        payment_method: row.get("payment_method"),
        created_at: row.get("created_at"),
        deleted_at: row.get("deleted_at"),
    }
}

impl<C> Database<Select<By<Option<Reservation>, reservation::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Reservation>, reservation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: reservation::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, user_id, room_id, \
                   check_in, check_out, guests, \
                   status, \
                   total, total_currency, \
                   payment_method, \
                   created_at, deleted_at \
            FROM reservations \
            WHERE id = $1::UUID \
              AND deleted_at IS NULL \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| from_row(&row)))
    }
}

impl<C>
    Database<
        Select<By<Vec<read::reservation::Active<Reservation>>, ()>>,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::reservation::Active<Reservation>>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<read::reservation::Active<Reservation>>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, user_id, room_id, \
                   check_in, check_out, guests, \
                   status, \
                   total, total_currency, \
                   payment_method, \
                   created_at, deleted_at \
            FROM reservations \
            WHERE status = ANY($1::INT2[]) \
              AND deleted_at IS NULL \
            ORDER BY created_at";
        let active = [
            reservation::Status::Pending,
            reservation::Status::Confirmed,
            reservation::Status::CheckedIn,
        ];
        Ok(self
            .query(SQL, &[&active.as_slice()])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| read::reservation::Active(from_row(row)))
            .collect())
    }
}

impl<C> Database<Insert<Reservation>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Reservation>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(reservation): Insert<Reservation>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(reservation))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Reservation>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(reservation): Update<Reservation>,
    ) -> Result<Self::Ok, Self::Err> {
        let Reservation {
            id,
            user_id,
            room_id,
            check_in,
            check_out,
            guests,
            status,
            total,
            payment_method,
            created_at,
            deleted_at,
        } = reservation;

        const SQL: &str = "\
            INSERT INTO reservations (\
                id, user_id, room_id, \
                check_in, check_out, guests, \
                status, \
                total, total_currency, \
                payment_method, \
                created_at, deleted_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::UUID, \
                $4::DATE, $5::DATE, $6::INT2, \
                $7::INT2, \
                $8::NUMERIC, $9::INT2, \
                $10::INT2, \
                $11::TIMESTAMPTZ, $12::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET user_id = EXCLUDED.user_id, \
                room_id = EXCLUDED.room_id, \
                check_in = EXCLUDED.check_in, \
                check_out = EXCLUDED.check_out, \
                guests = EXCLUDED.guests, \
                status = EXCLUDED.status, \
                total = EXCLUDED.total, \
                total_currency = EXCLUDED.total_currency, \
                payment_method = EXCLUDED.payment_method, \
                created_at = EXCLUDED.created_at, \
                deleted_at = EXCLUDED.deleted_at";
        self.exec(
            SQL,
            &[
                &id,
                &user_id,
                &room_id,
                &check_in,
                &check_out,
                &guests,
                &status,
                &total.amount,
                &total.currency,
                &payment_method,
                &created_at,
                &deleted_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Perform<reservation::Settlement>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Reservation>;
    type Err = Traced<database::Error>;

    /// Applies the [`reservation::Settlement`] as a single conditioned
    /// write.
    ///
    /// [`None`] is returned when the [`Reservation`] is absent or its
    /// status no longer matches the expected one, which makes redelivered
    /// callbacks no-ops.
    async fn execute(
        &self,
        Perform(settlement): Perform<reservation::Settlement>,
    ) -> Result<Self::Ok, Self::Err> {
        let reservation::Settlement {
            id,
            from,
            to,
            method,
        } = settlement;

        const SQL: &str = "\
            UPDATE reservations \
            SET status = $3::INT2, \
                payment_method = COALESCE($4::INT2, payment_method) \
            WHERE id = $1::UUID \
              AND status = $2::INT2 \
              AND deleted_at IS NULL \
            RETURNING id, user_id, room_id, \
                      check_in, check_out, guests, \
                      status, \
                      total, total_currency, \
                      payment_method, \
                      created_at, deleted_at";
        Ok(self
            .query_opt(SQL, &[&id, &from, &to, &method])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| from_row(&row)))
    }
}

impl<C> Database<Select<By<Vec<read::report::MonthlySales>, ()>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<read::report::MonthlySales>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<read::report::MonthlySales>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT DATE_TRUNC('month', created_at)::DATE AS month, \
                   SUM(total)::NUMERIC AS total, \
                   total_currency \
            FROM reservations \
            WHERE status = $1::INT2 \
              AND deleted_at IS NULL \
            GROUP BY month, total_currency \
            ORDER BY month";
        Ok(self
            .query(SQL, &[&reservation::Status::Confirmed])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| read::report::MonthlySales {
                month: row.get("month"),
                total: Money {
                    amount: row.get("total"),
                    currency: row.get("total_currency"),
                },
            })
            .collect())
    }
}
