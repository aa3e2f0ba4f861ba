//! [`Room`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Lock, Select, Update},
    Money,
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{room, Room},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    query::rooms,
};

/// Constructs a [`Room`] from the provided [`Row`].
fn from_row(row: &Row) -> Room {
    Room {
        id: row.get("id"),
        number: row.get("number"),
        category: row.get("category"),
        price_per_night: Money {
            amount: row.get("price_per_night"),
            currency: row.get("price_currency"),
        },
        status: row.get("status"),
        created_at: row.get("created_at"),
        deleted_at: row.get("deleted_at"),
    }
}

impl<C> Database<Select<By<Option<Room>, room::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Room>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Room>, room::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: room::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, number, category, \
                   price_per_night, price_currency, \
                   status, \
                   created_at, deleted_at \
            FROM rooms \
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

impl<C> Database<Select<By<Option<Room>, room::Number>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Room>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Room>, room::Number>>,
    ) -> Result<Self::Ok, Self::Err> {
        let number = by.into_inner();

        const SQL: &str = "\
            SELECT id, number, category, \
                   price_per_night, price_currency, \
                   status, \
                   created_at, deleted_at \
            FROM rooms \
            WHERE number = $1::INT4 \
              AND deleted_at IS NULL \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&number])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| from_row(&row)))
    }
}

impl<C> Database<Select<By<Vec<Room>, rooms::Filter>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Room>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Room>, rooms::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let rooms::Filter { status } = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];
        let status_idx = status.as_ref().map(|s| {
            ps.push(s);
            ps.len()
        });

        let sql = format!(
            "SELECT id, number, category, \
                    price_per_night, price_currency, \
                    status, \
                    created_at, deleted_at \
             FROM rooms \
             WHERE deleted_at IS NULL \
                   {status_filtering} \
             ORDER BY number",
            status_filtering =
                status_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND status = ${idx}::INT2"))
                }),
        );
        Ok(self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Room>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Room>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(room): Insert<Room>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(room)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Room>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(room): Update<Room>,
    ) -> Result<Self::Ok, Self::Err> {
        let Room {
            id,
            number,
            category,
            price_per_night,
            status,
            created_at,
            deleted_at,
        } = room;

        const SQL: &str = "\
            INSERT INTO rooms (\
                id, number, category, \
                price_per_night, price_currency, \
                status, \
                created_at, deleted_at\
            ) \
            VALUES (\
                $1::UUID, \
                $2::INT4, $3::VARCHAR, \
                $4::NUMERIC, $5::INT2, \
                $6::INT2, \
                $7::TIMESTAMPTZ, $8::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET number = EXCLUDED.number, \
                category = EXCLUDED.category, \
                price_per_night = EXCLUDED.price_per_night, \
                price_currency = EXCLUDED.price_currency, \
                status = EXCLUDED.status, \
                created_at = EXCLUDED.created_at, \
                deleted_at = EXCLUDED.deleted_at";
        self.exec(
            SQL,
            &[
                &id,
                &number,
                &category,
                &price_per_night.amount,
                &price_per_night.currency,
                &status,
                &created_at,
                &deleted_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Room, room::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Room, room::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: room::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO rooms_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO NOTHING";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
