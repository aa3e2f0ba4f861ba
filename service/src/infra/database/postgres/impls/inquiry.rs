//! [`Inquiry`]-related [`Database`] implementations.

use common::operations::{By, Insert, Perform, Select, Update};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{inquiry, Inquiry},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    query::inquiries,
};

/// Constructs an [`Inquiry`] from the provided [`Row`].
fn from_row(row: &Row) -> Inquiry {
    Inquiry {
        id: row.get("id"),
        email: row.get("email"),
        subject: row.get("subject"),
        message: row.get("message"),
        reply: row.get("reply"),
        status: row.get("status"),
        created_at: row.get("created_at"),
        deleted_at: row.get("deleted_at"),
    }
}

impl<C> Database<Select<By<Vec<Inquiry>, inquiries::Filter>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Inquiry>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Inquiry>, inquiries::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let inquiries::Filter { status } = by.into_inner();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];
        let status_idx = status.as_ref().map(|s| {
            ps.push(s);
            ps.len()
        });

        let sql = format!(
            "SELECT id, email, subject, message, \
                    reply, status, \
                    created_at, deleted_at \
             FROM inquiries \
             WHERE deleted_at IS NULL \
                   {status_filtering} \
             ORDER BY created_at",
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

impl<C> Database<Insert<Inquiry>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Inquiry>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(inquiry): Insert<Inquiry>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(inquiry))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Inquiry>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(inquiry): Update<Inquiry>,
    ) -> Result<Self::Ok, Self::Err> {
        let Inquiry {
            id,
            email,
            subject,
            message,
            reply,
            status,
            created_at,
            deleted_at,
        } = inquiry;

        const SQL: &str = "\
            INSERT INTO inquiries (\
                id, email, subject, message, \
                reply, status, \
                created_at, deleted_at\
            ) \
            VALUES (\
                $1::UUID, \
                $2::VARCHAR, $3::VARCHAR, $4::TEXT, \
                $5::TEXT, $6::INT2, \
                $7::TIMESTAMPTZ, $8::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET email = EXCLUDED.email, \
                subject = EXCLUDED.subject, \
                message = EXCLUDED.message, \
                reply = EXCLUDED.reply, \
                status = EXCLUDED.status, \
                created_at = EXCLUDED.created_at, \
                deleted_at = EXCLUDED.deleted_at";
        self.exec(
            SQL,
            &[
                &id,
                &email,
                &subject,
                &message,
                &reply,
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

impl<C> Database<Perform<inquiry::Answer>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Inquiry>;
    type Err = Traced<database::Error>;

    /// Applies the [`inquiry::Answer`] as a single conditioned write.
    ///
    /// [`None`] is returned when the [`Inquiry`] is absent or not
    /// [`inquiry::Status::Open`] anymore, preventing double-answering.
    async fn execute(
        &self,
        Perform(answer): Perform<inquiry::Answer>,
    ) -> Result<Self::Ok, Self::Err> {
        let inquiry::Answer { id, reply } = answer;

        const SQL: &str = "\
            UPDATE inquiries \
            SET reply = $3::TEXT, \
                status = $4::INT2 \
            WHERE id = $1::UUID \
              AND status = $2::INT2 \
              AND deleted_at IS NULL \
            RETURNING id, email, subject, message, \
                      reply, status, \
                      created_at, deleted_at";
        Ok(self
            .query_opt(
                SQL,
                &[
                    &id,
                    &inquiry::Status::Open,
                    &reply,
                    &inquiry::Status::Answered,
                ],
            )
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| from_row(&row)))
    }
}
