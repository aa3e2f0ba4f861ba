//! [`User`]-related [`Database`] implementations.

use common::operations::{By, Insert, Lock, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Constructs a [`User`] from the provided [`Row`].
fn from_row(row: &Row) -> User {
    User {
        id: row.get("id"),
        name: row.get("name"),
        surname: row.get("surname"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        role: row.get("role"),
        phone: row.get("phone"),
        created_at: row.get("created_at"),
        deleted_at: row.get("deleted_at"),
    }
}

impl<C> Database<Select<By<Option<User>, user::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: user::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, surname, \
                   email, password_hash, \
                   role, phone, \
                   created_at, deleted_at \
            FROM users \
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

impl<'e, C> Database<Select<By<Option<User>, &'e user::Email>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, &'e user::Email>>,
    ) -> Result<Self::Ok, Self::Err> {
        let email = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, surname, \
                   email, password_hash, \
                   role, phone, \
                   created_at, deleted_at \
            FROM users \
            WHERE email = $1::VARCHAR \
              AND deleted_at IS NULL \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[&email])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| from_row(&row)))
    }
}

impl<C> Database<Select<By<Vec<User>, user::Role>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<User>, user::Role>>,
    ) -> Result<Self::Ok, Self::Err> {
        let role = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, surname, \
                   email, password_hash, \
                   role, phone, \
                   created_at, deleted_at \
            FROM users \
            WHERE role = $1::INT2 \
              AND deleted_at IS NULL \
            ORDER BY created_at";
        Ok(self
            .query(SQL, &[&role])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<User>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<User>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(user): Insert<User>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(user)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<User>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(user): Update<User>,
    ) -> Result<Self::Ok, Self::Err> {
        let User {
            id,
            name,
            surname,
            email,
            password_hash,
            role,
            phone,
            created_at,
            deleted_at,
        } = user;

        const SQL: &str = "\
            INSERT INTO users (\
                id, name, surname, \
                email, password_hash, \
                role, phone, \
                created_at, deleted_at\
            ) \
            VALUES (\
                $1::UUID, \
                $2::VARCHAR, $3::VARCHAR, \
                $4::VARCHAR, $5::VARCHAR, \
                $6::INT2, $7::VARCHAR, \
                $8::TIMESTAMPTZ, $9::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                surname = EXCLUDED.surname, \
                email = EXCLUDED.email, \
                password_hash = EXCLUDED.password_hash, \
                role = EXCLUDED.role, \
                phone = EXCLUDED.phone, \
                created_at = EXCLUDED.created_at, \
                deleted_at = EXCLUDED.deleted_at";
        self.exec(
            SQL,
            &[
                &id,
                &name,
                &surname,
                &email,
                &password_hash,
                &role,
                &phone,
                &created_at,
                &deleted_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<User, user::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<User, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: user::Id = by.into_inner();

        const SQL: &str = "\
            INSERT INTO users_lock \
            VALUES ($1::UUID) \
            ON CONFLICT (id) DO NOTHING";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
