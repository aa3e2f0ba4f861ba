//! [`Command`] for creating a new [`Inquiry`].

use common::{
    operations::{Commit, Insert, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::user::Email;
use crate::{
    domain::{inquiry, user, Inquiry},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Inquiry`].
#[derive(Clone, Debug)]
pub struct CreateInquiry {
    /// Contact [`Email`] to reply to.
    pub email: user::Email,

    /// [`inquiry::Subject`] of a new [`Inquiry`].
    pub subject: inquiry::Subject,

    /// [`inquiry::Message`] of a new [`Inquiry`].
    pub message: inquiry::Message,
}

impl<Db, Gw> Command<CreateInquiry> for Service<Db, Gw>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Inquiry>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Inquiry;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateInquiry,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateInquiry {
            email,
            subject,
            message,
        } = cmd;

        let inquiry = Inquiry {
            id: inquiry::Id::new(),
            email,
            subject,
            message,
            reply: None,
            status: inquiry::Status::Open,
            created_at: DateTime::now().coerce(),
            deleted_at: None,
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(inquiry.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(inquiry)
    }
}

/// Error of [`CreateInquiry`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
