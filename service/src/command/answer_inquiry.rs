//! [`Command`] for answering an [`Inquiry`].

use common::operations::Perform;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{inquiry, Inquiry},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for answering an [`Inquiry`].
///
/// The [`inquiry::Reply`] lands via a single conditioned write succeeding
/// only while the [`Inquiry`] is still [`inquiry::Status::Open`], so a
/// second answer is reported as [`ExecutionError::NotAnswerable`] instead
/// of overwriting the first one.
#[derive(Clone, Debug)]
pub struct AnswerInquiry {
    /// ID of the [`Inquiry`] to answer.
    pub inquiry_id: inquiry::Id,

    /// [`inquiry::Reply`] to answer with.
    pub reply: inquiry::Reply,
}

impl<Db, Gw> Command<AnswerInquiry> for Service<Db, Gw>
where
    Db: Database<
        Perform<inquiry::Answer>,
        Ok = Option<Inquiry>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Inquiry;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AnswerInquiry,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AnswerInquiry { inquiry_id, reply } = cmd;

        self.database()
            .execute(Perform(inquiry::Answer {
                id: inquiry_id,
                reply,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::NotAnswerable(inquiry_id))
            .map_err(tracerr::wrap!())
    }
}

/// Error of [`AnswerInquiry`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Inquiry`] with the provided ID does not exist or is already
    /// answered.
    #[display("`Inquiry(id: {_0})` does not exist or is already answered")]
    #[from(ignore)]
    NotAnswerable(#[error(not(source))] inquiry::Id),
}
