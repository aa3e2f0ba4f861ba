//! [`Inquiry`]-related REST handlers.

use axum::{extract::Path, Extension, Json};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use service::{
    command::{self, Command as _},
    domain::{inquiry, user, user::Role, Inquiry},
    query, Query as _,
};
use uuid::Uuid;

use crate::{api, define_error, AsError, Error, Service, Session};

/// Serializable representation of an [`Inquiry`].
#[derive(Debug, Serialize)]
pub struct InquiryResponse {
    /// ID of the inquiry.
    pub id: inquiry::Id,

    /// Contact email to reply to.
    pub email: String,

    /// Subject of the inquiry.
    pub subject: String,

    /// Message of the inquiry.
    pub message: String,

    /// Operator reply, if any.
    pub reply: Option<String>,

    /// Status of the inquiry.
    pub status: String,

    /// RFC 3339 timestamp of the inquiry creation.
    pub created_at: String,
}

impl From<Inquiry> for InquiryResponse {
    fn from(inquiry: Inquiry) -> Self {
        Self {
            id: inquiry.id,
            email: inquiry.email.to_string(),
            subject: inquiry.subject.to_string(),
            message: inquiry.message.to_string(),
            reply: inquiry.reply.map(|r| r.to_string()),
            status: inquiry.status.to_string(),
            created_at: inquiry.created_at.to_rfc3339(),
        }
    }
}

/// Request body of the inquiry creation endpoint.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    /// Contact email to reply to.
    pub email: String,

    /// Subject of a new inquiry.
    pub subject: String,

    /// Message of a new inquiry.
    pub message: String,
}

/// Request body of the inquiry answering endpoint.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// Reply to answer the inquiry with.
    pub reply: String,
}

/// `POST /api/user/inquiries` handler: public contact form.
pub async fn create(
    Extension(service): Extension<Service>,
    Json(req): Json<CreateRequest>,
) -> Result<(StatusCode, Json<InquiryResponse>), Error> {
    let CreateRequest {
        email,
        subject,
        message,
    } = req;

    let inquiry = service
        .execute(command::CreateInquiry {
            email: api::parse::<user::Email>("email", &email)?,
            subject: api::parse::<inquiry::Subject>("subject", &subject)?,
            message: api::parse::<inquiry::Message>("message", &message)?,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok((StatusCode::CREATED, Json(inquiry.into())))
}

/// `GET /api/operator/inquiries` handler: open inquiries awaiting a reply.
pub async fn list_open(
    Extension(service): Extension<Service>,
    session: Session,
) -> Result<Json<Vec<InquiryResponse>>, Error> {
    session.require(&[Role::Operator, Role::Administrator])?;

    let inquiries = service
        .execute(query::inquiries::List::by(query::inquiries::Filter {
            status: Some(inquiry::Status::Open),
        }))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(inquiries.into_iter().map(Into::into).collect()))
}

/// `PUT /api/operator/inquiries/:id/answer` handler.
///
/// Succeeds only while the inquiry is still open: a second answer reports
/// not-found instead of overwriting the first one.
pub async fn answer(
    Extension(service): Extension<Service>,
    session: Session,
    Path(id): Path<Uuid>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<InquiryResponse>, Error> {
    session.require(&[Role::Operator, Role::Administrator])?;

    let reply = api::parse::<inquiry::Reply>("reply", &req.reply)?;

    let inquiry = service
        .execute(command::AnswerInquiry {
            inquiry_id: id.into(),
            reply,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(inquiry.into()))
}

impl AsError for command::create_inquiry::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

impl AsError for command::answer_inquiry::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotAnswerable(_) => {
                Some(InquiryApiError::NotAnswerable.into())
            }
        }
    }
}

define_error! {
    enum InquiryApiError {
        #[code = "INQUIRY_NOT_ANSWERABLE"]
        #[status = NOT_FOUND]
        #[message = "Inquiry not found or already answered"]
        NotAnswerable,
    }
}
