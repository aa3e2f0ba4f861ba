//! [`Inquiry`] definitions.


#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user;

/// Contact-form message submitted by a visitor.
#[derive(Clone, Debug)]
pub struct Inquiry {
    /// ID of this [`Inquiry`].
    pub id: Id,

    /// Contact [`user::Email`] to reply to.
    pub email: user::Email,

    /// [`Subject`] of this [`Inquiry`].
    pub subject: Subject,

    /// [`Message`] of this [`Inquiry`].
    pub message: Message,

    /// [`Reply`] of an operator, if any.
    pub reply: Option<Reply>,

    /// [`Status`] of this [`Inquiry`].
    pub status: Status,

    /// [`DateTime`] when this [`Inquiry`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Inquiry`] was deleted, if it was.
    pub deleted_at: Option<DeletionDateTime>,
}

/// ID of an [`Inquiry`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Subject of an [`Inquiry`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Subject(String);

impl Subject {
    /// Creates a new [`Subject`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `subject` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(subject: impl Into<String>) -> Self {
        Self(subject.into())
    }

    /// Creates a new [`Subject`] if the given `subject` is valid.
    #[must_use]
    pub fn new(subject: impl Into<String>) -> Option<Self> {
        let subject = subject.into();
        Self::check(&subject).then_some(Self(subject))
    }

    /// Checks whether the given `subject` is a valid [`Subject`].
    fn check(subject: impl AsRef<str>) -> bool {
        let subject = subject.as_ref();
        subject.trim() == subject
            && !subject.is_empty()
            && subject.len() <= 100
    }
}

impl FromStr for Subject {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Subject`")
    }
}

/// Message of an [`Inquiry`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Message(String);

impl Message {
    /// Creates a new [`Message`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `message` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// Creates a new [`Message`] if the given `message` is valid.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Option<Self> {
        let message = message.into();
        Self::check(&message).then_some(Self(message))
    }

    /// Checks whether the given `message` is a valid [`Message`].
    fn check(message: impl AsRef<str>) -> bool {
        let message = message.as_ref();
        !message.trim().is_empty() && message.len() <= 4096
    }
}

impl FromStr for Message {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Message`")
    }
}

/// Reply of an operator to an [`Inquiry`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Reply(String);

impl Reply {
    /// Creates a new [`Reply`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `reply` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(reply: impl Into<String>) -> Self {
        Self(reply.into())
    }

    /// Creates a new [`Reply`] if the given `reply` is valid.
    #[must_use]
    pub fn new(reply: impl Into<String>) -> Option<Self> {
        let reply = reply.into();
        Self::check(&reply).then_some(Self(reply))
    }

    /// Checks whether the given `reply` is a valid [`Reply`].
    fn check(reply: impl AsRef<str>) -> bool {
        let reply = reply.as_ref();
        !reply.trim().is_empty() && reply.len() <= 4096
    }
}

impl FromStr for Reply {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Reply`")
    }
}

define_kind! {
    #[doc = "Status of an [`Inquiry`]."]
    enum Status {
        #[doc = "The [`Inquiry`] awaits an operator reply."]
        Open = 1,

        #[doc = "The [`Inquiry`] has been answered."]
        Answered = 2,
    }
}

/// Answering of an [`Inquiry`].
///
/// Applied by the storage layer as a single conditioned write: the
/// [`Reply`] lands only if the [`Inquiry`] is still [`Status::Open`],
/// preventing double-answering.
#[derive(Clone, Debug)]
pub struct Answer {
    /// ID of the [`Inquiry`] to answer.
    pub id: Id,

    /// [`Reply`] to answer the [`Inquiry`] with.
    pub reply: Reply,
}

/// [`DateTime`] when an [`Inquiry`] was created.
pub type CreationDateTime = DateTimeOf<(Inquiry, unit::Creation)>;

/// [`DateTime`] when an [`Inquiry`] was deleted.
pub type DeletionDateTime = DateTimeOf<(Inquiry, unit::Deletion)>;
