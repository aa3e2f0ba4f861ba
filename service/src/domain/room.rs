//! [`Room`] definitions.


#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bookable hotel room.
#[derive(Clone, Debug)]
pub struct Room {
    /// ID of this [`Room`].
    pub id: Id,

    /// Unique [`Number`] of this [`Room`].
    pub number: Number,

    /// [`Category`] of this [`Room`].
    pub category: Category,

    /// Nightly price of this [`Room`].
    pub price_per_night: Money,

    /// [`Status`] of this [`Room`].
    ///
    /// The single source of truth for bookability.
    pub status: Status,

    /// [`DateTime`] when this [`Room`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Room`] was deleted, if it was.
    pub deleted_at: Option<DeletionDateTime>,
}

/// ID of a [`Room`].
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

/// Unique door number of a [`Room`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Number(i32);

impl Number {
    /// Creates a new [`Number`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: i32) -> Option<Self> {
        (number > 0).then_some(Self(number))
    }
}

impl FromStr for Number {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse()
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Number`")
    }
}

/// Category (type) of a [`Room`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Category(String);

impl Category {
    /// Creates a new [`Category`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `category` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(category: impl Into<String>) -> Self {
        Self(category.into())
    }

    /// Creates a new [`Category`] if the given `category` is valid.
    #[must_use]
    pub fn new(category: impl Into<String>) -> Option<Self> {
        let category = category.into();
        Self::check(&category).then_some(Self(category))
    }

    /// Checks whether the given `category` is a valid [`Category`].
    fn check(category: impl AsRef<str>) -> bool {
        let category = category.as_ref();
        category.trim() == category
            && !category.is_empty()
            && category.len() <= 50
    }
}

impl FromStr for Category {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Category`")
    }
}

define_kind! {
    #[doc = "Status of a [`Room`]."]
    enum Status {
        #[doc = "The [`Room`] is free to be booked."]
        Available = 1,

        #[doc = "The [`Room`] is held by an active reservation."]
        Occupied = 2,

        #[doc = "The [`Room`] is being cleaned."]
        Cleaning = 3,

        #[doc = "The [`Room`] is closed for maintenance or season."]
        Closed = 4,
    }
}

impl Status {
    /// Checks whether this [`Status`] may be set by a manual operator
    /// override.
    ///
    /// [`Status::Occupied`] is never settable manually: it is a derived
    /// consequence of an active reservation only.
    #[must_use]
    pub fn is_manually_settable(self) -> bool {
        match self {
            Self::Available | Self::Cleaning | Self::Closed => true,
            Self::Occupied => false,
        }
    }
}

/// [`DateTime`] when a [`Room`] was created.
pub type CreationDateTime = DateTimeOf<(Room, unit::Creation)>;

/// [`DateTime`] when a [`Room`] was deleted.
pub type DeletionDateTime = DateTimeOf<(Room, unit::Deletion)>;

#[cfg(test)]
mod spec {
    use super::{Number, Status};

    #[test]
    fn occupied_is_not_manually_settable() {
        assert!(Status::Available.is_manually_settable());
        assert!(Status::Cleaning.is_manually_settable());
        assert!(Status::Closed.is_manually_settable());
        assert!(!Status::Occupied.is_manually_settable());
    }

    #[test]
    fn number_validation() {
        assert_eq!(Number::new(12).map(i32::from), Some(12));
        assert!(Number::new(0).is_none());
        assert!(Number::new(-3).is_none());

        assert!("12".parse::<Number>().is_ok());
        assert!("0".parse::<Number>().is_err());
        assert!("twelve".parse::<Number>().is_err());
    }
}
