//! [`Reservation`] definitions.


#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, Date, DateTimeOf, Money};
use derive_more::{Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::{Room, User};
use crate::domain::{payment, room, user};

/// Booking contract linking a [`User`], a [`Room`] and a date range.
#[derive(Clone, Debug)]
pub struct Reservation {
    /// ID of this [`Reservation`].
    ///
    /// Doubles as the correlation token passed to the payment provider and
    /// echoed back in its callbacks.
    pub id: Id,

    /// ID of the [`User`] owning this [`Reservation`].
    pub user_id: user::Id,

    /// ID of the [`Room`] held by this [`Reservation`].
    pub room_id: room::Id,

    /// Check-in [`Date`] of this [`Reservation`].
    pub check_in: Date,

    /// Check-out [`Date`] of this [`Reservation`].
    pub check_out: Date,

    /// Number of [`Guests`] of this [`Reservation`].
    pub guests: Guests,

    /// [`Status`] of this [`Reservation`].
    pub status: Status,

    /// Total price of this [`Reservation`].
    ///
    /// Fixed at creation time and never recomputed.
    pub total: Money,

    /// Payment [`Method`] of this [`Reservation`].
    pub payment_method: Method,

    /// [`DateTime`] when this [`Reservation`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Reservation`] was deleted, if it was.
    pub deleted_at: Option<DeletionDateTime>,
}

/// ID of a [`Reservation`].
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

/// Number of guests of a [`Reservation`].
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
pub struct Guests(i16);

impl Guests {
    /// Creates a new [`Guests`] count if the given `count` is valid.
    #[must_use]
    pub fn new(count: i16) -> Option<Self> {
        (count > 0).then_some(Self(count))
    }
}

impl FromStr for Guests {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse()
            .ok()
            .and_then(Self::new)
            .ok_or("invalid `Guests`")
    }
}

define_kind! {
    #[doc = "Status of a [`Reservation`]."]
    enum Status {
        #[doc = "The [`Reservation`] is created and awaits settlement."]
        Pending = 1,

        #[doc = "The [`Reservation`] payment is approved or the \
                 [`Reservation`] is confirmed by an operator."]
        Confirmed = 2,

        #[doc = "The [`Reservation`] payment is rejected or cancelled."]
        Cancelled = 3,

        #[doc = "The guest has checked in."]
        CheckedIn = 4,

        #[doc = "The [`Reservation`] is released by an operator."]
        CheckedOut = 5,
    }
}

impl Status {
    /// Checks whether this [`Status`] still holds its [`Room`].
    #[must_use]
    pub fn is_active(self) -> bool {
        match self {
            Self::Pending | Self::Confirmed | Self::CheckedIn => true,
            Self::Cancelled | Self::CheckedOut => false,
        }
    }

    /// Checks whether this [`Status`] is terminal.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        match self {
            Self::Cancelled | Self::CheckedOut => true,
            Self::Pending | Self::Confirmed | Self::CheckedIn => false,
        }
    }

    /// Returns the next [`Status`] after the provided payment
    /// [`payment::Settlement`] is reported for a [`Reservation`] in this
    /// [`Status`].
    ///
    /// Only a [`Status::Pending`] [`Reservation`] ever moves, which makes
    /// the transition idempotent under duplicate or out-of-order delivery:
    /// [`None`] means "no transition".
    #[must_use]
    pub fn on_settlement(self, reported: payment::Settlement) -> Option<Self> {
        match self {
            Self::Pending => reported.outcome(),
            Self::Confirmed
            | Self::Cancelled
            | Self::CheckedIn
            | Self::CheckedOut => None,
        }
    }
}

define_kind! {
    #[doc = "Payment method of a [`Reservation`]."]
    enum Method {
        #[doc = "Cash on arrival."]
        Cash = 1,

        #[doc = "Card on arrival."]
        Card = 2,

        #[doc = "Online checkout via the payment provider."]
        MercadoPago = 3,
    }
}

impl Method {
    /// Checks whether this [`Method`] settles through the online payment
    /// provider.
    #[must_use]
    pub fn is_online(self) -> bool {
        match self {
            Self::MercadoPago => true,
            Self::Cash | Self::Card => false,
        }
    }
}

/// Atomic settlement of a [`Reservation`] payment.
///
/// Applied by the storage layer as a single conditioned write: the
/// [`Reservation`] moves `from` → `to` only if its current [`Status`] still
/// equals `from`, so a duplicate callback becomes a no-op instead of a
/// double transition.
#[derive(Clone, Copy, Debug)]
pub struct Settlement {
    /// ID of the [`Reservation`] to settle.
    pub id: Id,

    /// [`Status`] the [`Reservation`] is expected to be in.
    pub from: Status,

    /// [`Status`] the [`Reservation`] transitions to.
    pub to: Status,

    /// Payment [`Method`] to annotate the [`Reservation`] with, if any.
    pub method: Option<Method>,
}

/// [`DateTime`] when a [`Reservation`] was created.
pub type CreationDateTime = DateTimeOf<(Reservation, unit::Creation)>;

/// [`DateTime`] when a [`Reservation`] was deleted.
pub type DeletionDateTime = DateTimeOf<(Reservation, unit::Deletion)>;

#[cfg(test)]
mod spec {
    use crate::domain::payment::Settlement;

    use super::Status;

    #[test]
    fn pending_confirms_on_approval() {
        assert_eq!(
            Status::Pending.on_settlement(Settlement::Approved),
            Some(Status::Confirmed),
        );
    }

    #[test]
    fn pending_cancels_on_rejection() {
        assert_eq!(
            Status::Pending.on_settlement(Settlement::Rejected),
            Some(Status::Cancelled),
        );
        assert_eq!(
            Status::Pending.on_settlement(Settlement::Cancelled),
            Some(Status::Cancelled),
        );
    }

    #[test]
    fn pending_ignores_non_final_settlements() {
        for reported in [
            Settlement::Pending,
            Settlement::Authorized,
            Settlement::InProcess,
            Settlement::InMediation,
            Settlement::Refunded,
            Settlement::ChargedBack,
        ] {
            assert_eq!(Status::Pending.on_settlement(reported), None);
        }
    }

    #[test]
    fn duplicate_delivery_is_a_no_op() {
        // First approval moves `Pending` to `Confirmed`, ...
        let confirmed =
            Status::Pending.on_settlement(Settlement::Approved).unwrap();

        // ... the redelivered approval does not move it again.
        assert_eq!(confirmed.on_settlement(Settlement::Approved), None);
    }

    #[test]
    fn out_of_order_delivery_cannot_revert() {
        for status in [
            Status::Confirmed,
            Status::Cancelled,
            Status::CheckedIn,
            Status::CheckedOut,
        ] {
            assert_eq!(status.on_settlement(Settlement::Rejected), None);
            assert_eq!(status.on_settlement(Settlement::Approved), None);
        }
    }

    #[test]
    fn activity() {
        assert!(Status::Pending.is_active());
        assert!(Status::Confirmed.is_active());
        assert!(Status::CheckedIn.is_active());
        assert!(!Status::Cancelled.is_active());
        assert!(!Status::CheckedOut.is_active());

        assert!(Status::Cancelled.is_terminal());
        assert!(Status::CheckedOut.is_terminal());
        assert!(!Status::Pending.is_terminal());
    }
}
