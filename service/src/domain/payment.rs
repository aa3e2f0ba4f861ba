//! Payment-provider definitions.
//!
//! Payments are not persisted as first-class local entities: the provider
//! keeps the authoritative [`Record`], correlated to a [`Reservation`] by
//! its ID travelling as the external reference.

use std::str::FromStr;

use common::Money;
use derive_more::{AsRef, Display, From, Into};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::Reservation;
use crate::domain::reservation;

/// Provider-assigned ID of a payment.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Id(String);

impl Id {
    /// Creates a new [`Id`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `id` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a new [`Id`] if the given `id` is valid.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        Self::check(&id).then_some(Self(id))
    }

    /// Checks whether the given `id` is a valid [`Id`].
    fn check(id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        !id.is_empty() && id.len() <= 64
    }
}

impl FromStr for Id {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Id`")
    }
}

/// Checkout preference to be registered with the payment provider.
#[derive(Clone, Debug)]
pub struct Preference {
    /// ID of the [`Reservation`] to settle, travelling to the provider as
    /// the external reference and echoed back in its callbacks.
    pub external_reference: reservation::Id,

    /// Human-readable [`Title`] shown on the checkout page.
    pub title: Title,

    /// Total amount to be paid.
    pub total: Money,
}

/// Title of a [`Preference`] shown on the provider checkout page.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `title` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        !title.trim().is_empty() && title.len() <= 256
    }
}

/// Redirect handle to the provider checkout page of a registered
/// [`Preference`].
#[derive(Clone, Debug)]
pub struct Checkout {
    /// Provider-assigned ID of the registered [`Preference`].
    pub preference_id: PreferenceId,

    /// URL of the checkout page to redirect the payer to.
    pub url: CheckoutUrl,
}

/// Provider-assigned ID of a registered [`Preference`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, Into, PartialEq)]
#[as_ref(str, String)]
pub struct PreferenceId(String);

/// URL of a provider checkout page.
#[derive(AsRef, Clone, Debug, Display, Eq, From, Into, PartialEq)]
#[as_ref(str, String)]
pub struct CheckoutUrl(String);

/// Authoritative payment record re-fetched from the provider.
///
/// Notification bodies are never trusted: the provider is always asked for
/// the [`Record`] by [`Id`] before any transition is applied.
#[derive(Clone, Debug)]
pub struct Record {
    /// Provider-assigned [`Id`] of this payment.
    pub id: Id,

    /// ID of the [`Reservation`] this payment settles, if the external
    /// reference is present and well-formed.
    pub external_reference: Option<reservation::Id>,

    /// Reported [`Settlement`] status of this payment.
    pub status: Settlement,
}

/// Settlement status of a payment, as reported by the provider.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Eq,
    PartialEq,
    Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Settlement {
    /// The payment has not been processed yet.
    Pending,

    /// The payment is approved and accredited.
    Approved,

    /// The payment is authorized but not captured yet.
    Authorized,

    /// The payment is being processed.
    InProcess,

    /// The payment is in a dispute.
    InMediation,

    /// The payment is rejected.
    Rejected,

    /// The payment is cancelled by either party or on expiration.
    Cancelled,

    /// The payment is refunded to the payer.
    Refunded,

    /// A chargeback was applied on the payer's card.
    ChargedBack,
}

impl Settlement {
    /// Returns the [`reservation::Status`] a [`Settlement`] of a pending
    /// [`Reservation`] results in.
    ///
    /// [`None`] means the payment has not reached a final outcome yet and
    /// no transition is due.
    #[must_use]
    pub fn outcome(self) -> Option<reservation::Status> {
        match self {
            Self::Approved => Some(reservation::Status::Confirmed),
            Self::Rejected | Self::Cancelled => {
                Some(reservation::Status::Cancelled)
            }
            Self::Pending
            | Self::Authorized
            | Self::InProcess
            | Self::InMediation
            | Self::Refunded
            | Self::ChargedBack => None,
        }
    }
}

/// Topic of a provider notification.
#[derive(Clone, Debug, Eq, PartialEq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Topic {
    /// A payment state change: the only topic that is processed.
    Payment,

    /// A merchant-order state change: acknowledged and dropped.
    MerchantOrder,

    /// Any other topic: acknowledged and dropped.
    #[strum(default)]
    Other(String),
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use crate::domain::reservation;

    use super::{Settlement, Topic};

    #[test]
    fn settlement_parses_provider_statuses() {
        assert_eq!(
            Settlement::from_str("approved").unwrap(),
            Settlement::Approved,
        );
        assert_eq!(
            Settlement::from_str("in_process").unwrap(),
            Settlement::InProcess,
        );
        assert_eq!(
            Settlement::from_str("charged_back").unwrap(),
            Settlement::ChargedBack,
        );
        assert!(Settlement::from_str("paid").is_err());
    }

    #[test]
    fn settlement_outcome() {
        assert_eq!(
            Settlement::Approved.outcome(),
            Some(reservation::Status::Confirmed),
        );
        assert_eq!(
            Settlement::Rejected.outcome(),
            Some(reservation::Status::Cancelled),
        );
        assert_eq!(
            Settlement::Cancelled.outcome(),
            Some(reservation::Status::Cancelled),
        );
        assert_eq!(Settlement::Pending.outcome(), None);
        assert_eq!(Settlement::InProcess.outcome(), None);
        assert_eq!(Settlement::Refunded.outcome(), None);
    }

    #[test]
    fn topic_parsing() {
        assert_eq!(Topic::from_str("payment").unwrap(), Topic::Payment);
        assert_eq!(
            Topic::from_str("merchant_order").unwrap(),
            Topic::MerchantOrder,
        );
        assert_eq!(
            Topic::from_str("plan").unwrap(),
            Topic::Other("plan".into()),
        );
    }
}
