//! [`Query`] collection related to [`Reservation`]s listing.

use common::operations::By;

use crate::{domain::Reservation, read};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`read::reservation::Active`] [`Reservation`]s, ordered
/// by creation time.
pub type Active =
    DatabaseQuery<By<Vec<read::reservation::Active<Reservation>>, ()>>;
