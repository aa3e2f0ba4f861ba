//! [`Query`] collection related to [`Room`]s listing.

use common::operations::By;

use crate::domain::{room, Room};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries [`Room`]s matching the provided [`Filter`], ordered by
/// [`room::Number`].
pub type List = DatabaseQuery<By<Vec<Room>, Filter>>;

/// Filter for the [`List`] [`Query`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Filter {
    /// [`room::Status`] to filter [`Room`]s by.
    pub status: Option<room::Status>,
}
