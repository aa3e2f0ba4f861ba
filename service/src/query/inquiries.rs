//! [`Query`] collection related to [`Inquiry`]s listing.

use common::operations::By;

use crate::domain::{inquiry, Inquiry};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries [`Inquiry`]s matching the provided [`Filter`], ordered by
/// creation time.
pub type List = DatabaseQuery<By<Vec<Inquiry>, Filter>>;

/// Filter for the [`List`] [`Query`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Filter {
    /// [`inquiry::Status`] to filter [`Inquiry`]s by.
    pub status: Option<inquiry::Status>,
}
