//! [`Query`] collection related to [`User`]s listing.

use common::operations::By;

use crate::domain::{user, User};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`User`]s of a specific [`user::Role`], ordered by
/// creation time.
pub type ByRole = DatabaseQuery<By<Vec<User>, user::Role>>;
