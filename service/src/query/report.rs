//! [`Query`] collection related to reports.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries the [`read::report::MonthlySales`] rows, ascending by month.
pub type MonthlySales =
    DatabaseQuery<By<Vec<read::report::MonthlySales>, ()>>;
