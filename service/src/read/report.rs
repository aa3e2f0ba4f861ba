//! Report read model definitions.

use common::{Date, Money};

#[cfg(doc)]
use crate::domain::{reservation::Status, Reservation};

/// Total of [`Status::Confirmed`] [`Reservation`]s grouped by the calendar
/// month they were created in.
#[derive(Clone, Copy, Debug)]
pub struct MonthlySales {
    /// First day of the month this row aggregates.
    pub month: Date,

    /// Sum of the [`Reservation`] totals of the month.
    pub total: Money,
}
