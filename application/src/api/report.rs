//! Report REST handlers.

use axum::{Extension, Json};
use serde::Serialize;
use service::{
    domain::user::Role,
    query,
    read::report::MonthlySales,
    Query as _,
};

use crate::{AsError, Error, Service, Session};

/// Serializable representation of a [`MonthlySales`] row.
#[derive(Debug, Serialize)]
pub struct MonthlySalesResponse {
    /// First day of the aggregated month, `YYYY-MM-DD` formatted.
    pub month: String,

    /// Sum of the confirmed reservation totals of the month,
    /// `{amount}{currency}` formatted.
    pub total: String,
}

impl From<MonthlySales> for MonthlySalesResponse {
    fn from(row: MonthlySales) -> Self {
        Self {
            month: row.month.to_iso8601(),
            total: row.total.to_string(),
        }
    }
}

/// `GET /api/admin/reports/monthly-sales` handler.
///
/// Confirmed reservation totals grouped by the calendar month they were
/// created in, ascending.
pub async fn monthly_sales(
    Extension(service): Extension<Service>,
    session: Session,
) -> Result<Json<Vec<MonthlySalesResponse>>, Error> {
    session.require(&[Role::Administrator])?;

    let rows = service
        .execute(query::report::MonthlySales::by(()))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
