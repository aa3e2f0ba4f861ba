//! Payment-provider webhook REST handler.

use axum::{extract::Query, Extension, Json};
use http::StatusCode;
use serde::Deserialize;
use service::{
    command::{self, Command as _},
    domain::payment,
};
use tracing as log;

use crate::Service;

/// Query parameters of a provider notification.
///
/// The provider delivers the topic and the payment ID either as query
/// parameters (`?topic=payment&id=…`, `?type=payment&data.id=…`) or
/// inside the JSON body, depending on the notification flavor.
#[derive(Debug, Default, Deserialize)]
pub struct NotificationParams {
    /// Notification topic.
    pub topic: Option<String>,

    /// Notification topic (webhook flavor).
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Provider-assigned payment ID.
    pub id: Option<String>,

    /// Provider-assigned payment ID (webhook flavor).
    #[serde(rename = "data.id")]
    pub data_id: Option<String>,
}

/// `POST /api/payments/notifications` handler.
///
/// Provider-invoked and unauthenticated. Only `payment` topics are
/// processed; everything else is acknowledged and dropped. Internal
/// failures are logged and swallowed: the provider always receives a 200,
/// so it never enters a redelivery storm.
pub async fn notifications(
    Extension(service): Extension<Service>,
    Query(params): Query<NotificationParams>,
    body: Option<Json<serde_json::Value>>,
) -> StatusCode {
    let body = body.map(|Json(v)| v).unwrap_or_default();

    let topic = params
        .topic
        .or(params.kind)
        .or_else(|| value_str(&body, &["type"]))
        .or_else(|| value_str(&body, &["topic"]));
    let payment_id = params
        .data_id
        .or(params.id)
        .or_else(|| value_str(&body, &["data", "id"]));

    let is_payment = topic
        .as_deref()
        .map(str::parse::<payment::Topic>)
        .is_some_and(|t| {
            t.is_ok_and(|topic| matches!(topic, payment::Topic::Payment))
        });
    if !is_payment {
        log::debug!(?topic, "non-payment notification dropped");
        return StatusCode::OK;
    }

    let Some(payment_id) =
        payment_id.and_then(|id| payment::Id::new(id))
    else {
        log::warn!("payment notification without a usable payment id");
        return StatusCode::OK;
    };

    match service
        .execute(command::SettleReservationPayment { payment_id })
        .await
    {
        Ok(Some(reservation)) => {
            log::info!(
                reservation_id = %reservation.id,
                status = %reservation.status,
                "payment notification applied",
            );
        }
        Ok(None) => {
            log::debug!("payment notification caused no transition");
        }
        // Failures are absorbed on purpose: reporting them would only
        // trigger unbounded provider redelivery.
        Err(e) => {
            log::error!("failed to process payment notification: {e}");
        }
    }

    StatusCode::OK
}

/// Extracts a string (or number rendered as a string) at the provided
/// `path` of the JSON `value`.
fn value_str(value: &serde_json::Value, path: &[&str]) -> Option<String> {
    let mut current = value;
    for key in path {
        current = current.get(key)?;
    }
    match current {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Null
        | serde_json::Value::Bool(_)
        | serde_json::Value::Array(_)
        | serde_json::Value::Object(_) => None,
    }
}
