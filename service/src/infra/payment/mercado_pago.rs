//! [MercadoPago] [`Gateway`] implementation.
//!
//! [MercadoPago]: https://www.mercadopago.com

use std::{sync::Arc, time::Duration};

use common::operations::{By, Insert, Select};
use derive_more::{Debug, Display, Error as StdError, From};
use rust_decimal::Decimal;
use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use tracerr::Traced;

use crate::{
    domain::{payment, reservation},
    infra::{payment as gateway, Gateway},
};

/// [MercadoPago] [`Gateway`] client.
///
/// [MercadoPago]: https://www.mercadopago.com
#[derive(Clone, Debug)]
pub struct MercadoPago {
    /// Configuration of this client.
    config: Arc<Config>,

    /// HTTP client to perform requests with.
    http: reqwest::Client,
}

/// [`MercadoPago`] client configuration.
#[derive(Debug, SmartDefault)]
pub struct Config {
    /// Base URL of the provider API.
    #[default("https://api.mercadopago.com".to_owned())]
    pub base_url: String,

    /// Access token to authenticate requests with.
    #[debug(skip)]
    #[default(SecretString::from(String::new()))]
    pub access_token: SecretString,

    /// URL the provider should deliver payment notifications to, if any.
    pub notification_url: Option<String>,

    /// Timeout of a single provider request.
    #[default(Duration::from_secs(10))]
    pub timeout: Duration,
}

impl MercadoPago {
    /// Creates a new [`MercadoPago`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// If failed to create the underlying HTTP client.
    pub fn new(config: Config) -> Result<Self, Traced<gateway::Error>> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;
        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }
}

/// Request body of a [`payment::Preference`] registration.
#[derive(Debug, Serialize)]
struct PreferenceRequest<'r> {
    /// Correlation token echoed back in provider callbacks.
    external_reference: reservation::Id,

    /// Items to be paid for.
    items: [PreferenceItem<'r>; 1],

    /// URL to deliver payment notifications to.
    #[serde(skip_serializing_if = "Option::is_none")]
    notification_url: Option<&'r str>,
}

/// Single item of a [`PreferenceRequest`].
#[derive(Debug, Serialize)]
struct PreferenceItem<'r> {
    /// Title shown on the checkout page.
    title: &'r str,

    /// Quantity of the item.
    quantity: u32,

    /// Price of a single item.
    unit_price: Decimal,

    /// Currency of the `unit_price`.
    currency_id: String,
}

/// Response body of a [`payment::Preference`] registration.
#[derive(Debug, Deserialize)]
struct PreferenceResponse {
    /// Provider-assigned ID of the registered preference.
    id: String,

    /// URL of the checkout page.
    init_point: String,
}

/// Response body of a payment record fetch.
#[derive(Debug, Deserialize)]
struct PaymentResponse {
    /// Reported settlement status.
    status: payment::Settlement,

    /// Correlation token provided on preference registration, if any.
    external_reference: Option<String>,
}

impl Gateway<Insert<payment::Preference>> for MercadoPago {
    type Ok = payment::Checkout;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Insert(preference): Insert<payment::Preference>,
    ) -> Result<Self::Ok, Self::Err> {
        let payment::Preference {
            external_reference,
            title,
            total,
        } = preference;

        let url = format!("{}/checkout/preferences", self.config.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(self.config.access_token.expose_secret())
            .json(&PreferenceRequest {
                external_reference,
                items: [PreferenceItem {
                    title: title.as_ref(),
                    quantity: 1,
                    unit_price: total.amount,
                    currency_id: total.currency.to_string(),
                }],
                notification_url: self.config.notification_url.as_deref(),
            })
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        if !response.status().is_success() {
            return Err(tracerr::new!(gateway::Error::from(
                Error::UnexpectedStatus(response.status().as_u16()),
            )));
        }

        let body: PreferenceResponse = response
            .json()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        tracing::debug!(
            preference_id = %body.id,
            "checkout preference registered",
        );

        Ok(payment::Checkout {
            preference_id: body.id.into(),
            url: body.init_point.into(),
        })
    }
}

impl Gateway<Select<By<Option<payment::Record>, payment::Id>>>
    for MercadoPago
{
    type Ok = Option<payment::Record>;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<payment::Record>, payment::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        let url = format!("{}/v1/payments/{id}", self.config.base_url);
        let response = self
            .http
            .get(&url)
            .bearer_auth(self.config.access_token.expose_secret())
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(tracerr::new!(gateway::Error::from(
                Error::UnexpectedStatus(response.status().as_u16()),
            )));
        }

        let body: PaymentResponse = response
            .json()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))
            .map_err(tracerr::map_from)?;

        Ok(Some(payment::Record {
            id,
            external_reference: body
                .external_reference
                .and_then(|r| r.parse().ok()),
            status: body.status,
        }))
    }
}

/// [`MercadoPago`] [`Gateway`] [`Error`].
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// HTTP request to the provider failed.
    #[display("HTTP request to the payment provider failed: {_0}")]
    Request(reqwest::Error),

    /// Provider responded with an unexpected HTTP status.
    #[display("Payment provider responded with HTTP {_0}")]
    UnexpectedStatus(#[error(not(source))] u16),
}
