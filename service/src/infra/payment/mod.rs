//! Payment-provider [`Gateway`] implementations.

pub mod mercado_pago;

use derive_more::{Display, Error as StdError, From};

pub use self::mercado_pago::MercadoPago;

/// Payment-provider operation.
pub use common::Handler as Gateway;

/// [`Gateway`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`MercadoPago`] error.
    MercadoPago(mercado_pago::Error),
}
