//! Infrastructure implementations.

pub mod database;
pub mod payment;

#[cfg(feature = "postgres")]
pub use self::database::{postgres, Postgres};
pub use self::{
    database::Database,
    payment::{mercado_pago, Gateway, MercadoPago},
};
