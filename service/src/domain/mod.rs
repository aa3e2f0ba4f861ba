//! Domain definitions.

pub mod inquiry;
pub mod payment;
pub mod reservation;
pub mod room;
pub mod user;

pub use self::{
    inquiry::Inquiry, reservation::Reservation, room::Room, user::User,
};
