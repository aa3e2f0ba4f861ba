//! [`Command`] definition.

pub mod answer_inquiry;
pub mod authorize_user_session;
pub mod create_inquiry;
pub mod create_reservation;
pub mod create_room;
pub mod create_user;
pub mod create_user_session;
pub mod delete_operator;
pub mod delete_room;
pub mod release_reservation;
pub mod settle_reservation_payment;
pub mod update_operator;
pub mod update_room;
pub mod update_room_status;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    answer_inquiry::AnswerInquiry,
    authorize_user_session::AuthorizeUserSession,
    create_inquiry::CreateInquiry, create_reservation::CreateReservation,
    create_room::CreateRoom, create_user::CreateUser,
    create_user_session::CreateUserSession, delete_operator::DeleteOperator,
    delete_room::DeleteRoom, release_reservation::ReleaseReservation,
    settle_reservation_payment::SettleReservationPayment,
    update_operator::UpdateOperator, update_room::UpdateRoom,
    update_room_status::UpdateRoomStatus,
};
