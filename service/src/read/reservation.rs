//! [`Reservation`] read model definition.

#[cfg(doc)]
use crate::domain::{reservation::Status, Reservation};

/// Wrapper around a [`Reservation`] indicating that its [`Status`]
/// [`is_active()`].
///
/// [`is_active()`]: Status::is_active
#[derive(Clone, Copy, Debug)]
pub struct Active<T>(pub T);
