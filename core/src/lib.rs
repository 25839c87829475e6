//! # Aimharder Core SDK
//!
//! Typed client for the Aimharder external API: log in, look up users and
//! list upcoming class reservations.

mod api;

pub use api::{
    ApiClient, Booking, BookingsService, ClientConfig, DefaultSender, Error, HttpSend, User, UsersService,
    DEFAULT_BASE_URL, DEFAULT_LOG_TARGET, DEFAULT_USER_AGENT,
};
pub use tokio_util::sync::CancellationToken;
