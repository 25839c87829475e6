//! Aimharder external API client and its endpoints

mod api_client;
mod auth;
mod bookings;
mod config;
mod envelope;
mod error;
mod http_send;
mod responses;
mod users;

#[cfg(test)]
mod mock_sender;
#[cfg(test)]
mod auth_tests;

pub use api_client::ApiClient;
pub use bookings::{Booking, BookingsService};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_LOG_TARGET, DEFAULT_USER_AGENT};
pub use error::Error;
pub use http_send::{DefaultSender, HttpSend};
pub use users::{User, UsersService};
