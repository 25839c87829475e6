use serde::Deserialize;

use crate::api::bookings::Booking;

#[derive(Deserialize)]
pub(super) struct LoginResponse {
    pub cookie: Option<String>,
}

#[derive(Deserialize)]
pub(super) struct NextBookingsResponse {
    #[serde(rename = "nextClasses", default)]
    pub next_classes: Option<Vec<Booking>>,
}
