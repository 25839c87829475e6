use reqwest::Method;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::api::api_client::ApiClient;
use crate::api::error::Error;
use crate::api::http_send::HttpSend;
use crate::api::responses::NextBookingsResponse;

const NEXT_BOOKINGS_ENDPOINT: &str = "nextBookings";

/// A class reservation in a box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    /// Time window of the class, e.g. `9:00 - 10:00`.
    pub time: String,
    pub class_name: String,
    pub box_name: String,
    pub box_pic: String,
    pub coach_name: String,
    pub book_state: String,
    /// Position in the waitlist, `-1` when not waitlisted.
    pub waitlist: String,
    pub day: String,
}

/// Class reservations, borrowed from an [`ApiClient`].
pub struct BookingsService<'a, S: HttpSend> {
    client: &'a ApiClient<S>,
}

impl<'a, S: HttpSend> BookingsService<'a, S> {
    pub(super) fn new(client: &'a ApiClient<S>) -> Self {
        Self { client }
    }

    /// Upcoming reservations of the logged in user in `box_id`, in the order
    /// the API lists them.
    pub async fn next(&self, box_id: &str, cancel: &CancellationToken) -> Result<Vec<Booking>, Error> {
        let request = self
            .client
            .new_request(Method::GET, NEXT_BOOKINGS_ENDPOINT, &[("box", box_id)])?;

        let response: NextBookingsResponse = self.client.execute(request, cancel).await?;
        Ok(response.next_classes.unwrap_or_default())
    }
}
