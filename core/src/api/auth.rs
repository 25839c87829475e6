use reqwest::Method;
use tokio_util::sync::CancellationToken;

use crate::api::api_client::ApiClient;
use crate::api::error::Error;
use crate::api::http_send::HttpSend;
use crate::api::responses::LoginResponse;

const LOGIN_ENDPOINT: &str = "login";

impl<S: HttpSend> ApiClient<S> {
    /// Logs in with mail and password and keeps the returned session token.
    ///
    /// The token is only replaced when the API hands out a non empty one.
    pub async fn sign_in(&self, mail: &str, password: &str, cancel: &CancellationToken) -> Result<(), Error> {
        let request = self.new_request(
            Method::GET,
            LOGIN_ENDPOINT,
            &[("mail", mail), ("pw", password)],
        )?;

        let response: LoginResponse = self.execute(request, cancel).await?;
        let token = response
            .cookie
            .filter(|cookie| !cookie.is_empty())
            .ok_or(Error::MissingAuthToken)?;

        self.set_auth_token(token);
        Ok(())
    }
}
