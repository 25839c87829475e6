use reqwest::Method;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::api::api_client::ApiClient;
use crate::api::error::Error;
use crate::api::http_send::HttpSend;

/// Profile of an Aimharder user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub alias: String,
    pub sex: String,
    #[serde(rename = "userFNac")]
    pub user_f_nac: String,
    pub desc: String,
    pub desc_no_parse: String,
    pub pic: String,
    /// Name of the box the user belongs to.
    #[serde(rename = "box")]
    pub box_name: String,
    pub box_short: String,
    #[serde(rename = "boxID")]
    pub box_id: String,
    pub followers: String,
    pub following: String,
    pub routines: String,
    pub user_mail: String,
    pub user_lang_use: String,
}

impl User {
    /// The API answers `{}` for ids it does not know.
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

/// User lookups, borrowed from an [`ApiClient`].
pub struct UsersService<'a, S: HttpSend> {
    client: &'a ApiClient<S>,
}

impl<'a, S: HttpSend> UsersService<'a, S> {
    pub(super) fn new(client: &'a ApiClient<S>) -> Self {
        Self { client }
    }

    /// The user the session token belongs to.
    pub async fn me(&self, cancel: &CancellationToken) -> Result<User, Error> {
        let user_id = self.client.user_id()?;
        self.get(&user_id, cancel).await
    }

    pub async fn get(&self, user_id: &str, cancel: &CancellationToken) -> Result<User, Error> {
        let request = self
            .client
            .new_request(Method::GET, &format!("user/{user_id}"), &[])?;

        let user: User = self.client.execute(request, cancel).await?;
        if user.is_empty() {
            return Err(Error::NotFound);
        }

        Ok(user)
    }
}
