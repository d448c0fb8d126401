use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use super::{AccountRecord, IdentityError, IdentityService};

const ADMIN_USERS_PATH: [&str; 4] = ["auth", "v1", "admin", "users"];
/// Upstream error pages are kept up to this many characters.
const MAX_ERROR_BODY_CHARS: usize = 4096;

/// The admin listing either answers a bare array or GoTrue's
/// `{ "users": [...], "aud": ... }` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum UserListBody {
    Bare(Vec<AccountRecord>),
    Wrapped {
        #[serde(default)]
        users: Vec<AccountRecord>,
    },
}

impl From<UserListBody> for Vec<AccountRecord> {
    fn from(body: UserListBody) -> Self {
        match body {
            UserListBody::Bare(users) | UserListBody::Wrapped { users } => users,
        }
    }
}

#[derive(Clone)]
pub struct GoTrueAdminClient {
    client: Client,
    base_url: Url,
    service_key: String,
}

impl GoTrueAdminClient {
    pub fn new(base_url: &str, service_key: impl Into<String>) -> Result<Self, IdentityError> {
        let base_url =
            Url::parse(base_url).map_err(|err| IdentityError::InvalidBaseUrl(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(IdentityError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            client: Client::new(),
            base_url,
            service_key: service_key.into(),
        })
    }

    fn admin_users_url(&self, user_id: Option<&str>) -> Result<Url, IdentityError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| IdentityError::InvalidBaseUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().extend(ADMIN_USERS_PATH);
            if let Some(id) = user_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }
}

async fn ensure_success(response: Response) -> Result<Response, IdentityError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let mut body = response.text().await?;
    if let Some((cut, _)) = body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        body.truncate(cut);
    }
    Err(IdentityError::Status { status, body })
}

#[async_trait]
impl IdentityService for GoTrueAdminClient {
    async fn find_users_by_email(&self, email: &str) -> Result<Vec<AccountRecord>, IdentityError> {
        let url = self.admin_users_url(None)?;
        let response = self
            .authorized(self.client.get(url))
            .query(&[("email", email)])
            .send()
            .await?;
        tracing::debug!(status = %response.status(), "identity lookup answered");

        let body = ensure_success(response).await?.text().await?;
        let users: UserListBody = serde_json::from_str(&body)?;
        Ok(users.into())
    }

    async fn update_password(
        &self,
        user_id: &str,
        new_password: &str,
    ) -> Result<(), IdentityError> {
        let url = self.admin_users_url(Some(user_id))?;
        let response = self
            .authorized(self.client.put(url))
            .json(&json!({ "password": new_password }))
            .send()
            .await?;
        tracing::debug!(status = %response.status(), "identity password update answered");

        ensure_success(response).await?;
        Ok(())
    }
}
