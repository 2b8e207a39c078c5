//! HTTP client for the outreach backend.

use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::model::{
    Recipient, RecipientQuery, SendAllPayload, SendNewcomersPayload, SendOutcome,
    SendSelectedPayload, Template, TemplatePayload,
};
use crate::page::{Page, PageFetcher, RawPage};

/// Client for the outreach REST API.
///
/// Holds a connection-pooled [`reqwest::Client`]; cloning is cheap and all
/// methods take `&self`. Authentication headers are expected to be attached
/// by the embedding application (e.g. a default-headers middleware), not
/// here.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Creates a client for the given base URL.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    /// Creates a client reusing an existing [`reqwest::Client`].
    #[must_use]
    pub fn with_http(http: reqwest::Client, mut base_url: Url) -> Self {
        // Endpoint paths are joined relative to the base, which requires a
        // trailing slash to keep the last path segment.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        Self { http, base_url }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Checks the status and decodes the JSON body.
    ///
    /// A non-success status consumes the body looking for a `{"message"}`
    /// field so the caller gets something human-readable.
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::from_response(status.as_u16(), &body));
        }
        Ok(response.json().await?)
    }

    async fn fetch_raw_page<T: DeserializeOwned>(
        &self,
        path: &str,
        page: u32,
        limit: u32,
        query: Option<&RecipientQuery>,
    ) -> Result<Page<T>> {
        let mut request = self
            .http
            .get(self.endpoint(path)?)
            .query(&[("page", page), ("limit", limit)]);
        if let Some(query) = query {
            request = request.query(query);
        }

        debug!(path, page, limit, "fetching page");
        let raw: RawPage<T> = Self::read_json(request.send().await?).await?;
        Ok(raw.into_page(page, limit))
    }

    /// Fetches one page of the recipient directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn list_recipients(
        &self,
        page: u32,
        limit: u32,
        query: &RecipientQuery,
    ) -> Result<Page<Recipient>> {
        self.fetch_raw_page("users", page, limit, Some(query)).await
    }

    /// Fetches one page of the template library.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn list_templates(&self, page: u32, limit: u32) -> Result<Page<Template>> {
        self.fetch_raw_page("email-templates", page, limit, None)
            .await
    }

    /// Creates a new template.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn create_template(&self, payload: &TemplatePayload) -> Result<Template> {
        let response = self
            .http
            .post(self.endpoint("email-templates")?)
            .json(payload)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Updates an existing template.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn update_template(&self, id: &str, payload: &TemplatePayload) -> Result<Template> {
        let response = self
            .http
            .patch(self.endpoint(&format!("email-templates/{id}"))?)
            .json(payload)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Deletes a template.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn delete_template(&self, id: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.endpoint(&format!("email-templates/{id}"))?)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::from_response(status.as_u16(), &body));
        }
        Ok(())
    }

    /// Sends a campaign to every current recipient.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn send_all(&self, payload: &SendAllPayload) -> Result<SendOutcome> {
        let response = self
            .http
            .post(self.endpoint("email/send-all")?)
            .json(payload)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Sends a campaign to an explicit list of recipients.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn send_selected(&self, payload: &SendSelectedPayload) -> Result<SendOutcome> {
        let response = self
            .http
            .post(self.endpoint("email/send-selected")?)
            .json(payload)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Sends a campaign to recipients reached within the payload's window.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn send_newcomers(&self, payload: &SendNewcomersPayload) -> Result<SendOutcome> {
        let response = self
            .http
            .post(self.endpoint("email/send-newcomers")?)
            .json(payload)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Returns a [`PageFetcher`] over the recipient directory with the given
    /// filters baked in.
    #[must_use]
    pub const fn recipient_pages(&self, query: RecipientQuery) -> RecipientPages<'_> {
        RecipientPages {
            client: self,
            query,
        }
    }

    /// Returns a [`PageFetcher`] over the template library.
    #[must_use]
    pub const fn template_pages(&self) -> TemplatePages<'_> {
        TemplatePages { client: self }
    }
}

/// [`PageFetcher`] over `GET /users` with a fixed filter set.
#[derive(Debug, Clone)]
pub struct RecipientPages<'a> {
    client: &'a ApiClient,
    query: RecipientQuery,
}

impl PageFetcher<Recipient> for RecipientPages<'_> {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<Page<Recipient>> {
        self.client.list_recipients(page, limit, &self.query).await
    }
}

/// [`PageFetcher`] over `GET /email-templates`.
#[derive(Debug, Clone, Copy)]
pub struct TemplatePages<'a> {
    client: &'a ApiClient,
}

impl PageFetcher<Template> for TemplatePages<'_> {
    async fn fetch_page(&self, page: u32, limit: u32) -> Result<Page<Template>> {
        self.client.list_templates(page, limit).await
    }
}
