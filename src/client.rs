//! The HTTP boundary.
//!
//! [`ApiClient`] owns the reqwest client, the base URL, and the [`Session`]
//! credential. Every request goes through [`ApiClient::send`], which
//! attaches the bearer token when one is held and maps transport failures
//! and non-2xx statuses onto [`ApiError`] before anything is decoded.
//! Enveloped and bare (non-enveloped) endpoints get separate decode paths,
//! so the dual-casing quirk never leaks past this module.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::envelope::{Ack, Envelope};
use crate::errors::ApiError;
use crate::models::RecordId;
use crate::session::Session;

/// Authenticated client for one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    session: Session,
}

impl ApiClient {
    /// Build a client for `base_url`, attaching `session`'s token to every
    /// request that is sent while the session holds one.
    pub fn new(base_url: &str, session: Session) -> Result<Self, ApiError> {
        // A trailing slash makes Url::join treat the last segment as a
        // directory rather than replacing it.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base = Url::parse(&normalized)
            .map_err(|e| ApiError::decode("base url", e.to_string()))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base,
            session,
        })
    }

    /// The session this client reads its credential from.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::decode(path.to_string(), e.to_string()))
    }

    /// Send a request, attaching the bearer token when present, and map
    /// transport errors and non-2xx statuses onto [`ApiError`].
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await.map_err(ApiError::network)?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::unauthorized("Not authorized"));
        }
        if !status.is_success() {
            let message = extract_error_message(response).await;
            return Err(ApiError::backend(status.as_u16(), message));
        }
        Ok(response)
    }

    async fn decode_envelope<T: DeserializeOwned>(
        response: Response,
        context: &str,
    ) -> Result<Envelope<T>, ApiError> {
        let text = response.text().await.map_err(ApiError::network)?;
        serde_json::from_str(&text).map_err(|e| ApiError::decode(context, e.to_string()))
    }

    /// GET an enveloped list.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let response = self.send(self.http.get(self.endpoint(path)?)).await?;
        let envelope: Envelope<Vec<T>> = Self::decode_envelope(response, path).await?;
        Ok(envelope.into_data()?.unwrap_or_default())
    }

    /// GET an enveloped list, with query parameters.
    pub async fn get_list_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Vec<T>, ApiError> {
        let response = self
            .send(self.http.get(self.endpoint(path)?).query(query))
            .await?;
        let envelope: Envelope<Vec<T>> = Self::decode_envelope(response, path).await?;
        Ok(envelope.into_data()?.unwrap_or_default())
    }

    /// GET a bare (non-enveloped) JSON body.
    pub async fn get_bare<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.http.get(self.endpoint(path)?)).await?;
        let text = response.text().await.map_err(ApiError::network)?;
        serde_json::from_str(&text).map_err(|e| ApiError::decode(path, e.to_string()))
    }

    /// POST a JSON body to an enveloped endpoint.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Ack, ApiError> {
        let response = self
            .send(self.http.post(self.endpoint(path)?).json(body))
            .await?;
        let envelope: Envelope<serde_json::Value> = Self::decode_envelope(response, path).await?;
        envelope.into_ack()
    }

    /// POST with the payload's fields as query parameters and an empty
    /// body — the contract the link-table routes expect.
    pub async fn post_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        params: &Q,
    ) -> Result<Ack, ApiError> {
        let response = self
            .send(self.http.post(self.endpoint(path)?).query(params))
            .await?;
        let envelope: Envelope<serde_json::Value> = Self::decode_envelope(response, path).await?;
        envelope.into_ack()
    }

    /// POST a JSON body to a non-enveloped endpoint and decode its reply.
    pub async fn post_json_bare<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .send(self.http.post(self.endpoint(path)?).json(body))
            .await?;
        let text = response.text().await.map_err(ApiError::network)?;
        serde_json::from_str(&text).map_err(|e| ApiError::decode(path, e.to_string()))
    }

    /// PUT a JSON body with `?id=` — the brand update contract.
    pub async fn put_json_by_id<B: Serialize + ?Sized>(
        &self,
        path: &str,
        id: &RecordId,
        body: &B,
    ) -> Result<Ack, ApiError> {
        let response = self
            .send(
                self.http
                    .put(self.endpoint(path)?)
                    .query(&[("id", id.key())])
                    .json(body),
            )
            .await?;
        let envelope: Envelope<serde_json::Value> = Self::decode_envelope(response, path).await?;
        envelope.into_ack()
    }

    /// HTTP DELETE with `?id=`.
    pub async fn delete_by_id(&self, path: &str, id: &RecordId) -> Result<Ack, ApiError> {
        let response = self
            .send(
                self.http
                    .delete(self.endpoint(path)?)
                    .query(&[("id", id.key())]),
            )
            .await?;
        let envelope: Envelope<serde_json::Value> = Self::decode_envelope(response, path).await?;
        envelope.into_ack()
    }

    /// POST to a delete path with `?id=` — the convention several routes
    /// use instead of HTTP DELETE.
    pub async fn post_delete_by_id(&self, path: &str, id: &RecordId) -> Result<Ack, ApiError> {
        let response = self
            .send(
                self.http
                    .post(self.endpoint(path)?)
                    .query(&[("id", id.key())]),
            )
            .await?;
        let envelope: Envelope<serde_json::Value> = Self::decode_envelope(response, path).await?;
        envelope.into_ack()
    }
}

/// Best-effort extraction of the envelope message from an error body.
async fn extract_error_message(response: Response) -> Option<String> {
    let text = response.text().await.ok()?;
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(&text).ok()?;
    envelope.message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization() {
        let session = Session::new();
        let client = ApiClient::new("http://localhost:5000", session.clone()).unwrap();
        assert_eq!(
            client.endpoint("api/v1/Brand/getall").unwrap().as_str(),
            "http://localhost:5000/api/v1/Brand/getall"
        );

        let slashed = ApiClient::new("http://localhost:5000/", session).unwrap();
        assert_eq!(
            slashed.endpoint("api/Model/getModels").unwrap().as_str(),
            "http://localhost:5000/api/Model/getModels"
        );
    }

    #[test]
    fn test_invalid_base_url_is_an_error() {
        assert!(ApiClient::new("not a url", Session::new()).is_err());
    }
}
