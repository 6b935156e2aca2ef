// Hand-crafted async HTTP client for the shopkeep admin backend.
//
// Base path: /api/
// Auth: Authorization: Bearer <token>, supplied per call by the session layer.

use reqwest::multipart::Form;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;

// ── Error response shape from the backend ────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the shopkeep admin REST API.
///
/// All endpoints live under `/api/`. Resource wrappers are split across
/// the [`crate::endpoints`] modules; this type owns the verb helpers and
/// the uniform response/error handling they share.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config.
    pub fn new(base_url: &str, transport: &crate::TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base URL ends with `/api/` so relative joins work.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        if path.ends_with("/api") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/"));
        }
        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"products/3"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        // base_url always ends with `/api/`, so joining `products/…` works.
        self.base_url
            .join(path)
            .expect("path should be valid relative URL")
    }

    /// Attach the bearer token when one is present.
    fn auth(
        req: reqwest::RequestBuilder,
        token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        match token {
            Some(t) => req.bearer_auth(t),
            None => req,
        }
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        token: Option<&str>,
        path: &str,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let resp = Self::auth(self.http.get(url), token).send().await?;
        Self::handle_response(resp).await
    }

    /// GET a collection, optionally with query parameters.
    ///
    /// A 2xx body that is not a JSON array is coerced to the empty list:
    /// the backend occasionally answers empty collections with an object
    /// envelope, and callers must never mistake that for an error.
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        token: Option<&str>,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, Error> {
        let url = self.url(path);
        debug!("GET {url} params={params:?}");

        let mut req = self.http.get(url);
        if !params.is_empty() {
            req = req.query(params);
        }
        let resp = Self::auth(req, token).send().await?;

        let value: serde_json::Value = Self::handle_response(resp).await?;
        if value.is_array() {
            serde_json::from_value(value.clone()).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: value.to_string(),
            })
        } else {
            Ok(Vec::new())
        }
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        token: Option<&str>,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = Self::auth(self.http.post(url), token)
            .json(body)
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    /// POST with an empty JSON body (relationship-edit endpoints).
    pub(crate) async fn post_empty<T: DeserializeOwned>(
        &self,
        token: Option<&str>,
        path: &str,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = Self::auth(self.http.post(url), token)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        token: Option<&str>,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("PUT {url}");

        let resp = Self::auth(self.http.put(url), token)
            .json(body)
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    /// PUT with query parameters and no body (order status endpoint).
    pub(crate) async fn put_query<T: DeserializeOwned>(
        &self,
        token: Option<&str>,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("PUT {url} params={params:?}");

        let resp = Self::auth(self.http.put(url).query(params), token)
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        token: Option<&str>,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("PATCH {url}");

        let resp = Self::auth(self.http.patch(url), token)
            .json(body)
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn delete(&self, token: Option<&str>, path: &str) -> Result<(), Error> {
        let url = self.url(path);
        debug!("DELETE {url}");

        let resp = Self::auth(self.http.delete(url), token).send().await?;
        Self::handle_empty(resp).await
    }

    /// DELETE that returns a body (relationship removal returns the
    /// updated parent resource).
    pub(crate) async fn delete_with_response<T: DeserializeOwned>(
        &self,
        token: Option<&str>,
        path: &str,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("DELETE {url}");

        let resp = Self::auth(self.http.delete(url), token).send().await?;
        Self::handle_response(resp).await
    }

    /// POST a multipart form. Content-type (with boundary) is derived by
    /// reqwest; no explicit `application/json` header on this path.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        token: Option<&str>,
        path: &str,
        form: Form,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url} (multipart)");

        let resp = Self::auth(self.http.post(url), token)
            .multipart(form)
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    /// POST a multipart form, ignoring any response body.
    pub(crate) async fn post_multipart_no_content(
        &self,
        token: Option<&str>,
        path: &str,
        form: Form,
    ) -> Result<(), Error> {
        let url = self.url(path);
        debug!("POST {url} (multipart)");

        let resp = Self::auth(self.http.post(url), token)
            .multipart(form)
            .send()
            .await?;
        Self::handle_empty(resp).await
    }

    pub(crate) async fn put_multipart<T: DeserializeOwned>(
        &self,
        token: Option<&str>,
        path: &str,
        form: Form,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("PUT {url} (multipart)");

        let resp = Self::auth(self.http.put(url), token)
            .multipart(form)
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                // Truncate on char boundaries, not bytes.
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    /// Normalize a non-2xx response: prefer the structured `{message}`
    /// body, fall back to the status line when the body is opaque.
    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| status.to_string());

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_api_suffix() {
        let client =
            ApiClient::from_reqwest("http://localhost:9000", reqwest::Client::new()).unwrap();
        assert_eq!(client.url("products").as_str(), "http://localhost:9000/api/products");
    }

    #[test]
    fn base_url_with_api_path_is_kept() {
        let client =
            ApiClient::from_reqwest("http://localhost:9000/api/", reqwest::Client::new()).unwrap();
        assert_eq!(
            client.url("orders/all").as_str(),
            "http://localhost:9000/api/orders/all"
        );
    }
}
