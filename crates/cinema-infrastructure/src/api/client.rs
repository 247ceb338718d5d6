use cinema_core::api::ApiResult;
use cinema_core::config::ClientConfig;
use cinema_core::store::SessionStore;
use cinema_core::{CinemaError, RequestError};
use reqwest::multipart::Form;
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Request payload encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    /// Text form fields, sent as `multipart/form-data`
    Multipart(Vec<(String, String)>),
    None,
}

impl RequestBody {
    /// Builds a multipart body from `(name, value)` pairs.
    pub fn form<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::Multipart(
            fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        )
    }

    pub fn json<T: serde::Serialize>(body: &T) -> ApiResult<Self> {
        serde_json::to_value(body).map(Self::Json).map_err(|e| {
            tracing::error!("[ApiClient] Failed to encode request body: {}", e);
            RequestError {
                status: None,
                message: format!("invalid request body: {}", e),
            }
        })
    }
}

/// REST client for the catalog backend and the chat service.
///
/// Every failure is normalized into a [`RequestError`]: HTTP error statuses
/// carry the server's message, transport failures carry no status.
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    api_base: Url,
    chat_base: Url,
    session_store: Option<Arc<dyn SessionStore>>,
}

impl HttpApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, CinemaError> {
        let config = config.clone().normalized();
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| CinemaError::config(format!("Failed to build HTTP client: {}", e)))?;

        let parse_base = |name: &str, raw: &str| {
            Url::parse(raw).map_err(|e| CinemaError::config(format!("Invalid {} '{}': {}", name, raw, e)))
        };

        Ok(Self {
            client,
            api_base: parse_base("api_base_url", &config.api_base_url)?,
            chat_base: parse_base("chat_base_url", &config.chat_base_url)?,
            session_store: None,
        })
    }

    /// Attaches the stored access token to every request as a bearer header.
    pub fn with_session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_str()
    }

    /// Issues a request against the catalog backend and returns the parsed body.
    ///
    /// `path` is a list of segments such as `["api", "movies", id]`.
    pub async fn request(&self, path: &[&str], method: Method, body: RequestBody) -> ApiResult<Value> {
        self.request_with_query(path, method, &[], body).await
    }

    pub async fn request_with_query(
        &self,
        path: &[&str],
        method: Method,
        query: &[(&str, String)],
        body: RequestBody,
    ) -> ApiResult<Value> {
        let url = endpoint(&self.api_base, path)?;
        self.execute(url, method, query, body)
            .await
            .map(|(_, value)| value)
    }

    /// Like [`request_with_query`](Self::request_with_query), decoding the body into `T`.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        path: &[&str],
        method: Method,
        query: &[(&str, String)],
        body: RequestBody,
    ) -> ApiResult<T> {
        let url = endpoint(&self.api_base, path)?;
        self.fetch_url(url, method, query, body).await
    }

    pub(crate) async fn fetch_chat<T: DeserializeOwned>(
        &self,
        path: &[&str],
        body: RequestBody,
    ) -> ApiResult<T> {
        let url = endpoint(&self.chat_base, path)?;
        self.fetch_url(url, Method::POST, &[], body).await
    }

    async fn fetch_url<T: DeserializeOwned>(
        &self,
        url: Url,
        method: Method,
        query: &[(&str, String)],
        body: RequestBody,
    ) -> ApiResult<T> {
        let (status, value) = self.execute(url.clone(), method, query, body).await?;
        serde_json::from_value(value).map_err(|e| {
            tracing::warn!("[ApiClient] Unexpected response shape from {}: {}", url, e);
            RequestError::generic(status.as_u16())
        })
    }

    async fn execute(
        &self,
        url: Url,
        method: Method,
        query: &[(&str, String)],
        body: RequestBody,
    ) -> ApiResult<(StatusCode, Value)> {
        tracing::debug!("[ApiClient] {} {}", method, url);

        let mut request = self.client.request(method.clone(), url.clone());
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.session_store.as_ref().and_then(|s| s.load_token()) {
            request = request.bearer_auth(token);
        }
        request = match body {
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Multipart(fields) => {
                let form = fields
                    .into_iter()
                    .fold(Form::new(), |form, (name, value)| form.text(name, value));
                request.multipart(form)
            }
            RequestBody::None => request,
        };

        let response = request.send().await.map_err(|e| {
            tracing::warn!("[ApiClient] {} {} failed: {}", method, url, e);
            RequestError::network()
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            tracing::warn!("[ApiClient] Failed to read response from {}: {}", url, e);
            RequestError::network()
        })?;

        if !status.is_success() {
            let err = error_from_body(status.as_u16(), &bytes);
            tracing::debug!("[ApiClient] {} {} -> {}: {}", method, url, status, err.message);
            return Err(err);
        }

        Ok((status, success_body(&bytes)))
    }
}

/// Appends `segments` to `base`, percent-encoding each one so that an id
/// containing `/`, `?` or `#` stays a single path segment.
pub fn endpoint(base: &Url, segments: &[&str]) -> ApiResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| RequestError {
            status: None,
            message: format!("invalid base url: {}", base),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Parses a successful body. Empty bodies become `null`; non-JSON text is
/// returned as a string.
fn success_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// Normalizes a non-2xx response into a [`RequestError`].
///
/// The message comes from `detail`, then `message`, then `msg`. A validation
/// `detail` list uses its first entry's `msg`. Bodies that are not JSON or
/// carry none of these fields produce the generic fallback.
pub fn error_from_body(status: u16, body: &[u8]) -> RequestError {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| error_message(&value))
        .map(|message| RequestError::http(status, message))
        .unwrap_or_else(|| RequestError::generic(status))
}

fn error_message(value: &Value) -> Option<String> {
    if let Some(detail) = value.get("detail") {
        let found = match detail {
            Value::Array(items) => items.first().and_then(|item| text_of(item.get("msg"))),
            Value::Object(_) => text_of(detail.get("msg")).or_else(|| text_of(detail.get("message"))),
            other => text_of(Some(other)),
        };
        if found.is_some() {
            return found;
        }
    }
    message_field(value)
}

/// Reads the human-readable `message` or `msg` field of a JSON body.
pub fn message_field(value: &Value) -> Option<String> {
    text_of(value.get("message")).or_else(|| text_of(value.get("msg")))
}

fn text_of(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
