use anyhow::Result;
use http_body_util::{BodyExt, Full};
use hyper::{body::Bytes, header, Method, Request, Response, StatusCode};
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// HTTP client for the app under test. Keeps the session cookie between calls
/// the way a browser would.
#[derive(Clone)]
pub struct TestClient {
    base_url: String,
    client: Client<hyper_util::client::legacy::connect::HttpConnector, Full<Bytes>>,
    cookie: Arc<Mutex<Option<String>>>,
}

impl TestClient {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder(TokioExecutor::new()).build_http();
        Self {
            base_url: base_url.to_string(),
            client,
            cookie: Arc::new(Mutex::new(None)),
        }
    }

    /// A client for the same server with its own, empty cookie jar
    pub fn fresh_session(&self) -> Self {
        Self::new(&self.base_url)
    }

    pub fn session_cookie(&self) -> Option<String> {
        self.cookie.lock().clone()
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.send(Method::GET, path, None, Vec::new(), Vec::new()).await
    }

    pub async fn get_with_headers(
        &self,
        path: &str,
        headers: Vec<(&str, &str)>,
    ) -> Result<ApiResponse> {
        self.send(Method::GET, path, None, headers, Vec::new()).await
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<ApiResponse> {
        let body = serde_json::to_vec(body)?;
        self.send(Method::POST, path, Some("application/json"), Vec::new(), body)
            .await
    }

    /// Submit an `application/x-www-form-urlencoded` body
    pub async fn post_form(&self, path: &str, fields: &[(&str, &str)]) -> Result<ApiResponse> {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        self.send(
            Method::POST,
            path,
            Some("application/x-www-form-urlencoded"),
            Vec::new(),
            body.into_bytes(),
        )
        .await
    }

    /// Submit the page form the way the browser does
    pub async fn submit(&self, text: &str, voice: &str, instructions: &str) -> Result<ApiResponse> {
        self.post_form(
            "/",
            &[("text", text), ("voice", voice), ("instructions", instructions)],
        )
        .await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        content_type: Option<&str>,
        headers: Vec<(&str, &str)>,
        body: Vec<u8>,
    ) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        let mut req_builder = Request::builder().method(method).uri(&url);

        if let Some(cookie) = self.cookie.lock().as_ref() {
            req_builder = req_builder.header(header::COOKIE, cookie.as_str());
        }
        if let Some(content_type) = content_type {
            req_builder = req_builder.header(header::CONTENT_TYPE, content_type);
        }
        for (name, value) in headers {
            req_builder = req_builder.header(name, value);
        }

        let request = req_builder.body(Full::new(Bytes::from(body)))?;
        let response = self.client.request(request).await?;

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            let pair = set_cookie.split(';').next().unwrap_or_default().to_string();
            *self.cookie.lock() = Some(pair);
        }

        ApiResponse::from_response(response).await
    }
}

pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Option<Value>,
    pub body_bytes: Vec<u8>,
    pub headers: HashMap<String, String>,
}

impl ApiResponse {
    async fn from_response(response: Response<hyper::body::Incoming>) -> Result<Self> {
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();

        let body_bytes = response.into_body().collect().await?.to_bytes().to_vec();

        let body = if !body_bytes.is_empty() {
            serde_json::from_slice(&body_bytes).ok()
        } else {
            None
        };

        Ok(Self {
            status,
            body,
            body_bytes,
            headers,
        })
    }

    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {} but got {}. Body: {}",
            expected,
            self.status,
            self.text()
        );
        self
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body_bytes).into_owned()
    }

    /// Assert that the error response contains the expected message
    pub fn assert_error_message(&self, expected_message: &str) -> &Self {
        let message = self
            .body
            .as_ref()
            .and_then(|b| b.get("message"))
            .and_then(|m| m.as_str())
            .expect("Missing message field in error response");

        assert!(
            message.contains(expected_message),
            "Expected error message to contain '{}', but got '{}'",
            expected_message,
            message
        );
        self
    }

    pub fn assert_contains(&self, fragment: &str) -> &Self {
        let text = self.text();
        assert!(
            text.contains(fragment),
            "Expected body to contain '{}'. Body: {}",
            fragment,
            text
        );
        self
    }

    pub fn assert_not_contains(&self, fragment: &str) -> &Self {
        let text = self.text();
        assert!(
            !text.contains(fragment),
            "Expected body not to contain '{}'. Body: {}",
            fragment,
            text
        );
        self
    }

    pub fn header(&self, name: &str) -> Option<&String> {
        self.headers.get(name)
    }

    pub fn assert_header(&self, name: &str, value: &str) -> &Self {
        let actual = self
            .headers
            .get(name)
            .unwrap_or_else(|| panic!("Header '{}' not found", name));
        assert_eq!(actual, value, "Header '{}' value mismatch", name);
        self
    }

    pub fn assert_header_exists(&self, name: &str) -> &Self {
        assert!(
            self.headers.contains_key(name),
            "Header '{}' not found",
            name
        );
        self
    }
}
