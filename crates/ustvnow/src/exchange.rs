//! Recorded HTTP request/response pairs used for diagnostics.

use reqwest::{Client, Method, Request, StatusCode, header::HeaderMap};
use std::fmt;
use url::Url;

/// Query parameters whose values are masked when an exchange is displayed.
const REDACTED_PARAMS: [&str; 2] = ["password", "token"];

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
}

#[derive(Debug, Clone)]
pub struct RecordedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Body exactly as received.
    pub body: String,
}

/// A single request and, when the server answered, its response.
#[derive(Debug, Clone)]
pub struct HttpExchange {
    pub request: RecordedRequest,
    pub response: Option<RecordedResponse>,
}

impl HttpExchange {
    /// Send `request` and read the whole body.
    ///
    /// The response is always consumed so the connection goes back to the
    /// pool. On transport failure the error message is returned together with
    /// the exchange recorded so far (request only).
    pub(crate) async fn send(
        client: &Client,
        request: Request,
    ) -> Result<HttpExchange, (String, HttpExchange)> {
        let recorded = RecordedRequest {
            method: request.method().clone(),
            url: request.url().clone(),
            headers: request.headers().clone(),
        };

        let response = match client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                return Err((
                    e.to_string(),
                    HttpExchange {
                        request: recorded,
                        response: None,
                    },
                ));
            }
        };

        let status = response.status();
        let headers = response.headers().clone();
        match response.text().await {
            Ok(body) => Ok(HttpExchange {
                request: recorded,
                response: Some(RecordedResponse {
                    status,
                    headers,
                    body,
                }),
            }),
            Err(e) => Err((
                format!("failed to read response body: {e}"),
                HttpExchange {
                    request: recorded,
                    response: None,
                },
            )),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.response.as_ref().map(|r| r.status)
    }

    pub fn body(&self) -> &str {
        self.response.as_ref().map_or("", |r| r.body.as_str())
    }

    pub(crate) fn is_success(&self) -> bool {
        self.status().is_some_and(|s| s.is_success())
    }

    /// Human readable request part, with credentials masked.
    pub fn request_text(&self) -> String {
        let req = &self.request;
        let mut out = format!("{} {}", req.method, redacted(&req.url));
        for (name, value) in &req.headers {
            out.push_str(&format!("\n{}: {}", name, value.to_str().unwrap_or("<binary>")));
        }
        out
    }

    /// Human readable response part, `None` when nothing was received.
    pub fn response_text(&self) -> Option<String> {
        let resp = self.response.as_ref()?;
        let mut out = format!(
            "{} {}",
            resp.status.as_u16(),
            resp.status.canonical_reason().unwrap_or("")
        );
        for (name, value) in &resp.headers {
            out.push_str(&format!("\n{}: {}", name, value.to_str().unwrap_or("<binary>")));
        }
        if !resp.body.is_empty() {
            out.push_str("\n\n");
            out.push_str(&resp.body);
        }
        Some(out)
    }
}

impl fmt::Display for HttpExchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.request_text())?;
        match self.response_text() {
            Some(text) => write!(f, "\n\n{text}"),
            None => write!(f, "\n\n<no response>"),
        }
    }
}

fn redacted(url: &Url) -> String {
    if url.query().is_none() {
        return url.to_string();
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if REDACTED_PARAMS.contains(&k.as_ref()) {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();
    let mut masked = url.clone();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}
