//! Canned HTTP transport for unit tests.

use async_trait::async_trait;
use http_client::{Error, HttpClient, Request, Response};
use http_types::StatusCode;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum Reply {
    Body { status: u16, body: Vec<u8> },
    Fail,
}

/// Answers every request with the same reply and records the requested URLs.
#[derive(Debug, Clone)]
pub struct FakeHttpClient {
    reply: Reply,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeHttpClient {
    pub fn json(status: u16, body: &str) -> Self {
        Self::bytes(status, body.as_bytes().to_vec())
    }

    pub fn bytes(status: u16, body: Vec<u8>) -> Self {
        Self {
            reply: Reply::Body { status, body },
            requests: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: Reply::Fail,
            requests: Arc::default(),
        }
    }

    pub fn requests(&self) -> Arc<Mutex<Vec<String>>> {
        self.requests.clone()
    }
}

#[async_trait]
impl HttpClient for FakeHttpClient {
    async fn send(&self, req: Request) -> Result<Response, Error> {
        self.requests.lock().unwrap().push(req.url().to_string());
        match &self.reply {
            Reply::Fail => Err(Error::from_str(
                StatusCode::BadGateway,
                "connection refused",
            )),
            Reply::Body { status, body } => {
                let mut response = Response::new(*status);
                response.set_body(body.clone());
                Ok(response)
            }
        }
    }
}
