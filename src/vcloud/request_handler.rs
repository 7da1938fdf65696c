use async_trait::async_trait;
use reqwest::{Request, Response};

use crate::vcloud::error::RequestError;

/// Executes a prepared request. The default implementation sends it over
/// the network; tests substitute a scripted one.
#[async_trait]
pub trait RequestHandler {
    async fn handle(&self, request: Request) -> Result<Response, RequestError>;
}

pub struct DefaultRequestHandler {
    inner: reqwest::Client,
}

#[async_trait]
impl RequestHandler for DefaultRequestHandler {
    async fn handle(&self, request: Request) -> Result<Response, RequestError> {
        self.inner.execute(request).await.map_err(RequestError::Request)
    }
}

impl From<reqwest::Client> for DefaultRequestHandler {
    fn from(value: reqwest::Client) -> Self {
        Self { inner: value }
    }
}
