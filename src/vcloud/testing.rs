//! Scripted request handler for exercising the client without a vCloud endpoint.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use http::Method;
use reqwest::{Request, Response, Url};

use crate::config::ConnectionConfig;
use crate::vcloud::error::RequestError;
use crate::vcloud::request_handler::RequestHandler;

pub fn connection_config() -> ConnectionConfig {
    ConnectionConfig {
        url: Url::parse("https://vcd.example.com").unwrap(),
        username: "alice".to_string(),
        password: "secret".to_string(),
        organization: "Acme".to_string(),
        data_center: "dallas".to_string(),
        catalog: Some("Backups".to_string()),
        api_version: "1.5".to_string(),
        timeout: Duration::from_secs(60),
        accept_invalid_certs: false,
    }
}

#[derive(Clone)]
struct Canned {
    status: u16,
    body: String,
    headers: Vec<(String, String)>,
}

struct Route {
    method: Method,
    path: String,
    responses: VecDeque<Canned>,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
    }

    pub fn path(&self) -> String {
        Url::parse(&self.url).map(|url| url.path().to_string()).unwrap_or_default()
    }
}

#[derive(Default)]
struct Script {
    routes: Vec<Route>,
    requests: Vec<RecordedRequest>,
}

/// Answers requests by method and URL path. Responses registered for the
/// same route are returned in order; the last one repeats.
#[derive(Clone, Default)]
pub struct ScriptedRequestHandler {
    script: Arc<Mutex<Script>>,
}

impl ScriptedRequestHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, method: Method, path: &str, status: u16, body: impl Into<String>) -> Self {
        self.push(method, path, Canned { status, body: body.into(), headers: Vec::new() })
    }

    pub fn respond_with_header(self, method: Method, path: &str, status: u16, body: impl Into<String>, header: &str, value: &str) -> Self {
        self.push(method, path, Canned {
            status,
            body: body.into(),
            headers: vec![(header.to_string(), value.to_string())],
        })
    }

    fn push(self, method: Method, path: &str, canned: Canned) -> Self {
        {
            let mut script = self.script.lock().unwrap();
            match script.routes.iter_mut().find(|route| route.method == method && route.path == path) {
                Some(route) => route.responses.push_back(canned),
                None => script.routes.push(Route {
                    method,
                    path: path.to_string(),
                    responses: VecDeque::from([canned]),
                }),
            }
        }
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.script.lock().unwrap().requests.clone()
    }

    pub fn paths_called(&self, method: &Method) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|request| &request.method == method)
            .map(|request| request.path())
            .collect()
    }
}

#[async_trait]
impl RequestHandler for ScriptedRequestHandler {
    async fn handle(&self, request: Request) -> Result<Response, RequestError> {
        let recorded = RecordedRequest {
            method: request.method().clone(),
            url: request.url().to_string(),
            headers: request.headers().iter()
                .map(|(key, value)| (key.as_str().to_string(), value.to_str().unwrap_or_default().to_string()))
                .collect(),
            body: request.body()
                .and_then(|body| body.as_bytes())
                .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                .unwrap_or_default(),
        };

        let canned = {
            let mut script = self.script.lock().unwrap();
            let path = request.url().path().to_string();
            let canned = script.routes.iter_mut()
                .find(|route| route.method == recorded.method && route.path == path)
                .and_then(|route| {
                    if route.responses.len() > 1 {
                        route.responses.pop_front()
                    } else {
                        route.responses.front().cloned()
                    }
                });
            script.requests.push(recorded);
            canned.unwrap_or(Canned {
                status: 404,
                body: format!("no scripted response for {path}"),
                headers: Vec::new(),
            })
        };

        let mut builder = http::Response::builder().status(canned.status);
        for (key, value) in &canned.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        Ok(Response::from(builder.body(canned.body).unwrap()))
    }
}
