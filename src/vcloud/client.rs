use std::sync::RwLock;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use http::{header, HeaderMap, HeaderValue, Method};
use reqwest::{Body, Request, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::ConnectionConfig;
use crate::error::{InventoryError, Result};
use crate::vcloud::error::RequestError;
use crate::vcloud::request_handler::{DefaultRequestHandler, RequestHandler};
use crate::vcloud::types::{
    from_xml, media_type, to_xml, CatalogItem, CatalogItemParams, CaptureVAppParams, Org, OrgList,
    Reference, Session, Task, VApp, VAppTemplate, Vdc,
};
use crate::vcloud::{routes, PowerAction};

/// Header carrying the session token issued at login.
pub const AUTHORIZATION_TOKEN_HEADER: &str = "x-vcloud-authorization";

#[async_trait]
pub trait Client {
    async fn login(&self) -> Result<Session>;
    async fn logout(&self) -> Result<()>;
    fn is_logged_in(&self) -> bool;
    async fn org_refs(&self) -> Result<Vec<Reference>>;
    async fn organization(&self, org: &Reference) -> Result<Org>;
    async fn vdc(&self, vdc: &Reference) -> Result<Vdc>;
    async fn vapp(&self, vapp: &Reference) -> Result<VApp>;
    async fn task(&self, href: &str) -> Result<Task>;
    async fn power_action(&self, vapp: &Reference, action: PowerAction) -> Result<Task>;
    async fn capture_vapp(&self, vdc: &Reference, params: &CaptureVAppParams) -> Result<VAppTemplate>;
    async fn add_catalog_item(&self, catalog: &Reference, item: &CatalogItemParams) -> Result<CatalogItem>;
}

pub struct DefaultClient {
    base_url: Url,
    username: String,
    organization: String,
    password: String,
    accept: HeaderValue,
    token: RwLock<Option<HeaderValue>>,
    requester: Box<dyn RequestHandler + Send + Sync>,
}

impl DefaultClient {
    pub fn create(
        config: &ConnectionConfig,
        requester: Option<Box<dyn RequestHandler + Send + Sync>>,
    ) -> Result<Self> {
        let accept = HeaderValue::from_str(&format!("application/*+xml;version={}", config.api_version))
            .map_err(RequestError::InvalidHeader)?;

        let requester = match requester {
            Some(requester) => requester,
            None => {
                let mut headers = HeaderMap::new();
                headers.insert(header::ACCEPT, accept.clone());

                let client = reqwest::Client::builder()
                    .default_headers(headers)
                    .timeout(config.timeout)
                    .danger_accept_invalid_certs(config.accept_invalid_certs)
                    .build()
                    .map_err(|cause| InventoryError::config(format!("Failed to construct HTTP client: {cause}")))?;

                Box::new(DefaultRequestHandler::from(client))
            }
        };

        Ok(Self {
            base_url: config.url.clone(),
            username: config.username.clone(),
            organization: config.organization.clone(),
            password: config.password.clone(),
            accept,
            token: RwLock::new(None),
            requester,
        })
    }

    /// `user@organization`, the login name the API expects.
    pub fn login_name(&self) -> String {
        format!("{}@{}", self.username, self.organization)
    }

    fn current_token(&self) -> Option<HeaderValue> {
        self.token.read().ok().and_then(|token| token.clone())
    }

    fn set_token(&self, value: Option<HeaderValue>) {
        if let Ok(mut token) = self.token.write() {
            *token = value;
        }
    }

    fn request(&self, method: Method, url: Url) -> Request {
        let mut request = Request::new(method, url);
        request.headers_mut().insert(header::ACCEPT, self.accept.clone());
        request
    }

    fn authorized_request(&self, method: Method, url: Url) -> Result<Request> {
        let token = self.current_token().ok_or(InventoryError::NotLoggedIn)?;
        let mut request = self.request(method, url);
        request.headers_mut().insert(AUTHORIZATION_TOKEN_HEADER, token);
        Ok(request)
    }

    async fn get_xml<T: DeserializeOwned>(&self, href: &str) -> Result<T> {
        let url = routes::parse_href(href)?;
        let request = self.authorized_request(Method::GET, url)?;
        self.execute_xml(request).await
    }

    async fn post_xml<T: DeserializeOwned>(&self, url: Url, content_type: Option<&'static str>, body: Option<String>) -> Result<T> {
        let mut request = self.authorized_request(Method::POST, url)?;
        if let Some(content_type) = content_type {
            request.headers_mut().insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        if let Some(body) = body {
            *request.body_mut() = Some(Body::from(body));
        }
        self.execute_xml(request).await
    }

    async fn execute_xml<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        let url = request.url().to_string();
        let response = self.requester.handle(request).await?;
        let body = checked_body(response, &url).await?;
        Ok(from_xml(&body)?)
    }
}

#[async_trait]
impl Client for DefaultClient {

    #[tracing::instrument(skip(self), level = "debug")]
    async fn login(&self) -> Result<Session> {
        let url = routes::sessions(self.base_url.clone());
        let login_name = self.login_name();

        let credentials = BASE64.encode(format!("{}:{}", login_name, self.password));
        let mut auth_header = HeaderValue::from_str(&format!("Basic {credentials}"))
            .map_err(RequestError::InvalidHeader)?;
        auth_header.set_sensitive(true);

        let mut request = self.request(Method::POST, url.clone());
        request.headers_mut().insert(header::AUTHORIZATION, auth_header);

        let response = self.requester.handle(request).await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| String::from("<no body>"));
            warn!("Login as '{login_name}' rejected with status {status}");
            return Err(InventoryError::auth(login_name, url.to_string(), format!("status {status}: {body}")));
        }

        let mut token = response.headers()
            .get(AUTHORIZATION_TOKEN_HEADER)
            .cloned()
            .ok_or_else(|| InventoryError::auth(&login_name, url.to_string(), format!("response carried no '{AUTHORIZATION_TOKEN_HEADER}' header")))?;
        token.set_sensitive(true);

        let body = checked_body(response, url.as_str()).await?;
        let session: Session = from_xml(&body)?;

        self.set_token(Some(token));
        info!("Logged in to {} as {}", self.base_url, login_name);

        Ok(session)
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn logout(&self) -> Result<()> {
        let url = routes::session(self.base_url.clone());
        let request = self.authorized_request(Method::DELETE, url.clone())?;

        let response = self.requester.handle(request).await?;
        checked_body(response, url.as_str()).await?;

        self.set_token(None);
        info!("Logged out of {}", self.base_url);
        Ok(())
    }

    fn is_logged_in(&self) -> bool {
        self.current_token().is_some()
    }

    #[tracing::instrument(skip(self), level = "trace")]
    async fn org_refs(&self) -> Result<Vec<Reference>> {
        let url = routes::org_list(self.base_url.clone());
        let list: OrgList = self.get_xml(url.as_str()).await?;
        debug!("Found {} organization(s)", list.orgs.len());
        Ok(list.orgs)
    }

    #[tracing::instrument(skip(self), level = "trace")]
    async fn organization(&self, org: &Reference) -> Result<Org> {
        self.get_xml(&org.href).await
    }

    #[tracing::instrument(skip(self), level = "trace")]
    async fn vdc(&self, vdc: &Reference) -> Result<Vdc> {
        self.get_xml(&vdc.href).await
    }

    #[tracing::instrument(skip(self), level = "trace")]
    async fn vapp(&self, vapp: &Reference) -> Result<VApp> {
        self.get_xml(&vapp.href).await
    }

    #[tracing::instrument(skip(self), level = "trace")]
    async fn task(&self, href: &str) -> Result<Task> {
        self.get_xml(href).await
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn power_action(&self, vapp: &Reference, action: PowerAction) -> Result<Task> {
        let url = routes::power_action(&vapp.href, action)?;
        self.post_xml(url, None, None).await
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn capture_vapp(&self, vdc: &Reference, params: &CaptureVAppParams) -> Result<VAppTemplate> {
        let url = routes::capture_vapp(&vdc.href)?;
        let body = to_xml(params)?;
        self.post_xml(url, Some(media_type::CAPTURE_VAPP_PARAMS), Some(body)).await
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn add_catalog_item(&self, catalog: &Reference, item: &CatalogItemParams) -> Result<CatalogItem> {
        let url = routes::catalog_items(&catalog.href)?;
        let body = to_xml(item)?;
        self.post_xml(url, Some(media_type::CATALOG_ITEM), Some(body)).await
    }
}

async fn checked_body(response: Response, url: &str) -> std::result::Result<String, RequestError> {
    let status = response.status();
    if status.is_success() {
        response.text().await.map_err(RequestError::Body)
    } else {
        let body = response.text().await.unwrap_or_else(|_| String::from("<no body>"));
        Err(RequestError::IllegalStatus { status, url: url.to_string(), body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcloud::testing::{connection_config, ScriptedRequestHandler};
    use crate::vcloud::types::fixtures;

    const SESSION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Session xmlns="http://www.vmware.com/vcloud/v1.5" user="alice" org="Acme" href="https://vcd.example.com/api/session/" type="application/vnd.vmware.vcloud.session+xml">
    <Link rel="down" href="https://vcd.example.com/api/org/" type="application/vnd.vmware.vcloud.orgList+xml"/>
</Session>"#;

    fn client(handler: &ScriptedRequestHandler) -> DefaultClient {
        DefaultClient::create(&connection_config(), Some(Box::new(handler.clone()))).unwrap()
    }

    #[tokio::test]
    async fn test_login_stores_token_and_sends_basic_auth() {
        let handler = ScriptedRequestHandler::new()
            .respond_with_header(Method::POST, "/api/sessions", 200, SESSION, AUTHORIZATION_TOKEN_HEADER, "token-123");
        let client = client(&handler);

        assert!(!client.is_logged_in());
        let session = client.login().await.unwrap();
        assert_eq!(session.user, "alice");
        assert_eq!(session.org, "Acme");
        assert!(client.is_logged_in());

        let requests = handler.requests();
        assert_eq!(requests.len(), 1);
        let expected = format!("Basic {}", BASE64.encode("alice@Acme:secret"));
        assert_eq!(requests[0].header(header::AUTHORIZATION.as_str()).as_deref(), Some(expected.as_str()));
        assert_eq!(requests[0].header(header::ACCEPT.as_str()).as_deref(), Some("application/*+xml;version=1.5"));
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let handler = ScriptedRequestHandler::new()
            .respond(Method::POST, "/api/sessions", 401, "<Error message=\"bad credentials\"/>");
        let client = client(&handler);

        let result = client.login().await;
        assert!(matches!(result, Err(InventoryError::AuthenticationError { .. })));
        assert!(!client.is_logged_in());
    }

    #[tokio::test]
    async fn test_requests_require_login() {
        let handler = ScriptedRequestHandler::new();
        let client = client(&handler);

        let result = client.org_refs().await;
        assert!(matches!(result, Err(InventoryError::NotLoggedIn)));
        assert!(handler.requests().is_empty());
    }

    #[tokio::test]
    async fn test_token_is_sent_after_login() {
        let handler = ScriptedRequestHandler::new()
            .respond_with_header(Method::POST, "/api/sessions", 200, SESSION, AUTHORIZATION_TOKEN_HEADER, "token-123")
            .respond(Method::GET, "/api/org", 200, fixtures::ORG_LIST);
        let client = client(&handler);

        client.login().await.unwrap();
        let orgs = client.org_refs().await.unwrap();
        assert_eq!(orgs.len(), 2);

        let requests = handler.requests();
        assert_eq!(requests[1].header(AUTHORIZATION_TOKEN_HEADER).as_deref(), Some("token-123"));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let handler = ScriptedRequestHandler::new()
            .respond_with_header(Method::POST, "/api/sessions", 200, SESSION, AUTHORIZATION_TOKEN_HEADER, "token-123")
            .respond(Method::GET, "/api/vdc/v1", 403, "forbidden");
        let client = client(&handler);
        client.login().await.unwrap();

        let result = client.vdc(&Reference::new("https://vcd.example.com/api/vdc/v1")).await;
        match result {
            Err(InventoryError::Request(RequestError::IllegalStatus { status, body, .. })) => {
                assert_eq!(status.as_u16(), 403);
                assert_eq!(body, "forbidden");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_logout_clears_token() {
        let handler = ScriptedRequestHandler::new()
            .respond_with_header(Method::POST, "/api/sessions", 200, SESSION, AUTHORIZATION_TOKEN_HEADER, "token-123")
            .respond(Method::DELETE, "/api/session", 204, "");
        let client = client(&handler);

        client.login().await.unwrap();
        client.logout().await.unwrap();
        assert!(!client.is_logged_in());
        assert!(matches!(client.logout().await, Err(InventoryError::NotLoggedIn)));
    }

    #[tokio::test]
    async fn test_capture_posts_params() {
        let template = r#"<VAppTemplate name="web-P01" href="https://vcd.example.com/api/vAppTemplate/vappTemplate-7"/>"#;
        let handler = ScriptedRequestHandler::new()
            .respond_with_header(Method::POST, "/api/sessions", 200, SESSION, AUTHORIZATION_TOKEN_HEADER, "token-123")
            .respond(Method::POST, "/api/vdc/v1/action/captureVApp", 201, template);
        let client = client(&handler);
        client.login().await.unwrap();

        let params = CaptureVAppParams::new(
            Reference::new("https://vcd.example.com/api/vApp/vapp-1"),
            "web-P01",
            "nightly",
        );
        let result = client.capture_vapp(&Reference::new("https://vcd.example.com/api/vdc/v1"), &params).await.unwrap();
        assert_eq!(result.href, "https://vcd.example.com/api/vAppTemplate/vappTemplate-7");

        let requests = handler.requests();
        let capture = &requests[1];
        assert_eq!(capture.header(header::CONTENT_TYPE.as_str()).as_deref(), Some(media_type::CAPTURE_VAPP_PARAMS));
        assert!(capture.body.contains("<Source href=\"https://vcd.example.com/api/vApp/vapp-1\""));
    }
}
