use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum RequestError {
    #[error("Request failed: {0}")]
    Request(reqwest::Error),
    #[error("Received status code '{status}' from '{url}':\n  {body}")]
    IllegalStatus {
        status: StatusCode,
        url: String,
        body: String,
    },
    #[error("Could not read response body: {0}")]
    Body(reqwest::Error),
    #[error("XML deserialization error: {0}")]
    XmlDeserialization(quick_xml::DeError),
    #[error("XML serialization error: {0}")]
    XmlSerialization(quick_xml::DeError),
    #[error("Invalid URL '{url}': {cause}")]
    InvalidUrl { url: String, cause: String },
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl RequestError {
    /// Connection problems and server-side failures may succeed on a later attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Request(cause) => cause.is_timeout() || cause.is_connect(),
            Self::IllegalStatus { status, .. } => status.is_server_error(),
            _ => false,
        }
    }
}
