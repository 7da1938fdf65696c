//! vCloud Director REST API client
//!
//! Talks to the `/api` surface of a vCloud Director 1.5+ installation:
//! session login, the organization → VDC → vApp hierarchy, power actions,
//! vApp capture and catalog items. All traffic goes through a
//! [`RequestHandler`], so the transport can be replaced.

mod client;
mod error;
mod request_handler;
mod routes;
mod task;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{Client, DefaultClient, AUTHORIZATION_TOKEN_HEADER};
pub use error::RequestError;
pub use request_handler::{DefaultRequestHandler, RequestHandler};
pub use task::{wait_for_task, DEFAULT_POLL_INTERVAL};
pub use types::{
    CatalogItem, CatalogItemParams, CaptureVAppParams, NetworkCard, Org, Reference, Task,
    TaskState, VApp, VAppTemplate, Vdc, VirtualDisk, Vm,
};

/// vApp power operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAction {
    PowerOn,
    PowerOff,
}

impl PowerAction {
    pub fn as_path_segment(&self) -> &'static str {
        match self {
            Self::PowerOn => "powerOn",
            Self::PowerOff => "powerOff",
        }
    }
}
