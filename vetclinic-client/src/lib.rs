#![cfg_attr(not(test), forbid(unsafe_code))]

//! Client side of the veterinary clinic application.
//!
//! * [`api::ApiClient`] - the request gateway: JSON over HTTP with bearer
//!   authentication taken from session storage.
//! * [`storage`] - the two-key session storage the gateway reads and writes.
//! * [`session::SessionStore`] - observable session state driven by
//!   login/register/logout.
//! * [`routes`] - the navigation table mapping paths to views.

pub mod api;
pub mod error;
pub mod routes;
pub mod session;
pub mod storage;

#[cfg(test)]
mod routes_test;

pub use api::{ApiClient, Payload, RequestOptions};
pub use error::ApiError;
pub use routes::{ROUTES, Route, RouteTarget, View};
pub use session::{Session, SessionStore};
pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};
