//! Shop Pilot client library.
//!
//! The typed REST client and the form submission state used by `sp-cli`.
//! Exposed as a library so the integration tests drive the same client
//! against a live server.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod form;
pub mod resource;

pub use client::{ApiClient, ClientError};
pub use form::{Action, Confirmation, Entity, Form, FormError, FormState, Notification};
pub use resource::{Billboards, Categories, Colors, Products, Resource, Sizes};
