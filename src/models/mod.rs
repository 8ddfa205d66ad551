//! Data models for ServiceDesk Plus API.
//!
//! This module contains the outbound payload shapes: the `input_data`
//! envelope, list pagination, and request create/update bodies.

mod common;
mod request;

pub use common::*;
pub use request::*;
