//! MCP tool implementations.
//!
//! This module contains the input types for each tool and the ticket
//! operations that turn every outcome into a JSON value for the agent.

mod inputs;
pub mod tickets;

pub use inputs::*;
