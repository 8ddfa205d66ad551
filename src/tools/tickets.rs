//! Ticket operations exposed as tools.
//!
//! Each function performs one [`SdpClient`] call and always returns a JSON
//! value: the backend's body on success, or the failure mapping from
//! [`SdpError::into_payload`]. Nothing here returns `Err` or panics, so a
//! tool call always resolves to a value for the agent.

use serde_json::Value;

use crate::error::SdpError;
use crate::models::NewRequest;
use crate::sdp_client::SdpClient;

use super::{
    CloseTicketInput, CreateTicketInput, GetRequestInput, ListRequestsInput, UpdateRequestInput,
};

/// Fetches the latest tickets, newest first.
pub async fn list_requests(client: &SdpClient, input: ListRequestsInput) -> Value {
    let row_count = input.row_count();
    tracing::info!(row_count, "Tool call: list_requests");

    normalize(
        client,
        "list_requests",
        client.list_requests(row_count).await,
    )
}

/// Creates a new support ticket.
pub async fn create_ticket(client: &SdpClient, input: CreateTicketInput) -> Value {
    tracing::info!(
        subject = %input.subject,
        requester = %input.requester_name,
        "Tool call: create_ticket"
    );

    let request = NewRequest::new(input.subject, input.description, input.requester_name);
    normalize(
        client,
        "create_ticket",
        client.create_request(&request).await,
    )
}

/// Fetches a single ticket.
pub async fn get_request(client: &SdpClient, input: GetRequestInput) -> Value {
    tracing::info!(request_id = %input.request_id, "Tool call: get_request");

    normalize(
        client,
        "get_request",
        client.get_request(&input.request_id).await,
    )
}

/// Updates the provided fields of a ticket.
pub async fn update_request(client: &SdpClient, input: UpdateRequestInput) -> Value {
    tracing::info!(request_id = %input.request_id, "Tool call: update_request");

    let update = input.to_update();
    normalize(
        client,
        "update_request",
        client.update_request(&input.request_id, &update).await,
    )
}

/// Closes a ticket through the update path.
pub async fn close_ticket(client: &SdpClient, input: CloseTicketInput) -> Value {
    tracing::info!(request_id = %input.request_id, "Tool call: close_ticket");

    normalize(
        client,
        "close_ticket",
        client
            .close_request(&input.request_id, &input.closure_comments)
            .await,
    )
}

/// Folds an operation result into the value returned to the agent.
fn normalize(client: &SdpClient, operation: &str, result: Result<Value, SdpError>) -> Value {
    match result {
        Ok(data) => data,
        Err(e) => {
            let api_key = client.api_key_for_sanitization();
            tracing::error!(
                operation,
                error = %e.sanitized_display(api_key),
                "Tool call failed"
            );
            e.into_payload(api_key)
        }
    }
}
