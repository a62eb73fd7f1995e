//! Error handling utilities for MCP server

use rmcp::ErrorData;
use serde_json::json;
use waypoint_core::{ErrorKind, TripError};

/// Convert a trip error to MCP error data, prefixed with `message`.
///
/// Caller mistakes map to `invalid_params`, missing rows to
/// `resource_not_found`, and everything else to `internal_error`. The error
/// kind travels in the data payload.
pub fn to_mcp_error(message: &str, error: &TripError) -> ErrorData {
    let kind = error.kind();
    let text = format!("{message}: {error}");
    let data = Some(json!({ "kind": kind_name(kind) }));

    match kind {
        ErrorKind::Validation | ErrorKind::Transition => ErrorData::invalid_params(text, data),
        ErrorKind::NotFound => ErrorData::resource_not_found(text, data),
        ErrorKind::Busy => ErrorData::invalid_request(text, data),
        ErrorKind::Persistence => ErrorData::internal_error(text, data),
    }
}

fn kind_name(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Validation => "validation",
        ErrorKind::Transition => "transition",
        ErrorKind::NotFound => "not_found",
        ErrorKind::Persistence => "persistence",
        ErrorKind::Busy => "busy",
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;
    use waypoint_core::models::TripStatus;

    use super::*;

    #[test]
    fn test_error_codes_by_kind() {
        let invalid = to_mcp_error(
            "Failed to complete trip",
            &TripError::InvalidTransition {
                from: TripStatus::Completed,
                to: TripStatus::Planned,
            },
        );
        assert_eq!(invalid.code, ErrorCode::INVALID_PARAMS);
        assert!(invalid
            .message
            .starts_with("Failed to complete trip: Cannot change trip status"));

        let missing = to_mcp_error("Failed to show trip", &TripError::TripNotFound { id: 4 });
        assert_eq!(missing.code, ErrorCode::RESOURCE_NOT_FOUND);
        assert_eq!(missing.data, Some(json!({ "kind": "not_found" })));
    }
}
