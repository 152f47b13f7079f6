//! PayMongo webhook event types.
//!
//! Only fields relevant to subscription activation are captured; the rest
//! of PayMongo's event schema is ignored.

use serde::{Deserialize, Serialize};

/// Top-level webhook body: `{"data": <event resource>}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymongoEventEnvelope {
    pub data: PaymongoEvent,
}

/// PayMongo event resource.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymongoEvent {
    /// Event identifier (`evt_...`).
    pub id: String,

    pub attributes: PaymongoEventAttributes,
}

/// Attributes of an event resource.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymongoEventAttributes {
    /// Event type, e.g. `checkout_session.payment.paid`.
    #[serde(rename = "type")]
    pub event_type: String,

    #[serde(default)]
    pub livemode: bool,

    /// Unix seconds at which the event was created.
    pub created_at: i64,

    /// The resource the event is about (a checkout session for payments).
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Metadata attached to the checkout session at creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CheckoutMetadata {
    pub user_id: Option<String>,
    pub plan: Option<String>,
}

/// Known PayMongo event types that we handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymongoEventType {
    /// Hosted checkout session was paid.
    CheckoutSessionPaid,
    /// Anything else.
    Unknown,
}

impl PaymongoEventType {
    /// Parse event type from string.
    ///
    /// `checkout.session.completed` is accepted as an alias of the
    /// checkout paid event.
    pub fn parse(s: &str) -> Self {
        match s {
            "checkout_session.payment.paid" | "checkout.session.completed" => {
                Self::CheckoutSessionPaid
            }
            _ => Self::Unknown,
        }
    }
}

impl PaymongoEvent {
    /// Parse the event type into a known enum variant.
    pub fn parsed_type(&self) -> PaymongoEventType {
        PaymongoEventType::parse(&self.attributes.event_type)
    }

    /// Reads `data.attributes.metadata` of the embedded checkout session.
    ///
    /// Missing or non-string values come back as `None` fields. Sessions
    /// created with the older `supabase_user_id` key still resolve a user.
    pub fn checkout_metadata(&self) -> CheckoutMetadata {
        let metadata = &self.attributes.data["attributes"]["metadata"];
        let user_id = metadata["user_id"]
            .as_str()
            .or_else(|| metadata["supabase_user_id"].as_str());
        CheckoutMetadata {
            user_id: user_id.map(str::to_string),
            plan: metadata["plan"].as_str().map(str::to_string),
        }
    }

    /// Identifier of the embedded resource, if any.
    pub fn resource_id(&self) -> Option<&str> {
        self.attributes.data["id"].as_str()
    }
}

/// Builds webhook bodies for tests.
#[cfg(test)]
pub fn checkout_paid_body(
    event_type: &str,
    created_at: i64,
    metadata: serde_json::Value,
) -> String {
    serde_json::json!({
        "data": {
            "id": "evt_test_123",
            "type": "event",
            "attributes": {
                "type": event_type,
                "livemode": false,
                "created_at": created_at,
                "data": {
                    "id": "cs_test_456",
                    "type": "checkout_session",
                    "attributes": { "metadata": metadata }
                }
            }
        }
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> PaymongoEvent {
        serde_json::from_str::<PaymongoEventEnvelope>(body).unwrap().data
    }

    #[test]
    fn parses_checkout_paid_event() {
        let body = checkout_paid_body(
            "checkout_session.payment.paid",
            1_736_935_200,
            serde_json::json!({"user_id": "user-1", "plan": "legacy"}),
        );

        let event = parse(&body);

        assert_eq!(event.id, "evt_test_123");
        assert_eq!(event.parsed_type(), PaymongoEventType::CheckoutSessionPaid);
        assert_eq!(event.attributes.created_at, 1_736_935_200);
        assert_eq!(event.resource_id(), Some("cs_test_456"));
        assert_eq!(
            event.checkout_metadata(),
            CheckoutMetadata {
                user_id: Some("user-1".to_string()),
                plan: Some("legacy".to_string()),
            }
        );
    }

    #[test]
    fn completed_alias_maps_to_checkout_paid() {
        assert_eq!(
            PaymongoEventType::parse("checkout.session.completed"),
            PaymongoEventType::CheckoutSessionPaid
        );
        assert_eq!(PaymongoEventType::parse("payment.paid"), PaymongoEventType::Unknown);
    }

    #[test]
    fn missing_metadata_yields_empty_fields() {
        let body = checkout_paid_body("checkout_session.payment.paid", 1, serde_json::json!(null));
        assert_eq!(parse(&body).checkout_metadata(), CheckoutMetadata::default());
    }

    #[test]
    fn non_string_metadata_is_ignored() {
        let body = checkout_paid_body(
            "checkout_session.payment.paid",
            1,
            serde_json::json!({"user_id": 42, "plan": "evermore"}),
        );
        let metadata = parse(&body).checkout_metadata();
        assert_eq!(metadata.user_id, None);
        assert_eq!(metadata.plan.as_deref(), Some("evermore"));
    }

    #[test]
    fn legacy_user_key_is_accepted() {
        let body = checkout_paid_body(
            "checkout_session.payment.paid",
            1,
            serde_json::json!({"supabase_user_id": "user-7", "plan": "legacy"}),
        );
        let metadata = parse(&body).checkout_metadata();
        assert_eq!(metadata.user_id.as_deref(), Some("user-7"));
        assert_eq!(metadata.plan.as_deref(), Some("legacy"));
    }

    #[test]
    fn user_id_wins_over_legacy_key() {
        let body = checkout_paid_body(
            "checkout_session.payment.paid",
            1,
            serde_json::json!({"user_id": "user-1", "supabase_user_id": "user-7"}),
        );
        assert_eq!(parse(&body).checkout_metadata().user_id.as_deref(), Some("user-1"));
    }
}
