//! PayMongo REST API request and response bodies.
//!
//! PayMongo wraps every resource in a JSON:API style envelope:
//! `{"data": {"attributes": {...}}}`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ports::{CheckoutLineItem, CreateCheckoutRequest, PaymentMethodType};

/// Body of `POST /v1/checkout_sessions`.
#[derive(Debug, Serialize)]
pub struct CheckoutSessionCreateBody {
    pub data: CheckoutSessionCreateData,
}

#[derive(Debug, Serialize)]
pub struct CheckoutSessionCreateData {
    pub attributes: CheckoutSessionCreateAttributes,
}

#[derive(Debug, Serialize)]
pub struct CheckoutSessionCreateAttributes {
    pub payment_method_types: Vec<PaymentMethodType>,
    pub line_items: Vec<LineItem>,
    pub metadata: BTreeMap<String, String>,
    pub success_url: String,
    pub cancel_url: String,
    pub send_email_receipt: bool,
    pub show_line_items: bool,
}

#[derive(Debug, Serialize)]
pub struct LineItem {
    pub amount: i64,
    pub currency: String,
    pub images: Vec<String>,
    pub name: String,
    pub quantity: u32,
}

impl From<CheckoutLineItem> for LineItem {
    fn from(item: CheckoutLineItem) -> Self {
        Self {
            amount: item.amount,
            currency: item.currency,
            images: Vec::new(),
            name: item.name,
            quantity: item.quantity,
        }
    }
}

impl From<CreateCheckoutRequest> for CheckoutSessionCreateBody {
    fn from(request: CreateCheckoutRequest) -> Self {
        Self {
            data: CheckoutSessionCreateData {
                attributes: CheckoutSessionCreateAttributes {
                    payment_method_types: request.payment_method_types,
                    line_items: request.line_items.into_iter().map(LineItem::from).collect(),
                    metadata: request.metadata,
                    success_url: request.success_url,
                    cancel_url: request.cancel_url,
                    send_email_receipt: true,
                    show_line_items: true,
                },
            },
        }
    }
}

/// Response of `POST /v1/checkout_sessions`.
#[derive(Debug, Deserialize)]
pub struct CheckoutSessionResponse {
    pub data: CheckoutSessionResource,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutSessionResource {
    pub id: String,
    pub attributes: CheckoutSessionAttributes,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutSessionAttributes {
    pub checkout_url: String,
}

/// Error body: `{"errors": [{"code": "...", "detail": "..."}]}`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: Option<String>,
    pub detail: Option<String>,
}

impl ErrorResponse {
    /// First error's code and a joined detail message.
    pub fn summarize(&self) -> (Option<String>, String) {
        let code = self.errors.first().and_then(|e| e.code.clone());
        let detail = self
            .errors
            .iter()
            .filter_map(|e| e.detail.as_deref())
            .collect::<Vec<_>>()
            .join("; ");
        (code, detail)
    }
}
