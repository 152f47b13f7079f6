//! HTTP handlers for checkout, the PayMongo webhook and the subscription query.

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{OptionalAuth, RequireAuth};
use crate::adapters::http::state::AppState;
use crate::application::handlers::subscription::{
    CreateCheckoutCommand, GetSubscriptionQuery, HandlePaymentWebhookCommand,
    HandlePaymentWebhookResult,
};

use super::dto::{
    CheckoutResponse, CreateCheckoutRequest, SubscriptionResponse, WebhookReceivedResponse,
};

/// Header carrying `t=<ts>,te=<hex>,li=<hex>`.
pub const SIGNATURE_HEADER: &str = "Paymongo-Signature";

/// POST /api/create-checkout - Start a hosted checkout for a plan
pub async fn create_checkout(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    payload: Result<Json<CreateCheckoutRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let cmd = CreateCheckoutCommand {
        plan: req.plan,
        user_id: req.user_id,
        caller: user.map(|u| u.id),
    };

    let result = state.create_checkout_handler().handle(cmd).await?;

    Ok(Json(CheckoutResponse {
        checkout_url: result.session.checkout_url,
    }))
}

/// POST /api/paymongo/webhook - Receive PayMongo events
///
/// The body is read raw; the signature covers the exact bytes sent.
pub async fn handle_paymongo_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let cmd = HandlePaymentWebhookCommand {
        payload: body.to_vec(),
        signature,
    };

    match state.webhook_handler().handle(cmd).await? {
        HandlePaymentWebhookResult::SubscriptionActivated { user_id, plan, .. } => {
            tracing::info!(
                user_id = %user_id,
                plan = plan.as_str(),
                "Webhook activated subscription"
            );
        }
        HandlePaymentWebhookResult::Acknowledged | HandlePaymentWebhookResult::Ignored => {}
    }

    Ok(Json(WebhookReceivedResponse { received: true }))
}

/// GET /api/subscription - Caller's plan and publishing entitlement
pub async fn get_subscription(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetSubscriptionQuery { user_id: user.id };
    let result = state.get_subscription_handler().handle(query).await?;

    Ok(Json(SubscriptionResponse::from(result)))
}
