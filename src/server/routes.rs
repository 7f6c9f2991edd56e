//! Dashboard REST API handlers
//!
//! All endpoints return JSON; handler state is shared via [`AppState`].

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::warn;

use crate::execution::TradeExecutionEngine;
use crate::monitor::{PriceMonitor, SubscriberRegistry};
use crate::notifier::TelegramNotifier;
use crate::storage::LedgerStore;
use crate::types::{BotSettingsUpdate, NotifierSettingsUpdate, PricePair, PriceScenario};

/// Shared state for all route handlers and the WebSocket bridge.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LedgerStore>,
    pub registry: Arc<SubscriberRegistry>,
    pub monitor: Arc<PriceMonitor>,
    pub executor: Arc<TradeExecutionEngine>,
    pub notifier: Arc<TelegramNotifier>,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn get_stats(State(state): State<AppState>) -> Response {
    match state.store.daily_stats().await {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => {
            warn!("Stats query failed: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch stats")
        }
    }
}

pub async fn get_bot_status(State(state): State<AppState>) -> Response {
    match state.store.bot_status().await {
        Ok(status) => Json(status).into_response(),
        Err(e) => {
            warn!("Bot status query failed: {e}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch bot status",
            )
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ArbitrageSummary {
    profit_percentage: Decimal,
    profitable: bool,
}

#[derive(Debug, Serialize)]
struct PricesResponse {
    #[serde(flatten)]
    prices: PricePair,
    arbitrage: Option<ArbitrageSummary>,
}

pub async fn get_prices(State(state): State<AppState>) -> Response {
    let prices = state.monitor.current_prices().await;
    match state.store.latest_opportunity().await {
        Ok(latest) => Json(PricesResponse {
            prices,
            arbitrage: latest.map(|record| ArbitrageSummary {
                profit_percentage: record.profit_percentage,
                profitable: record.profitable,
            }),
        })
        .into_response(),
        Err(e) => {
            warn!("Latest opportunity query failed: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch prices")
        }
    }
}

pub async fn get_recent_trades(State(state): State<AppState>) -> Response {
    match state.store.list_transactions(10, 0).await {
        Ok(trades) => Json(trades).into_response(),
        Err(e) => {
            warn!("Recent trades query failed: {e}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch recent trades",
            )
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<u32>,
    limit: Option<u32>,
}

pub async fn get_transactions(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Response {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(50).max(1);
    let offset = (page - 1) * limit;

    let transactions = state
        .store
        .list_transactions(limit as usize, offset as usize)
        .await;
    let total = state.store.count_transactions().await;

    match (transactions, total) {
        (Ok(transactions), Ok(total)) => Json(json!({
            "transactions": transactions,
            "pagination": {
                "page": page,
                "limit": limit,
                "total": total,
                "pages": total.div_ceil(u64::from(limit)),
            },
        }))
        .into_response(),
        (Err(e), _) | (_, Err(e)) => {
            warn!("Transaction history query failed: {e}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch transactions",
            )
        }
    }
}

pub async fn execute_trade(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let amount = body.get("amount").cloned().and_then(parse_decimal);
    let slippage = body.get("slippage").cloned().and_then(parse_decimal);

    let (Some(amount), Some(slippage)) = (amount, slippage) else {
        return error_response(StatusCode::BAD_REQUEST, "Amount and slippage are required");
    };
    if amount <= Decimal::ZERO || slippage <= Decimal::ZERO {
        return error_response(StatusCode::BAD_REQUEST, "Amount and slippage are required");
    }

    Json(state.executor.execute_trade(amount, slippage).await).into_response()
}

pub async fn estimate_returns(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let Some(amount) = body.get("amount").cloned().and_then(parse_decimal) else {
        return error_response(StatusCode::BAD_REQUEST, "Amount is required");
    };
    if amount <= Decimal::ZERO {
        return error_response(StatusCode::BAD_REQUEST, "Amount is required");
    }

    match state.executor.estimated_returns(amount).await {
        Ok(estimate) => Json(estimate).into_response(),
        Err(e) => {
            warn!("Returns estimation failed: {e}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to estimate returns",
            )
        }
    }
}

pub async fn get_bot_settings(State(state): State<AppState>) -> Response {
    match state.store.bot_settings().await {
        Ok(settings) => Json(settings).into_response(),
        Err(e) => {
            warn!("Settings query failed: {e}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch bot settings",
            )
        }
    }
}

pub async fn put_bot_settings(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let Ok(update) = serde_json::from_value::<BotSettingsUpdate>(body) else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid settings data");
    };

    let refresh_interval_secs = update.refresh_interval_secs;
    match state.store.put_bot_settings(update).await {
        Ok(settings) => {
            // Re-arm the monitoring timer on the new cadence.
            if refresh_interval_secs > 0 {
                if let Err(e) = state.monitor.start(refresh_interval_secs).await {
                    warn!("Failed to restart monitoring: {e}");
                }
            }
            Json(settings).into_response()
        }
        Err(e) => {
            warn!("Settings update failed: {e}");
            error_response(StatusCode::BAD_REQUEST, "Invalid settings data")
        }
    }
}

pub async fn get_notifier_settings(State(state): State<AppState>) -> Response {
    match state.store.notifier_settings().await {
        Ok(settings) => {
            let masked = settings.bot_token.as_ref().map(|_| "••••••••••");
            let mut value = match serde_json::to_value(&settings) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Notifier settings serialization failed: {e}");
                    return error_response(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Failed to fetch Telegram settings",
                    );
                }
            };
            value["botToken"] = json!(masked);
            Json(value).into_response()
        }
        Err(e) => {
            warn!("Notifier settings query failed: {e}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch Telegram settings",
            )
        }
    }
}

pub async fn put_notifier_settings(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Response {
    let Ok(update) = serde_json::from_value::<NotifierSettingsUpdate>(body) else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid Telegram settings data");
    };

    match state.store.put_notifier_settings(update).await {
        Ok(_) => {
            state.notifier.initialize().await;
            Json(json!({ "success": true })).into_response()
        }
        Err(e) => {
            warn!("Notifier settings update failed: {e}");
            error_response(StatusCode::BAD_REQUEST, "Invalid Telegram settings data")
        }
    }
}

pub async fn test_notifier(State(state): State<AppState>) -> Json<Value> {
    let success = state.notifier.test_connection().await;
    Json(json!({ "success": success }))
}

pub async fn pause_bot(State(state): State<AppState>) -> Response {
    set_bot_active(&state, false, "Bot paused").await
}

pub async fn resume_bot(State(state): State<AppState>) -> Response {
    set_bot_active(&state, true, "Bot resumed").await
}

async fn set_bot_active(state: &AppState, active: bool, message: &str) -> Response {
    let status = match state.store.bot_status().await {
        Ok(status) => status,
        Err(e) => {
            warn!("Bot status query failed: {e}");
            return error_response(StatusCode::NOT_FOUND, "Bot status not found");
        }
    };

    match state
        .store
        .put_bot_status(crate::types::BotStatusUpdate {
            is_active: active,
            uptime_secs: status.uptime_secs,
            total_cycles: status.total_cycles,
        })
        .await
    {
        Ok(_) => Json(json!({ "success": true, "message": message })).into_response(),
        Err(e) => {
            warn!("Bot status update failed: {e}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to update bot status",
            )
        }
    }
}

pub async fn simulate_price(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let Some(scenario) = body
        .get("scenario")
        .and_then(Value::as_str)
        .and_then(PriceScenario::from_name)
    else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid scenario");
    };

    state.monitor.inject_scenario(scenario).await;
    Json(json!({
        "success": true,
        "message": format!("Simulated {} scenario", scenario.name()),
    }))
    .into_response()
}

fn parse_decimal(value: Value) -> Option<Decimal> {
    serde_json::from_value(value).ok()
}
