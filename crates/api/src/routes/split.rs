//! Settlement routes.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitpot_core::{Contribution, Settlement, SettlementError, Transaction};
use splitpot_shared::AppError;
use splitpot_shared::types::{Currency, Money};
use tracing::{debug, error, info, warn};

use crate::{AppState, error::ApiError};

/// Creates the settlement routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/split", post(split))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// One participant's contribution. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct ContributionRequest {
    /// Participant name.
    pub name: String,
    /// Amount paid, as a JSON number or decimal string.
    pub amount: Decimal,
}

/// One transfer in the settlement plan.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionResponse {
    /// Paying participant.
    pub from: String,
    /// Receiving participant.
    pub to: String,
    /// Amount at the settlement precision, e.g. `"30.00"`.
    pub amount: String,
    /// Settlement currency.
    pub currency: Currency,
}

impl TransactionResponse {
    fn from_transaction(tx: Transaction, currency: Currency, decimal_places: u32) -> Self {
        Self {
            amount: Money::new(tx.amount, currency).format_with(decimal_places),
            from: tx.from,
            to: tx.to,
            currency,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /split - Compute who pays whom.
async fn split(
    State(state): State<AppState>,
    payload: Result<Json<Vec<ContributionRequest>>, JsonRejection>,
) -> Result<Json<Vec<TransactionResponse>>, ApiError> {
    let Json(payload) = payload.inspect_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected malformed split request");
    })?;

    if payload.len() > state.max_participants {
        warn!(
            participants = payload.len(),
            limit = state.max_participants,
            "Too many participants"
        );
        return Err(ApiError::with_reason(
            AppError::Validation(format!(
                "at most {} contributions are accepted per request",
                state.max_participants
            )),
            "TOO_MANY_PARTICIPANTS",
        ));
    }

    let contributions: Vec<Contribution> = payload
        .into_iter()
        .map(|c| Contribution::new(c.name, c.amount))
        .collect();

    let started = Instant::now();
    let settlement = run_settlement(&state, &contributions).map_err(|e| {
        if e.is_invalid_input() {
            warn!(error = %e, code = e.error_code(), "Settlement rejected");
        } else {
            error!(error = %e, code = e.error_code(), "Settlement failed");
        }
        ApiError::from(e)
    })?;

    log_settlement(&settlement, started);

    let decimal_places = state.engine.decimal_places();
    let currency = settlement.currency;
    let response = settlement
        .into_transactions()
        .into_iter()
        .map(|tx| TransactionResponse::from_transaction(tx, currency, decimal_places))
        .collect();

    Ok(Json(response))
}

/// Settles with a per-request random source.
fn run_settlement(
    state: &AppState,
    contributions: &[Contribution],
) -> Result<Settlement, SettlementError> {
    match state.seed {
        Some(seed) => state
            .engine
            .settle(contributions, &mut StdRng::seed_from_u64(seed)),
        None => state.engine.settle(contributions, &mut rand::rng()),
    }
}

fn log_settlement(settlement: &Settlement, started: Instant) {
    for account in &settlement.accounts {
        debug!(
            name = %account.name,
            deposit = %account.deposit,
            balance = %account.balance,
            "Opening account"
        );
    }
    for tx in settlement.transactions() {
        debug!(transaction = %tx, "Transfer");
    }
    info!(
        participants = settlement.accounts.len(),
        transactions = settlement.transactions().len(),
        average = %settlement.average,
        remainder = %settlement.remainder,
        elapsed_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
        "Settlement computed"
    );
}
