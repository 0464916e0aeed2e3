use crate::api_client::AscApiClient;
use crate::errors::{AppError, ResultExt};
use crate::issuance::{BulkIssuanceRequest, QuoteRequest};
use crate::models::*;
use crate::normalizer::{
    normalize_assign_plans, normalize_cover_options, normalize_payments_page,
    normalize_quote_links_page, normalize_trip_status, normalize_wallet_transactions_page,
    parse_pricing, wallet_summary,
};
use crate::operator::{OperatorProfile, ProfileEdit};
use crate::views::*;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Largest request body accepted; profile and issuance forms are small JSON documents.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Client for the issuance platform API.
    pub client: AscApiClient,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

impl PageQuery {
    fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CoverQuery {
    #[serde(default)]
    pub policy_type: PolicyType,
}

#[derive(Debug, Deserialize)]
pub struct ProfileEditsRequest {
    pub edits: Vec<ProfileEdit>,
}

/// The served application: the routes with body limit, tracing and CORS layers.
pub fn app(state: Arc<AppState>) -> Router {
    router(state)
        .layer(ServiceBuilder::new().layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Builds the API routes over `state`, without middleware.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/dashboard", get(dashboard))
        .route("/api/v1/assign-covers", get(assign_covers))
        .route("/api/v1/wallet", get(wallet))
        .route("/api/v1/payments", get(payments))
        .route("/api/v1/quote-links", get(quote_links))
        .route("/api/v1/issuance/covers", get(cover_options))
        .route("/api/v1/issuance/covers/:id/pricing", get(cover_pricing))
        .route("/api/v1/issuance/bulk/preview", post(bulk_preview))
        .route("/api/v1/issuance/single/validate", post(validate_quote))
        .route(
            "/api/v1/operator-profile",
            get(get_operator_profile).put(put_operator_profile),
        )
        .route("/api/v1/operator-profile/edits", post(edit_operator_profile))
        .with_state(state)
}

/// Health check endpoint.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Unwraps a dashboard widget's payload, recording the widget as unavailable on failure.
fn widget(
    name: &'static str,
    result: Result<Value, AppError>,
    unavailable: &mut Vec<&'static str>,
) -> Value {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Dashboard widget '{}' unavailable: {}", name, e);
            unavailable.push(name);
            Value::Null
        }
    }
}

/// GET /api/v1/dashboard
///
/// Loads the wallet, both trip-status breakdowns, assigned plans and payments
/// concurrently. A widget whose request fails falls back to its empty state.
///
/// # Returns
///
/// * `Json<DashboardView>` - The dashboard view; this endpoint does not fail.
pub async fn dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    tracing::info!("GET /dashboard");

    let client = &state.client;
    let (wallet, domestic, international, plans, payments) = tokio::join!(
        client.fetch_wallet(),
        client.fetch_trip_status(CoverType::Domestic),
        client.fetch_trip_status(CoverType::International),
        client.fetch_assign_plans(),
        client.fetch_payments(1),
    );

    let mut unavailable = Vec::new();
    let wallet = wallet_summary(&widget("wallet", wallet, &mut unavailable));
    let domestic = normalize_trip_status(&widget("domestic", domestic, &mut unavailable));
    let international =
        normalize_trip_status(&widget("international", international, &mut unavailable));
    let mut active_plans = normalize_assign_plans(&widget("plans", plans, &mut unavailable));
    let mut recent_payments =
        normalize_payments_page(&widget("payments", payments, &mut unavailable), 1).results;

    active_plans.truncate(DASHBOARD_PREVIEW_ROWS);
    recent_payments.truncate(DASHBOARD_PREVIEW_ROWS);

    Json(DashboardView {
        wallet,
        chart: status_chart(&domestic, &international),
        domestic: domestic.into(),
        international: international.into(),
        active_plans,
        recent_payments,
        unavailable,
    })
}

/// GET /api/v1/assign-covers
pub async fn assign_covers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CoverPlan>>, AppError> {
    tracing::info!("GET /assign-covers");

    let raw = state
        .client
        .fetch_assign_plans()
        .await
        .context("Failed to load plans")?;

    Ok(Json(normalize_assign_plans(&raw)))
}

/// GET /api/v1/wallet?page=N
///
/// # Returns
///
/// * `Result<Json<WalletView>, AppError>` - Balance plus one page of transactions.
pub async fn wallet(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
) -> Result<Json<WalletView>, AppError> {
    let page = params.page();
    tracing::info!("GET /wallet - page: {}", page);

    let (balance, transactions) = tokio::try_join!(
        state.client.fetch_wallet(),
        state.client.fetch_wallet_transactions(page),
    )
    .context("Failed to load wallet")?;

    Ok(Json(WalletView {
        wallet: wallet_summary(&balance),
        transactions: normalize_wallet_transactions_page(&transactions, page),
    }))
}

/// GET /api/v1/payments?page=N
pub async fn payments(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
) -> Result<Json<Page<PaymentRow>>, AppError> {
    let page = params.page();
    tracing::info!("GET /payments - page: {}", page);

    let raw = state
        .client
        .fetch_payments(page)
        .await
        .context("Failed to load payments")?;

    Ok(Json(normalize_payments_page(&raw, page)))
}

/// GET /api/v1/quote-links?page=N
pub async fn quote_links(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageQuery>,
) -> Result<Json<Page<QuoteLinkRow>>, AppError> {
    let page = params.page();
    tracing::info!("GET /quote-links - page: {}", page);

    let raw = state
        .client
        .fetch_quote_links(page)
        .await
        .context("Failed to load quote links")?;

    Ok(Json(normalize_quote_links_page(&raw, page)))
}

/// GET /api/v1/issuance/covers?policy_type=bulk|single
pub async fn cover_options(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CoverQuery>,
) -> Result<Json<Vec<CoverOption>>, AppError> {
    tracing::info!("GET /issuance/covers - policy_type: {}", params.policy_type.as_str());

    let raw = state
        .client
        .fetch_cover_plan_access(params.policy_type)
        .await
        .context("Failed to load covers")?;

    Ok(Json(normalize_cover_options(&raw)))
}

fn require_cover_id(id: i64) -> Result<i64, AppError> {
    if id <= 0 {
        return Err(AppError::BadRequest(format!("Invalid cover id: {}", id)));
    }
    Ok(id)
}

/// GET /api/v1/issuance/covers/:id/pricing
///
/// # Arguments
///
/// * `id` - The cover id, taken from the path.
///
/// # Returns
///
/// * `Result<Json<CoverPricingView>, AppError>` - The price grid and its column headers.
pub async fn cover_pricing(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<CoverPricingView>, AppError> {
    tracing::info!("GET /issuance/covers/{}/pricing", id);
    let id = require_cover_id(id)?;

    let raw = state
        .client
        .fetch_cover_pricing(id)
        .await
        .context("Failed to load cover prices")?;

    Ok(Json(CoverPricingView::new(id, parse_pricing(&raw))))
}

/// POST /api/v1/issuance/bulk/preview
///
/// Checks a bulk-issuance form against the covers the operator may issue and
/// the selected cover's price grid.
pub async fn bulk_preview(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BulkIssuanceRequest>,
) -> Result<Json<BulkIssuancePreview>, AppError> {
    tracing::info!("POST /issuance/bulk/preview - cover_id: {}", request.cover_id);
    let cover_id = require_cover_id(request.cover_id)?;

    let (covers, pricing) = tokio::try_join!(
        async {
            state
                .client
                .fetch_cover_plan_access(PolicyType::Bulk)
                .await
                .context("Failed to load covers")
        },
        async {
            state
                .client
                .fetch_cover_pricing(cover_id)
                .await
                .context("Failed to load cover prices")
        },
    )?;

    let covers = normalize_cover_options(&covers);
    let grid = parse_pricing(&pricing);
    let draft = request.into_draft(&covers, &grid)?;

    Ok(Json(BulkIssuancePreview::new(draft, &grid)))
}

/// POST /api/v1/issuance/single/validate
pub async fn validate_quote(
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteValidation>, AppError> {
    tracing::info!(
        "POST /issuance/single/validate - {} -> {}",
        request.travelling_from,
        request.travelling_to
    );
    request.validate()?;

    Ok(Json(QuoteValidation {
        valid: true,
        trip_days: request.trip_days(),
    }))
}

async fn load_operator(client: &AscApiClient) -> Result<OperatorProfile, AppError> {
    let raw = client
        .fetch_operator()
        .await
        .context("Failed to load operator details")?;
    Ok(OperatorProfile::from_value(&raw))
}

/// GET /api/v1/operator-profile
pub async fn get_operator_profile(
    State(state): State<Arc<AppState>>,
) -> Result<Json<OperatorProfileView>, AppError> {
    tracing::info!("GET /operator-profile");
    let profile = load_operator(&state.client).await?;
    Ok(Json(profile.into()))
}

/// PUT /api/v1/operator-profile
///
/// Sends the full operator record upstream, then returns the re-fetched profile.
pub async fn put_operator_profile(
    State(state): State<Arc<AppState>>,
    Json(record): Json<Value>,
) -> Result<Json<OperatorProfileView>, AppError> {
    tracing::info!("PUT /operator-profile");

    if !record.is_object() {
        return Err(AppError::BadRequest(
            "Operator record must be a JSON object".to_string(),
        ));
    }

    state
        .client
        .update_operator(&record)
        .await
        .context("Failed to update operator details")?;

    let profile = load_operator(&state.client).await?;
    Ok(Json(profile.into()))
}

/// POST /api/v1/operator-profile/edits
///
/// # Arguments
///
/// * `state` - The application state.
/// * `request` - Field edits to apply on top of the current upstream record.
///
/// # Returns
///
/// * `Result<Json<OperatorProfileView>, AppError>` - The profile as re-fetched after the update.
pub async fn edit_operator_profile(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProfileEditsRequest>,
) -> Result<Json<OperatorProfileView>, AppError> {
    tracing::info!("POST /operator-profile/edits - {} edits", request.edits.len());

    if request.edits.is_empty() {
        return Err(AppError::BadRequest("No edits to apply".to_string()));
    }

    let mut profile = load_operator(&state.client).await?;
    profile.apply_edits(&request.edits);

    state
        .client
        .update_operator(&profile.to_payload())
        .await
        .context("Failed to update operator details")?;

    let profile = load_operator(&state.client).await?;
    Ok(Json(profile.into()))
}
