//! Page-level view models returned by the HTTP handlers.

use crate::issuance::BulkIssuanceDraft;
use crate::models::*;
use crate::operator::OperatorProfile;
use serde::Serialize;

/// Number of rows the dashboard shows in its plan and payment tables.
pub const DASHBOARD_PREVIEW_ROWS: usize = 5;

/// A status card on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCard {
    pub label: &'static str,
    pub value: i64,
}

/// Trip-status counts for one cover type, with the cards built from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripStatusView {
    pub counts: TripStatusCounts,
    pub cards: Vec<StatusCard>,
}

impl From<TripStatusCounts> for TripStatusView {
    fn from(counts: TripStatusCounts) -> Self {
        Self {
            cards: counts
                .entries()
                .into_iter()
                .map(|(label, value)| StatusCard { label, value })
                .collect(),
            counts,
        }
    }
}

/// One bar group in the policy status chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChartPoint {
    #[serde(rename = "name")]
    pub name: &'static str,
    pub domestic: i64,
    pub international: i64,
}

/// Policy status chart series, one point per status in display order.
pub fn status_chart(domestic: &TripStatusCounts, international: &TripStatusCounts) -> Vec<ChartPoint> {
    domestic
        .entries()
        .into_iter()
        .zip(international.entries())
        .map(|((name, domestic), (_, international))| ChartPoint {
            name,
            domestic,
            international,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub wallet: WalletSummary,
    pub domestic: TripStatusView,
    pub international: TripStatusView,
    pub chart: Vec<ChartPoint>,
    pub active_plans: Vec<CoverPlan>,
    pub recent_payments: Vec<PaymentRow>,
    /// Widgets whose data could not be loaded; they show defaults.
    pub unavailable: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletView {
    pub wallet: WalletSummary,
    pub transactions: Page<WalletTransactionRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverPricingView {
    pub cover_id: i64,
    pub grid: PricingGrid,
    /// Column headers to render, never empty.
    pub columns: Vec<String>,
}

impl CoverPricingView {
    pub fn new(cover_id: i64, grid: PricingGrid) -> Self {
        Self {
            cover_id,
            columns: grid.column_headers(),
            grid,
        }
    }
}

/// A chosen price cell in a bulk-issuance preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedPrice {
    pub days: i64,
    pub option_type: String,
    pub code: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkIssuancePreview {
    pub draft: BulkIssuanceDraft,
    pub selections: Vec<SelectedPrice>,
    pub ready: bool,
}

impl BulkIssuancePreview {
    pub fn new(draft: BulkIssuanceDraft, grid: &PricingGrid) -> Self {
        let selections = draft
            .selected_pricing
            .iter()
            .filter_map(|(days, option_type)| {
                grid.cell(*days, option_type).map(|cell| SelectedPrice {
                    days: *days,
                    option_type: option_type.clone(),
                    code: cell.code.clone(),
                    price: cell.price,
                })
            })
            .collect();

        Self {
            ready: draft.is_ready(),
            draft,
            selections,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteValidation {
    pub valid: bool,
    pub trip_days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatorProfileView {
    pub profile: OperatorProfile,
    pub wallet: WalletSummary,
}

impl From<OperatorProfile> for OperatorProfileView {
    fn from(profile: OperatorProfile) -> Self {
        Self {
            wallet: profile.wallet_summary(),
            profile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_chart_pairs_series() {
        let domestic = TripStatusCounts {
            active: 3,
            yet_to_active: 1,
            matured: 0,
            pending: 2,
        };
        let international = TripStatusCounts {
            active: 5,
            ..Default::default()
        };
        let chart = status_chart(&domestic, &international);

        assert_eq!(chart.len(), 4);
        assert_eq!(chart[0].name, "Active");
        assert_eq!(chart[0].domestic, 3);
        assert_eq!(chart[0].international, 5);
        assert_eq!(chart[3].name, "Pending");
        assert_eq!(chart[3].domestic, 2);
        assert_eq!(chart[3].international, 0);

        let json = serde_json::to_value(&chart[1]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Yet to Active", "Domestic": 1, "International": 0})
        );
    }

    #[test]
    fn test_status_cards_in_display_order() {
        let view = TripStatusView::from(TripStatusCounts {
            matured: 7,
            ..Default::default()
        });
        let labels: Vec<_> = view.cards.iter().map(|c| c.label).collect();
        assert_eq!(labels, TripStatusCounts::LABELS.to_vec());
        assert_eq!(view.cards[2].value, 7);
    }
}
