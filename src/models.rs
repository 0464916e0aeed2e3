use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============ Cover Catalog ============

/// A cover plan row on the assign-covers page and the dashboard's plan table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverPlan {
    /// Upstream cover id.
    pub id: i64,
    /// Plan title, empty when the upstream sent none.
    pub title: String,
    /// Plan price.
    pub price: f64,
    /// Price currency.
    pub currency: String,
    /// Geographic scope of the cover.
    pub cover_scope: String,
}

/// An entry in the "Select Cover Plan" dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverOption {
    /// Positive cover id.
    pub id: i64,
    /// `"<name> - <price> INR"`, or just the name when no price is known.
    pub label: String,
}

// ============ Pricing Grid ============

/// One selectable price cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingOption {
    /// Display code, e.g. `ASC374`.
    pub code: String,
    pub price: f64,
}

/// Prices for one trip duration, keyed by option type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRow {
    pub days: i64,
    pub options_by_type: BTreeMap<String, PricingOption>,
}

/// Duration x option-type price grid for a cover.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingGrid {
    /// Rows sorted ascending by `days`, one per duration.
    pub rows: Vec<PricingRow>,
    /// Sorted union of every option type seen.
    pub option_types: Vec<String>,
}

impl PricingGrid {
    /// Column headers for rendering; a grid with no types still shows `Option1`.
    pub fn column_headers(&self) -> Vec<String> {
        if self.option_types.is_empty() {
            vec![crate::normalizer::DEFAULT_OPTION_TYPE.to_string()]
        } else {
            self.option_types.clone()
        }
    }

    pub fn row(&self, days: i64) -> Option<&PricingRow> {
        self.rows.iter().find(|r| r.days == days)
    }

    /// The cell at (`days`, `option_type`), `None` renders as an empty placeholder.
    pub fn cell(&self, days: i64, option_type: &str) -> Option<&PricingOption> {
        self.row(days)?.options_by_type.get(option_type)
    }
}

// ============ Trip Status ============

/// Policy counts by trip status for one cover type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripStatusCounts {
    #[serde(rename = "Active")]
    pub active: i64,
    #[serde(rename = "Yet to Active")]
    pub yet_to_active: i64,
    #[serde(rename = "Matured")]
    pub matured: i64,
    #[serde(rename = "Pending")]
    pub pending: i64,
}

impl TripStatusCounts {
    /// Display labels in card/chart order.
    pub const LABELS: [&'static str; 4] = ["Active", "Yet to Active", "Matured", "Pending"];

    /// `(label, count)` pairs in display order.
    pub fn entries(&self) -> [(&'static str, i64); 4] {
        [
            (Self::LABELS[0], self.active),
            (Self::LABELS[1], self.yet_to_active),
            (Self::LABELS[2], self.matured),
            (Self::LABELS[3], self.pending),
        ]
    }
}

/// Which trip-status series to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverType {
    International,
    Domestic,
}

impl CoverType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverType::International => "International",
            CoverType::Domestic => "Domestic",
        }
    }
}

/// Policy type filter for the cover-plan access list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyType {
    #[default]
    Bulk,
    Single,
}

impl PolicyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyType::Bulk => "bulk",
            PolicyType::Single => "single",
        }
    }
}

// ============ Paginated Lists ============

/// Pagination links as sent by the upstream API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLinks {
    pub next: Option<String>,
    pub previous: Option<String>,
}

/// One page of a paginated list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Page number this response was built for.
    pub page: u32,
    pub results: Vec<T>,
    /// Total count reported upstream, 0 when unknown.
    pub count: u64,
    pub links: PageLinks,
    /// "Next" control enabled.
    pub has_next: bool,
    /// "Previous" control enabled.
    pub has_previous: bool,
    /// Whether the pagination footer is shown at all.
    pub show_controls: bool,
    /// Footer text, e.g. "12 payments total".
    pub summary: String,
}

impl<T> Page<T> {
    pub fn next_page(&self) -> Option<u32> {
        self.has_next.then(|| self.page.saturating_add(1))
    }

    pub fn previous_page(&self) -> Option<u32> {
        self.has_previous.then(|| self.page.saturating_sub(1).max(1))
    }
}

/// Row on the payments page and the dashboard's payment history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRow {
    pub transaction_id: String,
    pub gateway: String,
    pub method: String,
    pub currency: String,
    pub total_amount: String,
    pub status: String,
}

/// Row in the wallet transaction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletTransactionRow {
    pub amount: String,
    pub transaction_number: String,
    pub transaction_type: String,
    pub status: String,
    pub created_by: String,
    /// Human-readable timestamp.
    pub created_at: String,
}

/// Row in the quote-links list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLinkRow {
    pub id: String,
    pub adventure: String,
    pub price: String,
    pub name: String,
    pub email: String,
    pub nationality: String,
    pub start_date: String,
    pub end_date: String,
    pub total_pax: String,
    pub travelling_from: String,
    pub travelling_to: String,
    /// "Active" or "Expired".
    pub link_status: String,
    pub trip_status: String,
    /// Shareable quote URL, when the quote has one.
    pub unique_link: Option<String>,
}

// ============ Wallet ============

/// Wallet balance ready for the wallet card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletSummary {
    pub balance: f64,
    /// e.g. `INR 1,23,456.50`.
    pub display: String,
}

impl Default for WalletSummary {
    fn default() -> Self {
        crate::normalizer::wallet_summary_from_amount(0.0)
    }
}
