//! Response normalizers.
//!
//! Each function takes whatever JSON the upstream API returned and projects it
//! into a fixed, display-ready shape. None of them fail: a missing array, a
//! wrong wrapper or a non-object item degrades to an empty list or a defaulted
//! record.

use crate::fields::{self, array_at, is_truthy, non_empty_text, FieldChain, DASH};
use crate::models::*;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Option type assumed when a pricing entry carries none.
pub const DEFAULT_OPTION_TYPE: &str = "Option1";

/// Prefix of the display code synthesized for a pricing cell.
pub const PRICING_CODE_PREFIX: &str = "ASC";

pub const DEFAULT_CURRENCY: &str = "INR";

// ============ Candidate Chains ============

pub mod chains {
    use crate::fields::FieldChain;

    // Assign-plan entries
    pub const PLAN_ID: FieldChain = FieldChain::new(&["id"]);
    pub const PLAN_TITLE: FieldChain = FieldChain::new(&["title", "name"]);
    pub const PLAN_PRICE: FieldChain = FieldChain::new(&["price"]);
    pub const PLAN_CURRENCY: FieldChain = FieldChain::new(&["currency"]);
    pub const PLAN_SCOPE: FieldChain = FieldChain::new(&["cover_scope", "scope"]);

    // Cover-plan access: grouped `covers[].customize_covers[]` shape
    pub const GROUPED_COVER_ID: FieldChain = FieldChain::new(&["id"]);
    pub const GROUPED_COVER_NAME: FieldChain = FieldChain::new(&["title", "name"]);
    pub const GROUPED_COVER_PRICE: FieldChain = FieldChain::new(&["price"]);

    // Cover-plan access: flat list shape, item keys then nested-object keys
    pub const COVER_ITEM_LISTS: [&str; 3] = ["results", "data", "customize_covers"];
    pub const COVER_NESTED: FieldChain = FieldChain::new(&["customize_cover", "cover", "plan"]);
    pub const COVER_ID: FieldChain = FieldChain::new(&["customize_cover_id", "cover_id", "id"]);
    pub const NESTED_COVER_ID: FieldChain = FieldChain::new(&["id", "customize_cover_id"]);
    pub const COVER_NAME: FieldChain = FieldChain::new(&[
        "name",
        "plan_name",
        "cover_name",
        "title",
        "plan_title",
    ]);
    pub const NESTED_COVER_NAME: FieldChain = FieldChain::new(&["name", "plan_name", "title"]);
    pub const COVER_PRICE: FieldChain = FieldChain::new(&["base_price", "price", "cover_price"]);
    pub const NESTED_COVER_PRICE: FieldChain = FieldChain::new(&["base_price", "price"]);

    // Pricing entries
    pub const PRICING_DURATION: FieldChain =
        FieldChain::new(&["duration", "duration_days", "days"]);
    pub const PRICING_ID: FieldChain = FieldChain::new(&["id"]);
    pub const PRICING_PRICE: FieldChain = FieldChain::new(&["price", "amount"]);
    pub const PRICING_TYPE: FieldChain = FieldChain::new(&["type"]);

    // Trip status
    pub const TRIP_ACTIVE: FieldChain = FieldChain::new(&["active", "Active"]);
    pub const TRIP_YET_TO_ACTIVE: FieldChain = FieldChain::new(&["inactive", "Yet to Active"]);
    pub const TRIP_MATURED: FieldChain = FieldChain::new(&["matured", "Matured"]);
    pub const TRIP_PENDING: FieldChain = FieldChain::new(&["pending", "Pending"]);

    // Wallet
    pub const WALLET_BALANCE: FieldChain = FieldChain::new(&["balance", "available_balance"]);

    // Payments
    pub const PAYMENT_TRANSACTION_ID: FieldChain =
        FieldChain::new(&["transaction_id", "transaction_number"]);
    pub const PAYMENT_GATEWAY: FieldChain = FieldChain::new(&["gateway"]);
    pub const PAYMENT_METHOD: FieldChain = FieldChain::new(&["method"]);
    pub const PAYMENT_CURRENCY: FieldChain = FieldChain::new(&["currency"]);
    pub const PAYMENT_TOTAL: FieldChain = FieldChain::new(&["total_amount", "amount"]);
    pub const PAYMENT_STATUS: FieldChain = FieldChain::new(&["status"]);

    // Wallet transactions
    pub const TX_AMOUNT: FieldChain = FieldChain::new(&["amount"]);
    pub const TX_NUMBER: FieldChain = FieldChain::new(&["transaction_number", "transaction_id"]);
    pub const TX_TYPE: FieldChain = FieldChain::new(&["transaction_type"]);
    pub const TX_STATUS: FieldChain = FieldChain::new(&["status"]);
    pub const TX_CREATED_BY: FieldChain = FieldChain::new(&["created_by"]);
    pub const TX_CREATED_AT: FieldChain = FieldChain::new(&["created_at"]);

    // Pagination
    pub const PAGE_COUNT: FieldChain = FieldChain::new(&["count"]);
    pub const PAGE_LINKS: FieldChain = FieldChain::new(&["links"]);
    pub const LINK_NEXT: FieldChain = FieldChain::new(&["next"]);
    pub const LINK_PREVIOUS: FieldChain = FieldChain::new(&["previous"]);
}

use chains::*;

// ============ Cover Plans ============

/// Normalizes the assign-plan response.
///
/// Accepts `{ customize_covers: [...] }` or `[{ customize_covers: [...] }, ...]`.
/// Entries without a whole-number id are dropped.
pub fn normalize_assign_plans(raw: &Value) -> Vec<CoverPlan> {
    let groups: Vec<&Value> = match raw {
        Value::Array(items) => items.iter().filter(|v| v.is_object()).collect(),
        Value::Object(_) => vec![raw],
        _ => return Vec::new(),
    };

    groups
        .into_iter()
        .filter_map(|group| array_at(group, "customize_covers"))
        .flatten()
        .filter_map(cover_plan)
        .collect()
}

fn cover_plan(item: &Value) -> Option<CoverPlan> {
    let id = PLAN_ID.resolve(item).and_then(fields::to_integer)?;
    Some(CoverPlan {
        id,
        title: PLAN_TITLE.text_or(item, ""),
        price: PLAN_PRICE.number(item).unwrap_or(0.0),
        currency: PLAN_CURRENCY.text_or(item, DEFAULT_CURRENCY),
        cover_scope: PLAN_SCOPE.text_or(item, ""),
    })
}

// ============ Cover Options ============

/// Normalizes the user-cover-plan-access response into dropdown options.
///
/// The grouped `covers[].customize_covers[]` shape is tried first. Otherwise
/// the items are taken from `results`, `data` or `customize_covers` (or the
/// array itself, or the object as a single item) and each field is resolved
/// against the item and then its nested `customize_cover`/`cover`/`plan`.
pub fn normalize_cover_options(raw: &Value) -> Vec<CoverOption> {
    if let Some(groups) = array_at(raw, "covers") {
        return groups
            .iter()
            .filter_map(|group| array_at(group, "customize_covers"))
            .flatten()
            .filter_map(grouped_cover_option)
            .collect();
    }

    let items: Vec<&Value> = match raw {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => COVER_ITEM_LISTS
            .iter()
            .find_map(|key| array_at(raw, key))
            .map(|items| items.iter().collect())
            .unwrap_or_else(|| vec![raw]),
        _ => Vec::new(),
    };

    items.into_iter().filter_map(flat_cover_option).collect()
}

fn grouped_cover_option(item: &Value) -> Option<CoverOption> {
    let id = valid_cover_id(GROUPED_COVER_ID.resolve(item))?;
    let name = display_name(GROUPED_COVER_NAME.resolve(item));
    let price = GROUPED_COVER_PRICE.resolve(item).and_then(non_empty_text);
    Some(CoverOption {
        id,
        label: option_label(&name, price.as_deref()),
    })
}

fn flat_cover_option(item: &Value) -> Option<CoverOption> {
    let nested = COVER_NESTED.resolve(item).filter(|v| v.is_object());

    let id = valid_cover_id(COVER_ID.resolve_or(item, nested.map(|n| (&NESTED_COVER_ID, n))))?;
    let name = display_name(COVER_NAME.resolve_or(item, nested.map(|n| (&NESTED_COVER_NAME, n))));
    let price = COVER_PRICE
        .resolve_or(item, nested.map(|n| (&NESTED_COVER_PRICE, n)))
        .and_then(non_empty_text);

    Some(CoverOption {
        id,
        label: option_label(&name, price.as_deref()),
    })
}

fn valid_cover_id(value: Option<&Value>) -> Option<i64> {
    value.and_then(fields::to_integer).filter(|id| *id > 0)
}

fn display_name(value: Option<&Value>) -> String {
    let name = value
        .and_then(fields::to_text)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    if name.is_empty() {
        DASH.to_string()
    } else {
        name
    }
}

fn option_label(name: &str, price: Option<&str>) -> String {
    match price {
        Some(price) => format!("{} - {} {}", name, price, DEFAULT_CURRENCY),
        None => name.to_string(),
    }
}

// ============ Pricing Grid ============

/// Reshapes the flat pricing list into a duration x option-type grid.
///
/// Entries with a zero, missing or fractional duration are skipped. A later
/// entry for the same (duration, type) pair replaces the earlier one.
pub fn parse_pricing(raw: &Value) -> PricingGrid {
    let mut by_duration: BTreeMap<i64, BTreeMap<String, PricingOption>> = BTreeMap::new();
    let mut types: BTreeSet<String> = BTreeSet::new();

    for item in list_items(raw) {
        let duration = match PRICING_DURATION.resolve(item).and_then(fields::to_integer) {
            Some(d) if d != 0 => d,
            _ => continue,
        };

        let option_type = PRICING_TYPE
            .text(item)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_OPTION_TYPE.to_string());
        let code = PRICING_ID
            .text(item)
            .map(|id| format!("{}{}", PRICING_CODE_PREFIX, id))
            .unwrap_or_default();
        let price = PRICING_PRICE.number(item).unwrap_or(0.0);

        types.insert(option_type.clone());
        by_duration
            .entry(duration)
            .or_default()
            .insert(option_type, PricingOption { code, price });
    }

    PricingGrid {
        rows: by_duration
            .into_iter()
            .map(|(days, options_by_type)| PricingRow {
                days,
                options_by_type,
            })
            .collect(),
        option_types: types.into_iter().collect(),
    }
}

// ============ Trip Status ============

/// Maps the trip-status response onto the four display counts.
pub fn normalize_trip_status(raw: &Value) -> TripStatusCounts {
    let count = |chain: &FieldChain| {
        chain
            .number(raw)
            .map(|n| n.trunc() as i64)
            .unwrap_or(0)
    };

    TripStatusCounts {
        active: count(&TRIP_ACTIVE),
        yet_to_active: count(&TRIP_YET_TO_ACTIVE),
        matured: count(&TRIP_MATURED),
        pending: count(&TRIP_PENDING),
    }
}

// ============ Paginated Lists ============

/// Nouns used in a list's pagination footer.
#[derive(Debug, Clone, Copy)]
pub struct ListNouns {
    /// Singular noun for the "N <noun>s total" text.
    pub singular: &'static str,
    /// Text shown when the count is zero.
    pub empty: &'static str,
}

pub const PAYMENT_NOUNS: ListNouns = ListNouns {
    singular: "payment",
    empty: "No payments",
};

pub const TRANSACTION_NOUNS: ListNouns = ListNouns {
    singular: "transaction",
    empty: "No transactions",
};

pub const QUOTE_LINK_NOUNS: ListNouns = ListNouns {
    singular: "link",
    empty: "No quote links",
};

/// Items of a list response: a bare array, or the `results` array of a wrapper.
pub fn list_items(raw: &Value) -> &[Value] {
    match raw {
        Value::Array(items) => items,
        _ => array_at(raw, "results").map(Vec::as_slice).unwrap_or(&[]),
    }
}

/// Builds a page from a list response.
///
/// Non-object items are dropped. The controls follow `links.next` and
/// `links.previous` only; the count is used for the footer text and to decide
/// whether the footer shows at all.
pub fn normalize_page<T>(
    raw: &Value,
    page: u32,
    nouns: ListNouns,
    row: impl Fn(&Value) -> T,
) -> Page<T> {
    let results: Vec<T> = list_items(raw)
        .iter()
        .filter(|item| item.is_object())
        .map(row)
        .collect();

    let count = PAGE_COUNT
        .number(raw)
        .filter(|n| *n > 0.0)
        .map(|n| n.trunc() as u64)
        .unwrap_or(0);

    let links = PAGE_LINKS
        .resolve(raw)
        .map(|links| PageLinks {
            next: LINK_NEXT.resolve(links).and_then(non_empty_text),
            previous: LINK_PREVIOUS.resolve(links).and_then(non_empty_text),
        })
        .unwrap_or_default();

    let has_next = links.next.is_some();
    let has_previous = links.previous.is_some();

    Page {
        page: page.max(1),
        results,
        count,
        has_next,
        has_previous,
        show_controls: has_next || has_previous || count > 0,
        summary: page_summary(count, nouns),
        links,
    }
}

fn page_summary(count: u64, nouns: ListNouns) -> String {
    match count {
        0 => nouns.empty.to_string(),
        1 => format!("1 {} total", nouns.singular),
        n => format!("{} {}s total", n, nouns.singular),
    }
}

pub fn normalize_payments_page(raw: &Value, page: u32) -> Page<PaymentRow> {
    normalize_page(raw, page, PAYMENT_NOUNS, payment_row)
}

pub fn normalize_wallet_transactions_page(raw: &Value, page: u32) -> Page<WalletTransactionRow> {
    normalize_page(raw, page, TRANSACTION_NOUNS, wallet_transaction_row)
}

pub fn normalize_quote_links_page(raw: &Value, page: u32) -> Page<QuoteLinkRow> {
    normalize_page(raw, page, QUOTE_LINK_NOUNS, quote_link_row)
}

pub fn payment_row(item: &Value) -> PaymentRow {
    PaymentRow {
        transaction_id: PAYMENT_TRANSACTION_ID.text_or(item, DASH),
        gateway: PAYMENT_GATEWAY.text_or(item, "ASC360 WALLET"),
        method: PAYMENT_METHOD.text_or(item, "WALLET"),
        currency: PAYMENT_CURRENCY.text_or(item, DEFAULT_CURRENCY),
        total_amount: PAYMENT_TOTAL.text_or(item, DASH),
        status: PAYMENT_STATUS.text_or(item, "Success"),
    }
}

pub fn wallet_transaction_row(item: &Value) -> WalletTransactionRow {
    WalletTransactionRow {
        amount: TX_AMOUNT.text_or(item, DASH),
        transaction_number: TX_NUMBER.text_or(item, DASH),
        transaction_type: TX_TYPE.text_or(item, "DEDUCT"),
        status: TX_STATUS.text_or(item, DASH),
        created_by: TX_CREATED_BY.text_or(item, DASH),
        created_at: TX_CREATED_AT
            .resolve(item)
            .and_then(non_empty_text)
            .map(|ts| format_timestamp(&ts))
            .unwrap_or_else(|| DASH.to_string()),
    }
}

pub fn quote_link_row(item: &Value) -> QuoteLinkRow {
    let text = |key: &'static [&'static str], default: &str| FieldChain::new(key).text_or(item, default);

    QuoteLinkRow {
        id: text(&["id"], ""),
        adventure: text(&["adventure"], DASH),
        price: text(&["price"], DASH),
        name: text(&["name"], DASH),
        email: text(&["email"], DASH),
        nationality: text(&["nationality"], DASH),
        start_date: text(&["start_date"], DASH),
        end_date: text(&["end_date"], DASH),
        total_pax: text(&["num_people"], DASH),
        travelling_from: text(&["travelling_from"], DASH),
        travelling_to: text(&["travelling_to"], DASH),
        link_status: if item.get("link_status").map(is_truthy).unwrap_or(false) {
            "Active".to_string()
        } else {
            "Expired".to_string()
        },
        trip_status: text(&["trip_status"], "pending"),
        unique_link: item.get("unique_link").and_then(non_empty_text),
    }
}

// ============ Wallet ============

/// Resolves the wallet balance from `balance` or `available_balance`.
///
/// A non-blank string is displayed as sent, and `balance` is its parsed value
/// or zero when it does not parse. Other non-numeric values count as zero.
pub fn wallet_summary(raw: &Value) -> WalletSummary {
    match WALLET_BALANCE.resolve(raw) {
        Some(Value::String(s)) if !s.trim().is_empty() => WalletSummary {
            balance: s.trim().parse::<f64>().ok().filter(|n| n.is_finite()).unwrap_or(0.0),
            display: format!("{} {}", DEFAULT_CURRENCY, s),
        },
        Some(v) => wallet_summary_from_amount(fields::to_number(v).unwrap_or(0.0)),
        None => wallet_summary_from_amount(0.0),
    }
}

pub fn wallet_summary_from_amount(amount: f64) -> WalletSummary {
    WalletSummary {
        balance: amount,
        display: format!("{} {}", DEFAULT_CURRENCY, format_inr(amount)),
    }
}

/// Formats an amount with Indian digit grouping and two decimals: `1,23,456.50`.
pub fn format_inr(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let grouped = if whole.len() <= 3 {
        whole.to_string()
    } else {
        let (head, last_three) = whole.split_at(whole.len() - 3);
        let mut parts: Vec<&str> = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let (left, right) = rest.split_at(rest.len() - 2);
            parts.push(right);
            rest = left;
        }
        parts.push(rest);
        parts.reverse();
        format!("{},{}", parts.join(","), last_three)
    };

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

/// Renders an upstream timestamp as `21 Feb 2026, 10:30 AM`; unparseable input is returned as-is.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%-d %b %Y, %I:%M %p";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return ndt.format(DISPLAY).to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%-d %b %Y").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_assign_plans_from_array_wrapper() {
        let raw = json!([
            {"customize_covers": [{"id": 1, "name": "Trek", "scope": "Domestic"}]},
            "noise",
            {"customize_covers": [{"id": "2", "title": "Raft", "price": "250.5", "currency": "USD"}]}
        ]);
        let plans = normalize_assign_plans(&raw);

        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].title, "Trek");
        assert_eq!(plans[0].cover_scope, "Domestic");
        assert_eq!(plans[0].currency, "INR");
        assert_eq!(plans[0].price, 0.0);
        assert_eq!(plans[1].id, 2);
        assert_eq!(plans[1].price, 250.5);
        assert_eq!(plans[1].currency, "USD");
    }

    #[test]
    fn test_assign_plans_drop_entries_without_id() {
        let raw = json!({"customize_covers": [{"title": "No id"}, {"id": "abc"}, {"id": 9}]});
        let plans = normalize_assign_plans(&raw);
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].id, 9);
    }

    #[test]
    fn test_grouped_cover_options() {
        let raw = json!({
            "covers": [
                {"customize_covers": [
                    {"id": 374, "title": "  Himalayan Trek  ", "price": 1200},
                    {"id": 375, "name": "Rafting", "price": ""},
                    {"id": 0, "title": "Broken"}
                ]},
                {"customize_covers": null}
            ]
        });
        let options = normalize_cover_options(&raw);

        assert_eq!(
            options,
            vec![
                CoverOption {
                    id: 374,
                    label: "Himalayan Trek - 1200 INR".to_string()
                },
                CoverOption {
                    id: 375,
                    label: "Rafting".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_flat_cover_options_with_nested_objects() {
        let raw = json!({
            "results": [
                {"customize_cover": {"id": 11, "plan_name": "Scuba", "base_price": "999"}},
                {"cover_id": 12, "cover_name": "Paragliding", "cover_price": 450},
                {"plan": {"customize_cover_id": 13, "title": ""}},
                {"id": -4, "name": "Negative"},
                {"name": "Missing id"}
            ]
        });
        let options = normalize_cover_options(&raw);

        assert_eq!(options.len(), 3);
        assert_eq!(options[0].label, "Scuba - 999 INR");
        assert_eq!(options[1].id, 12);
        assert_eq!(options[1].label, "Paragliding - 450 INR");
        assert_eq!(options[2].id, 13);
        assert_eq!(options[2].label, "—");
    }

    #[test]
    fn test_cover_options_item_list_precedence() {
        let raw = json!({
            "data": [{"id": 2, "name": "From data"}],
            "customize_covers": [{"id": 3, "name": "From customize_covers"}]
        });
        let options = normalize_cover_options(&raw);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].id, 2);
    }

    #[test]
    fn test_cover_options_single_object_and_bare_array() {
        let single = normalize_cover_options(&json!({"id": 8, "name": "Solo"}));
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].label, "Solo");

        let bare = normalize_cover_options(&json!([{"id": 5, "title": "Bare", "price": 10}]));
        assert_eq!(bare[0].label, "Bare - 10 INR");
    }

    #[test]
    fn test_pricing_skips_zero_and_missing_duration() {
        let raw = json!([
            {"id": 1, "duration": 0, "price": 10},
            {"id": 2, "price": 20},
            {"id": 3, "days": "15", "amount": "30", "type": "  "}
        ]);
        let grid = parse_pricing(&raw);

        assert_eq!(grid.rows.len(), 1);
        assert_eq!(grid.rows[0].days, 15);
        assert_eq!(grid.option_types, vec!["Option1".to_string()]);
        assert_eq!(
            grid.cell(15, "Option1"),
            Some(&PricingOption {
                code: "ASC3".to_string(),
                price: 30.0
            })
        );
    }

    #[test]
    fn test_pricing_from_results_wrapper_without_id() {
        let grid = parse_pricing(&json!({"results": [{"duration_days": 7, "price": 5, "type": "Option2"}]}));
        assert_eq!(grid.rows[0].options_by_type["Option2"].code, "");
        assert_eq!(grid.column_headers(), vec!["Option2".to_string()]);
    }

    #[test]
    fn test_empty_grid_headers_fall_back() {
        let grid = parse_pricing(&json!(null));
        assert!(grid.rows.is_empty());
        assert_eq!(grid.column_headers(), vec!["Option1".to_string()]);
    }

    #[test]
    fn test_trip_status_accepts_display_keys() {
        let counts = normalize_trip_status(&json!({"Active": "4", "Yet to Active": 2, "Pending": null}));
        assert_eq!(counts.active, 4);
        assert_eq!(counts.yet_to_active, 2);
        assert_eq!(counts.matured, 0);
        assert_eq!(counts.pending, 0);
    }

    #[test]
    fn test_page_footer() {
        let raw = json!({"results": [{}], "count": 1, "links": {"next": "", "previous": null}});
        let page = normalize_payments_page(&raw, 1);
        assert!(!page.has_next);
        assert!(!page.has_previous);
        assert!(page.show_controls);
        assert_eq!(page.summary, "1 payment total");

        let empty = normalize_quote_links_page(&json!([]), 0);
        assert_eq!(empty.page, 1);
        assert!(!empty.show_controls);
        assert_eq!(empty.summary, "No quote links");
    }

    #[test]
    fn test_page_navigation() {
        let raw = json!({"results": [], "count": 40, "links": {"next": "?page=3", "previous": "?page=1"}});
        let page = normalize_wallet_transactions_page(&raw, 2);
        assert_eq!(page.next_page(), Some(3));
        assert_eq!(page.previous_page(), Some(1));
        assert_eq!(page.summary, "40 transactions total");
    }

    #[test]
    fn test_payment_row_defaults_and_fallbacks() {
        let row = payment_row(&json!({"transaction_number": "TXN-9", "amount": 1500}));
        assert_eq!(row.transaction_id, "TXN-9");
        assert_eq!(row.gateway, "ASC360 WALLET");
        assert_eq!(row.method, "WALLET");
        assert_eq!(row.currency, "INR");
        assert_eq!(row.total_amount, "1500");
        assert_eq!(row.status, "Success");

        let blank = payment_row(&json!("not an object"));
        assert_eq!(blank.transaction_id, "—");
        assert_eq!(blank.total_amount, "—");
    }

    #[test]
    fn test_wallet_transaction_row() {
        let row = wallet_transaction_row(&json!({
            "amount": 250,
            "transaction_id": "W-1",
            "created_at": "2026-02-21T10:30:00+05:30"
        }));
        assert_eq!(row.amount, "250");
        assert_eq!(row.transaction_number, "W-1");
        assert_eq!(row.transaction_type, "DEDUCT");
        assert_eq!(row.status, "—");
        assert_eq!(row.created_at, "21 Feb 2026, 10:30 AM");
    }

    #[test]
    fn test_quote_link_row() {
        let row = quote_link_row(&json!({
            "id": 44,
            "adventure": "Rafting",
            "num_people": 3,
            "link_status": true,
            "unique_link": "https://quote.example.com/abc"
        }));
        assert_eq!(row.id, "44");
        assert_eq!(row.total_pax, "3");
        assert_eq!(row.link_status, "Active");
        assert_eq!(row.trip_status, "pending");
        assert_eq!(row.email, "—");
        assert_eq!(row.unique_link.as_deref(), Some("https://quote.example.com/abc"));

        let expired = quote_link_row(&json!({"link_status": 0, "unique_link": ""}));
        assert_eq!(expired.link_status, "Expired");
        assert_eq!(expired.unique_link, None);
    }

    #[test]
    fn test_wallet_summary() {
        assert_eq!(wallet_summary(&json!({"balance": 123456.5})).display, "INR 1,23,456.50");
        assert_eq!(
            wallet_summary(&json!({"available_balance": 99})).display,
            "INR 99.00"
        );
        let raw_string = wallet_summary(&json!({"balance": "5000.00"}));
        assert_eq!(raw_string.display, "INR 5000.00");
        assert_eq!(raw_string.balance, 5000.0);
        assert_eq!(wallet_summary(&json!(null)).display, "INR 0.00");
    }

    #[test]
    fn test_format_inr_grouping() {
        assert_eq!(format_inr(0.0), "0.00");
        assert_eq!(format_inr(999.999), "1,000.00");
        assert_eq!(format_inr(12345678.9), "1,23,45,678.90");
        assert_eq!(format_inr(-1500.0), "-1,500.00");
    }

    #[test]
    fn test_format_timestamp_fallbacks() {
        assert_eq!(format_timestamp("2026-02-21 08:05:00"), "21 Feb 2026, 08:05 AM");
        assert_eq!(format_timestamp("2026-02-21"), "21 Feb 2026");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }
}
