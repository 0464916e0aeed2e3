/// Property-based tests using proptest
/// Normalizers must accept any JSON without panicking and keep their output invariants
use asc_operator_console::fields::{to_integer, to_number};
use asc_operator_console::normalizer::*;
use asc_operator_console::operator::OperatorProfile;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

const KEYS: &[&str] = &[
    "id",
    "name",
    "title",
    "price",
    "base_price",
    "duration",
    "duration_days",
    "days",
    "type",
    "covers",
    "customize_covers",
    "customize_cover",
    "results",
    "data",
    "count",
    "links",
    "next",
    "previous",
    "balance",
    "active",
];

const OPTION_TYPES: &[&str] = &["Option1", "Option2", "Option3"];

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        (-1.0e6f64..1.0e6).prop_map(|n| json!(n)),
        "[ a-zA-Z0-9.-]{0,8}".prop_map(Value::String),
    ];

    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((prop::sample::select(KEYS), inner), 0..6).prop_map(|entries| {
                let map: Map<String, Value> = entries
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect();
                Value::Object(map)
            }),
        ]
    })
}

// Property: normalizers never panic
proptest! {
    #[test]
    fn normalizers_never_panic(raw in arb_json()) {
        let _ = normalize_assign_plans(&raw);
        let _ = normalize_cover_options(&raw);
        let _ = parse_pricing(&raw);
        let _ = normalize_trip_status(&raw);
        let _ = normalize_payments_page(&raw, 1);
        let _ = normalize_wallet_transactions_page(&raw, 2);
        let _ = normalize_quote_links_page(&raw, 3);
        let _ = wallet_summary(&raw);
        let _ = OperatorProfile::from_value(&raw).to_payload();
    }

    #[test]
    fn cover_option_ids_are_positive(raw in arb_json()) {
        for option in normalize_cover_options(&raw) {
            prop_assert!(option.id > 0);
            prop_assert!(!option.label.is_empty());
        }
    }

    #[test]
    fn non_numeric_ids_never_become_covers(
        id in prop_oneof![
            any::<bool>().prop_map(Value::Bool),
            Just(Value::Null),
            "[a-z]{1,6}".prop_map(Value::String),
        ],
        nested in any::<bool>(),
    ) {
        let item = if nested {
            json!({"customize_cover": {"id": id.clone(), "name": "Cover"}})
        } else {
            json!({"id": id.clone(), "name": "Cover"})
        };
        prop_assert!(normalize_cover_options(&json!([item])).is_empty());
        let normalized = normalize_cover_options(&json!({"covers": [{"customize_covers": [{"id": id}]}]}));
        prop_assert!(normalized.is_empty());
    }

    #[test]
    fn pricing_rows_sorted_and_unique(raw in arb_json()) {
        let grid = parse_pricing(&raw);
        for pair in grid.rows.windows(2) {
            prop_assert!(pair[0].days < pair[1].days);
        }
        for row in &grid.rows {
            prop_assert!(row.days != 0);
            for option_type in row.options_by_type.keys() {
                prop_assert!(grid.option_types.contains(option_type));
            }
        }
        for pair in grid.option_types.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn page_controls_match_links(raw in arb_json(), page in 0u32..50) {
        let result = normalize_payments_page(&raw, page);
        prop_assert!(result.page >= 1);
        prop_assert_eq!(result.has_next, result.links.next.is_some());
        prop_assert_eq!(result.has_previous, result.links.previous.is_some());
        if result.has_next || result.has_previous {
            prop_assert!(result.show_controls);
        }
    }
}

// Property: generated pricing lists keep one cell per (duration, type)
proptest! {
    #[test]
    fn pricing_grid_has_every_pair(
        entries in prop::collection::vec(
            (1i64..=90, prop::sample::select(OPTION_TYPES), 1u32..10_000),
            0..30,
        )
    ) {
        let raw = Value::Array(
            entries
                .iter()
                .enumerate()
                .map(|(i, (days, kind, price))| json!({"id": i, "duration": days, "type": kind, "price": price}))
                .collect(),
        );
        let grid = parse_pricing(&raw);

        for (i, (days, kind, _)) in entries.iter().enumerate() {
            let cell = grid.cell(*days, kind);
            prop_assert!(cell.is_some());
            // The last entry for this pair is the one kept
            let last = entries
                .iter()
                .enumerate()
                .filter(|(_, (d, k, _))| d == days && k == kind)
                .map(|(j, _)| j)
                .last()
                .unwrap_or(i);
            prop_assert_eq!(cell.map(|c| c.code.clone()), Some(format!("ASC{}", last)));
        }
    }
}

// Property: numeric coercion
proptest! {
    #[test]
    fn integers_survive_string_coercion(n in any::<i32>()) {
        prop_assert_eq!(to_integer(&json!(n.to_string())), Some(n as i64));
        prop_assert_eq!(to_number(&json!(n)), Some(n as f64));
    }

    #[test]
    fn format_inr_keeps_two_decimals(n in 0.0f64..1.0e12) {
        let formatted = format_inr(n);
        let (_, fraction) = formatted.split_once('.').unwrap();
        prop_assert_eq!(fraction.len(), 2);
        prop_assert!(!formatted.starts_with(','));
    }
}
