// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tallybook::aggregate::{
    UNKNOWN_CATEGORY_COLOR, UNKNOWN_CATEGORY_ICON, UNKNOWN_CATEGORY_NAME, category_breakdown,
    month_bounds, month_totals, monthly_series, total_balance, transactions_in_range,
};
use tallybook::error::Error;
use tallybook::models::{Category, Kind, Rgb, Transaction};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn tx(id: i64, kind: Kind, amount: &str, date: NaiveDate, category: Option<i64>) -> Transaction {
    Transaction {
        id,
        user_id: 1,
        kind,
        amount: amount.parse().unwrap(),
        category_id: category,
        description: None,
        date,
        created_at: date.and_hms_opt(12, 0, 0).unwrap(),
    }
}

fn cat(id: i64, name: &str, kind: Kind) -> Category {
    Category {
        id,
        user_id: 1,
        name: name.to_string(),
        icon: "circle".to_string(),
        color: Rgb::new(0xF4, 0x3F, 0x5E),
        kind,
        is_default: false,
    }
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn march_scenario() -> Vec<Transaction> {
    vec![
        tx(1, Kind::Income, "1000", d(2024, 3, 5), None),
        tx(2, Kind::Expense, "300", d(2024, 3, 10), None),
        tx(3, Kind::Expense, "200", d(2024, 2, 20), None),
    ]
}

#[test]
fn month_totals_and_balance_for_scenario() {
    let txs = march_scenario();
    let march = month_totals(&txs, d(2024, 3, 18));
    assert_eq!(march.income, dec("1000"));
    assert_eq!(march.expense, dec("300"));
    assert_eq!(march.balance, dec("700"));
    assert_eq!(total_balance(&txs), dec("500"));
}

#[test]
fn total_balance_matches_signed_sum_in_any_order() {
    let mut txs = vec![
        tx(1, Kind::Income, "0.10", d(2024, 1, 1), None),
        tx(2, Kind::Expense, "0.20", d(2024, 1, 2), None),
        tx(3, Kind::Income, "1234.56", d(2023, 7, 9), None),
        tx(4, Kind::Expense, "999.99", d(2025, 12, 31), None),
        tx(5, Kind::Income, "0", d(2024, 6, 1), None),
    ];
    let expected: Decimal = txs
        .iter()
        .map(|t| match t.kind {
            Kind::Income => t.amount,
            Kind::Expense => -t.amount,
        })
        .sum();
    assert_eq!(total_balance(&txs), expected);
    assert_eq!(expected, dec("234.47"));

    txs.reverse();
    assert_eq!(total_balance(&txs), expected);
    txs.swap(0, 3);
    assert_eq!(total_balance(&txs), expected);
}

#[test]
fn total_balance_of_empty_snapshot_is_zero() {
    assert!(total_balance(&[]).is_zero());
}

#[test]
fn month_bounds_cover_whole_month() {
    assert_eq!(month_bounds(d(2024, 2, 10)), (d(2024, 2, 1), d(2024, 2, 29)));
    assert_eq!(month_bounds(d(2023, 2, 28)), (d(2023, 2, 1), d(2023, 2, 28)));
    assert_eq!(month_bounds(d(2024, 12, 31)), (d(2024, 12, 1), d(2024, 12, 31)));
    assert_eq!(month_bounds(d(2024, 4, 1)), (d(2024, 4, 1), d(2024, 4, 30)));
}

#[test]
fn month_totals_include_first_and_last_day_only() {
    let txs = vec![
        tx(1, Kind::Income, "10", d(2024, 2, 29), None),
        tx(2, Kind::Income, "20", d(2024, 3, 1), None),
        tx(3, Kind::Expense, "5", d(2024, 3, 31), None),
        tx(4, Kind::Expense, "7", d(2024, 4, 1), None),
    ];
    let march = month_totals(&txs, d(2024, 3, 15));
    assert_eq!(march.income, dec("20"));
    assert_eq!(march.expense, dec("5"));
    assert_eq!(march.balance, dec("15"));
}

#[test]
fn month_totals_empty_month_is_all_zero() {
    let txs = march_scenario();
    let t = month_totals(&txs, d(2023, 11, 2));
    assert!(t.income.is_zero());
    assert!(t.expense.is_zero());
    assert!(t.balance.is_zero());
}

#[test]
fn transactions_in_range_is_inclusive() {
    let txs = march_scenario();
    let got = transactions_in_range(&txs, d(2024, 2, 20), d(2024, 3, 5));
    let ids: Vec<i64> = got.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 3]);

    assert!(transactions_in_range(&txs, d(2024, 3, 11), d(2024, 3, 1)).is_empty());
    assert!(transactions_in_range(&[], d(2024, 1, 1), d(2024, 12, 31)).is_empty());
}

#[test]
fn monthly_series_crosses_year_boundary() {
    let txs = vec![
        tx(1, Kind::Income, "100", d(2023, 9, 1), None),
        tx(2, Kind::Expense, "40", d(2023, 12, 31), None),
        tx(3, Kind::Income, "50", d(2024, 2, 29), None),
        tx(4, Kind::Income, "999", d(2023, 8, 31), None),
    ];
    let series = monthly_series(&txs, d(2024, 2, 10), 6).unwrap();
    let entries: Vec<_> = series.iter().collect();
    assert_eq!(entries.len(), 6);

    let months: Vec<NaiveDate> = entries.iter().map(|e| e.month).collect();
    assert_eq!(
        months,
        vec![
            d(2023, 9, 1),
            d(2023, 10, 1),
            d(2023, 11, 1),
            d(2023, 12, 1),
            d(2024, 1, 1),
            d(2024, 2, 1),
        ]
    );
    let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["Sep", "Oct", "Nov", "Dec", "Jan", "Feb"]);

    assert_eq!(entries[0].income, dec("100"));
    assert_eq!(entries[3].expense, dec("40"));
    assert_eq!(entries[3].balance, dec("-40"));
    assert_eq!(entries[5].income, dec("50"));
    assert!(entries[1].income.is_zero() && entries[1].expense.is_zero());
}

#[test]
fn monthly_series_entries_agree_with_month_totals() {
    let txs = march_scenario();
    let series = monthly_series(&txs, d(2024, 3, 31), 3).unwrap();
    for entry in &series {
        let t = month_totals(&txs, entry.month);
        assert_eq!((entry.income, entry.expense, entry.balance), (t.income, t.expense, t.balance));
    }
}

#[test]
fn monthly_series_is_restartable_and_sized() {
    let txs = march_scenario();
    let series = monthly_series(&txs, d(2024, 3, 1), 4).unwrap();
    assert_eq!(series.len(), 4);
    let mut it = series.iter();
    assert_eq!(it.len(), 4);
    it.next();
    assert_eq!(it.len(), 3);

    let first: Vec<_> = series.iter().collect();
    let second: Vec<_> = series.iter().collect();
    assert_eq!(first, second);
    assert_eq!(first.last().unwrap().month, d(2024, 3, 1));
}

#[test]
fn monthly_series_of_one_is_reference_month() {
    let txs = march_scenario();
    let entries: Vec<_> = monthly_series(&txs, d(2024, 3, 20), 1).unwrap().iter().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].month, d(2024, 3, 1));
    assert_eq!(entries[0].balance, dec("700"));
}

#[test]
fn monthly_series_rejects_zero_months() {
    let err = monthly_series(&[], d(2024, 3, 1), 0).unwrap_err();
    assert_eq!(err, Error::EmptySeries);
}

#[test]
fn breakdown_splits_month_by_category() {
    let categories = vec![cat(1, "Food", Kind::Expense), cat(2, "Transport", Kind::Expense)];
    let txs = vec![
        tx(1, Kind::Expense, "100", d(2024, 3, 2), Some(2)),
        tx(2, Kind::Expense, "300", d(2024, 3, 12), Some(1)),
        tx(3, Kind::Expense, "50", d(2024, 2, 12), Some(1)),
        tx(4, Kind::Income, "900", d(2024, 3, 1), Some(1)),
    ];
    let rows = category_breakdown(&txs, &categories, d(2024, 3, 31), Kind::Expense);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Food");
    assert_eq!(rows[0].total, dec("300"));
    assert_eq!(rows[0].count, 1);
    assert_eq!(rows[0].percentage, dec("75"));
    assert_eq!(rows[1].name, "Transport");
    assert_eq!(rows[1].percentage, dec("25"));
}

#[test]
fn breakdown_counts_and_sums_per_category() {
    let categories = vec![cat(1, "Food", Kind::Expense)];
    let txs = vec![
        tx(1, Kind::Expense, "12.50", d(2024, 5, 1), Some(1)),
        tx(2, Kind::Expense, "7.50", d(2024, 5, 31), Some(1)),
    ];
    let rows = category_breakdown(&txs, &categories, d(2024, 5, 15), Kind::Expense);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].count, 2);
    assert_eq!(rows[0].total, dec("20"));
    assert_eq!(rows[0].percentage, dec("100"));
}

#[test]
fn breakdown_percentages_close_to_hundred() {
    let categories = vec![
        cat(1, "A", Kind::Expense),
        cat(2, "B", Kind::Expense),
        cat(3, "C", Kind::Expense),
    ];
    let txs = vec![
        tx(1, Kind::Expense, "1", d(2024, 3, 2), Some(1)),
        tx(2, Kind::Expense, "1", d(2024, 3, 3), Some(2)),
        tx(3, Kind::Expense, "1", d(2024, 3, 4), Some(3)),
    ];
    let rows = category_breakdown(&txs, &categories, d(2024, 3, 1), Kind::Expense);
    let sum: Decimal = rows.iter().map(|r| r.percentage).sum();
    assert!((sum - Decimal::ONE_HUNDRED).abs() <= dec("0.01"), "sum was {}", sum);
}

#[test]
fn breakdown_ties_break_by_category_id() {
    let categories = vec![cat(7, "Seven", Kind::Expense), cat(3, "Three", Kind::Expense)];
    let txs = vec![
        tx(1, Kind::Expense, "10", d(2024, 3, 2), Some(7)),
        tx(2, Kind::Expense, "10", d(2024, 3, 3), Some(3)),
    ];
    let rows = category_breakdown(&txs, &categories, d(2024, 3, 1), Kind::Expense);
    let ids: Vec<i64> = rows.iter().map(|r| r.category_id).collect();
    assert_eq!(ids, vec![3, 7]);
}

#[test]
fn breakdown_of_empty_month_is_empty() {
    let categories = vec![cat(1, "Food", Kind::Expense)];
    let txs = vec![tx(1, Kind::Expense, "10", d(2024, 2, 2), Some(1))];
    assert!(category_breakdown(&txs, &categories, d(2024, 3, 1), Kind::Expense).is_empty());
    assert!(category_breakdown(&txs, &categories, d(2024, 2, 1), Kind::Income).is_empty());
}

#[test]
fn breakdown_with_zero_total_has_zero_percentages() {
    let categories = vec![cat(1, "Food", Kind::Expense), cat(2, "Bills", Kind::Expense)];
    let txs = vec![
        tx(1, Kind::Expense, "0", d(2024, 3, 2), Some(1)),
        tx(2, Kind::Expense, "0.00", d(2024, 3, 3), Some(2)),
    ];
    let rows = category_breakdown(&txs, &categories, d(2024, 3, 1), Kind::Expense);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.percentage.is_zero()));
}

#[test]
fn breakdown_leaves_out_uncategorized() {
    let categories = vec![cat(1, "Food", Kind::Expense)];
    let txs = vec![
        tx(1, Kind::Expense, "30", d(2024, 3, 2), Some(1)),
        tx(2, Kind::Expense, "70", d(2024, 3, 3), None),
    ];
    let rows = category_breakdown(&txs, &categories, d(2024, 3, 1), Kind::Expense);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].percentage, dec("100"));
    // Still part of the month's totals.
    assert_eq!(month_totals(&txs, d(2024, 3, 1)).expense, dec("100"));
}

#[test]
fn breakdown_uses_placeholder_for_missing_category() {
    let categories = vec![cat(1, "Food", Kind::Expense)];
    let txs = vec![
        tx(1, Kind::Expense, "60", d(2024, 3, 2), Some(1)),
        tx(2, Kind::Expense, "40", d(2024, 3, 3), Some(42)),
    ];
    let rows = category_breakdown(&txs, &categories, d(2024, 3, 1), Kind::Expense);
    assert_eq!(rows.len(), 2);
    let missing = &rows[1];
    assert_eq!(missing.category_id, 42);
    assert_eq!(missing.name, UNKNOWN_CATEGORY_NAME);
    assert_eq!(missing.icon, UNKNOWN_CATEGORY_ICON);
    assert_eq!(missing.color, UNKNOWN_CATEGORY_COLOR);
    assert_eq!(missing.percentage, dec("40"));
}

#[test]
fn aggregations_are_idempotent() {
    let categories = vec![cat(1, "Food", Kind::Expense)];
    let txs = vec![
        tx(1, Kind::Expense, "60", d(2024, 3, 2), Some(1)),
        tx(2, Kind::Income, "40", d(2024, 1, 3), None),
    ];
    let date = d(2024, 3, 9);
    assert_eq!(month_totals(&txs, date), month_totals(&txs, date));
    assert_eq!(total_balance(&txs), total_balance(&txs));
    assert_eq!(
        category_breakdown(&txs, &categories, date, Kind::Expense),
        category_breakdown(&txs, &categories, date, Kind::Expense)
    );
    let a: Vec<_> = monthly_series(&txs, date, 3).unwrap().iter().collect();
    let b: Vec<_> = monthly_series(&txs, date, 3).unwrap().iter().collect();
    assert_eq!(a, b);
}

#[test]
fn breakdown_of_single_huge_expense_is_whole_month() {
    let categories = vec![cat(1, "Housing", Kind::Expense)];
    let txs = vec![tx(1, Kind::Expense, "1000000000000000000000000000", d(2024, 3, 2), Some(1))];
    let rows = category_breakdown(&txs, &categories, d(2024, 3, 1), Kind::Expense);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].percentage, dec("100"));
    assert_eq!(rows[0].total, dec("1000000000000000000000000000"));
}

#[test]
fn sums_saturate_instead_of_overflowing() {
    let txs = vec![
        tx(1, Kind::Expense, "79228162514264337593543950335", d(2024, 3, 2), Some(1)),
        tx(2, Kind::Expense, "79228162514264337593543950335", d(2024, 3, 3), Some(2)),
    ];
    assert_eq!(total_balance(&txs), Decimal::MIN);
    let totals = month_totals(&txs, d(2024, 3, 1));
    assert_eq!(totals.expense, Decimal::MAX);
    assert_eq!(totals.balance, Decimal::MIN);

    let categories = vec![cat(1, "A", Kind::Expense), cat(2, "B", Kind::Expense)];
    let rows = category_breakdown(&txs, &categories, d(2024, 3, 1), Kind::Expense);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.percentage <= Decimal::ONE_HUNDRED));
}
