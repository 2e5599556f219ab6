// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use tallybook::commands::piggy;
use tallybook::commands::reports::{build_summary, monthly_entries};
use tallybook::commands::transactions::{self, NewTransaction};
use tallybook::error::Error;
use tallybook::models::{Kind, PiggyMove};
use tallybook::{db, utils};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn record(conn: &Connection, uid: i64, kind: Kind, amount: i64, date: NaiveDate, cat: Option<&str>) {
    let category_id = cat.map(|c| utils::resolve_category(conn, uid, c, kind).unwrap().id);
    transactions::add(
        conn,
        uid,
        &NewTransaction {
            kind,
            amount: Decimal::from(amount),
            category_id,
            description: None,
            date,
        },
    )
    .unwrap();
}

/// Income 1000 on 03-05, expense 300 on 03-10, expense 200 on 02-15.
fn scenario() -> (Connection, i64) {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let uid = db::profile_id(&conn, "reporter").unwrap();
    record(&conn, uid, Kind::Income, 1000, d(2024, 3, 5), Some("Salary"));
    record(&conn, uid, Kind::Expense, 300, d(2024, 3, 10), Some("Food"));
    record(&conn, uid, Kind::Expense, 200, d(2024, 2, 15), Some("Food"));
    (conn, uid)
}

#[test]
fn summary_reports_balance_month_and_recent() {
    let (mut conn, uid) = scenario();
    piggy::apply(&mut conn, uid, PiggyMove::Deposit, Decimal::from(25), None).unwrap();

    let s = build_summary(&conn, uid, d(2024, 3, 20)).unwrap();
    assert_eq!(s.total_balance, Decimal::from(500));
    assert_eq!(s.month.income, Decimal::from(1000));
    assert_eq!(s.month.expense, Decimal::from(300));
    assert_eq!(s.month.balance, Decimal::from(700));
    assert_eq!(s.piggy_bank, Decimal::from(25));
    let dates: Vec<_> = s.recent.iter().map(|r| r.date).collect();
    assert_eq!(dates, vec![d(2024, 3, 10), d(2024, 3, 5), d(2024, 2, 15)]);
    assert_eq!(s.recent[0].category.as_deref(), Some("Food"));
}

#[test]
fn summary_keeps_ten_most_recent() {
    let (conn, uid) = scenario();
    for day in 1..=12 {
        record(&conn, uid, Kind::Expense, 1, d(2024, 4, day), None);
    }
    let s = build_summary(&conn, uid, d(2024, 4, 30)).unwrap();
    assert_eq!(s.recent.len(), 10);
    assert_eq!(s.recent[0].date, d(2024, 4, 12));
    assert_eq!(s.month.expense, Decimal::from(12));
}

#[test]
fn monthly_entries_end_at_reference_month() {
    let (conn, uid) = scenario();
    let entries = monthly_entries(&conn, uid, d(2024, 3, 20), 3).unwrap();
    let labels: Vec<_> = entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["Jan", "Feb", "Mar"]);
    assert!(entries[0].income.is_zero() && entries[0].expense.is_zero());
    assert_eq!(entries[1].expense, Decimal::from(200));
    assert_eq!(entries[1].balance, Decimal::from(-200));
    assert_eq!(entries[2].balance, Decimal::from(700));
}

#[test]
fn monthly_entries_reject_zero_months() {
    let (conn, uid) = scenario();
    let err = monthly_entries(&conn, uid, d(2024, 3, 20), 0).unwrap_err();
    assert_eq!(err.downcast_ref::<Error>(), Some(&Error::EmptySeries));
}
