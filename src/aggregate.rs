// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure aggregation over a snapshot of transactions and categories.
//!
//! Nothing here touches the database. Callers load a snapshot, pass it in,
//! and call again whenever they decide the snapshot changed.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::Error;
use crate::models::{Category, Kind, Rgb, Transaction};

pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown";
pub const UNKNOWN_CATEGORY_ICON: &str = "circle";
pub const UNKNOWN_CATEGORY_COLOR: Rgb = Rgb::new(0x88, 0x88, 0x88);

/// Income, expense and their difference over some period. Sums saturate at
/// the `Decimal` bounds instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

impl Totals {
    fn add(&mut self, t: &Transaction) {
        match t.kind {
            Kind::Income => self.income = self.income.saturating_add(t.amount),
            Kind::Expense => self.expense = self.expense.saturating_add(t.amount),
        }
        self.balance = self.income.saturating_sub(self.expense);
    }
}

impl<'a> FromIterator<&'a Transaction> for Totals {
    fn from_iter<I: IntoIterator<Item = &'a Transaction>>(iter: I) -> Self {
        let mut totals = Totals::default();
        for t in iter {
            totals.add(t);
        }
        totals
    }
}

/// First and last calendar day of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date - chrono::Days::new(u64::from(date.day0()));
    // Only the last representable month has no successor.
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    (first, last)
}

/// Transactions dated within `[start, end]`, both ends included.
pub fn transactions_in_range(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| start <= t.date && t.date <= end)
        .collect()
}

/// Totals for the calendar month containing `reference`.
pub fn month_totals(transactions: &[Transaction], reference: NaiveDate) -> Totals {
    let (start, end) = month_bounds(reference);
    transactions_in_range(transactions, start, end)
        .into_iter()
        .collect()
}

/// All-time balance: income minus expense across the whole snapshot.
pub fn total_balance(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .map(Transaction::signed_amount)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// One month of a [`MonthlySeries`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthEntry {
    /// First day of the month.
    pub month: NaiveDate,
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

/// `count` consecutive months ending with the month of the reference date.
///
/// Entries are computed on demand; iterating twice recomputes from the same
/// snapshot and yields the same values.
#[derive(Debug, Clone, Copy)]
pub struct MonthlySeries<'a> {
    transactions: &'a [Transaction],
    last_month: NaiveDate,
    count: u32,
}

pub fn monthly_series(
    transactions: &[Transaction],
    reference: NaiveDate,
    count: u32,
) -> Result<MonthlySeries<'_>, Error> {
    if count == 0 {
        return Err(Error::EmptySeries);
    }
    Ok(MonthlySeries {
        transactions,
        last_month: month_bounds(reference).0,
        count,
    })
}

impl<'a> MonthlySeries<'a> {
    pub fn len(&self) -> usize {
        self.count as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> MonthlySeriesIter<'a> {
        MonthlySeriesIter {
            transactions: self.transactions,
            last_month: self.last_month,
            remaining: self.count,
        }
    }
}

impl<'a> IntoIterator for &MonthlySeries<'a> {
    type Item = MonthEntry;
    type IntoIter = MonthlySeriesIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct MonthlySeriesIter<'a> {
    transactions: &'a [Transaction],
    last_month: NaiveDate,
    remaining: u32,
}

impl Iterator for MonthlySeriesIter<'_> {
    type Item = MonthEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // Months before the earliest representable date are reported as empty
        // at that date rather than cutting the series short.
        let month = self
            .last_month
            .checked_sub_months(Months::new(self.remaining))
            .unwrap_or(NaiveDate::MIN);
        let totals = month_totals(self.transactions, month);
        Some(MonthEntry {
            month,
            label: month_label(month),
            income: totals.income,
            expense: totals.expense,
            balance: totals.balance,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for MonthlySeriesIter<'_> {}

/// Three-letter month abbreviation, e.g. "Jan".
pub fn month_label(month: NaiveDate) -> String {
    month.format("%b").to_string()
}

/// Display metadata for a category reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDisplay {
    pub name: String,
    pub icon: String,
    pub color: Rgb,
}

impl CategoryDisplay {
    pub fn placeholder() -> Self {
        CategoryDisplay {
            name: UNKNOWN_CATEGORY_NAME.to_string(),
            icon: UNKNOWN_CATEGORY_ICON.to_string(),
            color: UNKNOWN_CATEGORY_COLOR,
        }
    }
}

/// Category id to display metadata. Misses resolve to the placeholder.
pub struct CategoryLookup<'a> {
    by_id: HashMap<i64, &'a Category>,
}

impl<'a> CategoryLookup<'a> {
    pub fn new(categories: &'a [Category]) -> Self {
        CategoryLookup {
            by_id: categories.iter().map(|c| (c.id, c)).collect(),
        }
    }

    pub fn get(&self, id: i64) -> Option<&'a Category> {
        self.by_id.get(&id).copied()
    }

    pub fn display(&self, id: i64) -> CategoryDisplay {
        match self.get(id) {
            Some(c) => CategoryDisplay {
                name: c.name.clone(),
                icon: c.icon.clone(),
                color: c.color,
            },
            None => CategoryDisplay::placeholder(),
        }
    }
}

/// One row of a [`category_breakdown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category_id: i64,
    pub name: String,
    pub icon: String,
    pub color: Rgb,
    pub total: Decimal,
    pub count: usize,
    /// Share of the month's total for this kind, 0 to 100.
    pub percentage: Decimal,
}

/// Per-category totals for one kind within the month of `reference`.
///
/// Uncategorized transactions are left out, both as rows and from the
/// denominator, so percentages over the returned rows add up to 100.
/// Categories missing from `categories` still get a row, labelled with the
/// placeholder. Rows are ordered by total, largest first, then by id.
pub fn category_breakdown(
    transactions: &[Transaction],
    categories: &[Category],
    reference: NaiveDate,
    kind: Kind,
) -> Vec<CategoryShare> {
    let (start, end) = month_bounds(reference);
    let mut groups: BTreeMap<i64, (Decimal, usize)> = BTreeMap::new();
    for t in transactions_in_range(transactions, start, end) {
        if t.kind != kind {
            continue;
        }
        let Some(category_id) = t.category_id else {
            continue;
        };
        let entry = groups.entry(category_id).or_insert((Decimal::ZERO, 0));
        entry.0 = entry.0.saturating_add(t.amount);
        entry.1 += 1;
    }

    let grand_total = groups
        .values()
        .map(|(total, _)| *total)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let lookup = CategoryLookup::new(categories);

    let mut rows: Vec<CategoryShare> = groups
        .into_iter()
        .map(|(category_id, (total, count))| {
            let display = lookup.display(category_id);
            let percentage = if grand_total.is_zero() {
                Decimal::ZERO
            } else {
                // total <= grand_total, so the ratio is at most 1.
                total / grand_total * Decimal::ONE_HUNDRED
            };
            CategoryShare {
                category_id,
                name: display.name,
                icon: display.icon,
                color: display.color,
                total,
                count,
                percentage,
            }
        })
        .collect();
    // BTreeMap iteration already orders by id, and sort_by is stable.
    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows
}
