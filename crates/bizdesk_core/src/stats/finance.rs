//! Finance aggregation: totals, breakdowns and time series.
//!
//! # Invariants
//! - `balance == total_income - total_expense` exactly.
//! - `profit_margin == 0` when there is no income.
//! - Time series are computed over the whole snapshot, not the filtered set.
//! - Monthly buckets are `YYYY-MM` keys in lexicographic order, last 12 kept.

use crate::model::transaction::Transaction;
use crate::query::finance::TransactionFilter;
use crate::stats::{mean, percent_of, rollup, round_to};
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

pub const DAILY_WINDOW_DAYS: u64 = 30;
pub const MONTHLY_WINDOW: usize = 12;
/// Payment-method bucket for transactions without one.
pub const UNSPECIFIED_PAYMENT_METHOD: &str = "unspecified";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Flow {
    pub income: f64,
    pub expense: f64,
}

impl Flow {
    fn add(&mut self, transaction: &Transaction) {
        if transaction.is_income() {
            self.income += transaction.amount;
        } else {
            self.expense += transaction.amount;
        }
    }

    fn of<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut flow = Self::default();
        for transaction in transactions {
            flow.add(transaction);
        }
        flow
    }

    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub category: String,
    pub income: f64,
    pub expense: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentMethodTotal {
    pub method: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    /// `YYYY-MM`.
    pub month: String,
    pub income: f64,
    pub expense: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceStats {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    /// Balance over income in percent, one decimal.
    pub profit_margin: f64,
    pub by_category: Vec<CategoryTotals>,
    pub by_payment_method: Vec<PaymentMethodTotal>,
    /// Mean amount of filtered transactions, rounded to whole units.
    pub average_amount: f64,
    pub largest_income: f64,
    pub largest_expense: f64,
    pub filtered_count: usize,
    pub daily: Vec<DailyPoint>,
    pub monthly: Vec<MonthlyPoint>,
}

/// Aggregates the filtered transactions; series use the whole snapshot.
pub fn finance_stats(
    transactions: &[Transaction],
    filter: &TransactionFilter,
    today: NaiveDate,
) -> FinanceStats {
    let filtered = filter.apply(transactions);
    let flow = Flow::of(filtered.iter().copied());
    let balance = flow.net();

    let by_category = rollup(
        filtered.iter().copied(),
        |transaction: &Transaction| transaction.category.clone(),
        |totals: &mut Flow, transaction| totals.add(transaction),
    )
    .into_iter()
    .map(|(category, totals)| CategoryTotals {
        category,
        income: totals.income,
        expense: totals.expense,
        total: totals.income + totals.expense,
    })
    .collect();

    let by_payment_method = rollup(
        filtered.iter().copied(),
        |transaction: &Transaction| {
            transaction
                .payment_method
                .clone()
                .filter(|method| !method.trim().is_empty())
                .unwrap_or_else(|| UNSPECIFIED_PAYMENT_METHOD.to_string())
        },
        |total: &mut f64, transaction| *total += transaction.amount,
    )
    .into_iter()
    .map(|(method, total)| PaymentMethodTotal { method, total })
    .collect();

    let amount_sum: f64 = filtered.iter().map(|transaction| transaction.amount).sum();

    FinanceStats {
        total_income: flow.income,
        total_expense: flow.expense,
        balance,
        profit_margin: profit_margin(flow),
        by_category,
        by_payment_method,
        average_amount: mean(amount_sum, filtered.len()).round(),
        largest_income: largest(filtered.iter().copied().filter(|t| t.is_income())),
        largest_expense: largest(filtered.iter().copied().filter(|t| t.is_expense())),
        filtered_count: filtered.len(),
        daily: daily_series(transactions, today),
        monthly: monthly_series(transactions),
    }
}

fn profit_margin(flow: Flow) -> f64 {
    round_to(percent_of(flow.net(), flow.income), 1)
}

fn largest<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> f64 {
    transactions.fold(0.0, |max, transaction| max.max(transaction.amount))
}

/// Per-day flow for transactions dated on or after `today - 30 days`.
pub fn daily_series(transactions: &[Transaction], today: NaiveDate) -> Vec<DailyPoint> {
    let window_start = today
        .checked_sub_days(Days::new(DAILY_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN);

    let mut days: BTreeMap<NaiveDate, Flow> = BTreeMap::new();
    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.date >= window_start)
    {
        days.entry(transaction.date).or_default().add(transaction);
    }

    days.into_iter()
        .map(|(date, flow)| DailyPoint {
            date,
            income: flow.income,
            expense: flow.expense,
            balance: flow.net(),
        })
        .collect()
}

/// Per-month flow, last 12 `YYYY-MM` buckets present in the snapshot.
pub fn monthly_series(transactions: &[Transaction]) -> Vec<MonthlyPoint> {
    let mut months: BTreeMap<String, Flow> = BTreeMap::new();
    for transaction in transactions {
        let key = format!(
            "{:04}-{:02}",
            transaction.date.year(),
            transaction.date.month()
        );
        months.entry(key).or_default().add(transaction);
    }

    let skip = months.len().saturating_sub(MONTHLY_WINDOW);
    months
        .into_iter()
        .skip(skip)
        .map(|(month, flow)| MonthlyPoint {
            month,
            income: flow.income,
            expense: flow.expense,
            profit: flow.net(),
        })
        .collect()
}

/// Look-back window for the quick summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryPeriod {
    Today,
    Week,
    Month,
}

impl SummaryPeriod {
    /// First day counted by this period.
    pub fn start(self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::Today => today,
            Self::Week => today.checked_sub_days(Days::new(7)).unwrap_or(today),
            Self::Month => today.with_day(1).unwrap_or(today),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub income: f64,
    pub expense: f64,
    pub profit: f64,
    pub profit_margin: f64,
    pub count: usize,
}

/// Income/expense summary for transactions dated from the period start onwards.
pub fn period_summary(
    transactions: &[Transaction],
    period: SummaryPeriod,
    today: NaiveDate,
) -> PeriodSummary {
    let start = period.start(today);
    let in_period: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| transaction.date >= start)
        .collect();
    let flow = Flow::of(in_period.iter().copied());

    PeriodSummary {
        income: flow.income,
        expense: flow.expense,
        profit: flow.net(),
        profit_margin: profit_margin(flow),
        count: in_period.len(),
    }
}
