//! Transaction filtering shared by the finance table and finance statistics.

use crate::model::transaction::{Transaction, TransactionType};
use crate::query::{
    any_field_matches, compare_text, distinct_values, normalize_needle, sort_by_spec, SortSpec,
};
use chrono::NaiveDate;
use std::str::FromStr;

/// Date range and category restriction applied before aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Inclusive lower bound.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub date_to: Option<NaiveDate>,
    /// Exact category match.
    pub category: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.date_from.map_or(true, |from| transaction.date >= from)
            && self.date_to.map_or(true, |to| transaction.date <= to)
            && self
                .category
                .as_deref()
                .map_or(true, |category| transaction.category == category)
    }

    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions
            .iter()
            .filter(|transaction| self.matches(transaction))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionSortField {
    Date,
    Type,
    Description,
    Category,
    Amount,
}

impl FromStr for TransactionSortField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "date" => Ok(Self::Date),
            "type" => Ok(Self::Type),
            "description" => Ok(Self::Description),
            "category" => Ok(Self::Category),
            "amount" => Ok(Self::Amount),
            other => Err(format!("unknown transaction sort field `{other}`")),
        }
    }
}

/// Finance table view state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionQuery {
    pub filter: TransactionFilter,
    /// Matched against description, category and invoice number.
    pub search: String,
    pub kind: Option<TransactionType>,
    pub payment_method: Option<String>,
    pub sort: Option<SortSpec<TransactionSortField>>,
}

pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    query: &TransactionQuery,
) -> Vec<&'a Transaction> {
    let needle = normalize_needle(&query.search);
    let mut result: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| query.filter.matches(transaction))
        .filter(|transaction| query.kind.map_or(true, |kind| transaction.kind == kind))
        .filter(|transaction| {
            query
                .payment_method
                .as_deref()
                .map_or(true, |method| transaction.payment_method.as_deref() == Some(method))
        })
        .filter(|transaction| {
            needle.as_deref().map_or(true, |needle| {
                any_field_matches(
                    [
                        Some(transaction.description.as_str()),
                        Some(transaction.category.as_str()),
                        transaction.invoice_number.as_deref(),
                    ],
                    needle,
                )
            })
        })
        .collect();

    sort_by_spec(&mut result, query.sort.as_ref(), |field, a, b| match field {
        TransactionSortField::Date => a.date.cmp(&b.date),
        TransactionSortField::Type => a.is_expense().cmp(&b.is_expense()),
        TransactionSortField::Description => compare_text(&a.description, &b.description),
        TransactionSortField::Category => compare_text(&a.category, &b.category),
        TransactionSortField::Amount => a.amount.total_cmp(&b.amount),
    });
    result
}

/// Categories for filter dropdowns, first-seen order.
pub fn transaction_categories(transactions: &[Transaction]) -> Vec<String> {
    distinct_values(transactions.iter().map(|transaction| transaction.category.as_str()))
}

/// Payment methods in use, first-seen order.
pub fn payment_methods(transactions: &[Transaction]) -> Vec<String> {
    distinct_values(
        transactions
            .iter()
            .filter_map(|transaction| transaction.payment_method.as_deref()),
    )
}
