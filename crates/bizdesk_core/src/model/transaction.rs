//! Finance transaction record.

use crate::model::entity::{
    require_finite, require_text, Entity, EntityId, EntityKind, ValidationError,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Money flow direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default = "Uuid::new_v4")]
    pub id: EntityId,
    /// Serialized as `type` to match the exported record shape.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_repair_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<f64>,
}

impl Transaction {
    pub fn new(
        kind: TransactionType,
        category: impl Into<String>,
        amount: f64,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            category: category.into(),
            amount,
            description: String::new(),
            date,
            related_repair_id: None,
            payment_method: None,
            tags: Vec::new(),
            invoice_number: None,
            tax_rate: None,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

impl Entity for Transaction {
    const KIND: EntityKind = EntityKind::Transaction;

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text(Self::KIND, "category", &self.category)?;
        require_finite(Self::KIND, "amount", self.amount)?;
        if self.amount <= 0.0 {
            return Err(ValidationError::NonPositive {
                kind: Self::KIND,
                field: "amount",
                value: self.amount,
            });
        }
        if let Some(rate) = self.tax_rate {
            if !(0.0..=100.0).contains(&rate) {
                return Err(ValidationError::OutOfRange {
                    kind: Self::KIND,
                    field: "taxRate",
                    value: rate,
                    min: 0.0,
                    max: 100.0,
                });
            }
        }
        Ok(())
    }
}
