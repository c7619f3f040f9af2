//! Row filters for `get-where`.
//!
//! A filter compares one column of an entity's serialized form against a
//! text operand. Numeric, date and boolean columns compare by value; other
//! columns compare as text. A list of filters folds left to right, each
//! joined to the running result by its own `and`/`or`.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::ResourceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCondition {
    IsEqualTo,
    IsNotEqualTo,
    IsLessThan,
    IsLessThanOrEqualTo,
    IsGreaterThan,
    IsGreaterThanOrEqualTo,
    /// Case-insensitive substring; `%` at either end is ignored
    IsLike,
    IsNotLike,
}

/// How a filter joins the filters before it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterStatement {
    #[default]
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default)]
    pub filter_statement: FilterStatement,
    pub column_name: String,
    pub filter_condition: FilterCondition,
    pub filter_value: String,
}

impl Filter {
    pub fn new(column_name: impl Into<String>, filter_condition: FilterCondition, filter_value: impl Into<String>) -> Self {
        Self {
            filter_statement: FilterStatement::And,
            column_name: column_name.into(),
            filter_condition,
            filter_value: filter_value.into(),
        }
    }

    pub fn or(mut self) -> Self {
        self.filter_statement = FilterStatement::Or;
        self
    }

    /// Evaluate against one row's columns
    pub fn matches(&self, row: &serde_json::Map<String, Value>) -> Result<bool, ResourceError> {
        let column = row.get(&self.column_name).ok_or_else(|| ResourceError::InvalidFilter {
            column: self.column_name.clone(),
        })?;
        let operand = self.filter_value.as_str();

        Ok(match self.filter_condition {
            FilterCondition::IsLike => is_like(column, operand),
            FilterCondition::IsNotLike => !is_like(column, operand),
            condition => match compare(column, operand) {
                Some(ordering) => match condition {
                    FilterCondition::IsEqualTo => ordering == Ordering::Equal,
                    FilterCondition::IsNotEqualTo => ordering != Ordering::Equal,
                    FilterCondition::IsLessThan => ordering == Ordering::Less,
                    FilterCondition::IsLessThanOrEqualTo => ordering != Ordering::Greater,
                    FilterCondition::IsGreaterThan => ordering == Ordering::Greater,
                    FilterCondition::IsGreaterThanOrEqualTo => ordering != Ordering::Less,
                    FilterCondition::IsLike | FilterCondition::IsNotLike => false,
                },
                // NULL never compares, except as "not equal"
                None => condition == FilterCondition::IsNotEqualTo,
            },
        })
    }
}

/// Fold `filters` over one row. No filters matches every row.
pub fn matches_all(filters: &[Filter], row: &serde_json::Map<String, Value>) -> Result<bool, ResourceError> {
    let mut iter = filters.iter();
    let Some(first) = iter.next() else {
        return Ok(true);
    };

    let mut result = first.matches(row)?;
    for filter in iter {
        let current = filter.matches(row)?;
        result = match filter.filter_statement {
            FilterStatement::And => result && current,
            FilterStatement::Or => result || current,
        };
    }
    Ok(result)
}

fn column_text(column: &Value) -> String {
    match column {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn is_like(column: &Value, operand: &str) -> bool {
    let needle = operand.trim_matches('%').to_lowercase();
    column_text(column).to_lowercase().contains(&needle)
}

fn compare(column: &Value, operand: &str) -> Option<Ordering> {
    let operand = operand.trim();
    match column {
        Value::Null => None,
        Value::Bool(b) => bool::from_str(&operand.to_lowercase()).ok().map(|o| b.cmp(&o)),
        Value::Number(n) => {
            let left = Decimal::from_str(&n.to_string()).ok()?;
            let right = Decimal::from_str(operand).ok()?;
            Some(left.cmp(&right))
        }
        Value::String(s) => {
            if let (Ok(left), Ok(right)) = (Decimal::from_str(s), Decimal::from_str(operand)) {
                return Some(left.cmp(&right));
            }
            if let (Ok(left), Ok(right)) = (NaiveDate::from_str(s), NaiveDate::from_str(operand)) {
                return Some(left.cmp(&right));
            }
            Some(s.as_str().cmp(operand))
        }
        other => Some(other.to_string().as_str().cmp(operand)),
    }
}
