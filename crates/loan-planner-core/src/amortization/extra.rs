use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::terms::parse_amount;
use crate::types::Money;

/// Sparse extra principal payments keyed by 1-based period.
///
/// Edits go through [`ExtraPayments::set`]: a non-positive amount removes the
/// entry rather than storing zero. Deserialized maps are taken as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraPayments(BTreeMap<u32, Money>);

impl ExtraPayments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an extra payment for `period`; `amount <= 0` clears it.
    pub fn set(&mut self, period: u32, amount: Money) {
        if amount <= Decimal::ZERO {
            self.0.remove(&period);
        } else {
            self.0.insert(period, amount);
        }
    }

    /// Apply a raw edit from an input cell. Non-numeric text clears the period.
    pub fn apply_edit(&mut self, period: u32, text: &str) {
        match parse_amount("extra", text) {
            Ok(amount) => self.set(period, amount),
            Err(_) => {
                self.0.remove(&period);
            }
        }
    }

    pub fn remove(&mut self, period: u32) -> Option<Money> {
        self.0.remove(&period)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Extra payment for `period`, zero when absent.
    pub fn get(&self, period: u32) -> Money {
        self.0.get(&period).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, Money)> + '_ {
        self.0.iter().map(|(p, a)| (*p, *a))
    }

    pub fn total(&self) -> Money {
        self.0.values().copied().sum()
    }

    /// Highest period with an entry.
    pub fn last_period(&self) -> Option<u32> {
        self.0.keys().next_back().copied()
    }
}

impl FromIterator<(u32, Money)> for ExtraPayments {
    fn from_iter<I: IntoIterator<Item = (u32, Money)>>(iter: I) -> Self {
        let mut extras = ExtraPayments::new();
        for (period, amount) in iter {
            extras.set(period, amount);
        }
        extras
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_absent_period_is_zero() {
        let extras = ExtraPayments::new();
        assert_eq!(extras.get(7), Decimal::ZERO);
    }

    #[test]
    fn test_non_positive_amount_removes_entry() {
        let mut extras = ExtraPayments::new();
        extras.set(3, dec!(250));
        assert_eq!(extras.get(3), dec!(250));

        extras.set(3, Decimal::ZERO);
        assert!(extras.is_empty());

        extras.set(4, dec!(-10));
        assert!(extras.is_empty());
    }

    #[test]
    fn test_apply_edit_parses_or_clears() {
        let mut extras = ExtraPayments::new();
        extras.apply_edit(1, "5000");
        extras.apply_edit(2, " 125.50 ");
        assert_eq!(extras.get(1), dec!(5000));
        assert_eq!(extras.get(2), dec!(125.50));

        extras.apply_edit(1, "");
        extras.apply_edit(2, "lots");
        assert!(extras.is_empty());
    }

    #[test]
    fn test_total_and_last_period() {
        let extras: ExtraPayments = [(12, dec!(100)), (1, dec!(50)), (6, dec!(0))]
            .into_iter()
            .collect();
        assert_eq!(extras.len(), 2);
        assert_eq!(extras.total(), dec!(150));
        assert_eq!(extras.last_period(), Some(12));
    }

    #[test]
    fn test_serde_transparent_map() {
        let extras: ExtraPayments = serde_json::from_str(r#"{"1": "5000", "24": 250}"#).unwrap();
        assert_eq!(extras.get(1), dec!(5000));
        assert_eq!(extras.get(24), dec!(250));
    }
}
