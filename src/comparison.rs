//! Side-by-side comparison of two estimates

use crate::breakdown::GenericCostBreakdown;
use serde::{Deserialize, Serialize};

/// Which of the two configurations is cheaper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CheaperOption {
    First,
    Second,
}

impl From<CheaperOption> for u8 {
    fn from(option: CheaperOption) -> Self {
        match option {
            CheaperOption::First => 1,
            CheaperOption::Second => 2,
        }
    }
}

impl TryFrom<u8> for CheaperOption {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CheaperOption::First),
            2 => Ok(CheaperOption::Second),
            other => Err(format!("cheaper option must be 1 or 2, got {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub first: GenericCostBreakdown,
    pub second: GenericCostBreakdown,
    /// Absolute monthly difference between the two totals
    pub savings: f64,
    /// `savings` as a percentage of the more expensive total
    pub savings_percentage: f64,
    pub cheaper_option: Option<CheaperOption>,
}

impl ComparisonResult {
    pub fn cheaper(&self) -> Option<&GenericCostBreakdown> {
        match self.cheaper_option? {
            CheaperOption::First => Some(&self.first),
            CheaperOption::Second => Some(&self.second),
        }
    }
}

pub fn compare(first: GenericCostBreakdown, second: GenericCostBreakdown) -> ComparisonResult {
    let total1 = first.total;
    let total2 = second.total;

    let savings = (total1 - total2).abs();
    let savings_percentage = if total1 != 0.0 || total2 != 0.0 {
        (savings / total1.max(total2)) * 100.0
    } else {
        0.0
    };
    let cheaper_option = if total1 < total2 {
        Some(CheaperOption::First)
    } else if total1 > total2 {
        Some(CheaperOption::Second)
    } else {
        None
    };

    ComparisonResult {
        first,
        second,
        savings,
        savings_percentage,
        cheaper_option,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakdown::CostBreakdownItem;

    fn total(value: f64) -> GenericCostBreakdown {
        GenericCostBreakdown {
            items: vec![CostBreakdownItem::new("Only", value)],
            total: value,
        }
    }

    #[test]
    fn test_first_cheaper() {
        let result = compare(total(75.0), total(100.0));
        assert_eq!(result.savings, 25.0);
        assert_eq!(result.savings_percentage, 25.0);
        assert_eq!(result.cheaper_option, Some(CheaperOption::First));
        assert_eq!(result.cheaper().map(|b| b.total), Some(75.0));
    }

    #[test]
    fn test_second_cheaper() {
        let result = compare(total(10.0), total(2.5));
        assert_eq!(result.savings, 7.5);
        assert_eq!(result.savings_percentage, 75.0);
        assert_eq!(result.cheaper_option, Some(CheaperOption::Second));
    }

    #[test]
    fn test_equal_totals() {
        let result = compare(total(5.0), total(5.0));
        assert_eq!(result.savings, 0.0);
        assert_eq!(result.savings_percentage, 0.0);
        assert_eq!(result.cheaper_option, None);
        assert!(result.cheaper().is_none());
    }

    #[test]
    fn test_both_zero() {
        let result = compare(total(0.0), total(0.0));
        assert_eq!(result.savings_percentage, 0.0);
        assert_eq!(result.cheaper_option, None);
    }

    #[test]
    fn test_cheaper_option_json() {
        let result = compare(total(1.0), total(2.0));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["cheaperOption"], 1);
        assert_eq!(value["savingsPercentage"], 50.0);

        let tie = serde_json::to_value(compare(total(1.0), total(1.0))).unwrap();
        assert!(tie["cheaperOption"].is_null());
    }
}
