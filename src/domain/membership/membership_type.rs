//! Membership catalog entries and price/period quotes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Discount, MembershipTypeId, Money, ValidationError};
use crate::domain::pricing::final_price;

use super::MembershipDuration;

/// A purchasable plan: how long it lasts, what it costs and how many
/// family members it covers besides the holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipType {
    pub id: MembershipTypeId,
    pub name: String,
    pub duration: MembershipDuration,
    pub max_members: u32,
    pub base_price: Money,
}

/// Period and price for a membership of a given type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MembershipQuote {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub base_price: Money,
    pub discount: Discount,
    pub final_price: Money,
}

impl MembershipType {
    /// Computes the period and discounted price starting on `start_date`.
    pub fn quote(
        &self,
        start_date: NaiveDate,
        discount: Discount,
    ) -> Result<MembershipQuote, ValidationError> {
        Ok(MembershipQuote {
            start_date,
            end_date: self.duration.end_date(start_date)?,
            base_price: self.base_price,
            discount,
            final_price: final_price(self.base_price, discount),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn individual() -> MembershipType {
        MembershipType {
            id: MembershipTypeId::new(1),
            name: "Individual".to_string(),
            duration: MembershipDuration::months(1).unwrap(),
            max_members: 1,
            base_price: Money::from_pesos(500).unwrap(),
        }
    }

    #[test]
    fn individual_month_with_ten_percent_discount() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let quote = individual().quote(start, Discount::try_new(10).unwrap()).unwrap();

        assert_eq!(quote.end_date, NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
        assert_eq!(quote.final_price.to_string(), "450.00");
        assert_eq!(quote.base_price.to_string(), "500.00");
    }

    #[test]
    fn quote_without_discount_keeps_base_price() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let quote = individual().quote(start, Discount::ZERO).unwrap();
        assert_eq!(quote.final_price, quote.base_price);
    }
}
