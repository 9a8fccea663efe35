//! Membership aggregate.
//!
//! A membership covers one holder plus up to `max_members` family members
//! for a fixed period. Its status is derived from the end date on every
//! read, so the stored record only carries the period and the price paid.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    validate_name, ClientId, Discount, MemberId, MembershipId, MembershipTypeId, Money, Timestamp,
    ValidationError,
};
use crate::domain::pricing::final_price;

use super::{MembershipError, MembershipQuote, MembershipStatus, MembershipType};

/// A person covered by a membership besides the holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
}

/// A purchased membership as stored.
///
/// # Invariants
///
/// - `start_date <= end_date`
/// - `final_price` is the type's base price with `discount` applied
/// - `members.len() <= max_members` of the type at purchase time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveMembership {
    pub id: MembershipId,
    pub client_id: ClientId,
    pub holder_name: String,
    pub membership_type_id: MembershipTypeId,
    pub type_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub discount: Discount,
    pub final_price: Money,
    pub qr_path: Option<String>,
    pub members: Vec<Member>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ActiveMembership {
    /// Derived status as seen on `today`.
    pub fn status(&self, today: NaiveDate) -> MembershipStatus {
        MembershipStatus::on(self.end_date, today)
    }

    /// First day of the next period when renewing on `today`.
    ///
    /// A still-valid membership continues the day after its end date; an
    /// expired one restarts today.
    pub fn next_period_start(&self, today: NaiveDate) -> NaiveDate {
        match self.status(today) {
            MembershipStatus::Expired => today,
            _ => self.end_date.checked_add_days(Days::new(1)).unwrap_or(today),
        }
    }

    /// Starts a new period with a recalculated price.
    ///
    /// The discount carries over unless a new one is given.
    pub fn renew(
        &mut self,
        membership_type: &MembershipType,
        start_date: Option<NaiveDate>,
        discount: Option<Discount>,
        today: NaiveDate,
    ) -> Result<MembershipQuote, ValidationError> {
        let start = start_date.unwrap_or_else(|| self.next_period_start(today));
        let quote = membership_type.quote(start, discount.unwrap_or(self.discount))?;

        self.membership_type_id = membership_type.id;
        self.type_name = membership_type.name.clone();
        self.start_date = quote.start_date;
        self.end_date = quote.end_date;
        self.discount = quote.discount;
        self.final_price = quote.final_price;
        self.updated_at = Timestamp::now();
        Ok(quote)
    }

    /// Re-prices the current period from the type's base price.
    pub fn apply_discount(&mut self, membership_type: &MembershipType, discount: Discount) {
        self.discount = discount;
        self.final_price = final_price(membership_type.base_price, discount);
        self.updated_at = Timestamp::now();
    }
}

/// A validated purchase, ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMembership {
    pub client_id: ClientId,
    pub holder_name: String,
    pub membership_type_id: MembershipTypeId,
    pub type_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub discount: Discount,
    pub final_price: Money,
    pub members: Vec<String>,
}

impl NewMembership {
    /// Validates names and the member cap, and prices the first period.
    pub fn purchase(
        client_id: ClientId,
        holder_name: &str,
        membership_type: &MembershipType,
        start_date: NaiveDate,
        discount: Discount,
        member_names: &[String],
    ) -> Result<Self, MembershipError> {
        let holder_name = validate_name("nombre", holder_name)?;

        let members = member_names
            .iter()
            .filter(|name| !name.trim().is_empty())
            .map(|name| validate_name("integrantes", name))
            .collect::<Result<Vec<_>, _>>()?;
        if members.len() > membership_type.max_members as usize {
            return Err(MembershipError::TooManyMembers {
                max: membership_type.max_members,
                actual: members.len(),
            });
        }

        let quote = membership_type.quote(start_date, discount)?;
        Ok(Self {
            client_id,
            holder_name,
            membership_type_id: membership_type.id,
            type_name: membership_type.name.clone(),
            start_date: quote.start_date,
            end_date: quote.end_date,
            discount: quote.discount,
            final_price: quote.final_price,
            members,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::MembershipDuration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn family() -> MembershipType {
        MembershipType {
            id: MembershipTypeId::new(2),
            name: "Familiar".to_string(),
            duration: MembershipDuration::months(1).unwrap(),
            max_members: 2,
            base_price: Money::from_pesos(900).unwrap(),
        }
    }

    fn stored(end_date: NaiveDate) -> ActiveMembership {
        ActiveMembership {
            id: MembershipId::new(1),
            client_id: ClientId::new(1),
            holder_name: "Ana López".to_string(),
            membership_type_id: MembershipTypeId::new(2),
            type_name: "Familiar".to_string(),
            start_date: date(2024, 1, 1),
            end_date,
            discount: Discount::try_new(10).unwrap(),
            final_price: Money::from_pesos(810).unwrap(),
            qr_path: None,
            members: vec![],
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        }
    }

    #[test]
    fn purchase_prices_first_period() {
        let new = NewMembership::purchase(
            ClientId::new(1),
            "  Ana López ",
            &family(),
            date(2024, 1, 15),
            Discount::try_new(10).unwrap(),
            &["Luis".to_string(), "".to_string()],
        )
        .unwrap();

        assert_eq!(new.holder_name, "Ana López");
        assert_eq!(new.end_date, date(2024, 2, 15));
        assert_eq!(new.final_price.to_string(), "810.00");
        assert_eq!(new.members, vec!["Luis".to_string()]);
    }

    #[test]
    fn purchase_rejects_too_many_members() {
        let names: Vec<String> = ["Luis", "Eva", "Sara"].iter().map(|s| s.to_string()).collect();
        let err = NewMembership::purchase(
            ClientId::new(1),
            "Ana",
            &family(),
            date(2024, 1, 15),
            Discount::ZERO,
            &names,
        )
        .unwrap_err();
        assert_eq!(err, MembershipError::TooManyMembers { max: 2, actual: 3 });
    }

    #[test]
    fn purchase_rejects_blank_holder() {
        let err = NewMembership::purchase(
            ClientId::new(1),
            "   ",
            &family(),
            date(2024, 1, 15),
            Discount::ZERO,
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, MembershipError::ValidationFailed(_)));
    }

    #[test]
    fn renewing_active_membership_continues_after_end_date() {
        let mut membership = stored(date(2024, 2, 15));
        let quote = membership.renew(&family(), None, None, date(2024, 2, 10)).unwrap();

        assert_eq!(quote.start_date, date(2024, 2, 16));
        assert_eq!(membership.end_date, date(2024, 3, 16));
        assert_eq!(membership.final_price.to_string(), "810.00");
    }

    #[test]
    fn renewing_expired_membership_restarts_today() {
        let mut membership = stored(date(2024, 2, 15));
        membership
            .renew(&family(), None, Some(Discount::ZERO), date(2024, 4, 1))
            .unwrap();

        assert_eq!(membership.start_date, date(2024, 4, 1));
        assert_eq!(membership.end_date, date(2024, 5, 1));
        assert_eq!(membership.final_price.to_string(), "900.00");
    }

    #[test]
    fn apply_discount_reprices_from_base() {
        let mut membership = stored(date(2024, 2, 15));
        membership.apply_discount(&family(), Discount::try_new(50).unwrap());
        assert_eq!(membership.final_price.to_string(), "450.00");
        assert_eq!(membership.discount.value(), 50);
    }
}
