//! CalculateDetailsHandler - Query handler for pricing a membership period.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::foundation::{Discount, MembershipTypeId};
use crate::domain::membership::{MembershipError, MembershipQuote};
use crate::domain::pricing::amount_in_words;
use crate::ports::MembershipRepository;

/// Query for the end date and price of a prospective membership.
#[derive(Debug, Clone)]
pub struct CalculateDetailsQuery {
    pub membership_type_id: MembershipTypeId,
    pub start_date: NaiveDate,
    pub discount: Discount,
}

#[derive(Debug, Clone)]
pub struct CalculateDetailsResult {
    pub type_name: String,
    pub quote: MembershipQuote,
    pub price_in_words: String,
}

/// Handler for previewing a membership's period and price. Read only.
pub struct CalculateDetailsHandler {
    repository: Arc<dyn MembershipRepository>,
}

impl CalculateDetailsHandler {
    pub fn new(repository: Arc<dyn MembershipRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: CalculateDetailsQuery,
    ) -> Result<CalculateDetailsResult, MembershipError> {
        let membership_type = self
            .repository
            .find_membership_type(&query.membership_type_id)
            .await?
            .ok_or(MembershipError::TypeNotFound(query.membership_type_id))?;

        let quote = membership_type.quote(query.start_date, query.discount)?;

        Ok(CalculateDetailsResult {
            type_name: membership_type.name,
            price_in_words: amount_in_words(quote.final_price),
            quote,
        })
    }
}
