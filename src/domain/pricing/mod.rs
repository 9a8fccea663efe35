//! Pricing: discounts and amounts in words for receipts.

mod calculator;
mod words;

pub use calculator::{discount_amount, final_price};
pub use words::{amount_in_words, number_in_words};
