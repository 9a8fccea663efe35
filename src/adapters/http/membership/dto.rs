//! HTTP DTOs for membership endpoints.
//!
//! Field names follow the front desk forms (`id_tipo_membresia`,
//! `fecha_inicio`, `descuento`...). Dates are `YYYY-MM-DD`, amounts are
//! decimal strings such as `"450.00"`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::membership::{CalculateDetailsResult, MembershipView};
use crate::domain::foundation::{ClientId, Discount, MembershipId, MembershipTypeId, Money};
use crate::domain::membership::MembershipStatus;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /memberships/api/calculate-details`.
#[derive(Debug, Clone, Deserialize)]
pub struct CalculateDetailsRequest {
    pub id_tipo_membresia: MembershipTypeId,
    /// Parsed by the handler so a missing date reports its field name.
    #[serde(default)]
    pub fecha_inicio: Option<String>,
    #[serde(default)]
    pub descuento: Discount,
}

/// Body of `POST /memberships/api`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMembershipRequest {
    pub id_cliente: ClientId,
    #[serde(default)]
    pub nombre: String,
    pub id_tipo_membresia: MembershipTypeId,
    #[serde(default)]
    pub fecha_inicio: Option<String>,
    #[serde(default)]
    pub descuento: Discount,
    /// Family members besides the holder. Blank names are ignored.
    #[serde(default)]
    pub integrantes: Vec<String>,
}

/// Body of `POST /memberships/api/:id/renew`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RenewMembershipRequest {
    pub fecha_inicio: Option<String>,
    pub descuento: Option<Discount>,
}

/// Body of `POST /memberships/api/:id/discount`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyDiscountRequest {
    pub descuento: Discount,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct CalculateDetailsResponse {
    pub tipo: String,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub precio_base: Money,
    pub descuento: Discount,
    pub precio_final: Money,
    /// Final price in words, as printed on receipts.
    pub precio_letra: String,
}

impl From<CalculateDetailsResult> for CalculateDetailsResponse {
    fn from(result: CalculateDetailsResult) -> Self {
        Self {
            tipo: result.type_name,
            fecha_inicio: result.quote.start_date,
            fecha_fin: result.quote.end_date,
            precio_base: result.quote.base_price,
            descuento: result.quote.discount,
            precio_final: result.quote.final_price,
            precio_letra: result.price_in_words,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MembershipResponse {
    pub id: MembershipId,
    pub id_cliente: ClientId,
    pub nombre: String,
    pub id_tipo_membresia: MembershipTypeId,
    pub tipo: String,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub descuento: Discount,
    pub precio_final: Money,
    pub estado: MembershipStatus,
    pub qr: Option<String>,
    pub integrantes: Vec<String>,
}

impl From<MembershipView> for MembershipResponse {
    fn from(view: MembershipView) -> Self {
        let m = view.membership;
        Self {
            id: m.id,
            id_cliente: m.client_id,
            nombre: m.holder_name,
            id_tipo_membresia: m.membership_type_id,
            tipo: m.type_name,
            fecha_inicio: m.start_date,
            fecha_fin: m.end_date,
            descuento: m.discount,
            precio_final: m.final_price,
            estado: view.status,
            qr: m.qr_path,
            integrantes: m.members.into_iter().map(|member| member.name).collect(),
        }
    }
}
