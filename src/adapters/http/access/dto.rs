//! HTTP DTOs for QR scans and the access log.

use serde::{Deserialize, Serialize};

use crate::domain::access::{
    AccessLogEntry, AccessLogFilter, AccessLogPage, AccessResult, MembershipCard, ScanOutcome,
};
use crate::domain::foundation::{AccessLogId, MembershipId, Timestamp, ValidationError};

/// Envelope of `GET /api/memberships/by-qr/:id`.
///
/// `success` is true whenever the membership was found and the scan logged;
/// whether the holder may enter is in `data.acceso_permitido`.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResponse {
    pub success: bool,
    pub data: ScanData,
}

/// `resultado` is the entrance decision: `allowed` for any membership whose
/// end date is today or later, `denied` once it has passed. The card's
/// `status` is the finer display state, so a membership ending within a
/// week scans as `allowed` with `status: "expiring"`.
#[derive(Debug, Clone, Serialize)]
pub struct ScanData {
    pub acceso_permitido: bool,
    pub resultado: AccessResult,
    pub membresia: MembershipCard,
}

impl From<ScanOutcome> for ScanResponse {
    fn from(outcome: ScanOutcome) -> Self {
        Self {
            success: true,
            data: ScanData {
                acceso_permitido: outcome.result == AccessResult::Allowed,
                resultado: outcome.result,
                membresia: outcome.card,
            },
        }
    }
}

/// Query string of `GET /api/access-log`. Values stay raw so a bad page
/// number reports its field name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccessLogParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub date: Option<String>,
}

impl AccessLogParams {
    pub fn filter(&self) -> Result<AccessLogFilter, ValidationError> {
        AccessLogFilter::parse(
            self.page.as_deref(),
            self.per_page.as_deref(),
            self.date.as_deref(),
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AccessLogEntryResponse {
    pub id: AccessLogId,
    pub id_membresia: MembershipId,
    pub fecha_hora: Timestamp,
    pub resultado: AccessResult,
}

impl From<AccessLogEntry> for AccessLogEntryResponse {
    fn from(entry: AccessLogEntry) -> Self {
        Self {
            id: entry.id,
            id_membresia: entry.membership_id,
            fecha_hora: entry.scanned_at,
            resultado: entry.result,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AccessLogResponse {
    pub entries: Vec<AccessLogEntryResponse>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl From<AccessLogPage> for AccessLogResponse {
    fn from(page: AccessLogPage) -> Self {
        let total_pages = page.total_pages();
        Self {
            entries: page.entries.into_iter().map(Into::into).collect(),
            page: page.page,
            per_page: page.per_page,
            total: page.total,
            total_pages,
        }
    }
}
