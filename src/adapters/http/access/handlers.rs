//! HTTP handlers for the entrance scanner and the access log.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Json, Path, Query, State};
use axum::response::IntoResponse;

use crate::application::handlers::access::{
    ListAccessLogHandler, ScanMembershipCommand, ScanMembershipHandler,
};
use crate::domain::foundation::MembershipId;
use crate::ports::{AccessLogRepository, MembershipRepository};

use super::super::error::ApiError;
use super::dto::{AccessLogParams, AccessLogResponse, ScanResponse};

#[derive(Clone)]
pub struct AccessAppState {
    pub membership_repository: Arc<dyn MembershipRepository>,
    pub access_log_repository: Arc<dyn AccessLogRepository>,
}

impl AccessAppState {
    pub fn scan_membership_handler(&self) -> ScanMembershipHandler {
        ScanMembershipHandler::new(
            self.membership_repository.clone(),
            self.access_log_repository.clone(),
        )
    }

    pub fn list_access_log_handler(&self) -> ListAccessLogHandler {
        ListAccessLogHandler::new(self.access_log_repository.clone())
    }
}

/// GET /api/memberships/by-qr/:id - Scan at the entrance. Writes one log row.
pub async fn scan_membership(
    State(state): State<AccessAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = ScanMembershipCommand {
        membership_id: id.parse::<MembershipId>()?,
    };
    let outcome = state.scan_membership_handler().handle(cmd).await?;
    Ok(Json(ScanResponse::from(outcome)))
}

/// GET /api/access-log?page&per_page&date - Newest first
pub async fn list_access_log(
    State(state): State<AccessAppState>,
    params: Result<Query<AccessLogParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let page = state
        .list_access_log_handler()
        .handle(params.filter()?)
        .await?;
    Ok(Json(AccessLogResponse::from(page)))
}
