//! HTTP handlers for membership endpoints.
//!
//! These handlers connect Axum routes to the membership command/query
//! handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::membership::{
    ApplyDiscountCommand, ApplyDiscountHandler, CalculateDetailsHandler, CalculateDetailsQuery,
    CreateMembershipCommand, CreateMembershipHandler, DeleteMembershipCommand,
    DeleteMembershipHandler, GetMembershipHandler, GetMembershipQuery, ListMembershipsHandler,
    MembershipView, RenewMembershipCommand, RenewMembershipHandler,
};
use crate::domain::foundation::{parse_date, today, MembershipId};
use crate::ports::{MembershipRepository, ReceiptGenerator};

use super::super::error::ApiError;
use super::dto::{
    ApplyDiscountRequest, CalculateDetailsRequest, CalculateDetailsResponse,
    CreateMembershipRequest, MembershipResponse, RenewMembershipRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Dependencies shared by the membership endpoints.
#[derive(Clone)]
pub struct MembershipAppState {
    pub membership_repository: Arc<dyn MembershipRepository>,
    pub receipt_generator: Arc<dyn ReceiptGenerator>,
}

impl MembershipAppState {
    pub fn calculate_details_handler(&self) -> CalculateDetailsHandler {
        CalculateDetailsHandler::new(self.membership_repository.clone())
    }

    pub fn create_membership_handler(&self) -> CreateMembershipHandler {
        CreateMembershipHandler::new(
            self.membership_repository.clone(),
            self.receipt_generator.clone(),
        )
    }

    pub fn renew_membership_handler(&self) -> RenewMembershipHandler {
        RenewMembershipHandler::new(
            self.membership_repository.clone(),
            self.receipt_generator.clone(),
        )
    }

    pub fn apply_discount_handler(&self) -> ApplyDiscountHandler {
        ApplyDiscountHandler::new(self.membership_repository.clone())
    }

    pub fn get_membership_handler(&self) -> GetMembershipHandler {
        GetMembershipHandler::new(self.membership_repository.clone())
    }

    pub fn list_memberships_handler(&self) -> ListMembershipsHandler {
        ListMembershipsHandler::new(self.membership_repository.clone())
    }

    pub fn delete_membership_handler(&self) -> DeleteMembershipHandler {
        DeleteMembershipHandler::new(self.membership_repository.clone())
    }
}

fn membership_id(raw: &str) -> Result<MembershipId, ApiError> {
    Ok(raw.parse::<MembershipId>()?)
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /memberships/api/calculate-details - Period and price preview
pub async fn calculate_details(
    State(state): State<MembershipAppState>,
    payload: Result<Json<CalculateDetailsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let query = CalculateDetailsQuery {
        membership_type_id: request.id_tipo_membresia,
        start_date: parse_date("fecha_inicio", request.fecha_inicio.as_deref())?,
        discount: request.descuento,
    };

    let result = state.calculate_details_handler().handle(query).await?;
    Ok(Json(CalculateDetailsResponse::from(result)))
}

/// GET /memberships/api - All memberships with derived status
pub async fn list_memberships(
    State(state): State<MembershipAppState>,
) -> Result<impl IntoResponse, ApiError> {
    let views = state.list_memberships_handler().handle().await?;
    let response: Vec<MembershipResponse> =
        views.into_iter().map(MembershipResponse::from).collect();
    Ok(Json(response))
}

/// GET /memberships/api/:id
pub async fn get_membership(
    State(state): State<MembershipAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetMembershipQuery {
        membership_id: membership_id(&id)?,
    };
    let view = state.get_membership_handler().handle(query).await?;
    Ok(Json(MembershipResponse::from(view)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /memberships/api - Purchase a membership
pub async fn create_membership(
    State(state): State<MembershipAppState>,
    payload: Result<Json<CreateMembershipRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let cmd = CreateMembershipCommand {
        client_id: request.id_cliente,
        holder_name: request.nombre,
        membership_type_id: request.id_tipo_membresia,
        start_date: parse_date("fecha_inicio", request.fecha_inicio.as_deref())?,
        discount: request.descuento,
        members: request.integrantes,
    };

    let membership = state.create_membership_handler().handle(cmd).await?;
    let response = MembershipResponse::from(MembershipView::on(membership, today()));
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /memberships/api/:id/renew
pub async fn renew_membership(
    State(state): State<MembershipAppState>,
    Path(id): Path<String>,
    payload: Result<Json<RenewMembershipRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let start_date = match request.fecha_inicio.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(parse_date("fecha_inicio", Some(raw))?),
        _ => None,
    };
    let cmd = RenewMembershipCommand {
        membership_id: membership_id(&id)?,
        start_date,
        discount: request.descuento,
    };

    let membership = state.renew_membership_handler().handle(cmd).await?;
    Ok(Json(MembershipResponse::from(MembershipView::on(membership, today()))))
}

/// POST /memberships/api/:id/discount
pub async fn apply_discount(
    State(state): State<MembershipAppState>,
    Path(id): Path<String>,
    payload: Result<Json<ApplyDiscountRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload?;
    let cmd = ApplyDiscountCommand {
        membership_id: membership_id(&id)?,
        discount: request.descuento,
    };

    let membership = state.apply_discount_handler().handle(cmd).await?;
    Ok(Json(MembershipResponse::from(MembershipView::on(membership, today()))))
}

/// DELETE /memberships/api/:id - Admin removal, cascades to members
pub async fn delete_membership(
    State(state): State<MembershipAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = DeleteMembershipCommand {
        membership_id: membership_id(&id)?,
    };
    state.delete_membership_handler().handle(cmd).await?;
    Ok(StatusCode::NO_CONTENT)
}
