//! HTTP handlers for membership endpoints.
//!
//! These handlers connect axum routes to application layer command/query
//! handlers. Malformed UUID path parameters are rejected by the extractor
//! before any of this code runs.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::application::handlers::membership::{
    AddMembershipCommand, AddMembershipHandler, GetMembershipHandler, GetMembershipQuery,
    GetUserMembershipHandler, GetUserMembershipQuery, ListMembershipsHandler,
    ListMembershipsQuery, MembershipAccess, RemoveMembershipCommand, RemoveMembershipHandler,
    ToggleMembershipBlockCommand, ToggleMembershipBlockHandler, UpdateMembershipCommand,
    UpdateMembershipHandler,
};
use crate::domain::foundation::{MembershipId, UserId};
use crate::domain::membership::MembershipError;
use crate::ports::{MembershipReader, MembershipRepository, UserDirectory};

use super::dto::{
    BlockToggledResponse, BlockedNoticeResponse, CreateMembershipRequest, ErrorResponse,
    MembershipCreatedResponse, MembershipRemovedResponse, MembershipUpdatedResponse,
    MembershipViewResponse, UpdateMembershipRequest, UserMembershipResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped
/// dependencies for efficient sharing across handlers.
#[derive(Clone)]
pub struct MembershipAppState {
    pub membership_repository: Arc<dyn MembershipRepository>,
    pub membership_reader: Arc<dyn MembershipReader>,
    pub user_directory: Arc<dyn UserDirectory>,
}

impl MembershipAppState {
    /// Create handlers on demand from the shared state.
    pub fn add_membership_handler(&self) -> AddMembershipHandler {
        AddMembershipHandler::new(
            self.membership_repository.clone(),
            self.user_directory.clone(),
        )
    }

    pub fn list_memberships_handler(&self) -> ListMembershipsHandler {
        ListMembershipsHandler::new(self.membership_reader.clone())
    }

    pub fn get_membership_handler(&self) -> GetMembershipHandler {
        GetMembershipHandler::new(self.membership_reader.clone())
    }

    pub fn get_user_membership_handler(&self) -> GetUserMembershipHandler {
        GetUserMembershipHandler::new(self.membership_reader.clone())
    }

    pub fn update_membership_handler(&self) -> UpdateMembershipHandler {
        UpdateMembershipHandler::new(self.membership_repository.clone())
    }

    pub fn toggle_block_handler(&self) -> ToggleMembershipBlockHandler {
        ToggleMembershipBlockHandler::new(self.membership_repository.clone())
    }

    pub fn remove_membership_handler(&self) -> RemoveMembershipHandler {
        RemoveMembershipHandler::new(self.membership_repository.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST/PUT/DELETE endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/memberships - Purchase a membership
pub async fn add_membership(
    State(state): State<MembershipAppState>,
    Json(request): Json<CreateMembershipRequest>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let handler = state.add_membership_handler();
    let cmd = AddMembershipCommand {
        email: request.email,
        plan: request.plan,
        created_at: request.created_at,
        payment_date: request.payment_date,
        price_cents: request.price_cents,
    };

    let result = handler.handle(cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(MembershipCreatedResponse::from(result)),
    ))
}

/// PUT /api/memberships/:id - Update plan, dates, and price
pub async fn update_membership(
    State(state): State<MembershipAppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMembershipRequest>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let handler = state.update_membership_handler();
    let cmd = UpdateMembershipCommand {
        id: MembershipId::from_uuid(id),
        plan: request.plan,
        created_at: request.created_at,
        payment_date: request.payment_date,
        price_cents: request.price_cents,
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(MembershipUpdatedResponse::from(result)))
}

/// PUT /api/memberships/:id/block - Toggle the block status
pub async fn toggle_membership_block(
    State(state): State<MembershipAppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let handler = state.toggle_block_handler();
    let cmd = ToggleMembershipBlockCommand {
        id: MembershipId::from_uuid(id),
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(BlockToggledResponse::from(result)))
}

/// DELETE /api/memberships/:id - Remove a membership permanently
pub async fn remove_membership(
    State(state): State<MembershipAppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let handler = state.remove_membership_handler();
    let cmd = RemoveMembershipCommand {
        id: MembershipId::from_uuid(id),
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(MembershipRemovedResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/memberships - List non-blocked memberships
pub async fn list_memberships(
    State(state): State<MembershipAppState>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let handler = state.list_memberships_handler();
    let views = handler.handle(ListMembershipsQuery::default()).await?;

    let response: Vec<MembershipViewResponse> = views
        .into_iter()
        .map(MembershipViewResponse::from)
        .collect();

    Ok(Json(response))
}

/// GET /api/memberships/:id - Get a membership by id
///
/// A blocked id answers with a notice body instead of the record, matching
/// the distinction the application layer draws.
pub async fn get_membership(
    State(state): State<MembershipAppState>,
    Path(id): Path<Uuid>,
) -> Result<axum::response::Response, MembershipApiError> {
    let handler = state.get_membership_handler();
    let query = GetMembershipQuery {
        id: MembershipId::from_uuid(id),
    };

    let response = match handler.handle(query).await? {
        MembershipAccess::Granted(view) => {
            Json(MembershipViewResponse::from(view)).into_response()
        }
        MembershipAccess::Blocked(id) => Json(BlockedNoticeResponse::new(id)).into_response(),
    };

    Ok(response)
}

/// GET /api/memberships/user/:user_id - Get the membership owned by a user
pub async fn get_user_membership(
    State(state): State<MembershipAppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let handler = state.get_user_membership_handler();
    let query = GetUserMembershipQuery {
        user_id: UserId::from_uuid(user_id),
    };

    let membership = handler.handle(query).await?;

    Ok(Json(UserMembershipResponse {
        membership: membership.map(MembershipViewResponse::from),
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Mapping
// ════════════════════════════════════════════════════════════════════════════════

/// Wrapper translating application errors into HTTP responses.
pub struct MembershipApiError(MembershipError);

impl From<MembershipError> for MembershipApiError {
    fn from(err: MembershipError) -> Self {
        Self(err)
    }
}

impl IntoResponse for MembershipApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            MembershipError::NotFound(_) | MembershipError::UserNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            MembershipError::InvalidPlan(_) | MembershipError::ValidationFailed { .. } => {
                StatusCode::BAD_REQUEST
            }
            MembershipError::OperationFailed(cause) => {
                tracing::error!(error = %cause, "membership operation failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse::new(self.0.code().to_string(), self.0.message());
        (status, Json(body)).into_response()
    }
}
