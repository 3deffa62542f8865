//! HTTP DTOs (Data Transfer Objects) for membership endpoints.
//!
//! These types define the JSON request/response structure for the
//! membership API. They serve as the boundary between HTTP and the
//! application layer; user data beyond the owner's id never appears here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::membership::{
    AddMembershipResult, RemoveMembershipResult, ToggleMembershipBlockResult,
    UpdateMembershipResult,
};
use crate::domain::foundation::MembershipId;
use crate::domain::membership::MembershipState;
use crate::ports::MembershipView;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to purchase a membership for a registered user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMembershipRequest {
    /// Email the purchaser registered with.
    pub email: String,
    /// Plan wire name (`MonthlyMember`, `AnnualMember`, `Creator`).
    pub plan: String,
    /// Purchase/activation date.
    pub created_at: NaiveDate,
    /// Date the payment was recorded.
    pub payment_date: NaiveDate,
    /// Price in integer cents.
    pub price_cents: i64,
}

/// Request to update an existing membership.
///
/// There is no expiration field; the server re-derives it.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMembershipRequest {
    /// Plan wire name.
    pub plan: String,
    /// New purchase/activation date.
    pub created_at: NaiveDate,
    /// New payment date.
    pub payment_date: NaiveDate,
    /// New price in integer cents.
    pub price_cents: i64,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Membership record as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct MembershipViewResponse {
    /// Membership ID.
    pub id: String,
    /// Owning user's ID. The only user field this API exposes.
    pub user_id: String,
    /// Plan wire name.
    pub plan: String,
    /// Purchase/activation date.
    pub created_at: NaiveDate,
    /// Date the payment was recorded.
    pub payment_date: NaiveDate,
    /// Price in integer cents.
    pub price_cents: i64,
    /// Derived expiration date.
    pub expiration_date: NaiveDate,
    /// Active or blocked.
    pub state: MembershipState,
}

impl From<MembershipView> for MembershipViewResponse {
    fn from(view: MembershipView) -> Self {
        Self {
            id: view.id.to_string(),
            user_id: view.user_id.to_string(),
            plan: view.plan.display_name().to_string(),
            created_at: view.created_at,
            payment_date: view.payment_date,
            price_cents: view.price_cents,
            expiration_date: view.expiration_date,
            state: view.state,
        }
    }
}

/// Response for a successful purchase.
#[derive(Debug, Clone, Serialize)]
pub struct MembershipCreatedResponse {
    /// The new membership's id.
    pub membership_id: String,
    pub message: String,
}

impl From<AddMembershipResult> for MembershipCreatedResponse {
    fn from(result: AddMembershipResult) -> Self {
        Self {
            membership_id: result.membership_id.to_string(),
            message: format!("Membership acquired, id {}", result.membership_id),
        }
    }
}

/// Notice returned when a looked-up membership is blocked.
#[derive(Debug, Clone, Serialize)]
pub struct BlockedNoticeResponse {
    pub id: String,
    pub state: MembershipState,
    pub message: String,
}

impl BlockedNoticeResponse {
    pub fn new(id: MembershipId) -> Self {
        Self {
            id: id.to_string(),
            state: MembershipState::Blocked,
            message: format!("Membership with id {} is blocked", id),
        }
    }
}

/// Response for the by-user lookup; `membership` is null when the user has
/// none.
#[derive(Debug, Clone, Serialize)]
pub struct UserMembershipResponse {
    pub membership: Option<MembershipViewResponse>,
}

/// Response after toggling the block status.
#[derive(Debug, Clone, Serialize)]
pub struct BlockToggledResponse {
    pub id: String,
    pub state: MembershipState,
    pub message: String,
}

impl From<ToggleMembershipBlockResult> for BlockToggledResponse {
    fn from(result: ToggleMembershipBlockResult) -> Self {
        let message = match result.state {
            MembershipState::Blocked => {
                format!("Membership with id {} blocked successfully", result.id)
            }
            MembershipState::Active => {
                format!("Membership with id {} unblocked successfully", result.id)
            }
        };
        Self {
            id: result.id.to_string(),
            state: result.state,
            message,
        }
    }
}

/// Response after a successful update.
#[derive(Debug, Clone, Serialize)]
pub struct MembershipUpdatedResponse {
    pub id: String,
    pub expiration_date: NaiveDate,
    pub message: String,
}

impl From<UpdateMembershipResult> for MembershipUpdatedResponse {
    fn from(result: UpdateMembershipResult) -> Self {
        Self {
            id: result.id.to_string(),
            expiration_date: result.expiration_date,
            message: "Membership updated successfully".to_string(),
        }
    }
}

/// Response after a successful removal.
#[derive(Debug, Clone, Serialize)]
pub struct MembershipRemovedResponse {
    pub id: String,
    pub message: String,
}

impl From<RemoveMembershipResult> for MembershipRemovedResponse {
    fn from(result: RemoveMembershipResult) -> Self {
        Self {
            id: result.id.to_string(),
            message: "Membership removed successfully".to_string(),
        }
    }
}

/// Standard error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::membership::{Membership, MembershipPlan};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn create_request_deserializes_from_api_json() {
        let json = serde_json::json!({
            "email": "reader@example.com",
            "plan": "MonthlyMember",
            "created_at": "2024-01-31",
            "payment_date": "2024-01-31",
            "price_cents": 1999
        });

        let request: CreateMembershipRequest = serde_json::from_value(json).unwrap();
        assert_eq!(request.email, "reader@example.com");
        assert_eq!(request.plan, "MonthlyMember");
        assert_eq!(request.created_at, date(2024, 1, 31));
        assert_eq!(request.price_cents, 1999);
    }

    #[test]
    fn view_response_uses_wire_names_and_iso_dates() {
        let view = MembershipView::from(
            Membership::new(
                crate::domain::foundation::MembershipId::new(),
                UserId::new(),
                MembershipPlan::Creator,
                date(2024, 6, 1),
                date(2024, 6, 1),
                4999,
            )
            .unwrap(),
        );

        let response = MembershipViewResponse::from(view);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["plan"], "Creator");
        assert_eq!(json["created_at"], "2024-06-01");
        assert_eq!(json["expiration_date"], "2024-08-01");
        assert_eq!(json["state"], "active");
    }

    #[test]
    fn blocked_notice_carries_the_id() {
        let id = MembershipId::new();
        let notice = BlockedNoticeResponse::new(id);

        assert_eq!(notice.id, id.to_string());
        assert_eq!(notice.state, MembershipState::Blocked);
        assert!(notice.message.contains(&id.to_string()));
    }
}
