//! Organization and invitation operations.
//!
//! Thin wrappers composing the API client; session handling stays in
//! [`AuthClient`]. Creation, invitation delivery, and invitation redemption
//! are unauthenticated endpoints on the Projects Hub API; the listings go
//! through the authorized path.

use std::fmt;

use serde::{Deserialize, Serialize};

use hub_core::Result;

use crate::auth::AuthClient;
use crate::client::ApiClient;
use crate::endpoints;

/// Role granted to an invited member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberRole {
    /// Manager role. The backend spells the wire value "MENAGER".
    #[serde(rename = "MENAGER")]
    Manager,
    #[serde(rename = "EMPLOYEE")]
    Employee,
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberRole::Manager => f.write_str("MENAGER"),
            MemberRole::Employee => f.write_str("EMPLOYEE"),
        }
    }
}

/// A subscription plan selectable at organization creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanOption {
    /// Well-known plan id expected by the API.
    pub id: &'static str,
    pub code: &'static str,
    pub label: &'static str,
}

/// The fixed plan catalog offered by the API.
pub const PLAN_OPTIONS: &[PlanOption] = &[
    PlanOption {
        id: "11111111-1111-1111-1111-111111111111",
        code: "FREE",
        label: "Free",
    },
    PlanOption {
        id: "22222222-2222-2222-2222-222222222222",
        code: "PREMIUM",
        label: "Premium",
    },
    PlanOption {
        id: "33333333-3333-3333-3333-333333333333",
        code: "PRO",
        label: "Pro",
    },
];

/// Request body for organization creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationRequest {
    pub name: String,
    pub plan_id: String,
    pub created_by_user_id: String,
}

/// An organization membership entry from the listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub organization_id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Fields the API returns beyond the ones this client consumes.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A member entry from the member listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationMember {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Request body for a membership invitation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteMemberRequest {
    pub invited_by_user_id: String,
    pub email: String,
    pub role: MemberRole,
}

/// Response to a delivered invitation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationResponse {
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub invitation_link: Option<String>,
}

/// Request body for invitation redemption.
#[derive(Debug, Serialize)]
struct AcceptInvitationRequest<'a> {
    token: &'a str,
}

/// Response to invitation redemption.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInvitationResponse {
    pub message: Option<String>,
}

/// What an invitation token points at.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationPreview {
    #[serde(default)]
    pub organization_name: Option<String>,
}

/// Create an organization on the selected plan.
pub async fn create_organization(
    api: &ApiClient,
    request: &CreateOrganizationRequest,
) -> Result<serde_json::Value> {
    api.post_json(endpoints::ORGANIZATIONS, request).await
}

/// Send a membership invitation for an organization.
pub async fn invite_member(
    api: &ApiClient,
    organization_id: &str,
    request: &InviteMemberRequest,
) -> Result<InvitationResponse> {
    api.post_json(&endpoints::organization_invite(organization_id), request)
        .await
}

/// Redeem an invitation token.
pub async fn accept_invitation(api: &ApiClient, token: &str) -> Result<AcceptInvitationResponse> {
    api.post_json(
        endpoints::INVITATION_ACCEPT,
        &AcceptInvitationRequest { token },
    )
    .await
}

/// Look up the organization an invitation token points at.
pub async fn preview_invitation(api: &ApiClient, token: &str) -> Result<InvitationPreview> {
    api.get_json(&endpoints::invitation_preview(token)).await
}

/// Organizations the user belongs to. Authorized call.
pub async fn list_organizations(auth: &AuthClient, user_id: &str) -> Result<Vec<Organization>> {
    auth.get_authorized(&endpoints::user_organizations(user_id))
        .await
}

/// Members of an organization, as seen by `request_user_id`. Authorized call.
pub async fn list_members(
    auth: &AuthClient,
    organization_id: &str,
    request_user_id: &str,
) -> Result<Vec<OrganizationMember>> {
    auth.get_authorized(&endpoints::organization_members(
        organization_id,
        request_user_id,
    ))
    .await
}
