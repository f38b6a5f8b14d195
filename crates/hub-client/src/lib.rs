//! hub-client - HTTP client and session coordinator for the Projects Hub API.

mod auth;
mod client;
mod endpoints;
mod orgs;

pub use auth::{AuthClient, LoginRequest, SignupRequest, SignupResponse};
pub use client::ApiClient;
pub use orgs::{
    AcceptInvitationResponse, CreateOrganizationRequest, InvitationPreview, InvitationResponse,
    InviteMemberRequest, MemberRole, Organization, OrganizationMember, PLAN_OPTIONS, PlanOption,
    accept_invitation, create_organization, invite_member, list_members, list_organizations,
    preview_invitation,
};
