//! Projects Hub API endpoint paths.

use url::form_urlencoded;

/// Account creation.
pub(crate) const SIGNUP: &str = "/api/auth/signup";

/// Credential login, returning a token grant.
pub(crate) const LOGIN: &str = "/api/auth/login";

/// Refresh-token exchange.
pub(crate) const REFRESH: &str = "/api/auth/refresh";

/// Organization creation.
pub(crate) const ORGANIZATIONS: &str = "/api/organizations";

/// Invitation acceptance.
pub(crate) const INVITATION_ACCEPT: &str = "/api/organizations/member-invitations/accept";

/// Invitation preview.
pub(crate) const INVITATION_PREVIEW: &str = "/api/organizations/member-invitations/preview";

/// Organizations the given user belongs to.
pub(crate) fn user_organizations(user_id: &str) -> String {
    format!("/api/organizations/user/{user_id}")
}

/// Invitation delivery for an organization.
pub(crate) fn organization_invite(organization_id: &str) -> String {
    format!("/api/organizations/{organization_id}/members/invite")
}

/// Member listing for an organization, scoped to the requesting user.
pub(crate) fn organization_members(organization_id: &str, request_user_id: &str) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("requestUserId", request_user_id)
        .finish();
    format!("/api/organizations/{organization_id}/members?{query}")
}

/// Invitation preview lookup by token.
pub(crate) fn invitation_preview(token: &str) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("token", token)
        .finish();
    format!("{INVITATION_PREVIEW}?{query}")
}
