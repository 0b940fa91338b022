pub mod auth_policy;
pub mod ratelimit_policy;
pub mod target_ref;

pub use self::{
    auth_policy::{AuthPolicy, AuthPolicySpec},
    ratelimit_policy::{RateLimitPolicy, RateLimitPolicySpec},
    target_ref::PolicyTargetReference,
};

use crate::gateway::HttpRouteMatch;

/// Selects the subset of a targeted HTTPRoute's rules that a policy (or a
/// single rule of a policy) applies to.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct RouteSelector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostnames: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<HttpRouteMatch>>,
}

impl RouteSelector {
    pub fn from_match(m: HttpRouteMatch) -> Self {
        Self {
            hostnames: None,
            matches: Some(vec![m]),
        }
    }
}
