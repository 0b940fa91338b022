use super::{PolicyTargetReference, RouteSelector};
use std::collections::BTreeMap;

#[derive(
    Clone,
    Debug,
    PartialEq,
    kube::CustomResource,
    serde::Deserialize,
    serde::Serialize,
    schemars::JsonSchema,
)]
#[kube(
    group = "kuadrant.io",
    version = "v1beta2",
    kind = "RateLimitPolicy",
    derive = "PartialEq",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitPolicySpec {
    pub target_ref: PolicyTargetReference,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<BTreeMap<String, Limit>>,
}

/// A named rate limit: the requests it applies to, the conditions under which
/// it is enforced, what it counts by and the allowed rates.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct Limit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_selectors: Option<Vec<RouteSelector>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<Vec<WhenCondition>>,

    /// Well-known selectors (e.g. `request.headers.x-forwarded-for`) whose
    /// values qualify the counter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counters: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rates: Option<Vec<Rate>>,
}

#[derive(
    Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
pub struct WhenCondition {
    pub selector: String,
    pub operator: WhenConditionOperator,
    pub value: String,
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum WhenConditionOperator {
    Eq,
    Neq,
    StartsWith,
    EndsWith,
    Incl,
    Excl,
    Matches,
}

#[derive(
    Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
pub struct Rate {
    pub limit: i32,
    pub duration: i32,
    pub unit: TimeUnit,
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
}
