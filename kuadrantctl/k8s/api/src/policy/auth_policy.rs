use super::{PolicyTargetReference, RouteSelector};
use crate::labels::Selector;
use std::collections::BTreeMap;

/// Label Secrets must carry to be selected as API keys for a security
/// scheme. The label value is the scheme name.
pub const API_KEY_SECRET_LABEL: &str = "kuadrant.io/apikeys-by";

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
    kind = "AuthPolicy",
    derive = "PartialEq",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct AuthPolicySpec {
    pub target_ref: PolicyTargetReference,

    /// Top-level route selectors decide which requests go through the
    /// external authorization check at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_selectors: Option<Vec<RouteSelector>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<AuthScheme>,
}

#[derive(
    Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
pub struct AuthScheme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<BTreeMap<String, AuthenticationSpec>>,
}

/// A single authentication rule, applied to the requests matched by its own
/// route selectors.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_selectors: Option<Vec<RouteSelector>>,

    /// Where the credential is read from. Defaults to the `Authorization`
    /// header when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,

    #[serde(flatten)]
    pub method: AuthenticationMethod,
}

#[derive(
    Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum Credentials {
    CustomHeader(Named),
    QueryString(Named),
    Cookie(Named),
}

#[derive(
    Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
pub struct Named {
    pub name: String,
}

#[derive(
    Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum AuthenticationMethod {
    ApiKey(ApiKeyAuthentication),
    Jwt(JwtAuthentication),
}

#[derive(
    Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyAuthentication {
    pub selector: Selector,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_namespaces: Option<bool>,
}

#[derive(
    Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct JwtAuthentication {
    pub issuer_url: String,
}

impl ApiKeyAuthentication {
    /// Selects the API key Secrets labeled for the named security scheme.
    pub fn for_scheme(scheme: &str) -> Self {
        Self {
            selector: Some((API_KEY_SECRET_LABEL.to_string(), scheme.to_string()))
                .into_iter()
                .collect(),
            all_namespaces: None,
        }
    }
}
