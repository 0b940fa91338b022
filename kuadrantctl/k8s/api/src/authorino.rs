use std::collections::BTreeMap;

/// Label Authorino requires on the API key Secrets it manages.
pub const MANAGED_BY_LABEL: &str = "authorino.kuadrant.io/managed-by";

/// Configures how Authorino authenticates the requests sent to the listed
/// hosts.
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
    group = "authorino.kuadrant.io",
    version = "v1beta1",
    kind = "AuthConfig",
    derive = "PartialEq",
    namespaced
)]
pub struct AuthConfigSpec {
    pub hosts: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identity: Vec<Identity>,
}

/// One way of establishing the identity of a request. Identities are only
/// evaluated for requests matching all of their `when` conditions.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub when: Vec<JsonPattern>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,

    #[serde(flatten)]
    pub method: IdentityMethod,
}

#[derive(
    Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
pub struct JsonPattern {
    pub selector: String,
    pub operator: Operator,
    pub value: String,
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Eq,
    Neq,
    Incl,
    Excl,
    Matches,
}

#[derive(
    Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    #[serde(rename = "in")]
    pub location: CredentialsLocation,
    pub key_selector: String,
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum CredentialsLocation {
    AuthorizationHeader,
    CustomHeader,
    Query,
    Cookie,
}

#[derive(
    Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum IdentityMethod {
    ApiKey(ApiKey),
    Oidc(Oidc),
}

#[derive(
    Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    pub label_selectors: BTreeMap<String, String>,
}

#[derive(
    Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
pub struct Oidc {
    pub endpoint: String,
}

// === impl JsonPattern ===

impl JsonPattern {
    pub fn equals(selector: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            operator: Operator::Eq,
            value: value.into(),
        }
    }
}

// === impl ApiKey ===

impl ApiKey {
    /// Selects the Authorino-managed Secrets labeled for the `app`.
    pub fn for_app(app: &str) -> Self {
        Self {
            label_selectors: [
                (MANAGED_BY_LABEL.to_string(), "authorino".to_string()),
                ("app".to_string(), app.to_string()),
            ]
            .into_iter()
            .collect(),
        }
    }
}
