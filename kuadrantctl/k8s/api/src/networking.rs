/// Describes an API published through Kuadrant: the hosts it is served on,
/// its operations and the security schemes protecting them.
#[derive(
    Clone,
    Debug,
    Default,
    PartialEq,
    kube::CustomResource,
    serde::Deserialize,
    serde::Serialize,
    schemars::JsonSchema,
)]
#[kube(
    group = "networking.kuadrant.io",
    version = "v1beta1",
    kind = "API",
    root = "Api",
    derive = "PartialEq",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct ApiSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub operations: Vec<Operation>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security_scheme: Vec<SecurityScheme>,
}

#[derive(
    Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
pub struct Operation {
    pub name: String,
    pub path: String,
    pub method: String,
}

/// Exactly one of the authentication fields is set.
#[derive(
    Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScheme {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_auth: Option<ApiKeyAuth>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        rename = "openIDConnectAuth"
    )]
    pub open_id_connect_auth: Option<OpenIdConnectAuth>,
}

#[derive(
    Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
pub struct ApiKeyAuth {
    /// One of `header`, `query` or `cookie`.
    pub location: String,
    pub name: String,
}

#[derive(
    Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
pub struct OpenIdConnectAuth {
    pub url: String,
}
