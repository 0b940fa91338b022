use crate::gateway::HttpRoute;

/// Identifies the Gateway API resource a policy attaches to.
#[derive(
    Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
pub struct PolicyTargetReference {
    pub group: String,
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl PolicyTargetReference {
    /// Targets an HTTPRoute by name, optionally in another namespace.
    pub fn http_route(name: impl Into<String>, namespace: Option<String>) -> Self {
        Self::of::<HttpRoute>(name, namespace)
    }

    fn of<T>(name: impl Into<String>, namespace: Option<String>) -> Self
    where
        T: kube::Resource,
        T::DynamicType: Default,
    {
        let dt = Default::default();
        Self {
            group: T::group(&dt).to_string(),
            kind: T::kind(&dt).to_string(),
            name: name.into(),
            namespace,
        }
    }
}
