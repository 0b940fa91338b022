/// Configures traffic routing for hosts exposed through Istio gateways.
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
    group = "networking.istio.io",
    version = "v1beta1",
    kind = "VirtualService",
    derive = "PartialEq",
    namespaced
)]
pub struct VirtualServiceSpec {
    /// The destination hosts to which traffic is being sent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<String>,

    /// The names of gateways and sidecars that should apply these routes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gateways: Vec<String>,

    /// An ordered list of route rules for HTTP traffic. The first rule
    /// matching an incoming request is used.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub http: Vec<HttpRoute>,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
pub struct HttpRoute {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, rename = "match", skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<HttpMatchRequest>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub route: Vec<HttpRouteDestination>,
}

#[derive(
    Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
pub struct HttpMatchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<StringMatch>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<StringMatch>,
}

#[derive(
    Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum StringMatch {
    Exact(String),
    Prefix(String),
    Regex(String),
}

#[derive(
    Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
pub struct HttpRouteDestination {
    pub destination: Destination,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

#[derive(
    Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
pub struct Destination {
    /// The name of a service from the service registry, e.g.
    /// `petstore.apps.svc`.
    pub host: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subset: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<PortSelector>,
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
pub struct PortSelector {
    pub number: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format() {
        let vs = VirtualService::new(
            "petstore",
            VirtualServiceSpec {
                hosts: vec!["petstore.example.com".to_string()],
                gateways: vec!["istio-system/ingress".to_string()],
                http: vec![HttpRoute {
                    name: "listPets".to_string(),
                    matches: vec![HttpMatchRequest {
                        uri: Some(StringMatch::Prefix("/pets".to_string())),
                        method: Some(StringMatch::Exact("GET".to_string())),
                    }],
                    route: vec![HttpRouteDestination {
                        destination: Destination {
                            host: "petstore.apps.svc".to_string(),
                            subset: None,
                            port: Some(PortSelector { number: 80 }),
                        },
                        weight: None,
                    }],
                }],
            },
        );
        let value = serde_json::to_value(&vs).unwrap();
        assert_eq!(value["apiVersion"], "networking.istio.io/v1beta1");
        assert_eq!(value["kind"], "VirtualService");
        assert_eq!(
            value["spec"]["http"][0],
            serde_json::json!({
                "name": "listPets",
                "match": [{ "uri": { "prefix": "/pets" }, "method": { "exact": "GET" } }],
                "route": [{ "destination": { "host": "petstore.apps.svc", "port": { "number": 80 } } }],
            })
        );
    }
}
