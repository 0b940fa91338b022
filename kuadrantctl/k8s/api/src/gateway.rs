pub use gateway_api::apis::standard::httproutes::{HTTPRouteParentRefs, HTTPRouteRulesBackendRefs};

/// HTTPRoute provides a way to route HTTP requests. This includes the
/// capability to match requests by hostname, path, header, or query param.
/// Backends specify where matching requests should be routed.
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
    group = "gateway.networking.k8s.io",
    version = "v1",
    kind = "HTTPRoute",
    root = "HttpRoute",
    derive = "PartialEq",
    namespaced
)]
pub struct HttpRouteSpec {
    /// ParentRefs references the resources (usually Gateways) that a Route
    /// wants to be attached to.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        rename = "parentRefs"
    )]
    pub parent_refs: Option<Vec<HTTPRouteParentRefs>>,

    /// Hostnames defines a set of hostname that should match against the HTTP
    /// Host header to select a HTTPRoute to process the request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostnames: Option<Vec<String>>,

    /// Rules are a list of HTTP matchers and actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<HttpRouteRule>>,
}

/// HTTPRouteRule defines semantics for matching an HTTP request based on
/// conditions (matches) and forwarding the request to an API object
/// (backendRefs).
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteRule {
    /// Matches define conditions used for matching the rule against incoming
    /// HTTP requests. Each match is independent, i.e. this rule will be matched
    /// if **any** one of the matches is satisfied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<HttpRouteMatch>>,

    /// BackendRefs defines the backend(s) where matching requests should be
    /// sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_refs: Option<Vec<HTTPRouteRulesBackendRefs>>,
}

/// HTTPRouteMatch defines the predicate used to match requests to a given
/// action. Multiple match types are ANDed together, i.e. the match will
/// evaluate to true only if all conditions are satisfied.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct HttpRouteMatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<HttpPathMatch>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<HttpHeaderMatch>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_params: Option<Vec<HttpQueryParamMatch>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
}

#[derive(
    Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
pub struct HttpPathMatch {
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub r#type: Option<PathMatchType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// PathMatchType specifies the semantics of how HTTP paths should be compared.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
pub enum PathMatchType {
    Exact,
    PathPrefix,
    RegularExpression,
}

/// Matches an HTTP header by name. Header names are case-insensitive.
#[derive(
    Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
pub struct HttpHeaderMatch {
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub r#type: Option<HeaderMatchType>,
    pub name: String,
    #[serde(default)]
    pub value: String,
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
pub enum HeaderMatchType {
    Exact,
    RegularExpression,
}

/// Matches a query parameter by name. Query parameter names are
/// case-sensitive.
#[derive(
    Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
pub struct HttpQueryParamMatch {
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub r#type: Option<QueryParamMatchType>,
    pub name: String,
    #[serde(default)]
    pub value: String,
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
pub enum QueryParamMatchType {
    Exact,
    RegularExpression,
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
}

// === impl HttpHeaderMatch ===

impl HttpHeaderMatch {
    /// Matches the presence of a header with exact-match semantics.
    pub fn exact(name: impl Into<String>) -> Self {
        Self {
            r#type: Some(HeaderMatchType::Exact),
            name: name.into(),
            value: String::new(),
        }
    }
}

// === impl HttpQueryParamMatch ===

impl HttpQueryParamMatch {
    /// Matches the presence of a query parameter with exact-match semantics.
    pub fn exact(name: impl Into<String>) -> Self {
        Self {
            r#type: Some(QueryParamMatchType::Exact),
            name: name.into(),
            value: String::new(),
        }
    }
}

// === impl HttpMethod ===

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Connect => "CONNECT",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
            Self::Patch => "PATCH",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_serializes_type_meta() {
        let route = HttpRoute::new(
            "petstore",
            HttpRouteSpec {
                hostnames: Some(vec!["example.com".to_string()]),
                ..HttpRouteSpec::default()
            },
        );
        let value = serde_json::to_value(&route).unwrap();
        assert_eq!(value["apiVersion"], "gateway.networking.k8s.io/v1");
        assert_eq!(value["kind"], "HTTPRoute");
        assert_eq!(value["metadata"]["name"], "petstore");
        assert_eq!(value["spec"]["hostnames"][0], "example.com");
        assert!(value["spec"].get("rules").is_none());
    }

    #[test]
    fn match_uses_gateway_field_names() {
        let m = HttpRouteMatch {
            path: Some(HttpPathMatch {
                r#type: Some(PathMatchType::PathPrefix),
                value: Some("/v1/pets".to_string()),
            }),
            headers: Some(vec![HttpHeaderMatch::exact("X-Request-Id")]),
            query_params: Some(vec![HttpQueryParamMatch::exact("limit")]),
            method: Some(HttpMethod::Get),
        };
        assert_eq!(
            serde_json::to_value(&m).unwrap(),
            serde_json::json!({
                "path": { "type": "PathPrefix", "value": "/v1/pets" },
                "headers": [{ "type": "Exact", "name": "X-Request-Id", "value": "" }],
                "queryParams": [{ "type": "Exact", "name": "limit", "value": "" }],
                "method": "GET",
            })
        );
    }

    #[test]
    fn backend_refs_round_trip_verbatim() {
        let rule: HttpRouteRule = serde_json::from_value(serde_json::json!({
            "backendRefs": [{ "name": "petstore", "namespace": "petstore", "port": 80 }],
        }))
        .expect("backend refs must parse");
        let refs = rule.backend_refs.as_deref().expect("backend refs");
        assert_eq!(refs[0].name, "petstore");
        assert_eq!(refs[0].port, Some(80));
    }
}
