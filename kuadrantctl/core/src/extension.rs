//! Typed views of the `x-kuadrant` vendor extension.
//!
//! The root of the document names the generated route. Path items and
//! operations share a single shape, where every operation-level field
//! overrides the path-level one.

use crate::{Error, Result};
use kuadrantctl_k8s_api::{
    gateway::{HTTPRouteParentRefs, HTTPRouteRulesBackendRefs, PathMatchType},
    policy::ratelimit_policy::{Rate, WhenCondition},
};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

pub const EXTENSION_KEY: &str = "x-kuadrant";

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RootExtension {
    pub route: Option<RouteObject>,
}

/// Identity of the generated HTTPRoute, shared by every policy targeting it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteObject {
    pub name: Option<String>,

    pub namespace: Option<String>,

    #[serde(default)]
    pub hostnames: Vec<String>,

    #[serde(default)]
    pub parent_refs: Vec<HTTPRouteParentRefs>,

    #[serde(default, deserialize_with = "label_values")]
    pub labels: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    pub disable: Option<bool>,

    pub path_match_type: Option<PathMatchType>,

    #[serde(default)]
    pub backend_refs: Vec<HTTPRouteRulesBackendRefs>,

    #[serde(rename = "rate_limit")]
    pub rate_limit: Option<RateLimitExtension>,
}

/// A rate limit rule, copied verbatim into the generated limit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RateLimitExtension {
    pub when: Option<Vec<WhenCondition>>,
    pub counters: Option<Vec<String>>,
    pub rates: Option<Vec<Rate>>,
}

// === impl RootExtension ===

impl RootExtension {
    pub fn from_node(node: Option<&serde_json::Value>) -> Result<Self> {
        parse(node, "document root")
    }

    /// Returns the route object, failing if it is absent.
    pub fn into_route(self) -> Result<RouteObject> {
        self.route.ok_or(Error::MissingRouteExtension)
    }
}

// === impl Extension ===

impl Extension {
    pub fn from_path(path: &str, node: Option<&serde_json::Value>) -> Result<Self> {
        parse(node, &format!("paths.{path}"))
    }

    pub fn from_operation(
        path: &str,
        method: &str,
        node: Option<&serde_json::Value>,
    ) -> Result<Self> {
        parse(node, &format!("paths.{path}.{}", method.to_lowercase()))
    }
}

fn parse<T>(node: Option<&serde_json::Value>, location: &str) -> Result<T>
where
    T: Default + serde::de::DeserializeOwned,
{
    match node {
        None | Some(serde_json::Value::Null) => Ok(T::default()),
        Some(node) => {
            T::deserialize(node).map_err(|source| Error::InvalidExtension {
                location: location.to_string(),
                source,
            })
        }
    }
}

/// Label values are strings in Kubernetes, but YAML authors often write
/// numbers and booleans unquoted.
fn label_values<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let labels = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
    labels
        .into_iter()
        .map(|(k, v)| match v {
            serde_json::Value::String(s) => Ok((k, s)),
            // Whole floats render without a fractional part, `1.0` as `1`.
            serde_json::Value::Number(n) => match n.as_f64().filter(|_| n.is_f64()) {
                Some(f) => Ok((k, f.to_string())),
                None => Ok((k, n.to_string())),
            },
            v @ serde_json::Value::Bool(_) => Ok((k, v.to_string())),
            v => Err(serde::de::Error::custom(format!(
                "label {k} must have a scalar value, not {v}"
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuadrantctl_k8s_api::policy::ratelimit_policy::TimeUnit;
    use maplit::btreemap;

    fn yaml(s: &str) -> serde_json::Value {
        serde_yaml::from_str(s).expect("test yaml must parse")
    }

    #[test]
    fn absent_extension_uses_defaults() {
        let ext = Extension::from_path("/pets", None).unwrap();
        assert_eq!(ext, Extension::default());
        assert_eq!(ext.disable, None);
        assert!(ext.backend_refs.is_empty());
        assert_eq!(ext.rate_limit, None);

        let root = RootExtension::from_node(None).unwrap();
        assert!(matches!(
            root.into_route(),
            Err(Error::MissingRouteExtension)
        ));
    }

    #[test]
    fn parses_root_route() {
        let root = RootExtension::from_node(Some(&yaml(
            r#"
route:
  name: petstore
  namespace: petstore-ns
  hostnames:
    - example.com
  parentRefs:
    - name: istio-ingressgateway
      namespace: istio-system
  labels:
    deployment: petstore
    version: 2
"#,
        )))
        .unwrap();
        let route = root.into_route().unwrap();
        assert_eq!(route.name.as_deref(), Some("petstore"));
        assert_eq!(route.namespace.as_deref(), Some("petstore-ns"));
        assert_eq!(route.hostnames, ["example.com"]);
        assert_eq!(route.parent_refs[0].name, "istio-ingressgateway");
        assert_eq!(
            route.labels,
            btreemap! {
                "deployment".to_string() => "petstore".to_string(),
                "version".to_string() => "2".to_string(),
            }
        );
    }

    #[test]
    fn scalar_labels_are_stringified() {
        let root = RootExtension::from_node(Some(&yaml(
            "route: { name: petstore, labels: { version: 1.0, ratio: 1.5, canary: true, port: 80 } }",
        )))
        .unwrap();
        assert_eq!(
            root.into_route().unwrap().labels,
            btreemap! {
                "canary".to_string() => "true".to_string(),
                "port".to_string() => "80".to_string(),
                "ratio".to_string() => "1.5".to_string(),
                "version".to_string() => "1".to_string(),
            }
        );
    }

    #[test]
    fn parses_operation_extension() {
        let ext = Extension::from_operation(
            "/pets",
            "GET",
            Some(&yaml(
                r#"
disable: false
pathMatchType: PathPrefix
backendRefs:
  - name: petstore
    port: 80
rate_limit:
  rates:
    - limit: 5
      duration: 10
      unit: second
  counters:
    - request.headers.x-forwarded-for
"#,
            )),
        )
        .unwrap();
        assert_eq!(ext.disable, Some(false));
        assert_eq!(ext.path_match_type, Some(PathMatchType::PathPrefix));
        assert_eq!(ext.backend_refs.len(), 1);
        let rl = ext.rate_limit.expect("rate limit");
        assert_eq!(rl.when, None);
        assert_eq!(
            rl.rates,
            Some(vec![Rate {
                limit: 5,
                duration: 10,
                unit: TimeUnit::Second,
            }])
        );
    }

    #[test]
    fn malformed_extension_names_its_location() {
        let err = Extension::from_operation(
            "/pets",
            "POST",
            Some(&yaml("disable: sometimes")),
        )
        .unwrap_err();
        match err {
            Error::InvalidExtension { location, .. } => assert_eq!(location, "paths./pets.post"),
            err => panic!("unexpected error: {err}"),
        }

        let err = RootExtension::from_node(Some(&yaml("route: { labels: { a: [1] } }")))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidExtension { .. }), "{err}");
    }
}
