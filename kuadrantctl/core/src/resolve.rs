use crate::{
    extension::{Extension, RateLimitExtension},
    naming,
    openapi::{Document, Operation, SecurityRequirement},
    routes::MatchBuilder,
    Result,
};
use kuadrantctl_k8s_api::gateway::{
    HTTPRouteRulesBackendRefs, HttpMethod, HttpRouteMatch, PathMatchType,
};
use tracing::debug;

/// The settings of an operation once its extension has been overlaid on its
/// path's extension.
#[derive(Clone, Debug, PartialEq)]
pub struct Effective {
    pub disabled: bool,
    pub path_match_type: PathMatchType,
    pub backend_refs: Vec<HTTPRouteRulesBackendRefs>,
    pub rate_limit: Option<RateLimitExtension>,
}

/// An enabled operation with every inherited setting applied.
#[derive(Clone, Debug)]
pub struct ResolvedOperation<'doc> {
    pub path: &'doc str,
    pub method: HttpMethod,
    pub operation: &'doc Operation,
    pub name: String,
    pub path_match_type: PathMatchType,
    pub backend_refs: Vec<HTTPRouteRulesBackendRefs>,
    pub rate_limit: Option<RateLimitExtension>,
    pub security: &'doc [SecurityRequirement],
    pub route_match: HttpRouteMatch,
}

// === impl Effective ===

impl Effective {
    /// Operation-level values win when set. Backend references only override
    /// when non-empty and rate limits are replaced as a whole.
    pub fn resolve(path: &Extension, op: Extension) -> Self {
        let backend_refs = if op.backend_refs.is_empty() {
            path.backend_refs.clone()
        } else {
            op.backend_refs
        };
        Self {
            disabled: op.disable.or(path.disable).unwrap_or(false),
            path_match_type: op
                .path_match_type
                .or(path.path_match_type)
                .unwrap_or(PathMatchType::Exact),
            backend_refs,
            rate_limit: op.rate_limit.or_else(|| path.rate_limit.clone()),
        }
    }
}

/// Resolves every enabled operation of the document, in document order.
///
/// Disabled operations are dropped before anything else about them is
/// computed.
pub fn operations(doc: &Document) -> Result<Vec<ResolvedOperation<'_>>> {
    let matches = MatchBuilder::new(doc)?;
    let mut resolved = Vec::new();

    for (path, item) in &doc.paths {
        let path_ext = Extension::from_path(path, item.kuadrant.as_ref())?;

        for (method, operation) in item.operations() {
            let op_ext =
                Extension::from_operation(path, method.as_str(), operation.kuadrant.as_ref())?;
            let name = naming::operation_name(path, method, operation);

            let Effective {
                disabled,
                path_match_type,
                backend_refs,
                rate_limit,
            } = Effective::resolve(&path_ext, op_ext);
            if disabled {
                debug!(%path, %method, operation = %name, "Skipping disabled operation");
                continue;
            }

            let route_match = matches.build(path, item, method, operation, path_match_type)?;
            resolved.push(ResolvedOperation {
                path,
                method,
                operation,
                name,
                path_match_type,
                backend_refs,
                rate_limit,
                security: operation.effective_security(doc),
                route_match,
            });
        }
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuadrantctl_k8s_api::policy::ratelimit_policy::{Rate, TimeUnit};

    fn ext(yaml: &str) -> Extension {
        let node: serde_json::Value = serde_yaml::from_str(yaml).expect("test yaml must parse");
        Extension::from_path("/test", Some(&node)).expect("test extension must parse")
    }

    fn rate_limit(limit: i32) -> RateLimitExtension {
        RateLimitExtension {
            rates: Some(vec![Rate {
                limit,
                duration: 1,
                unit: TimeUnit::Minute,
            }]),
            ..RateLimitExtension::default()
        }
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let eff = Effective::resolve(&Extension::default(), Extension::default());
        assert_eq!(
            eff,
            Effective {
                disabled: false,
                path_match_type: PathMatchType::Exact,
                backend_refs: vec![],
                rate_limit: None,
            }
        );
    }

    #[test]
    fn operation_overrides_path() {
        let path = ext("{ disable: true, pathMatchType: PathPrefix, backendRefs: [{ name: a }] }");
        let path = Extension {
            rate_limit: Some(rate_limit(1)),
            ..path
        };
        let op = Extension {
            rate_limit: Some(rate_limit(2)),
            ..ext("{ disable: false, pathMatchType: RegularExpression, backendRefs: [{ name: b }] }")
        };

        let eff = Effective::resolve(&path, op);
        assert!(!eff.disabled);
        assert_eq!(eff.path_match_type, PathMatchType::RegularExpression);
        assert_eq!(eff.backend_refs[0].name, "b");
        assert_eq!(eff.rate_limit, Some(rate_limit(2)));
    }

    #[test]
    fn operation_inherits_path() {
        let path = Extension {
            rate_limit: Some(rate_limit(1)),
            ..ext("{ disable: true, pathMatchType: PathPrefix, backendRefs: [{ name: a }] }")
        };
        let eff = Effective::resolve(&path, ext("{ backendRefs: [] }"));
        assert!(eff.disabled);
        assert_eq!(eff.path_match_type, PathMatchType::PathPrefix);
        assert_eq!(eff.backend_refs[0].name, "a");
        assert_eq!(eff.rate_limit, Some(rate_limit(1)));
    }

    #[test]
    fn rate_limits_are_not_merged() {
        let path = Extension {
            rate_limit: Some(RateLimitExtension {
                counters: Some(vec!["request.headers.x-forwarded-for".to_string()]),
                ..rate_limit(1)
            }),
            ..Extension::default()
        };
        let op = Extension {
            rate_limit: Some(rate_limit(2)),
            ..Extension::default()
        };
        let eff = Effective::resolve(&path, op);
        assert_eq!(eff.rate_limit.and_then(|rl| rl.counters), None);
    }

    #[test]
    fn disabled_operations_are_dropped_first() {
        // The disabled operation references a parameter that does not exist,
        // which would fail if its match were built.
        let doc: Document = r##"
openapi: 3.0.2
info: { title: t, version: v }
paths:
  /pets:
    x-kuadrant:
      disable: true
    get:
      parameters:
        - $ref: '#/components/parameters/Missing'
    post:
      x-kuadrant:
        disable: false
"##
        .parse()
        .unwrap();
        let ops = operations(&doc).expect("disabled operations must be skipped");
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].method, HttpMethod::Post);
        assert_eq!(ops[0].name, "POSTpets");
    }
}
