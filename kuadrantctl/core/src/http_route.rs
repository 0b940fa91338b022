use crate::{metadata::Route, openapi::Document, resolve, Result};
use kuadrantctl_k8s_api::gateway::{HttpRoute, HttpRouteRule, HttpRouteSpec};

/// Generates the Gateway API HTTPRoute exposing every enabled operation.
pub fn generate(doc: &Document) -> Result<HttpRoute> {
    let route = Route::from_document(doc)?;

    // One rule per operation. Operations sharing backends could be grouped as
    // several matches of fewer rules.
    let rules = resolve::operations(doc)?
        .into_iter()
        .map(|op| HttpRouteRule {
            matches: Some(vec![op.route_match]),
            backend_refs: Some(op.backend_refs).filter(|refs| !refs.is_empty()),
        })
        .collect::<Vec<_>>();

    Ok(HttpRoute {
        metadata: route.object_meta(),
        spec: HttpRouteSpec {
            parent_refs: Some(route.parent_refs).filter(|refs| !refs.is_empty()),
            hostnames: Some(route.hostnames).filter(|hosts| !hosts.is_empty()),
            rules: Some(rules).filter(|rules| !rules.is_empty()),
        },
    })
}
