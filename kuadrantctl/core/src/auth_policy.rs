use crate::{
    metadata::Route,
    openapi::Document,
    resolve::{self, ResolvedOperation},
    security::{self, ApiKeyLocation, Scheme},
    Result,
};
use kuadrantctl_k8s_api::policy::{
    auth_policy::{
        ApiKeyAuthentication, AuthScheme, AuthenticationMethod, AuthenticationSpec, Credentials,
        JwtAuthentication, Named,
    },
    AuthPolicy, AuthPolicySpec, RouteSelector,
};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Generates the Kuadrant AuthPolicy authenticating every enabled operation
/// with a security requirement.
///
/// Each alternative of an operation's requirements becomes an authentication
/// rule named `<operation>_<scheme>`, selecting only that operation. The
/// top-level route selectors route every secured operation through the
/// external authorization check.
pub fn generate(doc: &Document) -> Result<AuthPolicy> {
    let route = Route::from_document(doc)?;

    let mut route_selectors = Vec::new();
    let mut authentication = BTreeMap::new();
    for op in resolve::operations(doc)? {
        if op.security.is_empty() {
            debug!(operation = %op.name, "No security requirements");
            continue;
        }
        route_selectors.push(RouteSelector::from_match(op.route_match.clone()));
        authentication.extend(authentication_rules(doc, &op)?);
    }

    Ok(AuthPolicy {
        metadata: route.object_meta(),
        spec: AuthPolicySpec {
            target_ref: route.target_ref(),
            route_selectors: Some(route_selectors).filter(|s| !s.is_empty()),
            rules: Some(authentication)
                .filter(|a| !a.is_empty())
                .map(|authentication| AuthScheme {
                    authentication: Some(authentication),
                }),
        },
    })
}

fn authentication_rules(
    doc: &Document,
    op: &ResolvedOperation<'_>,
) -> Result<Vec<(String, AuthenticationSpec)>> {
    let mut rules = Vec::with_capacity(op.security.len());
    for requirement in op.security {
        let Some(scheme_name) = security::requirement_scheme(&op.name, requirement)? else {
            debug!(operation = %op.name, "Skipping anonymous security requirement");
            continue;
        };
        let Some(scheme) = doc.components.security_schemes.get(scheme_name) else {
            warn!(operation = %op.name, scheme = %scheme_name, "Security scheme is not declared");
            continue;
        };

        let (credentials, method) = match security::classify(scheme_name, scheme)? {
            Scheme::ApiKey { location, name } => {
                let named = Named {
                    name: name.to_string(),
                };
                let credentials = match location {
                    ApiKeyLocation::Header => Credentials::CustomHeader(named),
                    ApiKeyLocation::Query => Credentials::QueryString(named),
                    ApiKeyLocation::Cookie => Credentials::Cookie(named),
                };
                (
                    Some(credentials),
                    AuthenticationMethod::ApiKey(ApiKeyAuthentication::for_scheme(scheme_name)),
                )
            }
            Scheme::OpenIdConnect { url } => (
                None,
                AuthenticationMethod::Jwt(JwtAuthentication {
                    issuer_url: url.to_string(),
                }),
            ),
            Scheme::Unsupported { kind } => {
                warn!(operation = %op.name, scheme = %scheme_name, %kind, "Security scheme type is not supported");
                continue;
            }
        };

        rules.push((
            format!("{}_{}", op.name, scheme_name),
            AuthenticationSpec {
                route_selectors: Some(vec![RouteSelector::from_match(op.route_match.clone())]),
                credentials,
                method,
            },
        ));
    }
    Ok(rules)
}
