//! Authorino AuthConfig backing the Istio `CUSTOM` authorization policy.

use crate::{
    naming,
    openapi::Document,
    resolve::{self, ResolvedOperation},
    security::{self, ApiKeyLocation, Scheme},
    Error, Result,
};
use kuadrantctl_k8s_api::{
    authorino::{
        ApiKey, AuthConfig, AuthConfigSpec, Credentials, CredentialsLocation, Identity,
        IdentityMethod, JsonPattern, Oidc,
    },
    ObjectMeta,
};
use tracing::debug;

const PATH_SELECTOR: &str = r#"context.request.http.path@extract{"sep":"/"}"#;
const METHOD_SELECTOR: &str = "context.request.http.method";

/// Generates an AuthConfig with one identity per security requirement of
/// every enabled operation.
///
/// Identities are named `<operation>_<scheme>` and apply only to requests
/// for their operation's path and method. API keys are looked up in Secrets
/// labeled with the title-derived name. Scheme types other than `apiKey` and
/// `openIdConnect`, and schemes that are not declared, are errors.
pub fn generate(doc: &Document, public_host: &str) -> Result<AuthConfig> {
    let name = naming::resource_name_from_title(&doc.info.title)?;

    let mut identity = Vec::new();
    for op in resolve::operations(doc)? {
        if op.security.is_empty() {
            debug!(operation = %op.name, "No security requirements");
            continue;
        }
        identity.extend(identities(doc, &op, &name)?);
    }

    Ok(AuthConfig {
        metadata: ObjectMeta {
            name: Some(name),
            ..ObjectMeta::default()
        },
        spec: AuthConfigSpec {
            hosts: vec![public_host.to_string()],
            identity,
        },
    })
}

fn identities(doc: &Document, op: &ResolvedOperation<'_>, app: &str) -> Result<Vec<Identity>> {
    let mut identities = Vec::with_capacity(op.security.len());
    for requirement in op.security {
        let Some(scheme_name) = security::requirement_scheme(&op.name, requirement)? else {
            debug!(operation = %op.name, "Skipping anonymous security requirement");
            continue;
        };
        let scheme = doc
            .components
            .security_schemes
            .get(scheme_name)
            .ok_or_else(|| Error::UndeclaredSecurityScheme {
                operation: op.name.clone(),
                name: scheme_name.to_string(),
            })?;

        let (credentials, method) = match security::classify(scheme_name, scheme)? {
            Scheme::ApiKey { location, name } => {
                let location = match location {
                    ApiKeyLocation::Header => CredentialsLocation::CustomHeader,
                    ApiKeyLocation::Query => CredentialsLocation::Query,
                    ApiKeyLocation::Cookie => CredentialsLocation::Cookie,
                };
                (
                    Some(Credentials {
                        location,
                        key_selector: name.to_string(),
                    }),
                    IdentityMethod::ApiKey(ApiKey::for_app(app)),
                )
            }
            Scheme::OpenIdConnect { url } => (
                None,
                IdentityMethod::Oidc(Oidc {
                    endpoint: url.to_string(),
                }),
            ),
            Scheme::Unsupported { kind } => {
                return Err(Error::UnsupportedSecurityScheme {
                    name: scheme_name.to_string(),
                    kind: kind.to_string(),
                });
            }
        };

        identities.push(Identity {
            name: format!("{}_{}", op.name, scheme_name),
            when: vec![
                JsonPattern::equals(PATH_SELECTOR, op.path),
                JsonPattern::equals(METHOD_SELECTOR, op.method.to_string()),
            ],
            credentials,
            method,
        });
    }
    Ok(identities)
}
