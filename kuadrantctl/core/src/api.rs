use crate::{
    naming,
    openapi::Document,
    security::{self, Scheme},
    server, Error, Result,
};
use kuadrantctl_k8s_api::{
    networking::{Api, ApiKeyAuth, ApiSpec, OpenIdConnectAuth, Operation, SecurityScheme},
    ObjectMeta,
};

/// Generates the Kuadrant API descriptor of a document.
///
/// Unlike the policy generators, every operation is listed (disabled ones
/// included) and any security scheme that is neither `apiKey` nor
/// `openIdConnect` is an error.
pub fn generate(doc: &Document) -> Result<Api> {
    let name = naming::resource_name_from_title(&doc.info.title)?;
    let prefix = server::path_prefix(doc)?;

    let operations = doc
        .operations()
        .map(|(path, _, method, op)| Operation {
            name: naming::system_name(path, method, op),
            path: format!("{prefix}{path}"),
            method: method.to_string(),
        })
        .collect();

    let security_scheme = doc
        .components
        .security_schemes
        .iter()
        .map(|(name, scheme)| {
            let mut out = SecurityScheme {
                name: name.clone(),
                api_key_auth: None,
                open_id_connect_auth: None,
            };
            match security::classify(name, scheme)? {
                Scheme::ApiKey { location, name: param } => {
                    out.api_key_auth = Some(ApiKeyAuth {
                        location: location.to_string(),
                        name: param.to_string(),
                    });
                }
                Scheme::OpenIdConnect { url } => {
                    out.open_id_connect_auth = Some(OpenIdConnectAuth {
                        url: url.to_string(),
                    });
                }
                Scheme::Unsupported { kind } => {
                    return Err(Error::UnsupportedSecurityScheme {
                        name: name.clone(),
                        kind: kind.to_string(),
                    });
                }
            }
            Ok(out)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Api {
        metadata: ObjectMeta {
            name: Some(name),
            ..ObjectMeta::default()
        },
        spec: ApiSpec {
            hosts: server::hosts(doc)?,
            operations,
            security_scheme,
        },
    })
}
