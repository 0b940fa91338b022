use super::*;
use crate::{auth_config, Error};
use kuadrantctl_k8s_api::authorino::{
    ApiKey, Credentials, CredentialsLocation, IdentityMethod, JsonPattern, Oidc,
};

const PUBLIC_HOST: &str = "petstore.example.com";

#[test]
fn api_key_identities_follow_operations() {
    let config = auth_config::generate(&petstore(), PUBLIC_HOST).expect("config must generate");

    assert_eq!(config.metadata.name.as_deref(), Some("petstore"));
    assert_eq!(config.metadata.namespace, None);
    assert_eq!(config.spec.hosts, [PUBLIC_HOST]);
    assert_eq!(config.spec.identity.len(), 1, "public operations need no identity");

    let identity = &config.spec.identity[0];
    assert_eq!(identity.name, "showPetById_apiKey");
    assert_eq!(
        identity.when,
        [
            JsonPattern::equals(r#"context.request.http.path@extract{"sep":"/"}"#, "/pets/{id}"),
            JsonPattern::equals("context.request.http.method", "GET"),
        ]
    );
    assert_eq!(
        identity.credentials,
        Some(Credentials {
            location: CredentialsLocation::CustomHeader,
            key_selector: "api_key".to_string(),
        })
    );
    assert_eq!(identity.method, IdentityMethod::ApiKey(ApiKey::for_app("petstore")));

    let value = serde_json::to_value(&config).unwrap();
    assert_eq!(value["apiVersion"], "authorino.kuadrant.io/v1beta1");
    assert_eq!(value["kind"], "AuthConfig");
}

#[test]
fn each_alternative_is_an_identity() {
    let doc = with_route(
        r#"
security:
  - api_key: []
paths:
  /toys:
    get:
      operationId: getToys
      security:
        - {}
        - oidc: []
        - api_key: []
    post:
      operationId: createToy
    delete:
      operationId: deleteToy
      x-kuadrant:
        disable: true
components:
  securitySchemes:
    api_key:
      type: apiKey
      in: query
      name: key
    oidc:
      type: openIdConnect
      openIdConnectUrl: https://sso.example.com/auth/realms/toystore
"#,
    );
    let config = auth_config::generate(&doc, PUBLIC_HOST).unwrap();

    let names = config
        .spec
        .identity
        .iter()
        .map(|i| i.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        ["getToys_oidc", "getToys_api_key", "createToy_api_key"],
        "anonymous alternatives and disabled operations add no identity"
    );

    let oidc = &config.spec.identity[0];
    assert_eq!(oidc.credentials, None);
    assert_eq!(
        oidc.method,
        IdentityMethod::Oidc(Oidc {
            endpoint: "https://sso.example.com/auth/realms/toystore".to_string(),
        })
    );

    let create = &config.spec.identity[2];
    assert_eq!(
        create.credentials.as_ref().map(|c| c.location),
        Some(CredentialsLocation::Query)
    );
    assert_eq!(create.when[1].value, "POST");
}

#[test]
fn unsupported_schemes_are_fatal() {
    let doc = with_route(
        r#"
paths:
  /toys:
    get:
      operationId: getToys
      security:
        - bearer: []
components:
  securitySchemes:
    bearer:
      type: http
      scheme: bearer
"#,
    );
    match auth_config::generate(&doc, PUBLIC_HOST) {
        Err(Error::UnsupportedSecurityScheme { name, kind }) => {
            assert_eq!(name, "bearer");
            assert_eq!(kind, "http");
        }
        res => panic!("unexpected result: {res:?}"),
    }
}

#[test]
fn undeclared_schemes_are_fatal() {
    let doc = with_route(
        r#"
paths:
  /toys:
    get:
      operationId: getToys
      security:
        - api_key: []
"#,
    );
    match auth_config::generate(&doc, PUBLIC_HOST) {
        Err(Error::UndeclaredSecurityScheme { operation, name }) => {
            assert_eq!(operation, "getToys");
            assert_eq!(name, "api_key");
        }
        res => panic!("unexpected result: {res:?}"),
    }
}
