//! Istio resources for exposing and protecting an API without the Gateway
//! API.

use crate::{naming, openapi::Document, resolve, Result};
use kuadrantctl_k8s_api::{
    istio::{
        authorization_policy::{
            Action, ExtensionProvider, Operation, Rule, RuleTo, WorkloadSelector,
        },
        virtual_service::{
            Destination, HttpMatchRequest, HttpRoute, HttpRouteDestination, PortSelector,
            StringMatch,
        },
        AuthorizationPolicy, AuthorizationPolicySpec, VirtualService, VirtualServiceSpec,
        KUADRANT_AUTHORIZATION_PROVIDER,
    },
    ObjectMeta,
};
use std::collections::BTreeMap;

pub const DEFAULT_SERVICE_PORT: u32 = 80;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VirtualServiceConfig {
    /// The address clients use to reach the API.
    pub public_host: String,
    pub service_name: String,
    pub service_namespace: String,
    pub service_port: u32,
    pub gateways: Vec<String>,
    /// Match path templates as prefixes rather than exactly.
    pub path_prefix_match: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationPolicyConfig {
    pub public_host: String,
    /// Labels selecting the gateway workloads the policy applies to.
    pub gateway_labels: BTreeMap<String, String>,
}

/// Generates a VirtualService routing each enabled operation to the
/// configured service.
pub fn virtual_service(doc: &Document, config: &VirtualServiceConfig) -> Result<VirtualService> {
    let name = naming::resource_name_from_title(&doc.info.title)?;
    let destination = Destination {
        host: format!(
            "{}.{}.svc",
            config.service_name, config.service_namespace
        ),
        subset: None,
        port: Some(PortSelector {
            number: config.service_port,
        }),
    };

    let http = resolve::operations(doc)?
        .into_iter()
        .map(|op| {
            let uri = if config.path_prefix_match {
                StringMatch::Prefix(op.path.to_string())
            } else {
                StringMatch::Exact(op.path.to_string())
            };
            HttpRoute {
                name: op.name,
                matches: vec![HttpMatchRequest {
                    uri: Some(uri),
                    method: Some(StringMatch::Exact(op.method.to_string())),
                }],
                route: vec![HttpRouteDestination {
                    destination: destination.clone(),
                    weight: None,
                }],
            }
        })
        .collect();

    Ok(VirtualService {
        metadata: ObjectMeta {
            name: Some(name),
            ..ObjectMeta::default()
        },
        spec: VirtualServiceSpec {
            hosts: vec![config.public_host.clone()],
            gateways: config.gateways.clone(),
            http,
        },
    })
}

/// Generates an AuthorizationPolicy delegating every enabled operation with a
/// security requirement to the Kuadrant external authorization provider.
pub fn authorization_policy(
    doc: &Document,
    config: &AuthorizationPolicyConfig,
) -> Result<AuthorizationPolicy> {
    let name = naming::resource_name_from_title(&doc.info.title)?;

    let rules = resolve::operations(doc)?
        .into_iter()
        .filter(|op| !op.security.is_empty())
        .map(|op| Rule {
            to: vec![RuleTo {
                operation: Operation {
                    hosts: vec![config.public_host.clone()],
                    methods: vec![op.method.to_string()],
                    paths: vec![op.path.to_string()],
                },
            }],
        })
        .collect();

    Ok(AuthorizationPolicy {
        metadata: ObjectMeta {
            name: Some(name),
            ..ObjectMeta::default()
        },
        spec: AuthorizationPolicySpec {
            selector: Some(WorkloadSelector {
                match_labels: config.gateway_labels.clone(),
            }),
            rules,
            action: Action::Custom,
            provider: Some(ExtensionProvider {
                name: KUADRANT_AUTHORIZATION_PROVIDER.to_string(),
            }),
        },
    })
}
