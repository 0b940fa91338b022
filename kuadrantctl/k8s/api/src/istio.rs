pub mod authorization_policy;
pub mod virtual_service;

pub use self::{
    authorization_policy::{AuthorizationPolicy, AuthorizationPolicySpec},
    virtual_service::{VirtualService, VirtualServiceSpec},
};

/// Name of the Istio extension provider that delegates authorization to
/// Authorino.
pub const KUADRANT_AUTHORIZATION_PROVIDER: &str = "kuadrant-authorization";
