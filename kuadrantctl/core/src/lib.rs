#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod api;
pub mod auth_config;
pub mod auth_policy;
mod error;
pub mod extension;
pub mod http_route;
pub mod istio;
mod metadata;
pub mod naming;
pub mod openapi;
pub mod ratelimit_policy;
pub mod resolve;
pub mod routes;
pub mod security;
pub mod server;


pub use self::{
    error::{Error, Result},
    istio::{AuthorizationPolicyConfig, VirtualServiceConfig},
    openapi::Document,
};
