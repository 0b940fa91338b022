#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod authorino;
pub mod gateway;
pub mod istio;
pub mod labels;
pub mod networking;
pub mod policy;

pub use self::labels::Selector;
pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
