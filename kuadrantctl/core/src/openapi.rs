//! The subset of an OpenAPI 3.x document that the generators read.
//!
//! Documents are decoded as YAML, which also accepts JSON. Maps that carry
//! document order (paths, server variables, security requirements) are kept
//! as [`IndexMap`]s so that output follows declaration order. Vendor
//! extensions are kept as raw JSON values and decoded on demand by
//! [`crate::extension`].

use crate::{Error, Result};
use indexmap::IndexMap;
use kuadrantctl_k8s_api::gateway::HttpMethod;
use serde::Deserialize;

/// A security requirement maps scheme names to scopes. All of the listed
/// schemes must be satisfied.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub openapi: String,

    #[serde(default)]
    pub info: Info,

    #[serde(default)]
    pub servers: Vec<Server>,

    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    #[serde(default)]
    pub components: Components,

    /// Document-wide alternatives, used by operations that do not declare
    /// their own.
    #[serde(default)]
    pub security: Option<Vec<SecurityRequirement>>,

    #[serde(default, rename = "x-kuadrant")]
    pub kuadrant: Option<serde_json::Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub version: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Server {
    pub url: String,

    #[serde(default)]
    pub variables: IndexMap<String, ServerVariable>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ServerVariable {
    #[serde(default)]
    pub default: String,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,

    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub patch: Option<Operation>,
    pub trace: Option<Operation>,

    #[serde(default, rename = "x-kuadrant")]
    pub kuadrant: Option<serde_json::Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: Option<String>,

    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,

    /// `None` inherits the document's requirements; an empty list disables
    /// security for the operation.
    #[serde(default)]
    pub security: Option<Vec<SecurityRequirement>>,

    #[serde(default, rename = "x-kuadrant")]
    pub kuadrant: Option<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Reference {
        #[serde(rename = "$ref")]
        reference: String,
    },
    Item(Parameter),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(default)]
    pub required: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,

    #[serde(default)]
    pub security_schemes: IndexMap<String, SecurityScheme>,
}

/// A declared security scheme. The type is kept as a string so that schemes
/// the generators do not support (e.g. `http`, `oauth2`) still parse.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(rename = "in")]
    pub location: Option<String>,

    pub name: Option<String>,

    pub open_id_connect_url: Option<String>,
}

const PARAMETER_REF_PREFIX: &str = "#/components/parameters/";

// === impl Document ===

impl Document {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_yaml::from_slice(bytes).map_err(Into::into)
    }

    /// Iterates over every operation, paths in document order and verbs in
    /// a fixed order within each path.
    pub fn operations(&self) -> impl Iterator<Item = (&str, &PathItem, HttpMethod, &Operation)> {
        self.paths.iter().flat_map(|(path, item)| {
            item.operations()
                .map(move |(method, op)| (path.as_str(), item, method, op))
        })
    }

    /// Returns the document-wide security requirements, empty when unset.
    pub fn security(&self) -> &[SecurityRequirement] {
        self.security.as_deref().unwrap_or_default()
    }
}

impl std::str::FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_slice(s.as_bytes())
    }
}

// === impl PathItem ===

impl PathItem {
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        [
            (HttpMethod::Get, &self.get),
            (HttpMethod::Put, &self.put),
            (HttpMethod::Post, &self.post),
            (HttpMethod::Delete, &self.delete),
            (HttpMethod::Options, &self.options),
            (HttpMethod::Head, &self.head),
            (HttpMethod::Patch, &self.patch),
            (HttpMethod::Trace, &self.trace),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
    }
}

// === impl Operation ===

impl Operation {
    /// Returns the operation's own requirements if declared, otherwise the
    /// document defaults.
    pub fn effective_security<'a>(&'a self, doc: &'a Document) -> &'a [SecurityRequirement] {
        match self.security.as_deref() {
            Some(security) => security,
            None => doc.security(),
        }
    }
}

// === impl Components ===

impl Components {
    pub fn resolve_parameter<'a>(&'a self, param: &'a ParameterOrRef) -> Result<&'a Parameter> {
        match param {
            ParameterOrRef::Item(param) => Ok(param),
            ParameterOrRef::Reference { reference } => reference
                .strip_prefix(PARAMETER_REF_PREFIX)
                .and_then(|name| self.parameters.get(name))
                .ok_or_else(|| Error::UnresolvedReference(reference.clone())),
        }
    }
}
