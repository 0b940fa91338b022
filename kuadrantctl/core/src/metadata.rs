use crate::{
    extension::{RootExtension, RouteObject},
    openapi::Document,
    Error, Result,
};
use kuadrantctl_k8s_api::{
    gateway::HTTPRouteParentRefs, policy::PolicyTargetReference, ObjectMeta,
};
use std::collections::BTreeMap;

/// Identity of the generated HTTPRoute, shared by the route and the policies
/// that target it.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Route {
    pub name: String,
    pub namespace: Option<String>,
    pub hostnames: Vec<String>,
    pub parent_refs: Vec<HTTPRouteParentRefs>,
    pub labels: BTreeMap<String, String>,
}

impl Route {
    pub(crate) fn from_document(doc: &Document) -> Result<Self> {
        let RouteObject {
            name,
            namespace,
            hostnames,
            parent_refs,
            labels,
        } = RootExtension::from_node(doc.kuadrant.as_ref())?.into_route()?;

        let name = name
            .filter(|n| !n.is_empty())
            .ok_or(Error::MissingRouteName)?;
        Ok(Self {
            name,
            namespace: namespace.filter(|ns| !ns.is_empty()),
            hostnames,
            parent_refs,
            labels,
        })
    }

    pub(crate) fn object_meta(&self) -> ObjectMeta {
        ObjectMeta {
            name: Some(self.name.clone()),
            namespace: self.namespace.clone(),
            labels: Some(self.labels.clone()).filter(|l| !l.is_empty()),
            ..ObjectMeta::default()
        }
    }

    pub(crate) fn target_ref(&self) -> PolicyTargetReference {
        PolicyTargetReference::http_route(self.name.clone(), self.namespace.clone())
    }
}
