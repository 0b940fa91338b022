use crate::{
    openapi::{Components, Document, Operation, ParameterLocation, ParameterOrRef, PathItem},
    server, Result,
};
use kuadrantctl_k8s_api::gateway::{
    HttpHeaderMatch, HttpMethod, HttpPathMatch, HttpQueryParamMatch, HttpRouteMatch,
    PathMatchType,
};

/// Builds the route match of each operation of a document.
#[derive(Clone, Debug)]
pub struct MatchBuilder<'doc> {
    prefix: String,
    components: &'doc Components,
}

impl<'doc> MatchBuilder<'doc> {
    pub fn new(doc: &'doc Document) -> Result<Self> {
        Ok(Self {
            prefix: server::path_prefix(doc)?,
            components: &doc.components,
        })
    }

    /// Matches the method exactly and the base path followed by the path
    /// template, which is passed through unmodified. Only required header and
    /// query parameters produce matchers. Operation-level parameters replace
    /// the path-level ones, independently for headers and query parameters.
    pub fn build(
        &self,
        path: &str,
        item: &PathItem,
        method: HttpMethod,
        op: &Operation,
        path_match_type: PathMatchType,
    ) -> Result<HttpRouteMatch> {
        let headers = self
            .overriding(item, op, ParameterLocation::Header)?
            .map(|names| names.into_iter().map(HttpHeaderMatch::exact).collect());
        let query_params = self
            .overriding(item, op, ParameterLocation::Query)?
            .map(|names| names.into_iter().map(HttpQueryParamMatch::exact).collect());

        Ok(HttpRouteMatch {
            path: Some(HttpPathMatch {
                r#type: Some(path_match_type),
                value: Some(format!("{}{}", self.prefix, path)),
            }),
            headers,
            query_params,
            method: Some(method),
        })
    }

    fn overriding(
        &self,
        item: &PathItem,
        op: &Operation,
        location: ParameterLocation,
    ) -> Result<Option<Vec<String>>> {
        let from_op = self.required(&op.parameters, location)?;
        if !from_op.is_empty() {
            return Ok(Some(from_op));
        }
        let from_path = self.required(&item.parameters, location)?;
        Ok(Some(from_path).filter(|names| !names.is_empty()))
    }

    fn required(&self, params: &[ParameterOrRef], location: ParameterLocation) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for param in params {
            let param = self.components.resolve_parameter(param)?;
            if param.required && param.location == location {
                names.push(param.name.clone());
            }
        }
        Ok(names)
    }
}
