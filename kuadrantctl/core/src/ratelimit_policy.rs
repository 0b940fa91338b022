use crate::{metadata::Route, openapi::Document, resolve, Result};
use kuadrantctl_k8s_api::policy::{
    ratelimit_policy::Limit, RateLimitPolicy, RateLimitPolicySpec, RouteSelector,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Generates the Kuadrant RateLimitPolicy with one limit per enabled
/// operation that has a rate limit, keyed by the operation name.
pub fn generate(doc: &Document) -> Result<RateLimitPolicy> {
    let route = Route::from_document(doc)?;

    let mut limits = BTreeMap::new();
    for op in resolve::operations(doc)? {
        let Some(rate_limit) = op.rate_limit else {
            debug!(operation = %op.name, "No rate limit");
            continue;
        };
        limits.insert(
            op.name,
            Limit {
                route_selectors: Some(vec![RouteSelector::from_match(op.route_match)]),
                when: rate_limit.when,
                counters: rate_limit.counters,
                rates: rate_limit.rates,
            },
        );
    }

    Ok(RateLimitPolicy {
        metadata: route.object_meta(),
        spec: RateLimitPolicySpec {
            target_ref: route.target_ref(),
            limits: Some(limits).filter(|l| !l.is_empty()),
        },
    })
}
