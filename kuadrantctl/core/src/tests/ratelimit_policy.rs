use super::*;
use crate::ratelimit_policy;
use kuadrantctl_k8s_api::policy::ratelimit_policy::{
    Rate, TimeUnit, WhenCondition, WhenConditionOperator,
};

#[test]
fn path_rate_limit_is_inherited() {
    let doc = with_route(
        r#"
servers:
  - url: https://toystore.example.com/api/
paths:
  /toys:
    x-kuadrant:
      rate_limit:
        rates:
          - limit: 5
            duration: 10
            unit: second
    get:
      operationId: getToys
    post:
      operationId: createToy
"#,
    );
    let policy = ratelimit_policy::generate(&doc).expect("policy must generate");
    let limits = policy.spec.limits.expect("limits");
    assert_eq!(
        limits.keys().map(String::as_str).collect::<Vec<_>>(),
        ["createToy", "getToys"]
    );

    let get = &limits["getToys"];
    assert_eq!(
        get.rates,
        Some(vec![Rate {
            limit: 5,
            duration: 10,
            unit: TimeUnit::Second,
        }])
    );
    assert_eq!(get.when, None);
    assert_eq!(get.counters, None);
    let m = &get.route_selectors.as_deref().unwrap()[0].matches.as_deref().unwrap()[0];
    assert_eq!(path_value(m), "/api/toys");
}

#[test]
fn operation_rate_limit_replaces_path_rate_limit() {
    let doc = with_route(
        r#"
paths:
  /toys:
    x-kuadrant:
      rate_limit:
        counters:
          - request.headers.x-forwarded-for
        rates:
          - limit: 5
            duration: 10
            unit: second
    get:
      operationId: getToys
      x-kuadrant:
        rate_limit:
          when:
            - selector: context.request.http.headers.user-agent
              operator: startswith
              value: curl
          rates:
            - limit: 1
              duration: 1
              unit: minute
"#,
    );
    let limits = ratelimit_policy::generate(&doc).unwrap().spec.limits.unwrap();
    let get = &limits["getToys"];
    assert_eq!(
        get.when,
        Some(vec![WhenCondition {
            selector: "context.request.http.headers.user-agent".to_string(),
            operator: WhenConditionOperator::StartsWith,
            value: "curl".to_string(),
        }])
    );
    assert_eq!(get.counters, None, "rate limits are replaced, not merged");
    assert_eq!(
        get.rates,
        Some(vec![Rate {
            limit: 1,
            duration: 1,
            unit: TimeUnit::Minute,
        }])
    );
}

#[test]
fn operations_without_rate_limits_are_skipped() {
    let doc = with_route(
        r#"
paths:
  /toys:
    get:
      operationId: getToys
    delete:
      operationId: deleteToys
      x-kuadrant:
        disable: true
        rate_limit:
          rates:
            - { limit: 1, duration: 1, unit: hour }
"#,
    );
    let policy = ratelimit_policy::generate(&doc).unwrap();
    assert_eq!(policy.spec.limits, None);
    assert_eq!(policy.spec.target_ref.name, "petstore");
}

#[test]
fn petstore_has_no_limits() {
    let policy = ratelimit_policy::generate(&petstore()).unwrap();
    assert_eq!(policy.metadata.name.as_deref(), Some("petstore"));
    assert_eq!(policy.spec.limits, None);

    let value = serde_json::to_value(&policy).unwrap();
    assert_eq!(value["apiVersion"], "kuadrant.io/v1beta2");
    assert_eq!(value["kind"], "RateLimitPolicy");
    assert_eq!(
        value["spec"],
        serde_json::json!({
            "targetRef": {
                "group": "gateway.networking.k8s.io",
                "kind": "HTTPRoute",
                "name": "petstore",
                "namespace": "petstore-ns",
            },
        })
    );
}

#[test]
fn generation_is_idempotent() {
    let doc = with_route(
        r#"
paths:
  /toys:
    x-kuadrant:
      rate_limit:
        rates:
          - { limit: 5, duration: 10, unit: second }
    get: {}
    put: {}
"#,
    );
    let first = ratelimit_policy::generate(&doc).unwrap();
    assert_eq!(first, ratelimit_policy::generate(&doc).unwrap());
    let names = first
        .spec
        .limits
        .as_ref()
        .unwrap()
        .keys()
        .cloned()
        .collect::<Vec<_>>();
    assert_eq!(names, ["GETtoys", "PUTtoys"]);
}
