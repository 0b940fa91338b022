use crate::{openapi::Operation, Error, Result};
use kuadrantctl_k8s_api::gateway::HttpMethod;
use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9A-Za-z_]").expect("regex must compile"));

static DNS_SUBDOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("regex must compile")
});

const DNS_SUBDOMAIN_MAX_LEN: usize = 253;

/// Names an operation by its `operationId`, falling back to the verb
/// followed by the path with every non-word character removed
/// (e.g. `GETpetspetId`).
pub fn operation_name(path: &str, method: HttpMethod, op: &Operation) -> String {
    match op.operation_id.as_deref() {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => format!("{}{}", method, NON_WORD.replace_all(path, "")),
    }
}

/// The lower-cased operation name with non-word characters replaced by
/// underscores.
pub fn system_name(path: &str, method: HttpMethod, op: &Operation) -> String {
    NON_WORD
        .replace_all(&operation_name(path, method, op).to_lowercase(), "_")
        .into_owned()
}

/// Derives a Kubernetes object name from a document title: lower-cased, with
/// every non-alphanumeric character removed.
pub fn resource_name_from_title(title: &str) -> Result<String> {
    let name = title
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>();
    validate_dns_subdomain(&name)?;
    Ok(name)
}

fn validate_dns_subdomain(name: &str) -> Result<()> {
    let invalid = |reason| {
        Err(Error::InvalidResourceName {
            name: name.to_string(),
            reason,
        })
    };
    if name.is_empty() {
        return invalid("a DNS subdomain must not be empty");
    }
    if name.len() > DNS_SUBDOMAIN_MAX_LEN {
        return invalid("a DNS subdomain must be no more than 253 characters");
    }
    if !DNS_SUBDOMAIN.is_match(name) {
        return invalid("a DNS subdomain must consist of lower case alphanumeric characters, '-' or '.'");
    }
    Ok(())
}
