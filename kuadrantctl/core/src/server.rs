use crate::{
    openapi::{Document, Server},
    Error, Result,
};
use http::Uri;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TEMPLATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([0-9A-Za-z_]+)\}").expect("regex must compile"));

/// A server URL with its variables substituted, split into the parts the
/// generators use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerUrl {
    /// `host[:port]`, absent for relative URLs.
    pub host: Option<String>,
    pub path: String,
}

/// Substitutes `{var}` placeholders with the variable defaults. Undeclared
/// variables render as empty strings.
pub fn render(server: &Server) -> String {
    TEMPLATE
        .replace_all(&server.url, |caps: &Captures<'_>| {
            server
                .variables
                .get(&caps[1])
                .map(|v| v.default.clone())
                .unwrap_or_default()
        })
        .into_owned()
}

pub fn parse(server: &Server) -> Result<ServerUrl> {
    let url = render(server);

    // Network-path references (`//host/path`) carry an authority but no
    // scheme, which `Uri` requires.
    if url.starts_with("//") {
        return parse_absolute(&format!("http:{url}"), url);
    }

    // Other relative URLs are resolved against the document location, so
    // only their path matters.
    if !url.contains("://") {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        return Ok(ServerUrl {
            host: None,
            path: path.to_string(),
        });
    }

    parse_absolute(&url, url.clone())
}

fn parse_absolute(absolute: &str, url: String) -> Result<ServerUrl> {
    let uri = absolute
        .parse::<Uri>()
        .map_err(|source| Error::InvalidServerUrl { url, source })?;
    let host = uri.authority().map(|a| match a.port() {
        Some(port) => format!("{}:{}", a.host(), port),
        None => a.host().to_string(),
    });
    Ok(ServerUrl {
        host,
        path: uri.path().to_string(),
    })
}

/// The path of the first declared server, or `/` when none is declared.
pub fn base_path(doc: &Document) -> Result<String> {
    match doc.servers.first() {
        Some(server) => parse(server).map(|url| url.path),
        None => Ok("/".to_string()),
    }
}

/// The base path with a single trailing slash removed, ready to be prefixed
/// to a path template.
pub fn path_prefix(doc: &Document) -> Result<String> {
    let mut base = base_path(doc)?;
    if base.ends_with('/') {
        base.pop();
    }
    Ok(base)
}

/// The hosts of every server with an absolute URL, in declaration order.
pub fn hosts(doc: &Document) -> Result<Vec<String>> {
    let mut hosts = Vec::with_capacity(doc.servers.len());
    for server in &doc.servers {
        if let Some(host) = parse(server)?.host {
            hosts.push(host);
        }
    }
    Ok(hosts)
}
