use crate::{
    openapi::{SecurityRequirement, SecurityScheme},
    Error, Result,
};

/// What a declared security scheme means for authentication.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Scheme<'a> {
    ApiKey {
        location: ApiKeyLocation,
        name: &'a str,
    },
    OpenIdConnect {
        url: &'a str,
    },
    /// A scheme type the policies cannot express, e.g. `http` or `oauth2`.
    Unsupported {
        kind: &'a str,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ApiKeyLocation {
    Header,
    Query,
    Cookie,
}

/// Returns the only scheme named by a requirement, or `None` for the empty
/// requirement.
///
/// Requirements combining several schemes (all of which must be satisfied)
/// cannot be enforced and fail the whole generation.
pub fn requirement_scheme<'a>(
    operation: &str,
    requirement: &'a SecurityRequirement,
) -> Result<Option<&'a str>> {
    if requirement.len() > 1 {
        return Err(Error::UnsupportedSecurityRequirement {
            operation: operation.to_string(),
            schemes: requirement.keys().cloned().collect(),
        });
    }
    Ok(requirement.keys().next().map(String::as_str))
}

pub fn classify<'a>(name: &str, scheme: &'a SecurityScheme) -> Result<Scheme<'a>> {
    let invalid = |reason| Error::InvalidSecurityScheme {
        name: name.to_string(),
        reason,
    };

    match scheme.kind.as_str() {
        "apiKey" => {
            let location = match scheme.location.as_deref() {
                Some("header") => ApiKeyLocation::Header,
                Some("query") => ApiKeyLocation::Query,
                Some("cookie") => ApiKeyLocation::Cookie,
                Some(_) => return Err(invalid("apiKey location must be header, query or cookie")),
                None => return Err(invalid("apiKey schemes must set `in`")),
            };
            let param = scheme
                .name
                .as_deref()
                .filter(|n| !n.is_empty())
                .ok_or_else(|| invalid("apiKey schemes must set `name`"))?;
            Ok(Scheme::ApiKey {
                location,
                name: param,
            })
        }
        "openIdConnect" => {
            let url = scheme
                .open_id_connect_url
                .as_deref()
                .filter(|u| !u.is_empty())
                .ok_or_else(|| invalid("openIdConnect schemes must set `openIdConnectUrl`"))?;
            Ok(Scheme::OpenIdConnect { url })
        }
        kind => Ok(Scheme::Unsupported { kind }),
    }
}

// === impl ApiKeyLocation ===

impl ApiKeyLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Query => "query",
            Self::Cookie => "cookie",
        }
    }
}

impl std::fmt::Display for ApiKeyLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
