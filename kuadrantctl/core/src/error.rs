use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fatal conditions that abort generation. Nothing is emitted when any of
/// these is returned.
#[derive(Debug, Error)]
pub enum Error {
    /// The document root carries no `x-kuadrant.route` object, so no resource
    /// metadata can be derived.
    #[error("the document has no x-kuadrant route extension")]
    MissingRouteExtension,

    /// The `x-kuadrant.route` object does not name the route.
    #[error("the x-kuadrant route extension has no name")]
    MissingRouteName,

    /// A single security requirement lists more than one scheme, all of which
    /// would have to be satisfied.
    #[error(
        "operation {operation} requires all of [{}]; security requirements combining multiple schemes are not supported",
        .schemes.join(", ")
    )]
    UnsupportedSecurityRequirement {
        operation: String,
        schemes: Vec<String>,
    },

    #[error(
        "security scheme {name} has unsupported type {kind:?}; supported types are apiKey and openIdConnect"
    )]
    UnsupportedSecurityScheme { name: String, kind: String },

    /// A security requirement names a scheme absent from
    /// `components.securitySchemes`.
    #[error("operation {operation} requires undeclared security scheme {name}")]
    UndeclaredSecurityScheme { operation: String, name: String },

    #[error("security scheme {name} is invalid: {reason}")]
    InvalidSecurityScheme { name: String, reason: &'static str },

    #[error("invalid x-kuadrant extension at {location}")]
    InvalidExtension {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// A parameter `$ref` does not point at an entry of
    /// `components.parameters`.
    #[error("parameter reference {0:?} does not resolve")]
    UnresolvedReference(String),

    #[error("invalid server url {url:?}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: http::uri::InvalidUri,
    },

    #[error("{name:?} is not a valid resource name: {reason}")]
    InvalidResourceName { name: String, reason: &'static str },

    #[error("failed to parse OpenAPI document")]
    Parse(#[from] serde_yaml::Error),
}
