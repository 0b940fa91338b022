use crate::{log::LogFormat, output, output::Format, resource};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use kuadrantctl_core::{
    api, auth_config, auth_policy, http_route, istio, ratelimit_policy, AuthorizationPolicyConfig,
    VirtualServiceConfig,
};
use std::{collections::BTreeMap, path::PathBuf};
use tracing::debug;

#[derive(Debug, Parser)]
#[clap(
    name = "kuadrantctl",
    about = "Generates Kuadrant, Gateway API and Istio resources from OpenAPI documents"
)]
pub struct Args {
    #[clap(
        long,
        global = true,
        default_value = "kuadrantctl=info,warn",
        env = "KUADRANTCTL_LOG"
    )]
    log_level: String,

    #[clap(long, global = true, value_enum, default_value = "plain")]
    log_format: LogFormat,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generates resources from an OpenAPI document
    #[clap(subcommand)]
    Generate(Generate),

    /// Works with Kuadrant API descriptors
    #[clap(subcommand)]
    Api(Api),
}

#[derive(Debug, Subcommand)]
enum Generate {
    /// Generates Gateway API resources
    #[clap(name = "gatewayapi", subcommand)]
    GatewayApi(GatewayApi),

    /// Generates Kuadrant policies
    #[clap(subcommand)]
    Kuadrant(Kuadrant),

    /// Generates Istio resources
    #[clap(subcommand)]
    Istio(Istio),
}

#[derive(Debug, Subcommand)]
enum GatewayApi {
    /// Generates an HTTPRoute with one rule per enabled operation
    #[clap(name = "httproute")]
    HttpRoute(Source),
}

#[derive(Debug, Subcommand)]
enum Kuadrant {
    /// Generates an Authorino AuthConfig for the operations with security
    /// requirements
    #[clap(name = "authconfig")]
    AuthConfig(AuthConfigArgs),

    /// Generates an AuthPolicy for the operations with security requirements
    #[clap(name = "authpolicy")]
    AuthPolicy(Source),

    /// Generates a RateLimitPolicy for the operations with rate limits
    #[clap(name = "ratelimitpolicy")]
    RateLimitPolicy(Source),
}

#[derive(Debug, Subcommand)]
enum Istio {
    /// Generates a VirtualService routing every enabled operation to a service
    #[clap(name = "virtualservice")]
    VirtualService(VirtualServiceArgs),

    /// Generates an AuthorizationPolicy delegating secured operations to
    /// Kuadrant
    #[clap(name = "authorizationpolicy")]
    AuthorizationPolicy(AuthorizationPolicyArgs),
}

#[derive(Debug, Subcommand)]
enum Api {
    /// Generates a Kuadrant API descriptor
    Generate(ApiGenerate),
}

#[derive(Debug, clap::Args)]
struct Source {
    /// Path of the OpenAPI document, or `-` to read standard input
    #[clap(long, value_name = "FILE")]
    oas: String,

    #[clap(short = 'o', long, value_enum, default_value = "yaml")]
    output_format: Format,
}

#[derive(Debug, clap::Args)]
struct VirtualServiceArgs {
    #[clap(flatten)]
    source: Source,

    /// The host clients use to reach the API
    #[clap(long)]
    public_host: String,

    #[clap(long)]
    service_name: String,

    #[clap(long)]
    service_namespace: String,

    #[clap(long, default_value_t = istio::DEFAULT_SERVICE_PORT)]
    service_port: u32,

    /// A gateway the routes apply to, e.g. `istio-system/istio-ingressgateway`
    #[clap(long = "gateway", value_name = "GATEWAY", required = true)]
    gateways: Vec<String>,

    /// Matches paths as prefixes instead of exactly
    #[clap(long)]
    path_prefix_match: bool,
}

#[derive(Debug, clap::Args)]
struct AuthConfigArgs {
    #[clap(flatten)]
    source: Source,

    /// The host clients use to reach the API
    #[clap(long)]
    public_host: String,
}

#[derive(Debug, clap::Args)]
struct AuthorizationPolicyArgs {
    #[clap(flatten)]
    source: Source,

    /// The host clients use to reach the API
    #[clap(long)]
    public_host: String,

    /// A `key=value` label selecting the gateway workloads
    #[clap(
        long = "gateway-label",
        value_name = "KEY=VALUE",
        required = true,
        value_parser = parse_label
    )]
    gateway_labels: Vec<(String, String)>,
}

#[derive(Debug, clap::Args)]
struct ApiGenerate {
    /// Path of the OpenAPI document, or `-` to read standard input
    #[clap(value_name = "FILE")]
    oas: String,

    /// Writes the descriptor to a file instead of standard output
    #[clap(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[clap(long, value_enum, default_value = "yaml")]
    output_format: Format,
}

// === impl Args ===

impl Args {
    #[inline]
    pub fn parse_and_run() -> Result<()> {
        Self::parse().run()
    }

    pub fn run(self) -> Result<()> {
        let Self {
            log_level,
            log_format,
            command,
        } = self;

        log_format.try_init(&log_level)?;

        match command {
            Command::Generate(Generate::GatewayApi(GatewayApi::HttpRoute(source))) => {
                let doc = resource::load(&source.oas)?;
                let route = http_route::generate(&doc).context("failed to generate HTTPRoute")?;
                output::write(&route, source.output_format, None)
            }

            Command::Generate(Generate::Kuadrant(Kuadrant::AuthConfig(AuthConfigArgs {
                source,
                public_host,
            }))) => {
                let doc = resource::load(&source.oas)?;
                let config = auth_config::generate(&doc, &public_host)
                    .context("failed to generate AuthConfig")?;
                output::write(&config, source.output_format, None)
            }

            Command::Generate(Generate::Kuadrant(Kuadrant::AuthPolicy(source))) => {
                let doc = resource::load(&source.oas)?;
                let policy =
                    auth_policy::generate(&doc).context("failed to generate AuthPolicy")?;
                output::write(&policy, source.output_format, None)
            }

            Command::Generate(Generate::Kuadrant(Kuadrant::RateLimitPolicy(source))) => {
                let doc = resource::load(&source.oas)?;
                let policy = ratelimit_policy::generate(&doc)
                    .context("failed to generate RateLimitPolicy")?;
                output::write(&policy, source.output_format, None)
            }

            Command::Generate(Generate::Istio(Istio::VirtualService(args))) => {
                let (source, config) = args.into_config();
                let doc = resource::load(&source.oas)?;
                debug!(?config, "Generating VirtualService");
                let vs = istio::virtual_service(&doc, &config)
                    .context("failed to generate VirtualService")?;
                output::write(&vs, source.output_format, None)
            }

            Command::Generate(Generate::Istio(Istio::AuthorizationPolicy(args))) => {
                let (source, config) = args.into_config();
                let doc = resource::load(&source.oas)?;
                debug!(?config, "Generating AuthorizationPolicy");
                let ap = istio::authorization_policy(&doc, &config)
                    .context("failed to generate AuthorizationPolicy")?;
                output::write(&ap, source.output_format, None)
            }

            Command::Api(Api::Generate(ApiGenerate {
                oas,
                output: path,
                output_format,
            })) => {
                let doc = resource::load(&oas)?;
                let descriptor = api::generate(&doc).context("failed to generate API")?;
                output::write(&descriptor, output_format, path.as_deref())
            }
        }
    }
}

// === impl VirtualServiceArgs ===

impl VirtualServiceArgs {
    fn into_config(self) -> (Source, VirtualServiceConfig) {
        let config = VirtualServiceConfig {
            public_host: self.public_host,
            service_name: self.service_name,
            service_namespace: self.service_namespace,
            service_port: self.service_port,
            gateways: self.gateways,
            path_prefix_match: self.path_prefix_match,
        };
        (self.source, config)
    }
}

// === impl AuthorizationPolicyArgs ===

impl AuthorizationPolicyArgs {
    fn into_config(self) -> (Source, AuthorizationPolicyConfig) {
        let config = AuthorizationPolicyConfig {
            public_host: self.public_host,
            gateway_labels: self.gateway_labels.into_iter().collect::<BTreeMap<_, _>>(),
        };
        (self.source, config)
    }
}

fn parse_label(s: &str) -> Result<(String, String)> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => bail!("gateway labels must be formatted as key=value: {s:?}"),
    }
}
