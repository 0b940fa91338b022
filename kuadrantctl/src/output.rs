use anyhow::{Context, Result};
use serde::Serialize;
use std::{io::Write, path::Path};
use tracing::info;

/// The encoding of generated manifests.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    #[default]
    Yaml,
    Json,
}

pub(crate) fn encode<T: Serialize>(manifest: &T, format: Format) -> Result<String> {
    match format {
        Format::Yaml => serde_yaml::to_string(manifest).context("failed to encode YAML"),
        Format::Json => {
            let mut json =
                serde_json::to_string_pretty(manifest).context("failed to encode JSON")?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Writes a manifest to `path`, or to standard output when no path is given.
pub(crate) fn write<T: Serialize>(manifest: &T, format: Format, path: Option<&Path>) -> Result<()> {
    let encoded = encode(manifest, format)?;
    match path {
        Some(path) => {
            std::fs::write(path, encoded)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "Wrote manifest");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(encoded.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kuadrantctl_k8s_api::policy::{PolicyTargetReference, RateLimitPolicy, RateLimitPolicySpec};

    fn policy() -> RateLimitPolicy {
        RateLimitPolicy::new(
            "petstore",
            RateLimitPolicySpec {
                target_ref: PolicyTargetReference::http_route("petstore", None),
                limits: None,
            },
        )
    }

    #[test]
    fn yaml_is_the_default() {
        assert_eq!(Format::default(), Format::Yaml);
        let yaml = encode(&policy(), Format::Yaml).unwrap();
        assert!(yaml.starts_with("apiVersion: kuadrant.io/v1beta2\nkind: RateLimitPolicy\n"));
        assert!(yaml.contains("  targetRef:\n"), "{yaml}");
    }

    #[test]
    fn json_is_pretty() {
        let json = encode(&policy(), Format::Json).unwrap();
        assert!(json.starts_with("{\n  \"apiVersion\": \"kuadrant.io/v1beta2\",\n"));
        assert!(json.ends_with("}\n"));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["spec"]["targetRef"]["name"], "petstore");
    }

    #[test]
    fn writes_files() {
        let path = std::env::temp_dir().join(format!(
            "kuadrantctl-output-{}.json",
            std::process::id()
        ));
        write(&policy(), Format::Json, Some(&path)).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(written, encode(&policy(), Format::Json).unwrap());
    }
}
