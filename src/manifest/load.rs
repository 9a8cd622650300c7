use anyhow::Context;
use std::path::Path;
use tracing::info;

use super::build::build_collection;
use super::types::Manifest;
use crate::router::Router;

/// Read a manifest; `.yaml`/`.yml` files parse as YAML, everything else as JSON.
pub fn load_manifest(file_path: impl AsRef<Path>) -> anyhow::Result<Manifest> {
    let file_path = file_path.as_ref();
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read manifest {}", file_path.display()))?;

    let is_yaml = matches!(
        file_path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    let manifest: Manifest = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML manifest {}", file_path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON manifest {}", file_path.display()))?
    };

    info!(
        manifest = %file_path.display(),
        routes = manifest.routes.len(),
        groups = manifest.groups.len(),
        "Route manifest loaded"
    );
    Ok(manifest)
}

/// Build a configured, sealed router from a manifest. No handlers are attached.
pub fn router_from_manifest(manifest: &Manifest) -> anyhow::Result<Router> {
    let collection = build_collection(manifest).context("Failed to register manifest routes")?;
    let router = Router::new(collection).context("Failed to seal routing table")?;
    Ok(router.with_config(manifest.config.clone()))
}

/// [`load_manifest`] followed by [`router_from_manifest`].
pub fn load_router(file_path: impl AsRef<Path>) -> anyhow::Result<Router> {
    router_from_manifest(&load_manifest(file_path)?)
}
