use http::Method;
use serde_json::Value;

use super::types::{GroupDef, Manifest, RouteDef};
use crate::collection::{RouteCollection, RouteGroup};
use crate::error::{Result, RouterError};

/// Replay a manifest through the group API.
///
/// Top-level routes register with an empty context; each group nests exactly as a
/// hand-written [`RouteGroup::group`] call would.
///
/// # Errors
///
/// [`RouterError::InvalidRoute`] for a malformed route, unknown method or a
/// non-scalar default.
pub fn build_collection(manifest: &Manifest) -> Result<RouteCollection> {
    let mut collection = RouteCollection::new();
    collection.group(|g| {
        register_routes(g, &manifest.routes)?;
        for group in &manifest.groups {
            g.group(|child| replay_group(child, group))?;
        }
        Ok(())
    })?;
    Ok(collection)
}

fn replay_group(g: &mut RouteGroup<'_>, def: &GroupDef) -> Result<()> {
    g.prefix(&def.prefix)
        .name(&def.name)
        .set_namespace(&def.namespace)
        .withs(def.constraints.clone());
    register_routes(g, &def.routes)?;
    for child in &def.groups {
        g.group(|nested| replay_group(nested, child))?;
    }
    Ok(())
}

fn register_routes(g: &mut RouteGroup<'_>, routes: &[RouteDef]) -> Result<()> {
    for def in routes {
        let invalid = |reason: String| RouterError::InvalidRoute {
            key: def.key.clone(),
            reason,
        };
        let method = Method::from_bytes(def.method.to_ascii_uppercase().as_bytes())
            .map_err(|_| invalid(format!("unknown method '{}'", def.method)))?;

        let route = g.add(method, &def.key, &def.path, &def.handler, &def.constraints)?;
        for (name, value) in &def.defaults {
            let value = scalar(value)
                .ok_or_else(|| invalid(format!("default '{name}' must be a scalar")))?;
            route.set_default(name, value);
        }
    }
    Ok(())
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
