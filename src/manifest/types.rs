use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::route::Constraints;
use crate::runtime_config::RouterConfig;

fn default_method() -> String {
    "GET".to_string()
}

/// Declarative route table, read from YAML or JSON.
///
/// ```yaml
/// config:
///   base_path: /app
/// routes:
///   - key: home
///     path: /
///     handler: Home@index
/// groups:
///   - prefix: /admin
///     name: admin.
///     namespace: Admin\
///     where: { id: '\d+' }
///     routes:
///       - { key: user, path: '/users/{id}', handler: Users@show }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub config: RouterConfig,
    #[serde(default)]
    pub routes: Vec<RouteDef>,
    #[serde(default)]
    pub groups: Vec<GroupDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupDef {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default, rename = "where")]
    pub constraints: Constraints,
    #[serde(default)]
    pub routes: Vec<RouteDef>,
    #[serde(default)]
    pub groups: Vec<GroupDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteDef {
    pub key: String,
    #[serde(default = "default_method")]
    pub method: String,
    pub path: String,
    pub handler: String,
    #[serde(default, rename = "where")]
    pub constraints: Constraints,
    /// Scalar defaults; numbers and booleans are stored in their string form.
    #[serde(default)]
    pub defaults: BTreeMap<String, Value>,
}
