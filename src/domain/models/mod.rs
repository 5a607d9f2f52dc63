//! Domain models: configuration tree, depth limits, flat namespace, plugins.

pub mod depth;
pub mod namespace;
pub mod plugin;
pub mod resolved;
pub mod tree;

pub use depth::{DepthMap, FlattenDepth};
pub use namespace::{CollisionPolicy, FlatNamespace};
pub use plugin::{PluginHandle, PluginManifest, PluginTree};
pub use resolved::{ResolvedConfig, Setting};
pub use tree::{ConfigMap, ConfigNode, NodeKind};
