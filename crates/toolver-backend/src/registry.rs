use std::collections::BTreeMap;

use crate::traits::ToolPlugin;

/// Plugins keyed by tool name, iterated in name order.
///
/// Built once at startup and then only read.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: BTreeMap<String, Box<dyn ToolPlugin>>,
}

impl PluginRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `plugin` under its own name, returning any plugin it
    /// replaced.
    pub fn register(&mut self, plugin: impl Into<Box<dyn ToolPlugin>>) -> Option<Box<dyn ToolPlugin>> {
        let plugin = plugin.into();
        let name = plugin.name().to_string();
        let replaced = self.plugins.insert(name.clone(), plugin);
        if replaced.is_some() {
            log::warn!("Plugin {name} registered twice, keeping the last one");
        }
        replaced
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn ToolPlugin> {
        self.plugins.get(name).map(|plugin| plugin.as_ref())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ToolPlugin> {
        self.plugins.values().map(|plugin| plugin.as_ref())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.plugins.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FromIterator<Box<dyn ToolPlugin>> for PluginRegistry {
    fn from_iter<I: IntoIterator<Item = Box<dyn ToolPlugin>>>(iter: I) -> Self {
        let mut registry = Self::new();
        for plugin in iter {
            registry.register(plugin);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::BackendError;

    struct NamedPlugin {
        name: &'static str,
        root: &'static str,
    }

    impl ToolPlugin for NamedPlugin {
        fn name(&self) -> &str {
            self.name
        }

        fn remote_versions(&self) -> Result<Vec<String>, BackendError> {
            Ok(Vec::new())
        }

        fn install(&self, _version: &str) -> Result<(), BackendError> {
            Ok(())
        }

        fn uninstall(&self, _version: &str) -> Result<(), BackendError> {
            Ok(())
        }

        fn is_installed(&self, _version: &str) -> bool {
            false
        }

        fn path_for(&self, version: &str) -> PathBuf {
            PathBuf::from(self.root).join(version)
        }

        fn create_shims(&self) -> Result<(), BackendError> {
            Ok(())
        }

        fn delete_shims(&self) -> Result<(), BackendError> {
            Ok(())
        }
    }

    #[test]
    fn lookup_by_name() {
        let mut registry = PluginRegistry::new();
        registry.register(NamedPlugin { name: "java", root: "/a" });

        assert!(registry.contains("java"));
        assert!(registry.get("java").is_some());
        assert!(registry.get("node").is_none());
    }

    #[test]
    fn names_are_sorted() {
        let registry: PluginRegistry = [
            Box::new(NamedPlugin { name: "node", root: "/n" }) as Box<dyn ToolPlugin>,
            Box::new(NamedPlugin { name: "go", root: "/g" }),
            Box::new(NamedPlugin { name: "java", root: "/j" }),
        ]
        .into_iter()
        .collect();

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["go", "java", "node"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn registering_same_name_replaces_previous() {
        let mut registry = PluginRegistry::new();
        assert!(registry.register(NamedPlugin { name: "go", root: "/first" }).is_none());
        let replaced = registry.register(NamedPlugin { name: "go", root: "/second" });

        assert!(replaced.is_some());
        assert_eq!(registry.len(), 1);
        let plugin = registry.get("go").expect("go stays registered");
        assert_eq!(plugin.path_for("1"), PathBuf::from("/second/1"));
    }

    #[test]
    fn empty_registry() {
        let registry = PluginRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.iter().count(), 0);
    }
}
