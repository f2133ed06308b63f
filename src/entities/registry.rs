//! Scene registry: id -> display metadata.
//!
//! Owned by the host application. Compositions only reference scenes by id;
//! the registry is consulted to turn ids into human-readable names.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::layer::SceneId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneInfo {
    pub name: String,
}

/// Registered scenes in registration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneRegistry {
    scenes: IndexMap<SceneId, SceneInfo>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or rename a scene.
    pub fn register(&mut self, id: impl Into<SceneId>, name: impl Into<String>) {
        self.scenes.insert(id.into(), SceneInfo { name: name.into() });
    }

    pub fn unregister(&mut self, id: &str) -> Option<SceneInfo> {
        self.scenes.shift_remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&SceneInfo> {
        self.scenes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.scenes.contains_key(id)
    }

    /// Display name, falling back to the raw id for unknown scenes.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|s| s.name.as_str()).unwrap_or(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SceneId, &SceneInfo)> {
        self.scenes.iter()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallback() {
        let mut registry = SceneRegistry::new();
        registry.register("s1", "Main Menu");
        assert_eq!(registry.display_name("s1"), "Main Menu");
        assert_eq!(registry.display_name("ghost"), "ghost");
    }

    #[test]
    fn test_unregister_keeps_order() {
        let mut registry = SceneRegistry::new();
        registry.register("a", "A");
        registry.register("b", "B");
        registry.register("c", "C");
        registry.unregister("b");
        let ids: Vec<&str> = registry.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(!registry.contains("b"));
    }
}
