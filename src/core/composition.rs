//! Scene composition manager.
//!
//! **Architecture**: the manager is an ordinary value owned by the host
//! session (editor window, test, CLI run). There is no global instance;
//! pass `&mut SceneCompositionManager` to whatever needs it.
//!
//! # Operations
//!
//! - project lifecycle: create / delete / import / export / current pointer
//! - layer edits: add, remove, index, visibility, alpha, interactivity
//! - mode-specific: `activate_scene` (SWITCH), main + persistent UI scenes (HYBRID)
//! - queries: render order, hit-test order, name resolution
//!
//! # Outcomes
//!
//! Unknown ids and wrong-mode calls return [`CompError`]; nothing panics.
//! Every successful mutation that changes render-relevant state invokes the
//! render callback synchronously with a shared borrow of the project, so the
//! observer can read but never retain or mutate manager-owned state.

use indexmap::IndexMap;
use log::{debug, error, info, warn};

use crate::entities::{
    CompositionMode, CompositionProject, ImportedProject, ProjectId, SceneId, SceneRegistry,
    clamp_alpha, sort_layers,
};
use crate::error::{CompError, CompResult};

/// Observer invoked after render-relevant mutations.
pub type RenderCallback = Box<dyn FnMut(&CompositionProject)>;

#[derive(Default)]
pub struct SceneCompositionManager {
    /// Projects in creation/import order
    projects: IndexMap<ProjectId, CompositionProject>,
    current: Option<ProjectId>,
    render_callback: Option<RenderCallback>,
}

impl std::fmt::Debug for SceneCompositionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneCompositionManager")
            .field("projects", &self.projects.len())
            .field("current", &self.current)
            .field("render_callback", &self.render_callback.is_some())
            .finish()
    }
}

impl SceneCompositionManager {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Projects ==========

    /// Create an empty project. Does not make it current.
    pub fn create_composition_project(&mut self, name: &str, mode: CompositionMode) -> ProjectId {
        let project = CompositionProject::new(name, mode);
        let id = project.id;
        info!("Created composition '{}' ({}) mode={}", name, id, mode);
        self.projects.insert(id, project);
        id
    }

    /// Remove a project; clears the current pointer if it pointed there.
    pub fn delete_project(&mut self, project_id: ProjectId) -> CompResult<CompositionProject> {
        let project = self
            .projects
            .shift_remove(&project_id)
            .ok_or_else(|| not_found(project_id))?;
        if self.current == Some(project_id) {
            self.current = None;
        }
        debug!("Deleted composition '{}' ({})", project.name, project_id);
        Ok(project)
    }

    pub fn project(&self, project_id: ProjectId) -> Option<&CompositionProject> {
        self.projects.get(&project_id)
    }

    pub fn projects(&self) -> impl Iterator<Item = &CompositionProject> {
        self.projects.values()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn set_current_project(&mut self, project_id: ProjectId) -> CompResult<()> {
        if !self.projects.contains_key(&project_id) {
            return Err(not_found(project_id));
        }
        self.current = Some(project_id);
        Ok(())
    }

    pub fn current_project(&self) -> Option<&CompositionProject> {
        self.current.and_then(|id| self.projects.get(&id))
    }

    // ========== Render observer ==========

    /// Register the single render observer (replaces any previous one).
    pub fn set_render_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&CompositionProject) + 'static,
    {
        self.render_callback = Some(Box::new(callback));
    }

    pub fn clear_render_callback(&mut self) {
        self.render_callback = None;
    }

    /// Apply `f` to a project and notify the observer on success.
    fn mutate<T, F>(&mut self, project_id: ProjectId, f: F) -> CompResult<T>
    where
        F: FnOnce(&mut CompositionProject) -> CompResult<T>,
    {
        let project = self
            .projects
            .get_mut(&project_id)
            .ok_or_else(|| not_found(project_id))?;

        let out = f(project).inspect_err(|e| warn!("Composition {}: {}", project_id, e))?;

        if let Some(callback) = self.render_callback.as_mut() {
            callback(project);
        }
        Ok(out)
    }

    // ========== Layers ==========

    /// Add a scene at `layer_index`, or move its existing layer there.
    pub fn add_scene_to_composition(
        &mut self,
        project_id: ProjectId,
        scene_id: &str,
        layer_index: i32,
    ) -> CompResult<()> {
        self.mutate(project_id, |project| {
            debug!("add_scene_to_composition: {} @ {} in '{}'", scene_id, layer_index, project.name);
            project.upsert_layer(scene_id, layer_index);
            Ok(())
        })
    }

    /// Remove a scene's layer and clear every reference to it.
    ///
    /// Succeeds when the scene had a layer or was referenced as
    /// active / main / persistent UI scene.
    pub fn remove_scene_from_composition(&mut self, project_id: ProjectId, scene_id: &str) -> CompResult<()> {
        self.mutate(project_id, |project| {
            let referenced = project.active_scene_id.as_deref() == Some(scene_id)
                || project.main_scene_id.as_deref() == Some(scene_id)
                || project.persistent_ui_scenes.iter().any(|s| s == scene_id);
            let removed = project.remove_scene(scene_id);
            if removed.is_none() && !referenced {
                return Err(CompError::SceneNotFound(scene_id.to_string()));
            }
            debug!("remove_scene_from_composition: {} from '{}'", scene_id, project.name);
            Ok(())
        })
    }

    pub fn set_scene_layer(&mut self, project_id: ProjectId, scene_id: &str, layer_index: i32) -> CompResult<()> {
        self.mutate(project_id, |project| {
            let layer = project
                .layer_mut(scene_id)
                .ok_or_else(|| CompError::SceneNotFound(scene_id.to_string()))?;
            layer.layer_index = layer_index;
            sort_layers(&mut project.layers);
            Ok(())
        })
    }

    pub fn set_scene_visibility(&mut self, project_id: ProjectId, scene_id: &str, visible: bool) -> CompResult<()> {
        self.mutate(project_id, |project| {
            let layer = project
                .layer_mut(scene_id)
                .ok_or_else(|| CompError::SceneNotFound(scene_id.to_string()))?;
            layer.visible = visible;
            Ok(())
        })
    }

    /// Set layer opacity, clamped to [0, 1].
    pub fn set_scene_alpha(&mut self, project_id: ProjectId, scene_id: &str, alpha: f32) -> CompResult<()> {
        self.mutate(project_id, |project| {
            let layer = project
                .layer_mut(scene_id)
                .ok_or_else(|| CompError::SceneNotFound(scene_id.to_string()))?;
            layer.alpha = clamp_alpha(alpha);
            Ok(())
        })
    }

    pub fn set_scene_interactive(&mut self, project_id: ProjectId, scene_id: &str, interactive: bool) -> CompResult<()> {
        self.mutate(project_id, |project| {
            let layer = project
                .layer_mut(scene_id)
                .ok_or_else(|| CompError::SceneNotFound(scene_id.to_string()))?;
            layer.interactive = interactive;
            Ok(())
        })
    }

    // ========== Mode-specific ==========

    /// SWITCH only. The scene need not have a layer.
    pub fn activate_scene(&mut self, project_id: ProjectId, scene_id: &str) -> CompResult<()> {
        self.mutate(project_id, |project| {
            require_mode(project, CompositionMode::Switch)?;
            project.active_scene_id = Some(scene_id.to_string());
            Ok(())
        })
    }

    /// HYBRID only.
    pub fn set_main_scene(&mut self, project_id: ProjectId, scene_id: &str) -> CompResult<()> {
        self.mutate(project_id, |project| {
            require_mode(project, CompositionMode::Hybrid)?;
            project.main_scene_id = Some(scene_id.to_string());
            Ok(())
        })
    }

    /// HYBRID only. Already listed: [`CompError::AlreadyPresent`].
    pub fn add_persistent_ui_scene(&mut self, project_id: ProjectId, scene_id: &str) -> CompResult<()> {
        self.mutate(project_id, |project| {
            require_mode(project, CompositionMode::Hybrid)?;
            if project.persistent_ui_scenes.iter().any(|s| s == scene_id) {
                return Err(CompError::AlreadyPresent(scene_id.to_string()));
            }
            project.persistent_ui_scenes.push(scene_id.to_string());
            Ok(())
        })
    }

    /// HYBRID only.
    pub fn remove_persistent_ui_scene(&mut self, project_id: ProjectId, scene_id: &str) -> CompResult<()> {
        self.mutate(project_id, |project| {
            require_mode(project, CompositionMode::Hybrid)?;
            let pos = project
                .persistent_ui_scenes
                .iter()
                .position(|s| s == scene_id)
                .ok_or_else(|| CompError::SceneNotFound(scene_id.to_string()))?;
            project.persistent_ui_scenes.remove(pos);
            Ok(())
        })
    }

    // ========== Queries ==========

    /// Scene ids to draw, back to front. Unknown project: empty.
    pub fn get_render_order(&self, project_id: ProjectId) -> Vec<SceneId> {
        self.projects
            .get(&project_id)
            .map(CompositionProject::render_order)
            .unwrap_or_default()
    }

    /// Scene ids for pointer hit testing, front to back.
    pub fn interactive_order(&self, project_id: ProjectId) -> Vec<SceneId> {
        self.projects
            .get(&project_id)
            .map(CompositionProject::interactive_order)
            .unwrap_or_default()
    }

    /// Render order resolved to display names.
    pub fn render_order_names(&self, project_id: ProjectId, registry: &SceneRegistry) -> Vec<String> {
        self.get_render_order(project_id)
            .iter()
            .map(|id| registry.display_name(id).to_string())
            .collect()
    }

    // ========== Export / import ==========

    /// Pretty-printed JSON of the project as stored.
    pub fn export_composition(&self, project_id: ProjectId) -> CompResult<String> {
        let project = self.projects.get(&project_id).ok_or_else(|| not_found(project_id))?;
        serde_json::to_string_pretty(project).map_err(|e| CompError::Serialize(e.to_string()))
    }

    /// Parse an exported project and store it under a fresh id.
    ///
    /// The document's own `id` (any string, or absent) is ignored.
    pub fn import_composition(&mut self, json: &str) -> CompResult<ProjectId> {
        let imported: ImportedProject = serde_json::from_str(json).map_err(|e| {
            error!("Failed to import composition: {}", e);
            CompError::Parse(e.to_string())
        })?;

        let project = imported.into_project();
        let id = project.id;
        info!("Imported composition '{}' as {}", project.name, id);
        self.projects.insert(id, project);
        Ok(id)
    }
}

fn not_found(project_id: ProjectId) -> CompError {
    warn!("Composition project {} not found", project_id);
    CompError::ProjectNotFound(project_id)
}

fn require_mode(project: &CompositionProject, expected: CompositionMode) -> CompResult<()> {
    if project.mode == expected {
        Ok(())
    } else {
        Err(CompError::ModeMismatch {
            expected,
            actual: project.mode,
        })
    }
}
