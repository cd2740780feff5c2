//! Category/project/doc operations and their cascades.
//!
//! # Responsibility
//! - Provide CRUD entry points for the three hierarchy levels.
//! - Cascade deletes downward: category -> projects -> docs -> annotations.
//!
//! # Invariants
//! - Creation validates the named parent and returns `NotFound` otherwise.
//! - `update_doc` always refreshes `updated_at`; `update_doc_status` never
//!   does (status toggles are not content edits).
//! - Sibling colors are allocated via the palette, scoped to all categories
//!   or to same-category projects respectively.

use crate::model::entity::{
    Category, CategoryPatch, Doc, DocPatch, DocStatus, Project, ProjectPatch,
};
use crate::model::id::{new_id, EntityKind};
use crate::model::now_epoch_ms;
use crate::model::palette::{allocate_color, CATEGORY_COLORS, PROJECT_COLORS};
use crate::repo::slot_repo::SlotRepository;
use crate::store::{not_found, MemoStore, StoreResult};
use serde_json::Value;
use std::cmp::Reverse;

impl<R: SlotRepository> MemoStore<R> {
    // === Categories ===

    /// Creates a category with an allocated color (scope: all categories).
    pub fn create_category(&mut self, name: &str) -> StoreResult<Category> {
        let color = {
            let used: Vec<&str> = self.categories.iter().map(|c| c.color.as_str()).collect();
            allocate_color(&used, CATEGORY_COLORS)
        };
        let category = Category {
            id: new_id(EntityKind::Category),
            name: name.to_string(),
            color,
            created_at: now_epoch_ms(),
        };
        self.categories.push(category.clone());
        self.flush()?;
        Ok(category)
    }

    /// Applies the given fields to an existing category.
    pub fn update_category(&mut self, id: &str, patch: CategoryPatch) -> StoreResult<Category> {
        let category = self
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found(EntityKind::Category, id))?;
        if let Some(name) = patch.name {
            category.name = name;
        }
        if let Some(color) = patch.color {
            category.color = color;
        }
        let updated = category.clone();
        self.flush()?;
        Ok(updated)
    }

    /// Deletes a category and every project (and transitively every doc and
    /// annotation) inside it.
    pub fn delete_category(&mut self, id: &str) -> StoreResult<()> {
        if !self.categories.iter().any(|c| c.id == id) {
            return Err(not_found(EntityKind::Category, id));
        }
        let project_ids: Vec<String> = self
            .projects
            .iter()
            .filter(|p| p.category_id == id)
            .map(|p| p.id.clone())
            .collect();
        for project_id in project_ids {
            self.delete_project(&project_id)?;
        }
        self.categories.retain(|c| c.id != id);
        self.flush()
    }

    /// All categories in creation order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Looks up one category by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    // === Projects ===

    /// Creates a project under `category_id` with an allocated color
    /// (scope: same-category siblings).
    pub fn create_project(&mut self, category_id: &str, name: &str) -> StoreResult<Project> {
        if !self.categories.iter().any(|c| c.id == category_id) {
            return Err(not_found(EntityKind::Category, category_id));
        }
        let color = {
            let used: Vec<&str> = self
                .projects
                .iter()
                .filter(|p| p.category_id == category_id)
                .map(|p| p.color.as_str())
                .collect();
            allocate_color(&used, PROJECT_COLORS)
        };
        let project = Project {
            id: new_id(EntityKind::Project),
            category_id: category_id.to_string(),
            name: name.to_string(),
            color,
            created_at: now_epoch_ms(),
        };
        self.projects.push(project.clone());
        self.flush()?;
        Ok(project)
    }

    /// Applies the given fields to an existing project.
    pub fn update_project(&mut self, id: &str, patch: ProjectPatch) -> StoreResult<Project> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found(EntityKind::Project, id))?;
        if let Some(name) = patch.name {
            project.name = name;
        }
        if let Some(color) = patch.color {
            project.color = color;
        }
        let updated = project.clone();
        self.flush()?;
        Ok(updated)
    }

    /// Deletes a project and every doc inside it.
    pub fn delete_project(&mut self, id: &str) -> StoreResult<()> {
        if !self.projects.iter().any(|p| p.id == id) {
            return Err(not_found(EntityKind::Project, id));
        }
        let doc_ids: Vec<String> = self
            .docs
            .iter()
            .filter(|d| d.project_id == id)
            .map(|d| d.id.clone())
            .collect();
        for doc_id in doc_ids {
            self.delete_doc(&doc_id)?;
        }
        self.projects.retain(|p| p.id != id);
        self.flush()
    }

    /// All projects in creation order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Looks up one project by id.
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Projects owned by `category_id`, in creation order.
    pub fn projects_by_category(&self, category_id: &str) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| p.category_id == category_id)
            .collect()
    }

    // === Docs ===

    /// Creates a doc under `project_id` with status `draft`.
    pub fn create_doc(&mut self, project_id: &str, title: &str) -> StoreResult<Doc> {
        if !self.projects.iter().any(|p| p.id == project_id) {
            return Err(not_found(EntityKind::Project, project_id));
        }
        let now = now_epoch_ms();
        let doc = Doc {
            id: new_id(EntityKind::Doc),
            project_id: project_id.to_string(),
            title: title.to_string(),
            status: DocStatus::Draft,
            created_at: now,
            updated_at: now,
        };
        self.docs.push(doc.clone());
        self.flush()?;
        Ok(doc)
    }

    /// Applies the given fields to an existing doc and refreshes
    /// `updated_at`, even for an empty patch.
    pub fn update_doc(&mut self, id: &str, patch: DocPatch) -> StoreResult<Doc> {
        let doc = self
            .docs
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| not_found(EntityKind::Doc, id))?;
        if let Some(title) = patch.title {
            doc.title = title;
        }
        if let Some(status) = patch.status {
            doc.status = status;
        }
        doc.updated_at = now_epoch_ms();
        let updated = doc.clone();
        self.flush()?;
        Ok(updated)
    }

    /// Changes only the lifecycle status, leaving `updated_at` untouched.
    pub fn update_doc_status(&mut self, id: &str, status: DocStatus) -> StoreResult<()> {
        let doc = self
            .docs
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| not_found(EntityKind::Doc, id))?;
        doc.status = status;
        self.flush()
    }

    /// Replaces the content blob for `doc_id` and refreshes the doc's
    /// `updated_at` by delegating to `update_doc` with an empty patch.
    pub fn set_doc_content(&mut self, doc_id: &str, content: Value) -> StoreResult<()> {
        if !self.docs.iter().any(|d| d.id == doc_id) {
            return Err(not_found(EntityKind::Doc, doc_id));
        }
        self.doc_contents.insert(doc_id.to_string(), content);
        self.update_doc(doc_id, DocPatch::default())?;
        Ok(())
    }

    /// Returns the opaque content blob for `doc_id`, if any.
    pub fn doc_content(&self, doc_id: &str) -> Option<&Value> {
        self.doc_contents.get(doc_id)
    }

    /// Deletes a doc together with its highlights, cards, links and content
    /// blob.
    pub fn delete_doc(&mut self, id: &str) -> StoreResult<()> {
        if !self.docs.iter().any(|d| d.id == id) {
            return Err(not_found(EntityKind::Doc, id));
        }
        self.highlights.retain(|h| h.doc_id != id);
        self.cards.retain(|c| c.doc_id != id);
        self.links.retain(|l| l.doc_id != id);
        self.doc_contents.remove(id);
        self.docs.retain(|d| d.id != id);
        self.flush()
    }

    /// All docs in creation order.
    pub fn docs(&self) -> &[Doc] {
        &self.docs
    }

    /// Looks up one doc by id.
    pub fn doc(&self, id: &str) -> Option<&Doc> {
        self.docs.iter().find(|d| d.id == id)
    }

    /// Docs owned by `project_id`, most recently updated first.
    pub fn docs_by_project(&self, project_id: &str) -> Vec<&Doc> {
        let mut docs: Vec<&Doc> = self
            .docs
            .iter()
            .filter(|d| d.project_id == project_id)
            .collect();
        docs.sort_by_key(|d| Reverse(d.updated_at));
        docs
    }
}
