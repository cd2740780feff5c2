//! Load/migrate/seed lifecycle for the durable slot.
//!
//! # Responsibility
//! - Rehydrate the graph at store construction.
//! - Backfill missing project colors from schema version 1/2 payloads.
//! - Seed default data on first run or on a corrupt payload.
//!
//! # Invariants
//! - An unreadable payload is recovered by seeding, never surfaced; the
//!   corrupt outcome is distinguished explicitly, not by accident of
//!   exception suppression.
//! - When any project color was backfilled, an extra save runs so the slot
//!   is upgraded in place.

use crate::model::palette::{allocate_color, PROJECT_COLORS};
use crate::repo::slot_repo::SlotRepository;
use crate::store::snapshot::SnapshotPayload;
use crate::store::{MemoStore, StoreResult};
use log::{info, warn};

/// Name of the category seeded on first run.
pub const DEFAULT_CATEGORY_NAME: &str = "Study";
/// Name of the project seeded inside the default category.
pub const DEFAULT_PROJECT_NAME: &str = "General";

/// Outcome of reading and decoding the durable slot.
#[derive(Debug)]
enum SnapshotDecode {
    /// The slot has never been written.
    Absent,
    /// The slot exists but its payload failed to parse.
    Corrupt,
    /// The payload parsed; collections may still be partially defaulted.
    Loaded(Box<SnapshotPayload>),
}

impl<R: SlotRepository> MemoStore<R> {
    /// Runs the full load lifecycle. Called once from `MemoStore::open`.
    pub(crate) fn load(&mut self) -> StoreResult<()> {
        let decoded = match self.repo.read_slot(&self.slot_key)? {
            None => SnapshotDecode::Absent,
            Some(raw) => match serde_json::from_str::<SnapshotPayload>(&raw) {
                Ok(payload) => SnapshotDecode::Loaded(Box::new(payload)),
                Err(err) => {
                    warn!(
                        "event=store_load module=store status=corrupt_payload slot={} error={err}",
                        self.slot_key
                    );
                    SnapshotDecode::Corrupt
                }
            },
        };

        match decoded {
            SnapshotDecode::Absent => {
                self.seed_defaults()?;
                info!(
                    "event=store_load module=store status=seeded slot={}",
                    self.slot_key
                );
            }
            // Corrupt is recovered exactly like an absent slot, by policy.
            SnapshotDecode::Corrupt => {
                self.seed_defaults()?;
                info!(
                    "event=store_load module=store status=recovered_corrupt slot={}",
                    self.slot_key
                );
            }
            SnapshotDecode::Loaded(payload) => {
                self.apply_snapshot(*payload);

                let migrated = self.backfill_project_colors();
                if migrated > 0 {
                    info!(
                        "event=store_migrate module=store status=ok migrated_projects={migrated}"
                    );
                    self.flush()?;
                }
                if self.categories.is_empty() {
                    self.seed_defaults()?;
                }
                info!(
                    "event=store_load module=store status=restored slot={} categories={} projects={} docs={} highlights={} cards={} links={}",
                    self.slot_key,
                    self.categories.len(),
                    self.projects.len(),
                    self.docs.len(),
                    self.highlights.len(),
                    self.cards.len(),
                    self.links.len(),
                );
            }
        }

        Ok(())
    }

    /// Seeds one default category containing one default project. No docs
    /// are seeded.
    fn seed_defaults(&mut self) -> StoreResult<()> {
        let category = self.create_category(DEFAULT_CATEGORY_NAME)?;
        self.create_project(&category.id, DEFAULT_PROJECT_NAME)?;
        Ok(())
    }

    /// Assigns a color to every project lacking one (schema version 1/2
    /// data), scoped to same-category siblings that already carry a color.
    /// Returns the number of projects touched.
    fn backfill_project_colors(&mut self) -> usize {
        let mut migrated = 0;
        for index in 0..self.projects.len() {
            if !self.projects[index].color.is_empty() {
                continue;
            }
            let category_id = self.projects[index].category_id.clone();
            let color = {
                let used: Vec<&str> = self
                    .projects
                    .iter()
                    .filter(|p| p.category_id == category_id && !p.color.is_empty())
                    .map(|p| p.color.as_str())
                    .collect();
                allocate_color(&used, PROJECT_COLORS)
            };
            self.projects[index].color = color;
            migrated += 1;
        }
        migrated
    }
}
