//! Randomized command sequences against the structural invariants of the
//! annotation graph: every child points at a live parent, highlight/card
//! back-references agree in both directions, link endpoint pairs are unique
//! regardless of direction, and sibling projects keep distinct colors while
//! the palette lasts.

use std::collections::HashSet;

use liquidmemo_core::db::open_db_in_memory;
use liquidmemo_core::{
    MemoStore, SlotRepository, SqliteSlotRepository, DEFAULT_HIGHLIGHT_COLOR, DEFAULT_SLOT_KEY,
    PROJECT_COLORS,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rusqlite::Connection;

fn open_store(conn: &Connection) -> MemoStore<SqliteSlotRepository<'_>> {
    let repo = SqliteSlotRepository::try_new(conn).unwrap();
    MemoStore::open(repo, DEFAULT_SLOT_KEY).unwrap()
}

fn pick<'a>(rng: &mut StdRng, ids: &'a [String]) -> Option<&'a str> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[rng.gen_range(0..ids.len())].as_str())
    }
}

fn check_invariants(store: &MemoStore<SqliteSlotRepository<'_>>) {
    let category_ids: HashSet<&str> = store.categories().iter().map(|c| c.id.as_str()).collect();
    let project_ids: HashSet<&str> = store.projects().iter().map(|p| p.id.as_str()).collect();
    let doc_ids: HashSet<&str> = store.docs().iter().map(|d| d.id.as_str()).collect();
    let card_ids: HashSet<&str> = store.cards().iter().map(|c| c.id.as_str()).collect();

    // Parent liveness at every level.
    for project in store.projects() {
        assert!(category_ids.contains(project.category_id.as_str()));
    }
    for doc in store.docs() {
        assert!(project_ids.contains(doc.project_id.as_str()));
    }
    for highlight in store.highlights() {
        assert!(doc_ids.contains(highlight.doc_id.as_str()));
    }
    for card in store.cards() {
        assert!(doc_ids.contains(card.doc_id.as_str()));
    }
    for link in store.links() {
        assert!(doc_ids.contains(link.doc_id.as_str()));
        assert!(card_ids.contains(link.from_card_id.as_str()));
        assert!(card_ids.contains(link.to_card_id.as_str()));
        assert_ne!(link.from_card_id, link.to_card_id);
    }

    // Highlight/card references agree in both directions.
    for highlight in store.highlights() {
        for card_id in &highlight.linked_card_ids {
            let card = store.card(card_id).unwrap();
            assert_eq!(card.highlight_id.as_deref(), Some(highlight.id.as_str()));
        }
    }
    for card in store.cards() {
        if let Some(highlight_id) = &card.highlight_id {
            let highlight = store.highlight(highlight_id).unwrap();
            assert!(highlight.linked_card_ids.contains(&card.id));
        }
    }

    // Unordered endpoint pairs are unique.
    let mut pairs = HashSet::new();
    for link in store.links() {
        let mut pair = [link.from_card_id.as_str(), link.to_card_id.as_str()];
        pair.sort_unstable();
        assert!(pairs.insert(pair));
    }

    // Sibling project colors stay distinct while the palette can cover them.
    for category in store.categories() {
        let siblings = store.projects_by_category(&category.id);
        if siblings.len() <= PROJECT_COLORS.len() {
            let colors: HashSet<&str> = siblings.iter().map(|p| p.color.as_str()).collect();
            assert_eq!(colors.len(), siblings.len());
        }
    }
}

fn run_scripted_session(seed: u64, steps: usize) {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..steps {
        let category_ids: Vec<String> =
            store.categories().iter().map(|c| c.id.clone()).collect();
        let project_ids: Vec<String> = store.projects().iter().map(|p| p.id.clone()).collect();
        let doc_ids: Vec<String> = store.docs().iter().map(|d| d.id.clone()).collect();
        let highlight_ids: Vec<String> =
            store.highlights().iter().map(|h| h.id.clone()).collect();
        let card_ids: Vec<String> = store.cards().iter().map(|c| c.id.clone()).collect();
        let link_ids: Vec<String> = store.links().iter().map(|l| l.id.clone()).collect();

        match rng.gen_range(0..12u32) {
            0 => {
                store.create_category("scripted category").unwrap();
            }
            1 => {
                if let Some(category_id) = pick(&mut rng, &category_ids) {
                    store.create_project(category_id, "scripted project").unwrap();
                }
            }
            2 => {
                if let Some(project_id) = pick(&mut rng, &project_ids) {
                    store.create_doc(project_id, "scripted doc").unwrap();
                }
            }
            3 => {
                if let Some(doc_id) = pick(&mut rng, &doc_ids) {
                    let from = rng.gen_range(0..500u32);
                    store
                        .create_highlight(doc_id, from, from + rng.gen_range(1..40), DEFAULT_HIGHLIGHT_COLOR)
                        .unwrap();
                }
            }
            4 => {
                if let Some(doc_id) = pick(&mut rng, &doc_ids) {
                    store.create_memo_card(doc_id).unwrap();
                }
            }
            5 => {
                // A card bound to a highlight of the same doc.
                if let Some(highlight_id) = pick(&mut rng, &highlight_ids) {
                    let doc_id = store.highlight(highlight_id).unwrap().doc_id.clone();
                    store
                        .create_card(&doc_id, Some(highlight_id), "scripted quote")
                        .unwrap();
                }
            }
            6 => {
                if card_ids.len() >= 2 {
                    let from = pick(&mut rng, &card_ids).unwrap().to_string();
                    let to = pick(&mut rng, &card_ids).unwrap().to_string();
                    if from != to {
                        let doc_id = store.card(&from).unwrap().doc_id.clone();
                        let to_doc = store.card(&to).unwrap().doc_id.clone();
                        if doc_id == to_doc {
                            store.create_link(&doc_id, &from, &to).unwrap();
                        }
                    }
                }
            }
            7 => {
                if let Some(card_id) = pick(&mut rng, &card_ids) {
                    let card_id = card_id.to_string();
                    store.delete_card(&card_id).unwrap();
                }
            }
            8 => {
                if let Some(link_id) = pick(&mut rng, &link_ids) {
                    let link_id = link_id.to_string();
                    store.delete_link(&link_id).unwrap();
                }
            }
            9 => {
                if let Some(doc_id) = pick(&mut rng, &doc_ids) {
                    let doc_id = doc_id.to_string();
                    store.delete_doc(&doc_id).unwrap();
                }
            }
            10 => {
                if project_ids.len() > 1 {
                    let project_id = pick(&mut rng, &project_ids).unwrap().to_string();
                    store.delete_project(&project_id).unwrap();
                }
            }
            _ => {
                if category_ids.len() > 1 {
                    let category_id = pick(&mut rng, &category_ids).unwrap().to_string();
                    store.delete_category(&category_id).unwrap();
                }
            }
        }

        check_invariants(&store);
    }

    // The persisted snapshot obeys the same invariants after a reload.
    drop(store);
    let reloaded = open_store(&conn);
    check_invariants(&reloaded);
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    assert!(repo.read_slot(DEFAULT_SLOT_KEY).unwrap().is_some());
}

#[test]
fn invariants_hold_across_randomized_sessions() {
    for seed in [7u64, 1984, 20020218] {
        run_scripted_session(seed, 150);
    }
}
