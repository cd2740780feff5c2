use liquidmemo_core::db::open_db_in_memory;
use liquidmemo_core::{
    InteractionMode, MemoStore, SqliteSlotRepository, StoreError, DEFAULT_SLOT_KEY,
};
use rusqlite::Connection;

fn open_store(conn: &Connection) -> MemoStore<SqliteSlotRepository<'_>> {
    let repo = SqliteSlotRepository::try_new(conn).unwrap();
    MemoStore::open(repo, DEFAULT_SLOT_KEY).unwrap()
}

fn store_with_two_cards(
    conn: &Connection,
) -> (MemoStore<SqliteSlotRepository<'_>>, String, String, String) {
    let mut store = open_store(conn);
    let project_id = store.projects()[0].id.clone();
    let doc = store.create_doc(&project_id, "Canvas").unwrap();
    let a = store.create_memo_card(&doc.id).unwrap();
    let b = store.create_memo_card(&doc.id).unwrap();
    (store, doc.id, a.id, b.id)
}

#[test]
fn opening_a_doc_resets_selection_and_gesture() {
    let conn = open_db_in_memory().unwrap();
    let (mut store, doc_id, a, _) = store_with_two_cards(&conn);

    store.open_doc(&doc_id).unwrap();
    store.select_card(Some(&a));
    store.start_connecting(&a);
    assert!(matches!(store.interaction_mode(), InteractionMode::Connecting(_)));

    store.open_doc(&doc_id).unwrap();
    assert_eq!(store.current_doc_id(), Some(doc_id.as_str()));
    assert_eq!(store.interaction_mode(), InteractionMode::Idle);
    assert_eq!(store.selected_card_id(), None);
}

#[test]
fn open_doc_rejects_unknown_ids() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let err = store.open_doc("d_missing").unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
    assert_eq!(store.current_doc_id(), None);
}

#[test]
fn close_doc_clears_the_whole_session() {
    let conn = open_db_in_memory().unwrap();
    let (mut store, doc_id, a, _) = store_with_two_cards(&conn);

    store.open_doc(&doc_id).unwrap();
    store.select_card(Some(&a));
    store.close_doc();

    assert_eq!(store.current_doc_id(), None);
    assert_eq!(store.current_doc(), None);
    assert_eq!(store.interaction_mode(), InteractionMode::Idle);
}

#[test]
fn current_accessors_walk_up_the_hierarchy() {
    let conn = open_db_in_memory().unwrap();
    let (mut store, doc_id, _, _) = store_with_two_cards(&conn);

    assert_eq!(store.current_project(), None);
    assert_eq!(store.current_category(), None);

    store.open_doc(&doc_id).unwrap();
    let project = store.current_project().unwrap();
    assert_eq!(project.id, store.doc(&doc_id).unwrap().project_id);
    let category = store.current_category().unwrap();
    assert_eq!(category.id, project.category_id);
}

#[test]
fn interaction_mode_prefers_connecting_over_selection() {
    let conn = open_db_in_memory().unwrap();
    let (mut store, doc_id, a, b) = store_with_two_cards(&conn);
    store.open_doc(&doc_id).unwrap();

    assert_eq!(store.interaction_mode(), InteractionMode::Idle);

    store.select_card(Some(&a));
    assert_eq!(
        store.interaction_mode(),
        InteractionMode::CardSelected(a.clone())
    );

    store.start_connecting(&b);
    assert_eq!(
        store.interaction_mode(),
        InteractionMode::Connecting(b.clone())
    );

    store.finish_connecting(None).unwrap();
    // The aborted gesture leaves the selection intact.
    assert_eq!(
        store.interaction_mode(),
        InteractionMode::CardSelected(a.clone())
    );
}

#[test]
fn finish_connecting_creates_a_link_between_distinct_cards() {
    let conn = open_db_in_memory().unwrap();
    let (mut store, doc_id, a, b) = store_with_two_cards(&conn);
    store.open_doc(&doc_id).unwrap();

    store.start_connecting(&a);
    let link = store.finish_connecting(Some(&b)).unwrap().unwrap();
    assert_eq!((link.from_card_id.as_str(), link.to_card_id.as_str()), (a.as_str(), b.as_str()));
    assert_eq!(store.interaction_mode(), InteractionMode::Idle);

    // The gesture goes through the same dedup as direct link creation.
    store.start_connecting(&b);
    assert!(store.finish_connecting(Some(&a)).unwrap().is_none());
    assert_eq!(store.links().len(), 1);
}

#[test]
fn finish_connecting_on_the_source_card_is_a_no_op() {
    let conn = open_db_in_memory().unwrap();
    let (mut store, doc_id, a, _) = store_with_two_cards(&conn);
    store.open_doc(&doc_id).unwrap();

    store.start_connecting(&a);
    assert!(store.finish_connecting(Some(&a)).unwrap().is_none());
    assert_eq!(store.interaction_mode(), InteractionMode::Idle);
    assert!(store.links().is_empty());
}

#[test]
fn finish_connecting_without_a_gesture_is_a_no_op() {
    let conn = open_db_in_memory().unwrap();
    let (mut store, doc_id, a, _) = store_with_two_cards(&conn);
    store.open_doc(&doc_id).unwrap();

    assert!(store.finish_connecting(Some(&a)).unwrap().is_none());
    assert!(store.links().is_empty());
}

#[test]
fn finish_connecting_needs_an_open_doc() {
    let conn = open_db_in_memory().unwrap();
    let (mut store, _, a, b) = store_with_two_cards(&conn);

    store.start_connecting(&a);
    let err = store.finish_connecting(Some(&b)).unwrap_err();
    assert!(matches!(err, StoreError::InvalidState(_)));
    // Even the error path disarms the gesture.
    assert_eq!(store.interaction_mode(), InteractionMode::Idle);
}
