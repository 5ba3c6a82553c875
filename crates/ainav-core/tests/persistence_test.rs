use ainav_core::views::selected_items;
use ainav_core::{
    BookmarkStore, Catalog, ComparisonTable, Error, Session, ViewOrder, BOOKMARKS_KEY,
    MAX_COMPARE_ITEMS,
};
use ainav_storage::{FileStore, KeyValueStore, SqliteStore};
use tempfile::TempDir;

#[test]
fn test_bookmarks_survive_restart_on_sqlite() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("ainav.db");

    {
        let session = Session::start(Box::new(SqliteStore::open(&db).unwrap()));
        let bookmarks = session.bookmarks();
        bookmarks.add_bookmark("gpt-4").unwrap();
        bookmarks.add_bookmark("claude").unwrap();
        bookmarks.remove_bookmark("gpt-4").unwrap();

        assert!(!bookmarks.is_bookmarked("gpt-4").unwrap());
        assert!(bookmarks.is_bookmarked("claude").unwrap());
    }

    let raw = SqliteStore::open(&db)
        .unwrap()
        .get(BOOKMARKS_KEY)
        .unwrap();
    assert_eq!(raw.as_deref(), Some("[\"claude\"]"));

    let session = Session::start(Box::new(SqliteStore::open(&db).unwrap()));
    assert_eq!(session.bookmarks().bookmarked_ids().unwrap(), vec!["claude"]);
}

#[test]
fn test_bookmarks_survive_restart_on_files() {
    let dir = TempDir::new().unwrap();
    let slots = dir.path().join("slots");

    let mut store = BookmarkStore::open(Box::new(FileStore::new(&slots)));
    for id in ["midjourney", "cursor", "whisper"] {
        store.add_bookmark(id);
    }
    drop(store);

    let store = BookmarkStore::open(Box::new(FileStore::new(&slots)));
    assert_eq!(store.bookmarked_ids(), ["midjourney", "cursor", "whisper"]);
}

#[test]
fn test_corrupt_file_slot_starts_empty_and_recovers() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("ainav_bookmarks.json"), "[\"half written").unwrap();

    let mut store = BookmarkStore::open(Box::new(FileStore::new(dir.path())));
    assert!(store.mounted());
    assert!(store.is_empty());

    // The next mutation overwrites the corrupt slot
    store.add_bookmark("claude");
    let raw = std::fs::read_to_string(dir.path().join("ainav_bookmarks.json")).unwrap();
    assert_eq!(raw, "[\"claude\"]");
}

#[test]
fn test_last_writer_wins_across_sessions() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("ainav.db");

    let first = Session::start(Box::new(SqliteStore::open(&db).unwrap()));
    let second = Session::start(Box::new(SqliteStore::open(&db).unwrap()));

    first.bookmarks().add_bookmark("a").unwrap();
    second.bookmarks().add_bookmark("b").unwrap();

    let reloaded = BookmarkStore::open(Box::new(SqliteStore::open(&db).unwrap()));
    assert_eq!(reloaded.bookmarked_ids(), ["b"]);
}

#[test]
fn test_clear_on_empty_session_overwrites_other_writer() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("ainav.db");

    let first = Session::start(Box::new(SqliteStore::open(&db).unwrap()));
    let second = Session::start(Box::new(SqliteStore::open(&db).unwrap()));

    second.bookmarks().add_bookmark("x").unwrap();
    // First session never saw "x" but its clear is the last write
    first.bookmarks().clear_bookmarks().unwrap();

    let reloaded = BookmarkStore::open(Box::new(SqliteStore::open(&db).unwrap()));
    assert!(reloaded.is_empty());
}

#[test]
fn test_remove_of_absent_id_overwrites_other_writer() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("ainav.db");

    let first = Session::start(Box::new(SqliteStore::open(&db).unwrap()));
    let second = Session::start(Box::new(SqliteStore::open(&db).unwrap()));

    first.bookmarks().add_bookmark("a").unwrap();
    second.bookmarks().add_bookmark("b").unwrap();
    first.bookmarks().remove_bookmark("zzz").unwrap();

    let reloaded = BookmarkStore::open(Box::new(SqliteStore::open(&db).unwrap()));
    assert_eq!(reloaded.bookmarked_ids(), ["a"]);
}

#[test]
fn test_bookmarks_view_against_bundled_catalog() {
    let catalog = Catalog::bundled().unwrap();
    let dir = TempDir::new().unwrap();
    let session = Session::start(Box::new(FileStore::new(dir.path())));
    let bookmarks = session.bookmarks();

    bookmarks.add_bookmark("perplexity").unwrap();
    bookmarks.add_bookmark("delisted-tool").unwrap();
    bookmarks.add_bookmark("gpt-4").unwrap();

    let ids = bookmarks.bookmarked_ids().unwrap();
    let by_bookmark: Vec<_> = selected_items(&catalog, &ids, ViewOrder::Selection)
        .iter()
        .map(|i| i.id.clone())
        .collect();
    let by_catalog: Vec<_> = selected_items(&catalog, &ids, ViewOrder::Catalog)
        .iter()
        .map(|i| i.id.clone())
        .collect();

    assert_eq!(by_bookmark, vec!["perplexity", "gpt-4"]);
    assert_eq!(by_catalog, vec!["gpt-4", "perplexity"]);
}

#[test]
fn test_compare_flow() {
    let catalog = Catalog::bundled().unwrap();
    let dir = TempDir::new().unwrap();
    let session = Session::start(Box::new(FileStore::new(dir.path())));
    let compare = session.compare();

    let wanted = ["gpt-4", "claude", "gemini", "perplexity", "cursor"];
    let mut rejected = Vec::new();
    for id in wanted {
        compare.add_to_compare(id).unwrap();
        if !compare.is_selected(id).unwrap() {
            rejected.push(id);
        }
    }

    assert_eq!(rejected, vec!["cursor"]);
    let ids = compare.selected_ids().unwrap();
    assert_eq!(ids.len(), MAX_COMPARE_ITEMS);

    let table = ComparisonTable::build(&catalog, &ids);
    assert_eq!(table.items().len(), MAX_COMPARE_ITEMS);
    assert!(table.to_markdown().contains("| **Pricing** | Freemium | Freemium | Freemium | Freemium |"));

    // Nothing about comparison is written to storage
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_handles_after_session_end() {
    let dir = TempDir::new().unwrap();
    let session = Session::start(Box::new(FileStore::new(dir.path())));
    let bookmarks = session.bookmarks();
    drop(session);

    match bookmarks.add_bookmark("claude") {
        Err(Error::OutsideSession(store)) => assert_eq!(store, "bookmark"),
        other => panic!("expected OutsideSession, got {:?}", other),
    }
}
