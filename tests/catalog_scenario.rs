use booklist_manager::{CatalogError, Category, NewBook, Store};
use chrono::NaiveDate;

fn open_temp_store() -> (tempfile::TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("booklist.db")).unwrap();
    (dir, store)
}

#[test]
fn dune_scenario() {
    let (_dir, store) = open_temp_store();

    let first = store
        .add_book(
            NewBook::new("Dune", "Herbert", 5)
                .genre("SciFi")
                .series("Dune")
                .notes("great"),
        )
        .unwrap();
    assert_eq!(first.id, 1);

    let err = store
        .add_book(
            NewBook::new("Dune", "Herbert", 4)
                .genre("SciFi")
                .series("Dune")
                .notes("reread"),
        )
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CatalogError>(),
        Some(CatalogError::Duplicate { .. })
    ));
    assert_eq!(store.count_books().unwrap(), 1);

    let second = store
        .add_book(
            NewBook::new("Dune Messiah", "Herbert", 4)
                .genre("SciFi")
                .series("Dune")
                .notes("sequel"),
        )
        .unwrap();
    assert_eq!(second.id, 2);

    let herbert: Vec<i64> = store
        .filter_by(Category::Author, "Herbert")
        .unwrap()
        .into_iter()
        .map(|book| book.id)
        .collect();
    assert_eq!(herbert, vec![1, 2]);
    assert!(!store.table_exists("results").unwrap());
}

#[test]
fn data_survives_reopening_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("booklist.db");

    {
        let store = Store::open(&path).unwrap();
        store.add_book(NewBook::new("Emma", "Austen", 4)).unwrap();
        store
            .add_reminder(
                "Winds Of Winter",
                "Martin",
                NaiveDate::from_ymd_opt(2031, 1, 9).unwrap(),
            )
            .unwrap();
        store.close().unwrap();
    }

    let store = Store::open(&path).unwrap();
    let books = store.fetch_books().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Emma");
    assert_eq!(store.list_reminders().unwrap()[0].date, "2031-01-09");
}

#[test]
fn leftover_results_table_is_discarded_on_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("booklist.db");

    {
        let store = Store::open(&path).unwrap();
        store.add_book(NewBook::new("Emma", "Austen", 4)).unwrap();
        store.ensure_filter_table().unwrap();
        store
            .insert(
                "INSERT INTO results SELECT * FROM books WHERE author = ?1",
                ["Austen"],
            )
            .unwrap();
        store.close().unwrap();
    }

    let store = Store::open(&path).unwrap();
    assert!(!store.table_exists("results").unwrap());
    assert_eq!(store.count_books().unwrap(), 1);
}

#[test]
fn raw_rows_match_the_book_layout() {
    let (_dir, store) = open_temp_store();
    store
        .add_book(NewBook::new("Ubik", "Dick", 3).genre("SciFi"))
        .unwrap();

    let rows = store.select("SELECT * FROM books ORDER BY id").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 7);
}
