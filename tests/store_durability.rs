use rusqlite::Connection;
use tempfile::TempDir;

use unimart::db::ensure_schema;
use unimart::persist::{BlobStore, FileBlobStore};
use unimart::{Category, MarketStore, NewProduct};

fn draft(title: &str, price: i64) -> NewProduct {
    NewProduct {
        seller_id: "u-1".to_string(),
        seller_name: "Priya".to_string(),
        title: title.to_string(),
        description: String::new(),
        price,
        category: Category::Gadget,
        condition: "Used".to_string(),
        image: String::new(),
    }
}

fn open_in(dir: &TempDir) -> MarketStore {
    let blobs = Box::new(FileBlobStore::new(dir.path().join("image.db")));
    MarketStore::open(blobs).expect("open store")
}

#[test]
fn fresh_bootstrap_persists_empty_schema() {
    let dir = TempDir::new().expect("temp dir");
    let store = open_in(&dir);
    // The empty schema must already be durable, before any data is written.
    assert!(store.persisted_size().expect("size") > 0);
    drop(store);

    let reopened = open_in(&dir);
    assert!(reopened.list_products().expect("list").is_empty());
}

#[test]
fn write_through_survives_reopen() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = open_in(&dir);
    let created = store
        .create_product(&draft("Calculator", 500))
        .expect("create product");
    drop(store);

    let reopened = open_in(&dir);
    let listed = reopened.list_products().expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[0].title, "Calculator");
    assert_eq!(listed[0].price, 500);
    assert_eq!(listed[0].category, Category::Gadget);
}

#[test]
fn persisted_size_strictly_increases_on_create() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = open_in(&dir);
    let before = store.persisted_size().expect("size before");
    store
        .create_product(&draft("Desk lamp", 1200))
        .expect("create product");
    let after = store.persisted_size().expect("size after");
    assert!(after > before, "expected blob to grow: {before} -> {after}");
}

#[test]
fn schema_bootstrap_is_idempotent() {
    let conn = Connection::open_in_memory().expect("open in-memory db");
    ensure_schema(&conn).expect("first bootstrap");
    ensure_schema(&conn).expect("second bootstrap");

    conn.execute(
        "INSERT INTO products (id, seller_id, title, price) VALUES ('p1', 'u1', 'Pen', 30)",
        [],
    )
    .expect("insert row");
    ensure_schema(&conn).expect("bootstrap over populated store");

    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))
        .expect("count rows");
    assert_eq!(count, 1, "re-running DDL must not reset tables");
}

#[test]
fn list_orders_newest_first() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = open_in(&dir);
    let first = store.create_product(&draft("first", 1)).expect("create");
    let second = store.create_product(&draft("second", 2)).expect("create");
    let third = store.create_product(&draft("third", 3)).expect("create");

    let ids: Vec<String> = store
        .list_products()
        .expect("list")
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[test]
fn export_import_round_trip_preserves_rows() {
    let source_dir = TempDir::new().expect("temp dir");
    let mut source = open_in(&source_dir);
    source.create_product(&draft("Notebook", 80)).expect("create");
    source.create_product(&draft("Charger", 350)).expect("create");
    source.authenticate("priya99").expect("register user");
    let expected = source.list_products().expect("list source");
    let image = source.export().expect("export image");

    let target_dir = TempDir::new().expect("temp dir");
    let mut target = open_in(&target_dir);
    target.reinitialize(&image).expect("import image");

    assert_eq!(target.list_products().expect("list target"), expected);
    let user = target
        .find_user("priya99")
        .expect("lookup")
        .expect("imported user present");
    assert_eq!(user.username, "priya99");
}

#[test]
fn corrupt_image_recovers_to_fresh_store() {
    let dir = TempDir::new().expect("temp dir");
    let blobs = FileBlobStore::new(dir.path().join("image.db"));
    blobs
        .save(b"definitely not a sqlite image")
        .expect("plant corrupt blob");

    let store = open_in(&dir);
    assert!(store.list_products().expect("list").is_empty());
    // Recovery re-persists a usable empty image.
    drop(store);
    let reopened = open_in(&dir);
    assert!(reopened.list_products().expect("list").is_empty());
}

#[test]
fn corrupt_import_is_rejected_and_store_kept() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = open_in(&dir);
    store.create_product(&draft("Stapler", 60)).expect("create");

    let err = store
        .reinitialize(b"garbage bytes")
        .expect_err("corrupt import must fail");
    assert!(matches!(err, unimart::MartError::CorruptStore(_)));
    assert_eq!(store.list_products().expect("list").len(), 1);
}

#[test]
fn local_authenticate_registers_handle_once() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = open_in(&dir);
    let first = store.authenticate("priya99").expect("first login");
    assert!(!first.id.is_empty());
    let second = store.authenticate("priya99").expect("second login");
    assert_eq!(first.id, second.id, "same handle must keep its id");

    let other = store.authenticate("dev_ravi").expect("other login");
    assert_ne!(other.id, first.id);
}
