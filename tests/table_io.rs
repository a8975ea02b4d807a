use std::fs;
use std::path::Path;
use std::thread;

use anyhow::{Context, Result};
use csvtable::{
    load, load_with_config, record_fields, save_csv_by_data, save_csv_by_table, to_int, to_string,
    Config, DataBind, DataTable, Error, Field, Record, Row, Table, TableKind,
};
use indexmap::IndexMap;
use tempfile::{tempdir, TempDir};

const USERS: &str = "\
name,age,address,hobby,gender
Alice,30,Paris,chess,f
Bob,25,Berlin,climbing,m
Carol,41,\"Lyon, FR\",painting,f
Bob,26,Munich,running,m
";

#[derive(Debug, Default, Clone, PartialEq)]
struct UserAutoBind {
    name: String,
    age: i64,
    address: String,
    hobby: String,
    gender: String,
}

impl Record for UserAutoBind {
    const FIELDS: &'static [Field<Self>] =
        record_fields!(UserAutoBind { name, age, address, hobby, gender });
}

#[derive(Debug, Default, Clone, PartialEq)]
struct UserAutoBindWithTag {
    test_name: String,
    test_age: u8,
    test_address: String,
}

impl Record for UserAutoBindWithTag {
    const FIELDS: &'static [Field<Self>] = record_fields!(UserAutoBindWithTag {
        test_name as "name",
        test_age as "age",
        test_address as "address",
    });
}

#[derive(Debug, Default, Clone, PartialEq)]
struct UserManualBind {
    name: String,
    age: i64,
}

impl Record for UserManualBind {
    const FIELDS: &'static [Field<Self>] = record_fields!(UserManualBind { name, age });

    fn as_data_bind(&mut self) -> Option<&mut dyn DataBind> {
        Some(self)
    }
}

impl DataBind for UserManualBind {
    fn bind_data(&mut self, row: &Row) {
        self.name = row.get("name").map(to_string).unwrap_or_default();
        self.age = row.get("age").map(to_int).unwrap_or_default() + 100;
    }
}

fn users_file() -> Result<(TempDir, std::path::PathBuf)> {
    let dir = tempdir()?;
    let path = dir.path().join("users.csv");
    fs::write(&path, USERS)?;
    Ok((dir, path))
}

fn load_users<R: Record + Default>(path: &Path, kind: TableKind, key: &str) -> Result<Table<R>> {
    load(path, kind, key, R::default)?.context("users.csv should not be empty")
}

#[test]
fn test_keyed_example() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("people.csv");
    fs::write(&path, "name,age\nAlice,30\nBob,25\n")?;

    let table: Table<UserAutoBind> = load_users(&path, TableKind::Keyed, "name")?;
    assert_eq!(table.len(), 2);
    let alice = table.get("Alice").context("Alice should be present")?;
    assert_eq!(alice.age, 30);
    Ok(())
}

#[test]
fn test_keyed_last_row_wins() -> Result<()> {
    let (_dir, path) = users_file()?;
    let table: Table<UserAutoBind> = load_users(&path, TableKind::Keyed, "name")?;

    assert_eq!(table.len(), 3);
    let bob = table.get("Bob").context("Bob should be present")?;
    assert_eq!(bob.age, 26);
    assert_eq!(bob.address, "Munich");
    assert_eq!(table.get_map_data().len(), 3);
    assert!(table.get_slice_data().is_empty());
    Ok(())
}

#[test]
fn test_ordered_preserves_rows() -> Result<()> {
    let (_dir, path) = users_file()?;
    let table: Table<UserAutoBind> = load_users(&path, TableKind::Ordered, "name")?;

    let names: Vec<_> = table.get_slice_data().iter().map(|u| u.name.clone()).collect();
    assert_eq!(names, ["Alice", "Bob", "Carol", "Bob"]);
    assert_eq!(table.get("Carol").map(|u| u.address.clone()).as_deref(), Some("Lyon, FR"));
    // First match wins on duplicates
    assert_eq!(table.get("Bob").map(|u| u.age), Some(25));
    assert!(table.get_map_data().is_empty());
    Ok(())
}

#[test]
fn test_key_fallback_to_first_column() -> Result<()> {
    let (_dir, path) = users_file()?;
    let table: Table<UserAutoBind> = load_users(&path, TableKind::Keyed, "email")?;

    assert_eq!(table.key_field(), "Name");
    assert!(table.get("Alice").is_some());
    Ok(())
}

#[test]
fn test_rekey_after_load() -> Result<()> {
    let (_dir, path) = users_file()?;
    let table: Table<UserAutoBind> = load_users(&path, TableKind::Keyed, "name")?;
    table.set_key_field("age")?;

    assert_eq!(table.key_field(), "Age");
    assert_eq!(table.get(41i64).map(|u| u.name.clone()).as_deref(), Some("Carol"));
    assert!(table.get("Carol").is_none());

    let err = table.set_key_field("salary").unwrap_err();
    assert!(matches!(err, Error::KeyFieldNotFound { .. }));
    assert_eq!(table.key_field(), "Age");
    Ok(())
}

#[test]
fn test_tag_binding() -> Result<()> {
    let (_dir, path) = users_file()?;
    let table: Table<UserAutoBindWithTag> = load_users(&path, TableKind::Ordered, "name")?;
    let rows = table.get_slice_data();
    let first = &rows[0];

    assert_eq!(first.test_name, "Alice");
    assert_eq!(first.test_age, 30);
    assert_eq!(first.test_address, "Paris");

    // Key field resolves through the tag when no field carries the name
    let keyed: Table<UserAutoBindWithTag> = load_users(&path, TableKind::Keyed, "name")?;
    assert_eq!(keyed.get("Carol").map(|u| u.test_age), Some(41));
    Ok(())
}

#[test]
fn test_manual_binding() -> Result<()> {
    let (_dir, path) = users_file()?;
    let table: Table<UserManualBind> = load_users(&path, TableKind::Ordered, "name")?;

    let ages: Vec<_> = table.records().iter().map(|u| u.age).collect();
    assert_eq!(ages, [130, 125, 141, 126]);
    Ok(())
}

#[test]
fn test_round_trip() -> Result<()> {
    let (dir, path) = users_file()?;

    for kind in [TableKind::Keyed, TableKind::Ordered] {
        let original: Table<UserAutoBind> = load_users(&path, kind, "name")?;
        let saved = dir.path().join(format!("saved_{}.csv", kind));
        save_csv_by_table(&saved, &original)?;
        let reloaded: Table<UserAutoBind> = load_users(&saved, kind, "name")?;

        let before: Vec<UserAutoBind> = original.records().iter().map(|u| (**u).clone()).collect();
        let after: Vec<UserAutoBind> = reloaded.records().iter().map(|u| (**u).clone()).collect();
        assert_eq!(before, after);
    }
    Ok(())
}

#[test]
fn test_round_trip_with_tags() -> Result<()> {
    let (dir, path) = users_file()?;
    let original: Table<UserAutoBindWithTag> = load_users(&path, TableKind::Ordered, "name")?;
    let saved = dir.path().join("tagged.csv");
    save_csv_by_table(&saved, &original)?;

    let content = fs::read_to_string(&saved)?;
    assert!(content.starts_with("name,age,address\n"));

    let reloaded: Table<UserAutoBindWithTag> = load_users(&saved, TableKind::Ordered, "name")?;
    assert_eq!(reloaded.get_slice_data()[2].test_address, "Lyon, FR");
    Ok(())
}

#[test]
fn test_save_by_data() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("books.csv");
    let source: Vec<IndexMap<String, String>> = (0..100)
        .map(|i| {
            let mut item = IndexMap::new();
            item.insert("Book".to_string(), format!("Book {}", i));
            item.insert("Author".to_string(), format!("Author {}", i));
            item.insert("Type".to_string(), format!("Classic {}", i));
            item
        })
        .collect();
    save_csv_by_data(&path, &source)?;

    let content = fs::read_to_string(&path)?;
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 101);
    assert_eq!(lines[0], "book,author,type");
    assert_eq!(lines[100], "Book 99,Author 99,Classic 99");
    Ok(())
}

#[test]
fn test_strict_mode_rejects_bad_cells() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("bad.csv");
    fs::write(&path, "name,age\nAlice,thirty\n")?;

    let config = Config::new().with_key_field("name").with_strict(true);
    let err = load_with_config(&path, &config, UserAutoBind::default).unwrap_err();
    assert!(matches!(err, Error::InvalidCell { line: 2, .. }));

    let lenient: Table<UserAutoBind> = load_users(&path, TableKind::Keyed, "name")?;
    assert_eq!(lenient.get("Alice").map(|u| u.age), Some(0));
    Ok(())
}

#[test]
fn test_malformed_csv_is_fatal() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("broken.csv");
    fs::write(&path, "name,age\nAlice,30\nBob\n")?;

    let err = load(&path, TableKind::Ordered, "name", UserAutoBind::default).unwrap_err();
    assert!(matches!(err, Error::Csv(_)));
    Ok(())
}

#[test]
fn test_concurrent_readers() -> Result<()> {
    let (_dir, path) = users_file()?;
    let table: Table<UserAutoBind> = load_users(&path, TableKind::Keyed, "name")?;

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..100 {
                    assert_eq!(table.get("Alice").map(|u| u.age), Some(30));
                }
            });
        }
        scope.spawn(|| {
            for _ in 0..10 {
                // Rebinding swaps in a fully built container
                table
                    .bind(&[Row::from_iter([
                        ("name".to_string(), "Alice".into()),
                        ("age".to_string(), "30".into()),
                    ])])
                    .expect("rebind");
            }
        });
    });
    Ok(())
}
