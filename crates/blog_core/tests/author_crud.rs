use blog_core::db::migrations::latest_version;
use blog_core::db::open_db_in_memory;
use blog_core::{Author, AuthorRepository, AuthorService, RepoError, SqliteAuthorRepository};
use rusqlite::Connection;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();

    let author = Author::new("Ada", Some("5551234567")).unwrap();
    let created = repo.create_author(&author).unwrap();

    let id = created.id().unwrap();
    assert!(created.created_at().is_some());
    assert_eq!(created.updated_at(), None);

    let loaded = repo.get_author(id).unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.name(), "Ada");
    assert_eq!(loaded.phone_number(), Some("5551234567"));

    let by_name = repo.get_author_by_name("Ada").unwrap().unwrap();
    assert_eq!(by_name.id(), Some(id));
    assert!(repo.get_author_by_name("Grace").unwrap().is_none());
}

#[test]
fn create_rejects_already_persisted_author() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();

    let created = repo
        .create_author(&Author::new("Ada", None).unwrap())
        .unwrap();
    let err = repo.create_author(&created).unwrap_err();
    assert!(matches!(err, RepoError::AlreadyPersisted { entity: "author", .. }));
}

#[test]
fn duplicate_name_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();

    repo.create_author(&Author::new("Ada", None).unwrap())
        .unwrap();
    let err = repo
        .create_author(&Author::new("Ada", Some("5551234567")).unwrap())
        .unwrap_err();
    assert!(matches!(err, RepoError::DuplicateName(ref name) if name == "Ada"));
    assert_eq!(repo.count_authors().unwrap(), 1);
}

#[test]
fn update_sets_updated_at_and_keeps_created_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();

    let mut author = repo
        .create_author(&Author::new("Ada", None).unwrap())
        .unwrap();
    let created_at = author.created_at();

    author.set_phone_number(Some("5551234567")).unwrap();
    repo.update_author(&author).unwrap();

    let loaded = repo.get_author(author.id().unwrap()).unwrap().unwrap();
    assert_eq!(loaded.phone_number(), Some("5551234567"));
    assert_eq!(loaded.created_at(), created_at);
    assert!(loaded.updated_at().is_some());
}

#[test]
fn update_requires_persisted_existing_author() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();

    let unsaved = Author::new("Ada", None).unwrap();
    assert!(matches!(
        repo.update_author(&unsaved).unwrap_err(),
        RepoError::NotPersisted("author")
    ));

    let created = repo.create_author(&unsaved).unwrap();
    repo.delete_author(created.id().unwrap()).unwrap();
    let err = repo.update_author(&created).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "author", id } if Some(id) == created.id()));
}

#[test]
fn delete_removes_row_and_reports_missing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();

    let created = repo
        .create_author(&Author::new("Ada", None).unwrap())
        .unwrap();
    let id = created.id().unwrap();

    repo.delete_author(id).unwrap();
    assert!(repo.get_author(id).unwrap().is_none());
    assert!(matches!(
        repo.delete_author(id).unwrap_err(),
        RepoError::NotFound { .. }
    ));
}

#[test]
fn list_is_ordered_by_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();

    for name in ["Charlie", "Alice", "Bob"] {
        repo.create_author(&Author::new(name, None).unwrap())
            .unwrap();
    }

    let names: Vec<String> = repo
        .list_authors()
        .unwrap()
        .iter()
        .map(|author| author.name().to_string())
        .collect();
    assert_eq!(names, ["Charlie", "Alice", "Bob"]);
}

#[test]
fn read_path_rejects_invalid_persisted_row() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO authors (name, phone_number) VALUES ('Ada', '123');",
        [],
    )
    .unwrap();

    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();
    let err = repo.list_authors().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn service_renames_and_changes_phone() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn).unwrap());

    let created = service.register_author("Ada", None).unwrap();
    let id = created.id().unwrap();

    let renamed = service.rename_author(id, "Ada Lovelace").unwrap();
    assert_eq!(renamed.name(), "Ada Lovelace");
    assert!(renamed.updated_at().is_some());

    let err = service.rename_author(id, "").unwrap_err();
    assert!(matches!(err, RepoError::Validation(ref v) if v.field() == "name"));
    assert_eq!(
        service.get_author(id).unwrap().unwrap().name(),
        "Ada Lovelace"
    );

    let changed = service.change_phone_number(id, Some("5551234567")).unwrap();
    assert_eq!(changed.phone_number(), Some("5551234567"));

    assert!(matches!(
        service.change_phone_number(id + 100, None).unwrap_err(),
        RepoError::NotFound { .. }
    ));
}

#[test]
fn rename_to_taken_name_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn).unwrap());

    service.register_author("Ada", None).unwrap();
    let bob = service.register_author("Bob", None).unwrap();
    let bob_id = bob.id().unwrap();

    let err = service.rename_author(bob_id, "Ada").unwrap_err();
    assert!(matches!(err, RepoError::DuplicateName(ref name) if name == "Ada"));

    let stored = service.get_author(bob_id).unwrap().unwrap();
    assert_eq!(stored.name(), "Bob");
    assert_eq!(stored.updated_at(), None);
}

#[test]
fn service_register_rejects_invalid_input() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn).unwrap());

    let err = service.register_author("Ada", Some("12")).unwrap_err();
    assert!(matches!(err, RepoError::Validation(ref v) if v.field() == "phone_number"));
    assert_eq!(service.count_authors().unwrap(), 0);
    assert!(service.find_author_by_name("Ada").unwrap().is_none());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteAuthorRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_authors_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteAuthorRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("authors"))
    ));
}
