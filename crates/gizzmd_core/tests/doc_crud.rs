use gizzmd_core::db::open_db_in_memory;
use gizzmd_core::{
    CreateDocument, DocRepository, DocService, Document, DocumentPatch, Id, RepoError,
    ServiceError, SqliteDocRepository, ValidationError,
};
use rusqlite::params;

const OLD_EPOCH_MS: i64 = 1_700_000_000_000;

fn create_input(title: &str, content: &str, tags: &str) -> CreateDocument {
    CreateDocument {
        title: title.to_string(),
        content: content.to_string(),
        tags: tags.to_string(),
    }
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = DocService::new(SqliteDocRepository::try_new(&conn).unwrap());
    let author = Id::generate();

    let created = service
        .create_document(
            author,
            &create_input("  Meeting notes ", "\n  Agenda for Monday\n- item", "work, weekly"),
        )
        .unwrap();
    assert!(!created.id().is_nil());
    assert_eq!(created.title().as_str(), "Meeting notes");
    assert_eq!(created.snippet().as_str(), "Agenda for Monday");
    assert_eq!(created.tags().to_csv(), "work,weekly");
    assert_eq!(created.author_id(), author);
    assert_eq!(created.created_at().value(), created.edited_at().value());

    let loaded = service.get_document(created.id()).unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn create_requires_title_and_valid_tags() {
    let conn = open_db_in_memory().unwrap();
    let service = DocService::new(SqliteDocRepository::try_new(&conn).unwrap());

    let err = service
        .create_document(Id::generate(), &create_input("", "body", ""))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::ValidationFailed(ValidationError::EmptyTitle)
    ));

    let err = service
        .create_document(Id::generate(), &create_input("t", "body", "a,a"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::ValidationFailed(ValidationError::DuplicateTag { .. })
    ));
}

#[test]
fn create_rejects_content_over_16mb() {
    let conn = open_db_in_memory().unwrap();
    let service = DocService::new(SqliteDocRepository::try_new(&conn).unwrap());
    let huge = "a".repeat(16 * 1024 * 1024 + 1);

    let err = service
        .create_document(Id::generate(), &create_input("big", &huge, ""))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::ValidationFailed(ValidationError::ContentTooLarge { .. })
    ));
}

#[test]
fn update_with_empty_title_leaves_document_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let service = DocService::new(SqliteDocRepository::try_new(&conn).unwrap());
    let created = service
        .create_document(Id::generate(), &create_input("Keep me", "body", "a"))
        .unwrap();

    let patch = DocumentPatch {
        title: Some(String::new()),
        ..DocumentPatch::default()
    };
    let updated = service.update_document(created.id(), &patch).unwrap();
    assert_eq!(updated, created);
}

#[test]
fn update_title_refreshes_edited_at_and_preserves_created_at() {
    let conn = open_db_in_memory().unwrap();
    let service = DocService::new(SqliteDocRepository::try_new(&conn).unwrap());
    let created = service
        .create_document(Id::generate(), &create_input("Old", "body", ""))
        .unwrap();
    conn.execute(
        "UPDATE docs SET created_at = ?1, edited_at = ?1 WHERE id = ?2;",
        params![OLD_EPOCH_MS, created.id().to_string()],
    )
    .unwrap();

    let patch = DocumentPatch {
        title: Some("New".to_string()),
        ..DocumentPatch::default()
    };
    let updated = service.update_document(created.id(), &patch).unwrap();

    assert_eq!(updated.title().as_str(), "New");
    assert_eq!(updated.created_at().epoch_ms(), OLD_EPOCH_MS);
    assert!(updated.edited_at().epoch_ms() > OLD_EPOCH_MS);
    assert_eq!(updated.content(), created.content());
}

#[test]
fn update_content_rederives_snippet_and_tags_replace_whole_set() {
    let conn = open_db_in_memory().unwrap();
    let service = DocService::new(SqliteDocRepository::try_new(&conn).unwrap());
    let created = service
        .create_document(Id::generate(), &create_input("T", "first", "x,y"))
        .unwrap();

    let patch = DocumentPatch {
        content: Some("second line one\nline two".to_string()),
        tags: Some("z".to_string()),
        ..DocumentPatch::default()
    };
    let updated = service.update_document(created.id(), &patch).unwrap();
    assert_eq!(updated.snippet().as_str(), "second line one");
    assert_eq!(updated.tags().values(), ["z"]);
    assert_eq!(updated.title(), created.title());
}

#[test]
fn update_validates_before_touching_storage() {
    let conn = open_db_in_memory().unwrap();
    let service = DocService::new(SqliteDocRepository::try_new(&conn).unwrap());
    let created = service
        .create_document(Id::generate(), &create_input("T", "c", ""))
        .unwrap();

    let patch = DocumentPatch {
        title: Some("x".repeat(101)),
        content: Some("should not persist".to_string()),
        ..DocumentPatch::default()
    };
    let err = service.update_document(created.id(), &patch).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::ValidationFailed(ValidationError::TitleTooLong)
    ));
    assert_eq!(service.get_document(created.id()).unwrap(), created);
}

#[test]
fn missing_documents_report_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = DocService::new(SqliteDocRepository::try_new(&conn).unwrap());
    let missing = Id::generate();

    assert!(matches!(
        service.get_document(missing),
        Err(ServiceError::EntityNotFound(id)) if id == missing
    ));
    assert!(matches!(
        service.update_document(missing, &DocumentPatch::default()),
        Err(ServiceError::EntityNotFound(_))
    ));
    assert!(matches!(
        service.delete_document(missing),
        Err(ServiceError::EntityNotFound(_))
    ));
}

#[test]
fn delete_is_hard() {
    let conn = open_db_in_memory().unwrap();
    let service = DocService::new(SqliteDocRepository::try_new(&conn).unwrap());
    let created = service
        .create_document(Id::generate(), &create_input("gone", "", ""))
        .unwrap();

    service.delete_document(created.id()).unwrap();
    let remaining: i64 = conn
        .query_row("SELECT COUNT(*) FROM docs;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(remaining, 0);
}

#[test]
fn upsert_preserves_created_at_and_author() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocRepository::try_new(&conn).unwrap();
    let service = DocService::new(SqliteDocRepository::try_new(&conn).unwrap());
    let created = service
        .create_document(Id::generate(), &create_input("orig", "", ""))
        .unwrap();
    conn.execute(
        "UPDATE docs SET created_at = ?1 WHERE id = ?2;",
        params![OLD_EPOCH_MS, created.id().to_string()],
    )
    .unwrap();

    // `created` still carries the original in-memory creation time.
    let saved = repo.save_document(&created).unwrap();
    assert_eq!(saved.created_at().epoch_ms(), OLD_EPOCH_MS);
    assert_eq!(saved.author_id(), created.author_id());
}

#[test]
fn save_rejects_drafts_without_identity() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocRepository::try_new(&conn).unwrap();
    let draft = Document::draft(
        gizzmd_core::Title::new("draft").unwrap(),
        gizzmd_core::Content::default(),
        gizzmd_core::Tags::default(),
        Id::generate(),
    );
    assert!(matches!(
        repo.save_document(&draft),
        Err(RepoError::UnassignedId)
    ));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    match SqliteDocRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE docs (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            content TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        gizzmd_core::db::migrations::latest_version()
    ))
    .unwrap();

    assert!(matches!(
        SqliteDocRepository::try_new(&conn),
        Err(RepoError::MissingRequiredColumn {
            table: "docs",
            column: "tags"
        })
    ));
}
