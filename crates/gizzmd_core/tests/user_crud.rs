use gizzmd_core::db::open_db_in_memory;
use gizzmd_core::{
    Id, ServiceError, SqliteUserRepository, UiTheme, UserPatch, UserRepository, UserService,
    ValidationError,
};

#[test]
fn register_and_get_user_with_defaults() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());

    let user = service
        .register_user(" Jane@Example.com ", " Jane Doe ")
        .unwrap();
    assert_eq!(user.email().as_str(), "jane@example.com");
    assert_eq!(user.author_name().as_str(), "Jane Doe");
    assert_eq!(user.ui_theme(), UiTheme::Light);

    assert_eq!(service.get_user(user.id()).unwrap(), user);
}

#[test]
fn duplicate_email_is_a_validation_failure() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    service.register_user("dup@example.com", "First").unwrap();

    let err = service
        .register_user("DUP@example.com", "Second")
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::ValidationFailed(ValidationError::EmailAlreadyRegistered { .. })
    ));
}

#[test]
fn partial_update_treats_empty_as_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    let user = service.register_user("a@example.com", "Alice").unwrap();

    let theme_only = UserPatch {
        author_name: Some(String::new()),
        ui_theme: Some("dark".to_string()),
    };
    let updated = service.update_user(user.id(), &theme_only).unwrap();
    assert_eq!(updated.author_name().as_str(), "Alice");
    assert_eq!(updated.ui_theme(), UiTheme::Dark);
    assert_eq!(updated.email(), user.email());
    assert_eq!(updated.id(), user.id());

    let rename = UserPatch {
        author_name: Some("Alicia".to_string()),
        ui_theme: None,
    };
    let renamed = service.update_user(user.id(), &rename).unwrap();
    assert_eq!(renamed.author_name().as_str(), "Alicia");
    assert_eq!(renamed.ui_theme(), UiTheme::Dark);
}

#[test]
fn invalid_theme_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    let user = service.register_user("b@example.com", "Bob").unwrap();

    let err = service
        .update_user(
            user.id(),
            &UserPatch {
                ui_theme: Some("solarized".to_string()),
                ..UserPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::ValidationFailed(ValidationError::InvalidUiTheme { .. })
    ));
}

#[test]
fn ensure_user_is_idempotent_by_email() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::try_new(&conn).unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    let seed_id = Id::parse("123e4567-e89b-12d3-a456-426614174000").unwrap();

    let first = service
        .ensure_user(seed_id, "user@example.com", "John Doe")
        .unwrap();
    let second = service
        .ensure_user(Id::generate(), "USER@example.com", "Someone Else")
        .unwrap();
    assert_eq!(first.id(), seed_id);
    assert_eq!(second, first);

    let email = gizzmd_core::Email::new("user@example.com").unwrap();
    assert!(repo.find_user_by_email(&email).unwrap().is_some());
}

#[test]
fn delete_user_then_lookup_fails() {
    let conn = open_db_in_memory().unwrap();
    let service = UserService::new(SqliteUserRepository::try_new(&conn).unwrap());
    let user = service.register_user("c@example.com", "Carol").unwrap();

    service.delete_user(user.id()).unwrap();
    assert!(matches!(
        service.get_user(user.id()),
        Err(ServiceError::EntityNotFound(_))
    ));
    assert!(matches!(
        service.delete_user(user.id()),
        Err(ServiceError::EntityNotFound(_))
    ));
}
