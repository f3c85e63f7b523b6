//! User repository contract and SQLite implementation.
//!
//! # Invariants
//! - `email` is unique; a clash surfaces as a validation failure.
//! - Upserts only touch `author_name` and `ui_theme` of an existing row.

use crate::model::error::ValidationError;
use crate::model::user::User;
use crate::model::values::{AuthorName, Email, Id, UiTheme};
use crate::repo::{ensure_table_ready, invalid_column, RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

const USER_SELECT_SQL: &str = "SELECT id, email, author_name, ui_theme FROM users";

/// Storage collaborator for users.
pub trait UserRepository {
    fn find_user(&self, id: Id) -> RepoResult<User>;
    /// Looks a user up by normalized email. `None` when unknown.
    fn find_user_by_email(&self, email: &Email) -> RepoResult<Option<User>>;
    fn save_user(&self, user: &User) -> RepoResult<User>;
    fn delete_user(&self, id: Id) -> RepoResult<()>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "users", &["id", "email", "author_name", "ui_theme"])?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn find_user(&self, id: Id) -> RepoResult<User> {
        self.conn
            .query_row(
                &format!("{USER_SELECT_SQL} WHERE id = ?1;"),
                [id.to_string()],
                |row| Ok(parse_user_row(row)),
            )
            .optional()?
            .unwrap_or(Err(RepoError::NotFound(id)))
    }

    fn find_user_by_email(&self, email: &Email) -> RepoResult<Option<User>> {
        self.conn
            .query_row(
                &format!("{USER_SELECT_SQL} WHERE email = ?1;"),
                [email.as_str()],
                |row| Ok(parse_user_row(row)),
            )
            .optional()?
            .transpose()
    }

    fn save_user(&self, user: &User) -> RepoResult<User> {
        if user.id().is_nil() {
            return Err(RepoError::UnassignedId);
        }

        let result = self.conn.execute(
            "INSERT INTO users (id, email, author_name, ui_theme)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                author_name = excluded.author_name,
                ui_theme = excluded.ui_theme;",
            params![
                user.id().to_string(),
                user.email().as_str(),
                user.author_name().as_str(),
                user.ui_theme().as_str(),
            ],
        );

        match result {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                return Err(RepoError::Validation(
                    ValidationError::EmailAlreadyRegistered {
                        email: user.email().to_string(),
                    },
                ));
            }
            Err(err) => return Err(err.into()),
        }

        debug!("event=user_save module=repo status=ok user_id={}", user.id());
        self.find_user(user.id())
    }

    fn delete_user(&self, id: Id) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let id_text: String = row.get("id")?;
    let id = Id::parse(&id_text).map_err(|err| invalid_column("users", "id", err))?;

    let email_text: String = row.get("email")?;
    let email = Email::new(&email_text).map_err(|err| invalid_column("users", "email", err))?;

    let name_text: String = row.get("author_name")?;
    let author_name =
        AuthorName::new(&name_text).map_err(|err| invalid_column("users", "author_name", err))?;

    let theme_text: String = row.get("ui_theme")?;
    let ui_theme =
        UiTheme::parse(&theme_text).map_err(|err| invalid_column("users", "ui_theme", err))?;

    Ok(User::from_parts(id, email, author_name, ui_theme))
}
