//! User profile use-case service.
//!
//! # Invariants
//! - Profile updates never change `id` or `email`.
//! - Absent or empty patch fields leave the stored value unchanged.

use crate::model::user::{User, UserChanges};
use crate::model::values::{AuthorName, Email, Id, UiTheme};
use crate::repo::user_repo::UserRepository;
use crate::service::{non_empty, ServiceResult};
use log::info;

/// Raw partial profile update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub author_name: Option<String>,
    pub ui_theme: Option<String>,
}

/// User service facade over a repository implementation.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get_user(&self, id: Id) -> ServiceResult<User> {
        Ok(self.repo.find_user(id)?)
    }

    /// Registers a new user. Fails when the email is already taken.
    pub fn register_user(&self, email: &str, author_name: &str) -> ServiceResult<User> {
        let user = User::new(Email::new(email)?, AuthorName::new(author_name)?);
        let saved = self.repo.save_user(&user)?;
        info!(
            "event=user_register module=service status=ok user_id={}",
            saved.id()
        );
        Ok(saved)
    }

    /// Returns the user registered under `email`, registering it with `id`
    /// and `author_name` when missing.
    pub fn ensure_user(&self, id: Id, email: &str, author_name: &str) -> ServiceResult<User> {
        let email = Email::new(email)?;
        if let Some(existing) = self.repo.find_user_by_email(&email)? {
            return Ok(existing);
        }

        let user = User::from_parts(id, email, AuthorName::new(author_name)?, UiTheme::default());
        let saved = self.repo.save_user(&user)?;
        info!(
            "event=user_seed module=service status=ok user_id={}",
            saved.id()
        );
        Ok(saved)
    }

    pub fn update_user(&self, id: Id, patch: &UserPatch) -> ServiceResult<User> {
        let changes = UserChanges {
            author_name: non_empty(patch.author_name.as_deref())
                .map(AuthorName::new)
                .transpose()?,
            ui_theme: non_empty(patch.ui_theme.as_deref())
                .map(UiTheme::parse)
                .transpose()?,
        };

        let current = self.repo.find_user(id)?;
        let saved = self.repo.save_user(&current.apply(changes))?;
        info!(
            "event=user_update module=service status=ok user_id={}",
            saved.id()
        );
        Ok(saved)
    }

    pub fn delete_user(&self, id: Id) -> ServiceResult<()> {
        self.repo.delete_user(id)?;
        Ok(())
    }
}
