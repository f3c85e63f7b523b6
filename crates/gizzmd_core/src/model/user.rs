//! User entity.
//!
//! # Invariants
//! - `id` and `email` are never changed through [`User::apply`].
//! - `ui_theme` defaults to light.

use crate::model::values::{AuthorName, Email, Id, UiTheme};

/// Immutable user profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: Id,
    email: Email,
    author_name: AuthorName,
    ui_theme: UiTheme,
}

/// Profile changes. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub author_name: Option<AuthorName>,
    pub ui_theme: Option<UiTheme>,
}

impl User {
    /// Registers a user with a fresh identity and the default theme.
    pub fn new(email: Email, author_name: AuthorName) -> Self {
        Self::from_parts(Id::generate(), email, author_name, UiTheme::default())
    }

    pub fn from_parts(id: Id, email: Email, author_name: AuthorName, ui_theme: UiTheme) -> Self {
        Self {
            id,
            email,
            author_name,
            ui_theme,
        }
    }

    pub fn apply(&self, changes: UserChanges) -> Self {
        Self {
            id: self.id,
            email: self.email.clone(),
            author_name: changes
                .author_name
                .unwrap_or_else(|| self.author_name.clone()),
            ui_theme: changes.ui_theme.unwrap_or(self.ui_theme),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn author_name(&self) -> &AuthorName {
        &self.author_name
    }

    pub fn ui_theme(&self) -> UiTheme {
        self.ui_theme
    }
}
