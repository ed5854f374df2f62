//! Paginated user listing and per-user connection lookup.

use anyhow::Result;

use crate::client::ApiClient;
use crate::model::{Connection, User};
use crate::services::UserService;

/// A user the view selected, with the connections fetched for them.
#[derive(Debug, Clone)]
pub struct SelectedUser {
    pub user: User,
    pub connections: Vec<Connection>,
}

/// Owns the pagination cursor and the current page of users.
///
/// The cursor (`page_size`, `page_number`) changes only on explicit
/// setter calls; the listing refetches only on construction and
/// [`update_users`](UserController::update_users). Listing requests go
/// through the client directly; the per-user connection lookup goes
/// through [`UserService`].
#[derive(Debug)]
pub struct UserController {
    client: ApiClient,
    service: UserService,
    page_size: u32,
    page_number: u32,
    users: Vec<User>,
    selected: Option<SelectedUser>,
}

impl UserController {
    /// Build the controller and fetch the first page.
    pub fn new(client: ApiClient, service: UserService, page_size: u32) -> Result<Self> {
        let mut controller = Self {
            client,
            service,
            page_size,
            page_number: 0,
            users: Vec::new(),
            selected: None,
        };
        controller.fetch_users()?;
        Ok(controller)
    }

    /// Fetch the listing for the current cursor. `users` is overwritten
    /// only on success.
    fn fetch_users(&mut self) -> Result<()> {
        let users: Vec<User> = self.client.get_as(
            "api/users",
            &[
                ("size", self.page_size.to_string()),
                ("page", self.page_number.to_string()),
            ],
        )?;
        self.users = users;
        Ok(())
    }

    /// Re-run the listing with the current cursor. Called after the view
    /// mutates the page size or page number.
    pub fn update_users(&mut self) -> Result<()> {
        self.fetch_users()
    }

    pub fn set_page_size(&mut self, size: u32) {
        self.page_size = size;
    }

    pub fn set_page_number(&mut self, page: u32) {
        self.page_number = page;
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Fetch the user's connections and bind them to the `selected` slot.
    pub fn select_user(&mut self, user: &User) -> Result<&SelectedUser> {
        let connections = self.service.get_connections(&user.id)?;
        Ok(self.selected.insert(SelectedUser {
            user: user.clone(),
            connections,
        }))
    }

    pub fn selected(&self) -> Option<&SelectedUser> {
        self.selected.as_ref()
    }
}
