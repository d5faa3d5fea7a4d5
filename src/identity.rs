//! Resolves who the cart belongs to.
//!
//! Cart storage is namespaced by an identity token: `guest` when nobody is
//! signed in, otherwise the signed-in user's id. Guest and user carts live
//! under separate key prefixes, so a user whose id happens to be `guest`
//! still gets a cart of their own. Resolution is a pure read of
//! the auth collaborator and has no failure mode; absence of a user is the
//! guest outcome.
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub const GUEST_TOKEN: &str = "guest";
const GUEST_CART_KEY: &str = "cart_guest";
const USER_CART_KEY_PREFIX: &str = "cart_user_";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    Guest,
    User(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Read-only view of the current sign-in, supplied by the auth layer.
pub trait AuthState {
    fn current_user(&self) -> Option<AuthenticatedUser>;
}

/// Shared handle over the signed-in user. Clones observe the same session.
#[derive(Debug, Clone, Default)]
pub struct SessionAuth {
    user: Rc<RefCell<Option<AuthenticatedUser>>>,
}

impl Identity {
    pub fn token(&self) -> &str {
        match self {
            Self::Guest => GUEST_TOKEN,
            Self::User(id) => id,
        }
    }
    /// Storage key holding this identity's cart
    pub fn cart_key(&self) -> String {
        match self {
            Self::Guest => GUEST_CART_KEY.to_string(),
            Self::User(id) => format!("{USER_CART_KEY_PREFIX}{id}"),
        }
    }
    pub fn is_guest(&self) -> bool {
        matches!(self, Self::Guest)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl AuthenticatedUser {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Guest unless a user with a non-blank id is signed in.
pub fn current_identity<A: AuthState + ?Sized>(auth: &A) -> Identity {
    match auth.current_user() {
        Some(user) if !user.id.trim().is_empty() => Identity::User(user.id.trim().to_string()),
        _ => Identity::Guest,
    }
}

impl SessionAuth {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn login(&self, user: AuthenticatedUser) {
        *self.user.borrow_mut() = Some(user);
    }
    pub fn logout(&self) {
        self.user.borrow_mut().take();
    }
}

impl AuthState for SessionAuth {
    fn current_user(&self) -> Option<AuthenticatedUser> {
        self.user.borrow().clone()
    }
}

impl AuthState for Option<AuthenticatedUser> {
    fn current_user(&self) -> Option<AuthenticatedUser> {
        self.clone()
    }
}

impl<A: AuthState + ?Sized> AuthState for &A {
    fn current_user(&self) -> Option<AuthenticatedUser> {
        (**self).current_user()
    }
}
