//! Navigation intents.
//!
//! The storefront never navigates itself; it returns a [`Destination`] and the
//! page layer decides how to get there.

use serde::Serialize;

/// A page the storefront can ask to navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Home,
    Games,
    Signup,
    Login,
    Checkout,
}

impl Destination {
    /// The page path.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "index.html",
            Self::Games => "games.html",
            Self::Signup => "signup.html",
            Self::Login => "login.html",
            Self::Checkout => "checkout.html",
        }
    }

    /// Where a call-to-action button with this label leads, if anywhere.
    #[must_use]
    pub fn for_cta(label: &str) -> Option<Self> {
        if label.contains("Explore") {
            Some(Self::Games)
        } else if label.contains("Sign Up") {
            Some(Self::Signup)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// What the profile button does for the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum ProfileAction {
    /// Signed in: ask before logging out.
    ConfirmLogout { email: String, message: String },
    /// Signed out: go somewhere to sign up.
    Navigate { destination: Destination },
}

impl ProfileAction {
    /// The action for a session marker.
    #[must_use]
    pub fn for_session(current_user: Option<&str>) -> Self {
        match current_user {
            Some(email) => Self::ConfirmLogout {
                email: email.to_owned(),
                message: format!("Are you sure you want to log out from {email}?"),
            },
            None => Self::Navigate {
                destination: Destination::Signup,
            },
        }
    }
}
