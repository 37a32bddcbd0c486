//! Account commands.

use tracing::info;

use gameverse_storefront::models::{Notice, ProfileAction};

use super::{CliError, Shop, refuse, report};

/// Create an account.
///
/// # Errors
///
/// Returns an error if sign-up is refused.
pub fn signup(shop: &mut Shop, email: &str, password: &str) -> Result<(), CliError> {
    let outcome = shop.signup(email, password).map_err(refuse)?;
    report(&Notice::success(outcome.message));
    info!("Next: {}", outcome.destination);
    Ok(())
}

/// Sign in.
///
/// # Errors
///
/// Returns an error if the credentials do not match.
pub fn login(shop: &mut Shop, email: &str, password: &str) -> Result<(), CliError> {
    let outcome = shop.login(email, password).map_err(refuse)?;
    report(&Notice::success(outcome.message));
    info!("Next: {}", outcome.destination);
    Ok(())
}

/// Sign out.
///
/// # Errors
///
/// Returns an error if the session cannot be cleared.
pub fn logout(shop: &mut Shop) -> Result<(), CliError> {
    if let ProfileAction::ConfirmLogout { message, .. } = shop.profile_action() {
        info!("{message}");
    }
    let destination = shop.logout().map_err(refuse)?;
    info!("Signed out. Next: {destination}");
    Ok(())
}

/// Show the signed-in account.
pub fn whoami(shop: &Shop) {
    match shop.current_user() {
        Some(email) => info!("Signed in as {email}"),
        None => info!("Not signed in."),
    }
}
