//! Session command handlers
//!
//! Login, logout and the authenticated user's profile.

use anyhow::{Context, Result};
use colored::*;
use gitview_core::session::{self, TokenStore};

use super::require_token;
use crate::config::Config;
use crate::render::UserView;

/// Store a token, or print the URL that hands one out
pub fn login(config: &Config, token: Option<String>) -> Result<()> {
    let store = config.token_store();

    match token {
        Some(token) => {
            store.store(&token).context("Failed to store token")?;
            println!("{}", "✓ Token stored.".green().bold());
            println!("  File: {}", store.path().display().to_string().dimmed());
        }
        None => {
            let client = config.client()?;
            println!("Open this URL in a browser to install the app and sign in:");
            println!("  {}", client.login_url().cyan());
            println!();
            println!(
                "Then run {} with the token from the redirect.",
                "gitview login --token <TOKEN>".bold()
            );
        }
    }

    Ok(())
}

/// Forget the stored token
pub fn logout(config: &Config) -> Result<()> {
    let store = config.token_store();
    session::logout(&store).context("Failed to clear token")?;
    println!("{}", "Logged out.".green());
    Ok(())
}

/// Show the profile of the token's account
pub async fn whoami(config: &Config) -> Result<()> {
    let store = config.token_store();
    let token = require_token(&store)?;
    let client = config.client()?;

    let user = client
        .get_user(&token)
        .await
        .context("Failed to fetch user profile")?;
    print!("{}", UserView(&user));

    Ok(())
}
