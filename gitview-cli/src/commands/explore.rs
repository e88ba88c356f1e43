//! Interactive explorer command

use std::sync::Arc;

use anyhow::Result;
use colored::*;
use gitview_core::explorer::Explorer;
use gitview_core::session::Route;
use tokio::io::BufReader;

use crate::config::Config;
use crate::driver::ExplorerDriver;

/// Run the explorer on stdin/stdout until the user quits or logs out
pub async fn explore(config: &Config) -> Result<()> {
    let client = config.client()?;
    let store = config.token_store();

    let driver = ExplorerDriver::new(
        Explorer::new(config.per_page),
        Arc::new(client),
        Arc::new(store),
    );

    println!("{}", "Type `help` for commands.".dimmed());
    match driver.run(BufReader::new(tokio::io::stdin())).await? {
        Route::Login => {
            println!("Run {} to sign in.", "gitview login".bold());
        }
        Route::Dashboard => {}
    }

    Ok(())
}
