//! Interactive explorer driver
//!
//! Owns the explorer state on a single task. Fetches run as independent
//! tokio tasks and report back over a channel; user commands arrive as
//! lines on the input reader. Both are multiplexed with `select!`, so state
//! is only ever touched from this loop.

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::*;
use gitview_client::{ClientError, RepoSource};
use gitview_core::domain::repository::RepoId;
use gitview_core::explorer::{Completion, Explorer, Fetch, Target};
use gitview_core::session::{self, Route, TokenStore};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::render::{ExplorerView, HELP};

/// A line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerCommand {
    Expand(String),
    Branch(String, String),
    Page(u32),
    Next,
    Prev,
    Retry,
    Refresh,
    Logout,
    Help,
    Quit,
}

impl FromStr for ExplorerCommand {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = words.collect();

        match (command.as_str(), args.as_slice()) {
            ("expand" | "e" | "toggle", [repo]) => Ok(Self::Expand(repo.to_string())),
            ("branch" | "b", [repo, branch]) => {
                Ok(Self::Branch(repo.to_string(), branch.to_string()))
            }
            ("page" | "p", [page]) => page
                .parse()
                .map(Self::Page)
                .map_err(|_| format!("'{}' is not a page number", page)),
            ("next" | "n", []) => Ok(Self::Next),
            ("prev" | "previous", []) => Ok(Self::Prev),
            ("retry", []) => Ok(Self::Retry),
            ("refresh" | "r", []) => Ok(Self::Refresh),
            ("logout", []) => Ok(Self::Logout),
            ("help" | "h" | "?", []) => Ok(Self::Help),
            ("quit" | "q" | "exit", []) => Ok(Self::Quit),
            _ => Err(format!("Unknown command '{}'. Type `help`.", line.trim())),
        }
    }
}

/// What the loop does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
    LoggedOut,
}

/// Runs the explorer against a repository source
pub struct ExplorerDriver {
    explorer: Explorer,
    source: Arc<dyn RepoSource>,
    store: Arc<dyn TokenStore>,
    token: String,
    auth_rejected: bool,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl ExplorerDriver {
    pub fn new(
        explorer: Explorer,
        source: Arc<dyn RepoSource>,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            explorer,
            source,
            store,
            token: String::new(),
            auth_rejected: false,
            completions_tx,
            completions_rx,
        }
    }

    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    /// Gates on the stored token and requests the first page
    pub fn mount(&mut self) -> Route {
        match self.explorer.mount(self.store.as_ref()) {
            Ok(fetch) => {
                self.token = self.store.current_token().unwrap_or_default();
                self.dispatch([fetch]);
                Route::Dashboard
            }
            Err(_) => Route::Login,
        }
    }

    /// Main loop; returns the route to continue on
    pub async fn run<R>(mut self, input: R) -> Result<Route>
    where
        R: AsyncBufRead + Unpin,
    {
        if self.mount() == Route::Login {
            return Ok(Route::Login);
        }
        info!("Explorer mounted");
        self.print();

        let mut lines = input.lines();
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read command")? else {
                        return Ok(Route::Dashboard);
                    };
                    if line.trim().is_empty() {
                        continue;
                    }
                    match line.parse::<ExplorerCommand>() {
                        Ok(command) => match self.handle_command(command) {
                            Ok(Flow::Continue) => self.print(),
                            Ok(Flow::Quit) => return Ok(Route::Dashboard),
                            Ok(Flow::LoggedOut) => return Ok(Route::Login),
                            Err(e) => eprintln!("{}", format!("{:#}", e).red()),
                        },
                        Err(message) => eprintln!("{}", message.red()),
                    }
                }
                Some(completion) = self.completions_rx.recv() => {
                    if self.apply(completion) {
                        self.print();
                    }
                }
            }
        }
    }

    /// Executes one user command
    pub fn handle_command(&mut self, command: ExplorerCommand) -> Result<Flow> {
        match command {
            ExplorerCommand::Expand(selector) => {
                let id = self.resolve(&selector)?;
                let fetches = self.explorer.toggle_expand(id)?;
                self.dispatch(fetches);
            }
            ExplorerCommand::Branch(selector, branch) => {
                let id = self.resolve(&selector)?;
                let fetch = self.explorer.select_branch(id, &branch)?;
                self.dispatch([fetch]);
            }
            ExplorerCommand::Page(page) => {
                let fetch = self.explorer.change_page(page)?;
                self.dispatch([fetch]);
            }
            ExplorerCommand::Next => {
                let fetch = self.explorer.next_page()?;
                self.dispatch([fetch]);
            }
            ExplorerCommand::Prev => {
                let fetch = self.explorer.prev_page()?;
                self.dispatch([fetch]);
            }
            ExplorerCommand::Retry => {
                let fetch = self.explorer.retry();
                self.dispatch([fetch]);
            }
            ExplorerCommand::Refresh => {}
            ExplorerCommand::Help => println!("{}", HELP),
            ExplorerCommand::Logout => {
                session::logout(self.store.as_ref()).context("Failed to clear token")?;
                println!("{}", "Logged out.".green());
                return Ok(Flow::LoggedOut);
            }
            ExplorerCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Waits for the next finished fetch
    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.completions_rx.recv().await
    }

    /// Applies a finished fetch
    ///
    /// Returns `false` when the result was stale and changed nothing.
    pub fn apply(&mut self, completion: Completion) -> bool {
        let ticket = completion.ticket();
        let unauthorized = match &completion {
            Completion::RepoPage(_, Err(err)) => err
                .downcast_ref::<ClientError>()
                .is_some_and(ClientError::is_unauthorized),
            _ => false,
        };

        let applied = self.explorer.apply(completion);
        if applied && ticket.target() == Target::RepoList {
            self.auth_rejected = unauthorized;
        }
        applied
    }

    /// Whether the last repository list failure was an auth rejection
    pub fn auth_rejected(&self) -> bool {
        self.auth_rejected
    }

    fn dispatch(&self, fetches: impl IntoIterator<Item = Fetch>) {
        for fetch in fetches {
            let source = Arc::clone(&self.source);
            let token = self.token.clone();
            let tx = self.completions_tx.clone();

            tokio::spawn(async move {
                let completion = run_fetch(source.as_ref(), &token, fetch).await;
                if tx.send(completion).is_err() {
                    debug!("Explorer closed before fetch completed");
                }
            });
        }
    }

    fn resolve(&self, selector: &str) -> Result<RepoId> {
        let id = match selector.parse::<usize>() {
            Ok(position) => self.explorer.id_at(position),
            Err(_) => self.explorer.id_by_name(selector),
        };
        id.with_context(|| format!("No repository '{}' on this page", selector))
    }

    fn print(&self) {
        println!("{}", ExplorerView(&self.explorer));
        if self.auth_rejected && self.explorer.error().is_some() {
            println!(
                "{}",
                "The backend rejected your token. Run `logout`, then `gitview login`.".yellow()
            );
        }
    }
}

/// Performs one fetch and wraps the result for the explorer
pub async fn run_fetch(source: &dyn RepoSource, token: &str, fetch: Fetch) -> Completion {
    match fetch {
        Fetch::RepoPage {
            ticket,
            page,
            per_page,
        } => Completion::RepoPage(
            ticket,
            source
                .list_repositories(token, page, per_page)
                .await
                .map_err(anyhow::Error::from),
        ),
        Fetch::Branches {
            ticket,
            owner,
            repo,
        } => Completion::Branches(
            ticket,
            source
                .list_branches(token, &owner, &repo)
                .await
                .map_err(anyhow::Error::from),
        ),
        Fetch::Commits {
            ticket,
            owner,
            repo,
            branch,
        } => Completion::Commits(
            ticket,
            source
                .list_commits(token, &owner, &repo, &branch)
                .await
                .map_err(anyhow::Error::from),
        ),
    }
}
