//! Repository explorer
//!
//! View-state for the paginated repository list and the lazily loaded
//! branches and commits of each repository.
//!
//! The explorer performs no I/O. Operations return the [`Fetch`]es the
//! caller has to run, and the caller hands results back through
//! [`Explorer::apply`] tagged with the fetch's [`Ticket`]. Results carrying
//! a superseded ticket are dropped, so the last *requested* fetch wins
//! rather than the last one to resolve.

mod entry;
mod ticket;

pub use entry::RepoEntry;
pub use ticket::{Target, Ticket, TicketBook};

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::branch::{Branch, pick_default_branch};
use crate::domain::commit::Commit;
use crate::domain::page::{RepoPage, RepoStats};
use crate::domain::repository::RepoId;
use crate::session::{TokenStore, is_authenticated};

/// Repositories per page when nothing else is configured
pub const DEFAULT_PER_PAGE: u32 = 6;

/// Message shown when the repository list cannot be loaded
pub const LIST_ERROR_MESSAGE: &str = "Failed to load repositories. Please try again later.";

/// Errors for explorer operations the caller asked for
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExplorerError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Page {page} is out of range (1..={total_pages})")]
    PageOutOfRange { page: u32, total_pages: u32 },

    #[error("Repository {0} is not on the current page")]
    UnknownRepository(RepoId),

    #[error("Branch '{branch}' does not exist in {repo}")]
    UnknownBranch { repo: String, branch: String },
}

pub type Result<T> = std::result::Result<T, ExplorerError>;

/// A request the caller must perform on the explorer's behalf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetch {
    RepoPage {
        ticket: Ticket,
        page: u32,
        per_page: u32,
    },
    Branches {
        ticket: Ticket,
        owner: String,
        repo: String,
    },
    Commits {
        ticket: Ticket,
        owner: String,
        repo: String,
        branch: String,
    },
}

impl Fetch {
    pub fn ticket(&self) -> Ticket {
        match self {
            Fetch::RepoPage { ticket, .. }
            | Fetch::Branches { ticket, .. }
            | Fetch::Commits { ticket, .. } => *ticket,
        }
    }
}

/// Outcome of a [`Fetch`], tagged with its ticket
#[derive(Debug)]
pub enum Completion {
    RepoPage(Ticket, anyhow::Result<RepoPage>),
    Branches(Ticket, anyhow::Result<Vec<Branch>>),
    Commits(Ticket, anyhow::Result<Vec<Commit>>),
}

impl Completion {
    pub fn ticket(&self) -> Ticket {
        match self {
            Completion::RepoPage(ticket, _)
            | Completion::Branches(ticket, _)
            | Completion::Commits(ticket, _) => *ticket,
        }
    }
}

/// View-state of the repository explorer
#[derive(Debug)]
pub struct Explorer {
    per_page: u32,
    current_page: u32,
    total_pages: u32,
    stats: RepoStats,
    loading: bool,
    error: Option<String>,
    /// Ids on the current page, in server order
    page: Vec<RepoId>,
    /// Every repository seen so far; caches outlive page changes
    entries: HashMap<RepoId, RepoEntry>,
    tickets: TicketBook,
}

impl Explorer {
    pub fn new(per_page: u32) -> Self {
        Self {
            per_page: per_page.max(1),
            current_page: 1,
            total_pages: 1,
            stats: RepoStats::default(),
            loading: false,
            error: None,
            page: Vec::new(),
            entries: HashMap::new(),
            tickets: TicketBook::default(),
        }
    }

    // =============================================================================
    // Repository list
    // =============================================================================

    /// Starts the explorer for a caller
    ///
    /// Fails with [`ExplorerError::Unauthenticated`] when no token is stored;
    /// the caller should route to login instead.
    pub fn mount(&mut self, store: &dyn TokenStore) -> Result<Fetch> {
        if !is_authenticated(store) {
            return Err(ExplorerError::Unauthenticated);
        }
        Ok(self.load_page(self.current_page))
    }

    /// Requests a page of repositories
    ///
    /// The previous page is taken off screen until the new one arrives, so
    /// nothing on it can be expanded or switched meanwhile.
    pub fn load_page(&mut self, page: u32) -> Fetch {
        self.current_page = page;
        self.loading = true;
        self.error = None;
        self.page.clear();

        let ticket = self.tickets.issue(Target::RepoList);
        debug!("Requesting repository page {} ({} per page)", page, self.per_page);

        Fetch::RepoPage {
            ticket,
            page,
            per_page: self.per_page,
        }
    }

    /// Moves to another page, collapsing every repository
    pub fn change_page(&mut self, page: u32) -> Result<Fetch> {
        if page == 0 || page > self.total_pages {
            return Err(ExplorerError::PageOutOfRange {
                page,
                total_pages: self.total_pages,
            });
        }

        for entry in self.entries.values_mut() {
            entry.expanded = false;
        }

        Ok(self.load_page(page))
    }

    pub fn next_page(&mut self) -> Result<Fetch> {
        self.change_page(self.current_page + 1)
    }

    pub fn prev_page(&mut self) -> Result<Fetch> {
        self.change_page(self.current_page.saturating_sub(1))
    }

    /// Re-issues the request for the current page
    pub fn retry(&mut self) -> Fetch {
        self.load_page(self.current_page)
    }

    // =============================================================================
    // Expand / branch switch
    // =============================================================================

    /// Flips a repository between expanded and collapsed
    ///
    /// Expanding fetches whatever is not cached yet, unless a request for it
    /// is already in flight. Collapsing never fetches.
    pub fn toggle_expand(&mut self, id: RepoId) -> Result<Vec<Fetch>> {
        if !self.page.contains(&id) {
            return Err(ExplorerError::UnknownRepository(id));
        }
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(ExplorerError::UnknownRepository(id))?;

        if entry.expanded {
            entry.expanded = false;
            return Ok(Vec::new());
        }
        entry.expanded = true;

        let mut fetches = Vec::new();
        if entry.needs_branches() && !self.tickets.in_flight(Target::Branches(id)) {
            fetches.push(branches_fetch(&mut self.tickets, entry));
        }
        if entry.needs_commits() && !self.tickets.in_flight(Target::Commits(id)) {
            let branch = entry.commit_branch().to_string();
            fetches.push(commits_fetch(&mut self.tickets, entry, branch));
        }

        Ok(fetches)
    }

    /// Selects a branch and re-fetches its commits
    ///
    /// Always fetches, whatever is cached. Any older commit request for the
    /// repository loses its right to write back.
    pub fn select_branch(&mut self, id: RepoId, branch: &str) -> Result<Fetch> {
        if !self.page.contains(&id) {
            return Err(ExplorerError::UnknownRepository(id));
        }
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(ExplorerError::UnknownRepository(id))?;

        let known = entry.branches.as_ref().is_some_and(|b| !b.is_empty());
        if known && !entry.has_branch(branch) {
            return Err(ExplorerError::UnknownBranch {
                repo: entry.full_name(),
                branch: branch.to_string(),
            });
        }

        entry.selected_branch = Some(branch.to_string());
        Ok(commits_fetch(&mut self.tickets, entry, branch.to_string()))
    }

    // =============================================================================
    // Completions
    // =============================================================================

    /// Applies a finished fetch
    ///
    /// Returns `false` when the result was stale and changed nothing.
    pub fn apply(&mut self, completion: Completion) -> bool {
        let ticket = completion.ticket();
        if !self.tickets.redeem(ticket) {
            debug!("Dropping stale result for {:?}", ticket.target());
            return false;
        }

        match (completion, ticket.target()) {
            (Completion::RepoPage(_, result), Target::RepoList) => self.apply_repo_page(result),
            (Completion::Branches(_, result), Target::Branches(id)) => {
                self.apply_branches(id, result)
            }
            (Completion::Commits(_, result), Target::Commits(id)) => self.apply_commits(id, result),
            (_, target) => warn!("Completion does not match its ticket target {:?}", target),
        }
        true
    }

    fn apply_repo_page(&mut self, result: anyhow::Result<RepoPage>) {
        self.loading = false;

        let page = match result {
            Ok(page) => page,
            Err(err) => {
                warn!("Failed to fetch repositories: {:#}", err);
                self.error = Some(LIST_ERROR_MESSAGE.to_string());
                self.page.clear();
                return;
            }
        };

        info!(
            "Loaded page {} of {} ({} repositories)",
            self.current_page,
            page.total_pages,
            page.repositories.len()
        );

        self.error = None;
        self.total_pages = page.total_pages.max(1);
        self.stats = page.stats;
        self.page = page.repositories.iter().map(|repo| repo.id).collect();

        for repo in page.repositories {
            match self.entries.entry(repo.id) {
                Entry::Occupied(mut occupied) => occupied.get_mut().refresh(repo),
                Entry::Vacant(vacant) => {
                    vacant.insert(RepoEntry::new(repo));
                }
            }
        }
    }

    /// Caches the branch list and resolves the selection
    ///
    /// Commits are not re-requested here: they were fetched for the fallback
    /// branch on expand and are only fetched again on an explicit switch.
    fn apply_branches(&mut self, id: RepoId, result: anyhow::Result<Vec<Branch>>) {
        let Some(entry) = self.entries.get_mut(&id) else {
            return;
        };
        entry.branch_loading = false;

        let branches = match result {
            Ok(branches) => branches,
            Err(err) => {
                warn!("Failed to fetch branches for {}: {:#}", entry.full_name(), err);
                return;
            }
        };

        debug!("Fetched {} branches for {}", branches.len(), entry.full_name());

        let keep_selection = entry
            .selected_branch
            .as_deref()
            .is_some_and(|selected| branches.iter().any(|b| b.name == selected));
        if !keep_selection {
            entry.selected_branch = pick_default_branch(&branches).map(str::to_string);
        }
        entry.branches = Some(branches);
    }

    fn apply_commits(&mut self, id: RepoId, result: anyhow::Result<Vec<Commit>>) {
        let Some(entry) = self.entries.get_mut(&id) else {
            return;
        };
        entry.commit_loading = false;

        match result {
            Ok(commits) => {
                debug!(
                    "Fetched {} commits for {} on {}",
                    commits.len(),
                    entry.full_name(),
                    entry.commit_branch()
                );
                entry.commits = Some(commits);
            }
            Err(err) => {
                warn!("Failed to fetch commits for {}: {:#}", entry.full_name(), err);
                entry.commits = Some(Vec::new());
            }
        }
    }

    // =============================================================================
    // Accessors
    // =============================================================================

    /// Repositories on the current page, in server order
    pub fn repositories(&self) -> impl Iterator<Item = &RepoEntry> {
        self.page.iter().filter_map(|id| self.entries.get(id))
    }

    pub fn entry(&self, id: RepoId) -> Option<&RepoEntry> {
        self.entries.get(&id)
    }

    /// Id of the repository at a 1-based position on the current page
    pub fn id_at(&self, position: usize) -> Option<RepoId> {
        position
            .checked_sub(1)
            .and_then(|index| self.page.get(index))
            .copied()
    }

    /// Id of the repository with this name on the current page
    pub fn id_by_name(&self, name: &str) -> Option<RepoId> {
        self.repositories()
            .find(|entry| entry.name == name || entry.full_name() == name)
            .map(|entry| entry.id)
    }

    pub fn stats(&self) -> RepoStats {
        self.stats
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new(DEFAULT_PER_PAGE)
    }
}

fn branches_fetch(tickets: &mut TicketBook, entry: &mut RepoEntry) -> Fetch {
    entry.branch_loading = true;
    Fetch::Branches {
        ticket: tickets.issue(Target::Branches(entry.id)),
        owner: entry.owner.clone(),
        repo: entry.name.clone(),
    }
}

fn commits_fetch(tickets: &mut TicketBook, entry: &mut RepoEntry, branch: String) -> Fetch {
    entry.commit_loading = true;
    entry.commits_branch = Some(branch.clone());
    Fetch::Commits {
        ticket: tickets.issue(Target::Commits(entry.id)),
        owner: entry.owner.clone(),
        repo: entry.name.clone(),
        branch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::{Repository, Visibility};
    use crate::session::MemoryTokenStore;
    use chrono::{TimeZone, Utc};

    fn repo(id: RepoId, name: &str) -> Repository {
        Repository {
            id,
            name: name.to_string(),
            visibility: Visibility::from_private_flag(id % 2 == 0),
            owner: "octo".to_string(),
        }
    }

    fn page_of(repos: Vec<Repository>, total_pages: u32) -> RepoPage {
        let private = repos.iter().filter(|r| r.visibility.is_private()).count() as u64;
        let total = repos.len() as u64;
        RepoPage {
            repositories: repos,
            stats: RepoStats {
                total,
                public: total - private,
                private,
            },
            current_page: 1,
            total_pages,
        }
    }

    fn branches(names: &[&str]) -> Vec<Branch> {
        names
            .iter()
            .map(|name| Branch {
                name: name.to_string(),
                head_sha: format!("{}-head", name),
            })
            .collect()
    }

    fn commits(messages: &[&str]) -> Vec<Commit> {
        messages
            .iter()
            .map(|message| Commit {
                sha: None,
                message: message.to_string(),
                author: "Ada".to_string(),
                timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            })
            .collect()
    }

    /// Explorer with one loaded page of `repos`
    fn loaded(repos: Vec<Repository>, total_pages: u32) -> Explorer {
        let mut explorer = Explorer::default();
        let fetch = explorer.load_page(1);
        explorer.apply(Completion::RepoPage(
            fetch.ticket(),
            Ok(page_of(repos, total_pages)),
        ));
        explorer
    }

    fn commit_fetch_parts(fetch: &Fetch) -> (Ticket, &str) {
        match fetch {
            Fetch::Commits { ticket, branch, .. } => (*ticket, branch.as_str()),
            other => panic!("expected commit fetch, got {:?}", other),
        }
    }

    #[test]
    fn test_mount_requires_token() {
        let mut explorer = Explorer::default();
        let store = MemoryTokenStore::new();
        assert_eq!(explorer.mount(&store), Err(ExplorerError::Unauthenticated));
        assert!(!explorer.is_loading());
    }

    #[test]
    fn test_mount_requests_first_page() {
        let mut explorer = Explorer::default();
        let store = MemoryTokenStore::with_token("ghs_abc");

        let fetch = explorer.mount(&store).unwrap();
        assert!(matches!(
            fetch,
            Fetch::RepoPage {
                page: 1,
                per_page: DEFAULT_PER_PAGE,
                ..
            }
        ));
        assert!(explorer.is_loading());
    }

    #[test]
    fn test_page_result_replaces_state() {
        let explorer = loaded(vec![repo(1, "alpha"), repo(2, "beta")], 3);

        assert!(!explorer.is_loading());
        assert_eq!(explorer.error(), None);
        assert_eq!(explorer.total_pages(), 3);
        assert_eq!(explorer.stats().total, 2);
        assert_eq!(explorer.stats().private, 1);
        let names: Vec<_> = explorer.repositories().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["alpha", "beta"]);
        assert!(explorer.repositories().count() <= explorer.per_page() as usize);
    }

    #[test]
    fn test_list_failure_shows_error_and_retry_repeats_request() {
        let mut explorer = loaded(vec![repo(1, "alpha")], 2);
        let fetch = explorer.change_page(2).unwrap();
        explorer.apply(Completion::RepoPage(
            fetch.ticket(),
            Err(anyhow::anyhow!("connection refused")),
        ));

        assert_eq!(explorer.error(), Some(LIST_ERROR_MESSAGE));
        assert_eq!(explorer.repositories().count(), 0);
        assert!(!explorer.is_loading());

        let retry = explorer.retry();
        assert!(matches!(
            retry,
            Fetch::RepoPage {
                page: 2,
                per_page: DEFAULT_PER_PAGE,
                ..
            }
        ));
        assert_eq!(explorer.error(), None);
        assert!(explorer.is_loading());
    }

    #[test]
    fn test_first_expand_fetches_branches_and_commits_once() {
        let mut explorer = loaded(vec![repo(1, "alpha")], 1);

        let fetches = explorer.toggle_expand(1).unwrap();
        assert_eq!(fetches.len(), 2);
        assert!(matches!(
            &fetches[0],
            Fetch::Branches { repo, owner, .. } if repo == "alpha" && owner == "octo"
        ));
        assert_eq!(commit_fetch_parts(&fetches[1]).1, "main");

        let entry = explorer.entry(1).unwrap();
        assert!(entry.expanded && entry.branch_loading && entry.commit_loading);

        explorer.apply(Completion::Branches(
            fetches[0].ticket(),
            Ok(branches(&["dev", "main", "master"])),
        ));
        explorer.apply(Completion::Commits(
            fetches[1].ticket(),
            Ok(commits(&["one"])),
        ));

        // Collapse and expand again: everything is cached
        assert!(explorer.toggle_expand(1).unwrap().is_empty());
        assert!(!explorer.entry(1).unwrap().expanded);
        assert!(explorer.toggle_expand(1).unwrap().is_empty());
        assert!(explorer.entry(1).unwrap().expanded);
    }

    #[test]
    fn test_reexpand_while_in_flight_does_not_duplicate() {
        let mut explorer = loaded(vec![repo(1, "alpha")], 1);

        assert_eq!(explorer.toggle_expand(1).unwrap().len(), 2);
        assert!(explorer.toggle_expand(1).unwrap().is_empty());
        assert!(explorer.toggle_expand(1).unwrap().is_empty());
    }

    #[test]
    fn test_default_branch_is_main_when_present() {
        let mut explorer = loaded(vec![repo(1, "alpha")], 1);
        let fetches = explorer.toggle_expand(1).unwrap();

        assert!(explorer.apply(Completion::Branches(
            fetches[0].ticket(),
            Ok(branches(&["dev", "main", "master"])),
        )));

        let entry = explorer.entry(1).unwrap();
        assert_eq!(entry.selected_branch.as_deref(), Some("main"));
        assert!(!entry.branch_loading);
    }

    #[test]
    fn test_default_branch_falls_back_to_first() {
        let mut explorer = loaded(vec![repo(1, "alpha")], 1);
        let fetches = explorer.toggle_expand(1).unwrap();
        assert_eq!(fetches.len(), 2);

        explorer.apply(Completion::Branches(
            fetches[0].ticket(),
            Ok(branches(&["dev", "feature"])),
        ));
        explorer.apply(Completion::Commits(
            fetches[1].ticket(),
            Ok(commits(&["from main"])),
        ));

        let entry = explorer.entry(1).unwrap();
        assert_eq!(entry.selected_branch.as_deref(), Some("dev"));
        // The expand request for the fallback branch is the only one
        assert!(!entry.commit_loading);
        assert_eq!(entry.commits_branch.as_deref(), Some("main"));
        assert_eq!(entry.commits.as_ref().unwrap()[0].message, "from main");

        // Switching to the resolved default fetches it explicitly
        let fetch = explorer.select_branch(1, "dev").unwrap();
        assert_eq!(commit_fetch_parts(&fetch).1, "dev");
    }

    #[test]
    fn test_branch_switch_always_refetches_and_overwrites() {
        let mut explorer = loaded(vec![repo(1, "alpha")], 1);
        let fetches = explorer.toggle_expand(1).unwrap();
        explorer.apply(Completion::Branches(
            fetches[0].ticket(),
            Ok(branches(&["main", "dev"])),
        ));
        explorer.apply(Completion::Commits(
            fetches[1].ticket(),
            Ok(commits(&["on main"])),
        ));

        let fetch = explorer.select_branch(1, "dev").unwrap();
        let (ticket, branch) = commit_fetch_parts(&fetch);
        assert_eq!(branch, "dev");
        assert!(explorer.entry(1).unwrap().commit_loading);

        explorer.apply(Completion::Commits(ticket, Ok(commits(&["on dev", "older"]))));
        let entry = explorer.entry(1).unwrap();
        assert_eq!(entry.selected_branch.as_deref(), Some("dev"));
        assert_eq!(entry.commits.as_ref().unwrap().len(), 2);
        assert!(!entry.commit_loading);

        // Selecting the same branch again still fetches
        assert!(explorer.select_branch(1, "dev").is_ok());
    }

    #[test]
    fn test_out_of_order_branch_switch_keeps_latest() {
        let mut explorer = loaded(vec![repo(1, "alpha")], 1);
        let fetches = explorer.toggle_expand(1).unwrap();
        explorer.apply(Completion::Branches(
            fetches[0].ticket(),
            Ok(branches(&["main", "a", "b"])),
        ));

        let first = explorer.select_branch(1, "a").unwrap();
        let second = explorer.select_branch(1, "b").unwrap();

        explorer.apply(Completion::Commits(second.ticket(), Ok(commits(&["on b"]))));
        explorer.apply(Completion::Commits(first.ticket(), Ok(commits(&["on a"]))));
        explorer.apply(Completion::Commits(
            fetches[1].ticket(),
            Ok(commits(&["on main"])),
        ));

        let entry = explorer.entry(1).unwrap();
        assert_eq!(entry.commits.as_ref().unwrap()[0].message, "on b");
        assert_eq!(entry.selected_branch.as_deref(), Some("b"));
        assert!(!entry.commit_loading);
    }

    #[test]
    fn test_unknown_branch_rejected() {
        let mut explorer = loaded(vec![repo(1, "alpha")], 1);
        let fetches = explorer.toggle_expand(1).unwrap();
        explorer.apply(Completion::Branches(
            fetches[0].ticket(),
            Ok(branches(&["main"])),
        ));

        assert!(matches!(
            explorer.select_branch(1, "nope"),
            Err(ExplorerError::UnknownBranch { .. })
        ));
        assert_eq!(
            explorer.select_branch(42, "main"),
            Err(ExplorerError::UnknownRepository(42))
        );
    }

    #[test]
    fn test_commit_failure_degrades_to_empty_and_is_not_retried() {
        let mut explorer = loaded(vec![repo(1, "alpha")], 1);
        let fetches = explorer.toggle_expand(1).unwrap();
        explorer.apply(Completion::Branches(
            fetches[0].ticket(),
            Ok(branches(&["main"])),
        ));
        explorer.apply(Completion::Commits(
            fetches[1].ticket(),
            Err(anyhow::anyhow!("502 Bad Gateway")),
        ));

        let entry = explorer.entry(1).unwrap();
        assert_eq!(entry.commits.as_deref(), Some(&[][..]));
        assert!(!entry.commit_loading);

        explorer.toggle_expand(1).unwrap();
        assert!(explorer.toggle_expand(1).unwrap().is_empty());
    }

    #[test]
    fn test_branch_failure_stays_refetch_eligible() {
        let mut explorer = loaded(vec![repo(1, "alpha")], 1);
        let fetches = explorer.toggle_expand(1).unwrap();
        explorer.apply(Completion::Branches(
            fetches[0].ticket(),
            Err(anyhow::anyhow!("timeout")),
        ));
        explorer.apply(Completion::Commits(fetches[1].ticket(), Ok(commits(&["x"]))));

        let entry = explorer.entry(1).unwrap();
        assert!(entry.branches.is_none());
        assert!(!entry.branch_loading);
        assert_eq!(entry.selected_branch, None);

        explorer.toggle_expand(1).unwrap();
        let again = explorer.toggle_expand(1).unwrap();
        assert_eq!(again.len(), 1);
        assert!(matches!(again[0], Fetch::Branches { .. }));
    }

    #[test]
    fn test_empty_branch_list_leaves_unselected() {
        let mut explorer = loaded(vec![repo(1, "alpha")], 1);
        let fetches = explorer.toggle_expand(1).unwrap();
        explorer.apply(Completion::Branches(fetches[0].ticket(), Ok(Vec::new())));

        let entry = explorer.entry(1).unwrap();
        assert_eq!(entry.selected_branch, None);
        assert!(!entry.commit_loading);
    }

    #[test]
    fn test_change_page_collapses_and_keeps_caches() {
        let mut explorer = loaded(vec![repo(1, "alpha"), repo(2, "beta")], 2);
        let fetches = explorer.toggle_expand(1).unwrap();
        explorer.apply(Completion::Branches(
            fetches[0].ticket(),
            Ok(branches(&["main"])),
        ));
        explorer.apply(Completion::Commits(fetches[1].ticket(), Ok(commits(&["x"]))));
        explorer.toggle_expand(2).unwrap();

        let fetch = explorer.change_page(2).unwrap();
        assert!(matches!(fetch, Fetch::RepoPage { page: 2, .. }));
        assert_eq!(explorer.current_page(), 2);
        assert!(explorer.entry(1).unwrap().branches.is_some());
        assert!(!explorer.entry(1).unwrap().expanded);
        assert!(!explorer.entry(2).unwrap().expanded);

        explorer.apply(Completion::RepoPage(
            fetch.ticket(),
            Ok(page_of(vec![repo(3, "gamma")], 2)),
        ));
        assert!(explorer.repositories().all(|entry| !entry.expanded));

        // Back on page 1 the cached repository expands without fetching
        let fetch = explorer.prev_page().unwrap();
        explorer.apply(Completion::RepoPage(
            fetch.ticket(),
            Ok(page_of(vec![repo(1, "alpha"), repo(2, "beta")], 2)),
        ));
        assert!(explorer.toggle_expand(1).unwrap().is_empty());
    }

    #[test]
    fn test_old_page_is_inert_while_next_loads() {
        let mut explorer = loaded(vec![repo(1, "alpha")], 2);

        let fetch = explorer.change_page(2).unwrap();
        assert_eq!(explorer.repositories().count(), 0);
        assert_eq!(explorer.id_at(1), None);
        assert_eq!(
            explorer.toggle_expand(1),
            Err(ExplorerError::UnknownRepository(1))
        );
        assert_eq!(
            explorer.select_branch(1, "main"),
            Err(ExplorerError::UnknownRepository(1))
        );

        explorer.apply(Completion::RepoPage(
            fetch.ticket(),
            Ok(page_of(vec![repo(3, "gamma")], 2)),
        ));
        assert!(!explorer.entry(1).unwrap().expanded);
        assert!(!explorer.entry(1).unwrap().branch_loading);
        assert!(explorer.repositories().all(|entry| !entry.expanded));
    }

    #[test]
    fn test_page_bounds() {
        let mut explorer = loaded(vec![repo(1, "alpha")], 2);

        assert_eq!(
            explorer.change_page(0),
            Err(ExplorerError::PageOutOfRange {
                page: 0,
                total_pages: 2
            })
        );
        assert!(explorer.change_page(3).is_err());
        assert!(explorer.prev_page().is_err());
        assert!(explorer.next_page().is_ok());
    }

    #[test]
    fn test_stale_page_result_is_dropped() {
        let mut explorer = loaded(vec![repo(1, "alpha")], 3);

        let slow = explorer.change_page(2).unwrap();
        let fast = explorer.change_page(3).unwrap();

        explorer.apply(Completion::RepoPage(
            fast.ticket(),
            Ok(page_of(vec![repo(5, "page-three")], 3)),
        ));
        assert!(!explorer.apply(Completion::RepoPage(
            slow.ticket(),
            Ok(page_of(vec![repo(4, "page-two")], 3)),
        )));

        let names: Vec<_> = explorer.repositories().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["page-three"]);
        assert_eq!(explorer.current_page(), 3);
    }

    #[test]
    fn test_expand_unknown_repository() {
        let mut explorer = loaded(vec![repo(1, "alpha")], 1);
        assert_eq!(
            explorer.toggle_expand(9),
            Err(ExplorerError::UnknownRepository(9))
        );
    }

    #[test]
    fn test_lookup_by_position_and_name() {
        let explorer = loaded(vec![repo(1, "alpha"), repo(2, "beta")], 1);

        assert_eq!(explorer.id_at(1), Some(1));
        assert_eq!(explorer.id_at(2), Some(2));
        assert_eq!(explorer.id_at(0), None);
        assert_eq!(explorer.id_at(3), None);
        assert_eq!(explorer.id_by_name("beta"), Some(2));
        assert_eq!(explorer.id_by_name("octo/alpha"), Some(1));
        assert_eq!(explorer.id_by_name("gamma"), None);
    }
}
