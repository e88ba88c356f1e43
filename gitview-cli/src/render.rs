//! Terminal rendering
//!
//! Display wrappers for explorer state. Each view writes plain lines with
//! `colored` styling so they can be printed or inspected as strings.

use std::fmt;

use chrono::Local;
use colored::*;
use gitview_core::domain::commit::Commit;
use gitview_core::domain::page::RepoStats;
use gitview_core::domain::repository::Visibility;
use gitview_core::domain::user::User;
use gitview_core::explorer::{Explorer, RepoEntry};

/// Commands understood by the interactive explorer
pub const HELP: &str = "\
Commands:
  expand <n|name>         show or hide commits of a repository
  branch <n|name> <name>  switch branch and reload its commits
  page <n>                go to page n
  next, prev              move one page forward or back
  retry                   reload the current page after an error
  refresh                 redraw the screen
  logout                  forget the token and leave
  help                    show this help
  quit                    leave the explorer";

/// Whole explorer screen
pub struct ExplorerView<'a>(pub &'a Explorer);

impl fmt::Display for ExplorerView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let explorer = self.0;

        writeln!(f, "{}", StatsView(explorer.stats()))?;
        writeln!(f)?;
        writeln!(f, "{}", "Your Repositories".bold())?;

        if let Some(error) = explorer.error() {
            writeln!(f, "  {}", error.red())?;
            return writeln!(f, "  {}", "Type `retry` to try again.".dimmed());
        }

        if explorer.is_loading() {
            return writeln!(f, "  {}", "Loading repositories...".dimmed());
        }

        let mut shown = 0;
        for (index, entry) in explorer.repositories().enumerate() {
            write!(f, "{}", EntryView::new(index + 1, entry))?;
            shown += 1;
        }
        if shown == 0 {
            writeln!(f, "  {}", "No repositories on this page.".yellow())?;
        }

        writeln!(f)?;
        if explorer.total_pages() > 1 {
            writeln!(
                f,
                "{}",
                PaginationView {
                    current: explorer.current_page(),
                    total: explorer.total_pages(),
                }
            )?;
        }
        writeln!(
            f,
            "Page {} of {}",
            explorer.current_page(),
            explorer.total_pages()
        )
    }
}

/// Aggregate counts line
pub struct StatsView(pub RepoStats);

impl fmt::Display for StatsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} total  {} public  {} private",
            self.0.total.to_string().blue().bold(),
            self.0.public.to_string().green().bold(),
            self.0.private.to_string().purple().bold()
        )
    }
}

/// One repository card
pub struct EntryView<'a> {
    position: usize,
    entry: &'a RepoEntry,
}

impl<'a> EntryView<'a> {
    pub fn new(position: usize, entry: &'a RepoEntry) -> Self {
        Self { position, entry }
    }
}

impl fmt::Display for EntryView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entry = self.entry;
        let marker = if entry.expanded { "▾" } else { "▸" };

        writeln!(
            f,
            "  {} {}. {}  {}  {}",
            marker.cyan(),
            self.position,
            entry.name.blue().bold(),
            visibility_badge(entry.visibility),
            entry.owner.dimmed()
        )?;

        if !entry.expanded {
            return Ok(());
        }

        if entry.branch_loading {
            writeln!(f, "       {}", "Loading branches...".dimmed())?;
        } else if let Some(branches) = entry.branches.as_ref().filter(|b| !b.is_empty()) {
            writeln!(
                f,
                "       branch: {} ({} available)",
                entry.selected_branch.as_deref().unwrap_or("-").cyan(),
                branches.len()
            )?;
        }

        if entry.commit_loading {
            return writeln!(f, "       {}", "Loading commits...".dimmed());
        }

        let shown = entry
            .commits_branch
            .as_deref()
            .filter(|_| entry.commits.is_some())
            .filter(|shown| entry.selected_branch.as_deref().is_some_and(|b| b != *shown));
        if let Some(shown) = shown {
            writeln!(f, "       {}", format!("commits from {}", shown).dimmed())?;
        }

        match entry.commits.as_deref() {
            Some([]) => writeln!(f, "       {}", "No commits.".yellow()),
            Some(commits) => {
                for commit in commits {
                    writeln!(f, "       {}", CommitView(commit))?;
                }
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// One commit row
pub struct CommitView<'a>(pub &'a Commit);

impl fmt::Display for CommitView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let commit = self.0;
        if let Some(sha) = commit.short_sha() {
            write!(f, "{} ", sha.yellow())?;
        }
        write!(
            f,
            "{}  {} • {}",
            commit.summary(),
            commit.author.dimmed(),
            commit
                .timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .dimmed()
        )
    }
}

/// Page selector line
pub struct PaginationView {
    pub current: u32,
    pub total: u32,
}

impl fmt::Display for PaginationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prev = if self.current <= 1 {
            "‹ prev".dimmed()
        } else {
            "‹ prev".normal()
        };
        write!(f, "{} ", prev)?;

        for page in 1..=self.total {
            if page == self.current {
                write!(f, " {}", format!("[{}]", page).blue().bold())?;
            } else {
                write!(f, " {}", page)?;
            }
        }

        let next = if self.current >= self.total {
            "next ›".dimmed()
        } else {
            "next ›".normal()
        };
        write!(f, "  {}", next)
    }
}

/// Profile block for `whoami`
pub struct UserView<'a>(pub &'a User);

impl fmt::Display for UserView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let user = self.0;
        writeln!(f, "{}", user.display_name().bold())?;
        writeln!(f, "  @{}", user.login.cyan())?;
        if let Some(bio) = user.bio.as_deref().filter(|b| !b.is_empty()) {
            writeln!(f, "  {}", bio)?;
        }
        if let Some(url) = &user.html_url {
            writeln!(f, "  {}", url.dimmed())?;
        }
        Ok(())
    }
}

fn visibility_badge(visibility: Visibility) -> ColoredString {
    match visibility {
        Visibility::Public => "Public".green(),
        Visibility::Private => "Private".purple(),
    }
}
