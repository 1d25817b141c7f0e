//! Plain text rendering of the scraped activity.

use std::io::Write;

use crate::error::Result;
use crate::issue::{Issue, PullRequest};
use crate::remote::Quota;
use crate::tally::{Grouped, PeerCredits};

/// Items shown per user and category, totals are unaffected
pub const DISPLAY_CAP: usize = 50;

fn capped<T>(items: &[T]) -> (&[T], bool) {
    if items.len() > DISPLAY_CAP {
        (&items[..DISPLAY_CAP], true)
    } else {
        (items, false)
    }
}

fn banner(out: &mut impl Write, title: &str) -> Result<()> {
    let rule = "=".repeat(title.len());
    writeln!(out, "\n\n")?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", rule)?;
    Ok(())
}

fn user_header(out: &mut impl Write, user: &str) -> Result<()> {
    writeln!(out, "\n")?;
    writeln!(out, "============")?;
    writeln!(out, "User: {}", user)?;
    Ok(())
}

pub fn quota(out: &mut impl Write, quota: &Quota) -> Result<()> {
    writeln!(out, "Hourly queries: {}", quota.limit)?;
    writeln!(out, "Queries remaining: {}", quota.remaining)?;
    Ok(())
}

/// Commit messages per author
pub fn commit_marks(out: &mut impl Write, commits: &Grouped<String>) -> Result<()> {
    banner(out, "Commit marks")?;
    for (user, messages) in commits.iter() {
        user_header(out, user)?;
        writeln!(out, "Total number: {}", messages.len())?;
        let (shown, truncated) = capped(messages);
        for (i, message) in shown.iter().enumerate() {
            writeln!(out, "{}. {}", i, message)?;
        }
        if truncated {
            writeln!(out, "... cutting off remaining commits")?;
        }
    }
    Ok(())
}

/// Issue titles and bodies per owner
pub fn issue_marks(out: &mut impl Write, issues: &Grouped<Issue>) -> Result<()> {
    banner(out, "Issue marks")?;
    for (user, owned) in issues.iter() {
        user_header(out, user)?;
        writeln!(out, "Total number of issues: {}", owned.len())?;
        let (shown, truncated) = capped(owned);
        for (i, issue) in shown.iter().enumerate() {
            writeln!(out, "\t{}. {}", i, issue.title)?;
            let body = issue.body.as_deref().unwrap_or_default();
            writeln!(out, "\t\t{}", body.replace('\n', "\n\t\t"))?;
        }
        if truncated {
            writeln!(out, "... cutting off remaining issues")?;
        }
    }
    Ok(())
}

/// Pull request titles per owner
pub fn pull_marks(out: &mut impl Write, pulls: &Grouped<PullRequest>) -> Result<()> {
    banner(out, "Pull requests marks")?;
    for (user, owned) in pulls.iter() {
        user_header(out, user)?;
        writeln!(out, "Total number: {}", owned.len())?;
        let (shown, truncated) = capped(owned);
        for (i, pull) in shown.iter().enumerate() {
            writeln!(out, "\t{}. {}", i, pull.title)?;
        }
        if truncated {
            writeln!(out, "... cutting off remaining PRs")?;
        }
    }
    Ok(())
}

pub fn teamwork(
    out: &mut impl Write,
    commented: &PeerCredits,
    reviewed: &PeerCredits,
) -> Result<()> {
    banner(out, "Teamwork")?;
    writeln!(out, "Number of other people's issues commented on:")?;
    for (user, count) in commented.iter() {
        writeln!(out, "\t {}: {}", user, count)?;
    }
    writeln!(out, "Number of other people's PRs reviewed")?;
    for (user, count) in reviewed.iter() {
        writeln!(out, "\t {}: {}", user, count)?;
    }
    Ok(())
}
