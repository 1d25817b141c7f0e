use std::io::Write;

use log::{info, warn};

use crate::error::Result;
use crate::issue::{Authored, Issue, PullRequest};
use crate::remote::Remote;
use crate::repo::RepoId;
use crate::report;
use crate::tally::{Grouped, PeerCredits};

/// Print the full activity report of one repository to `out`.
///
/// Any API failure aborts the report; whatever was written so far stays.
pub fn scrape<R: Remote>(remote: &R, repo: &RepoId, out: &mut impl Write) -> Result<()> {
    report::quota(out, &remote.quota()?)?;

    writeln!(out, "Repo URL: {}", repo)?;
    remote.resolve()?;

    writeln!(out, "Scraping commit data...")?;
    let commits = group_commits(remote)?;
    report::commit_marks(out, &commits)?;

    writeln!(out, "\n\n")?;
    writeln!(out, "Scraping issue data...")?;
    let (issues, commented) = collect_issues(remote, out)?;
    report::issue_marks(out, &issues)?;

    writeln!(out, "Scraping PR data...")?;
    let (pulls, reviewed) = collect_pulls(remote, out)?;
    report::pull_marks(out, &pulls)?;

    report::teamwork(out, &commented, &reviewed)?;
    out.flush()?;
    info!("finished report for {}", repo);
    Ok(())
}

fn group_commits<R: Remote>(remote: &R) -> Result<Grouped<String>> {
    let mut grouped = Grouped::new();
    for commit in remote.commits()? {
        match commit.identity() {
            Some(user) => grouped.push(user, commit.message().to_string()),
            None => warn!("skipping commit {} without an author identity", commit.sha),
        }
    }
    Ok(grouped)
}

fn credit_all<A: Authored>(credits: &mut PeerCredits, item: u64, owner: &str, authored: &[A]) {
    for user in authored.iter().filter_map(Authored::author) {
        credits.credit(item, owner, user);
    }
}

fn collect_issues<R: Remote>(
    remote: &R,
    out: &mut impl Write,
) -> Result<(Grouped<Issue>, PeerCredits)> {
    let issues: Vec<Issue> = remote
        .issues()?
        .into_iter()
        .filter_map(|listed| listed.into_issue())
        .collect();

    let mut owned = Grouped::new();
    let mut commented = PeerCredits::new();
    let total = issues.len();
    for (i, issue) in issues.into_iter().enumerate() {
        writeln!(out, "Fetched {}/{} issues", i + 1, total)?;
        let Some(owner) = issue.owner().map(str::to_string) else {
            warn!("skipping issue #{} without an owner", issue.number);
            continue;
        };
        let comments = remote.issue_comments(issue.number)?;
        credit_all(&mut commented, issue.number, &owner, &comments);
        owned.push(&owner, issue);
    }
    Ok((owned, commented))
}

fn collect_pulls<R: Remote>(
    remote: &R,
    out: &mut impl Write,
) -> Result<(Grouped<PullRequest>, PeerCredits)> {
    let pulls = remote.pulls()?;

    let mut owned = Grouped::new();
    let mut reviewed = PeerCredits::new();
    let total = pulls.len();
    for (i, pull) in pulls.into_iter().enumerate() {
        writeln!(out, "Fetched {}/{} PRs", i + 1, total)?;
        let Some(owner) = pull.owner().map(str::to_string) else {
            warn!("skipping PR #{} without an owner", pull.number);
            continue;
        };
        let reviews = remote.pull_reviews(pull.number)?;
        credit_all(&mut reviewed, pull.number, &owner, &reviews);
        owned.push(&owner, pull);
    }
    Ok((owned, reviewed))
}
