//! Commit, issue and pull request activity of GitHub repositories, grouped
//! by author, for marking group projects.

pub mod batch;
pub mod commit;
pub mod config;
pub mod error;
pub mod issue;
pub mod remote;
pub mod repo;
pub mod report;
pub mod scrape;
pub mod tally;
