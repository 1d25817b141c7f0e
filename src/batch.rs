//! Run the scraper over many repositories in parallel child processes.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::{mpsc, Mutex, PoisonError};
use std::thread;

use log::{error, info};

use crate::error::{Error, Result};
use crate::repo::RepoId;

/// Number of scrapes running at the same time
pub const MAX_WORKERS: usize = 20;

pub const OUTPUT_DIR: &str = "github_scrape";

/// Kept in the same order as the marking spreadsheet
pub const GITHUB_REPOS: [&str; 20] = [
    "https://github.com/MonkeInABox/CITS3403Project",
    "https://github.com/HarryRMorrison/CareerKickstart",
    "https://github.com/imran072/request-forum-app",
    "https://github.com/harshchaudh/cits3403-project",
    "https://github.com/CelynChew/ChatSome",
    "https://github.com/Semuca/CITS3403",
    "https://github.com/Jalil32/awd-3403",
    "https://github.com/hernancx09/UWA_CITS_3402_Project",
    "https://github.com/IsoVictor/CITS3403-Group-Project",
    "https://github.com/justinarat/cits3403-project",
    "https://github.com/yunho7687/quest-quay",
    "https://github.com/miacheng2/CITS5505-Project2",
    "https://github.com/Lingwan-Peng/CITS3403-Project.git",
    "https://github.com/Misoto22/Paw-Forum",
    "https://github.com/onlinepatron/CampusBookShelf.git",
    "https://github.com/CITS5505GroupProject/CITS5505-Group-Project",
    "https://github.com/Sungchur/WebPrj2",
    "https://github.com/OllieForrest/GroupProject.git",
    "https://github.com/ramandatta87/CITS5505_UWA_Group_Project.git",
    "https://github.com/AlteredOracle/ForumEdit",
];

/// One repository to scrape and where its report goes
#[derive(Debug, Clone)]
pub struct Task {
    /// 1-based position in the input list
    pub index: usize,
    pub repo: RepoId,
    pub path: PathBuf,
}

/// Build the tasks for `urls`, in input order.
///
/// File names carry the zero-padded position so that sorting them by name
/// gives back the input order.
pub fn plan<S: AsRef<str>>(urls: &[S], output_dir: &Path) -> Result<Vec<Task>> {
    let width = urls.len().to_string().len();
    urls.iter()
        .enumerate()
        .map(|(i, url)| {
            let index = i + 1;
            let repo = RepoId::parse(url.as_ref())?;
            let path = output_dir.join(format!("{:0width$} - {}.txt", index, repo.file_stem()));
            Ok(Task { index, repo, path })
        })
        .collect()
}

/// What a finished scraper process left behind
#[derive(Debug, Default)]
pub struct Capture {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was killed by a signal
    pub code: Option<i32>,
}

impl Capture {
    pub fn check(&self) -> Result<()> {
        match self.code {
            Some(0) => Ok(()),
            Some(code) => Err(Error::ScraperFailed(code, self.stderr.trim().to_string())),
            None => Err(Error::ScraperSignaled(self.stderr.trim().to_string())),
        }
    }
}

/// Runs one scrape to completion
pub trait Runner: Sync {
    fn run(&self, repo: &RepoId) -> Result<Capture>;
}

/// Runs the scraper executable as a child process
#[derive(Debug)]
pub struct ProcessRunner {
    pub program: PathBuf,
}

impl ProcessRunner {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The `ghmarks` executable installed next to the current one
    pub fn sibling() -> Result<Self> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().unwrap_or(Path::new("."));
        Ok(Self::new(dir.join(format!("ghmarks{}", std::env::consts::EXE_SUFFIX))))
    }
}

impl Runner for ProcessRunner {
    fn run(&self, repo: &RepoId) -> Result<Capture> {
        let output = Command::new(&self.program)
            .arg(repo.to_string())
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Error::CommandFailure(format!("{}: {}", self.program.display(), e)))?;

        Ok(Capture {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        })
    }
}

/// A finished task
#[derive(Debug)]
pub struct Outcome {
    pub task: Task,
    pub result: Result<()>,
}

fn run_task<R: Runner>(task: &Task, runner: &R) -> Result<()> {
    info!("Scraping {}...", task.repo);
    let capture = match panic::catch_unwind(AssertUnwindSafe(|| runner.run(&task.repo))) {
        Ok(Ok(capture)) => capture,
        Ok(Err(e)) => {
            fs::write(&task.path, "")?;
            return Err(e);
        }
        Err(_) => {
            fs::write(&task.path, "")?;
            return Err(Error::InternalError(format!(
                "scrape of {} panicked",
                task.repo
            )));
        }
    };
    // The capture is kept even when the scraper failed half way
    fs::write(&task.path, &capture.stdout)?;
    capture.check()
}

/// Run every task on a pool of `workers` threads.
///
/// Outcomes are returned in completion order. A failed task is logged and
/// never stops the others.
pub fn run_all<R: Runner>(tasks: Vec<Task>, runner: &R, workers: usize) -> Vec<Outcome> {
    let workers = workers.max(1).min(tasks.len());
    let queue = Mutex::new(tasks.into_iter());
    let (sender, receiver) = mpsc::channel();

    thread::scope(|scope| {
        for _ in 0..workers {
            let sender = sender.clone();
            let queue = &queue;
            scope.spawn(move || loop {
                let next = queue.lock().unwrap_or_else(PoisonError::into_inner).next();
                let Some(task) = next else {
                    break;
                };
                let result = run_task(&task, runner);
                if sender.send(Outcome { task, result }).is_err() {
                    break;
                }
            });
        }
        drop(sender);

        receiver
            .iter()
            .inspect(|outcome| match &outcome.result {
                Ok(()) => info!("Finished scraping {}", outcome.task.path.display()),
                Err(e) => error!("Error scraping {}: {}", outcome.task.repo, e),
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::time::Duration;

    struct FakeRunner {
        failing: HashSet<&'static str>,
    }

    impl Runner for FakeRunner {
        fn run(&self, repo: &RepoId) -> Result<Capture> {
            // Later repositories finish first
            let delay = 40u64.saturating_sub(repo.name.len() as u64 * 4);
            thread::sleep(Duration::from_millis(delay));

            let name = repo.name.as_str();
            if name == "unstartable" {
                return Err(Error::CommandFailure("no such file".to_string()));
            }
            if name == "panicking" {
                panic!("runner blew up");
            }
            Ok(Capture {
                stdout: format!("report for {}\n", repo),
                stderr: if self.failing.contains(name) {
                    "Error: failed to request API".to_string()
                } else {
                    String::new()
                },
                code: Some(if self.failing.contains(name) { 1 } else { 0 }),
            })
        }
    }

    #[test]
    fn plan_normalizes_and_pads_names() {
        let urls: Vec<String> = (1..=12)
            .map(|i| format!("https://github.com/o{}/r{}.git", i, i))
            .collect();
        let tasks = plan(&urls, Path::new("out")).unwrap();

        assert_eq!(tasks.len(), 12);
        assert_eq!(tasks[0].repo.to_string(), "o1/r1");
        assert_eq!(tasks[0].path, Path::new("out/01 - o1-r1.txt"));
        assert_eq!(tasks[11].path, Path::new("out/12 - o12-r12.txt"));

        let mut names: Vec<_> = tasks.iter().map(|t| t.path.clone()).collect();
        names.sort();
        let sorted: Vec<_> = names
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        let expected: Vec<_> = tasks
            .iter()
            .map(|t| t.path.to_string_lossy().into_owned())
            .collect();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn plan_uses_owner_and_name_in_file_stem() {
        let urls = ["https://github.com/OllieForrest/GroupProject.git"];
        let tasks = plan(&urls, Path::new("d")).unwrap();
        assert_eq!(tasks[0].repo.to_string(), "OllieForrest/GroupProject");
        assert_eq!(tasks[0].path, Path::new("d/1 - OllieForrest-GroupProject.txt"));
    }

    #[test]
    fn plan_rejects_bad_url() {
        assert!(matches!(
            plan(&["https://github.com/ok/repo", "nonsense"], Path::new("d")),
            Err(Error::InvalidRepo(_))
        ));
    }

    #[test]
    fn default_list_is_valid() {
        let tasks = plan(&GITHUB_REPOS, Path::new(OUTPUT_DIR)).unwrap();
        assert_eq!(tasks.len(), GITHUB_REPOS.len());
    }

    #[test]
    fn every_task_writes_its_file_despite_failures() {
        let dir = tempfile::tempdir().unwrap();
        let urls = [
            "https://github.com/team/a",
            "https://github.com/team/broken",
            "https://github.com/team/unstartable",
            "https://github.com/team/panicking",
            "https://github.com/team/abcdefgh",
        ];
        let tasks = plan(&urls, dir.path()).unwrap();
        let runner = FakeRunner {
            failing: HashSet::from(["broken"]),
        };

        let outcomes = run_all(tasks, &runner, 2);
        assert_eq!(outcomes.len(), urls.len());

        let mut files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        files.sort();
        assert_eq!(
            files,
            [
                "1 - team-a.txt",
                "2 - team-broken.txt",
                "3 - team-unstartable.txt",
                "4 - team-panicking.txt",
                "5 - team-abcdefgh.txt",
            ]
        );

        let read = |name: &str| fs::read_to_string(dir.path().join(name)).unwrap();
        assert_eq!(read("1 - team-a.txt"), "report for team/a\n");
        assert_eq!(read("2 - team-broken.txt"), "report for team/broken\n");
        assert_eq!(read("3 - team-unstartable.txt"), "");
        assert_eq!(read("4 - team-panicking.txt"), "");

        let failed: HashSet<_> = outcomes
            .iter()
            .filter(|o| o.result.is_err())
            .map(|o| o.task.repo.name.as_str())
            .collect();
        assert_eq!(
            failed,
            HashSet::from(["broken", "unstartable", "panicking"])
        );

        let broken = outcomes
            .iter()
            .find(|o| o.task.repo.name == "broken")
            .unwrap();
        assert!(matches!(broken.result, Err(Error::ScraperFailed(1, _))));
    }

    #[test]
    fn outcomes_arrive_in_completion_order() {
        let dir = tempfile::tempdir().unwrap();
        let urls = ["https://github.com/t/a", "https://github.com/t/abcdefgh"];
        let runner = FakeRunner {
            failing: HashSet::new(),
        };
        let outcomes = run_all(plan(&urls, dir.path()).unwrap(), &runner, MAX_WORKERS);
        let order: Vec<_> = outcomes.iter().map(|o| o.task.index).collect();
        assert_eq!(order, [2, 1]);
    }

    #[test]
    fn signal_without_code_is_an_error() {
        let capture = Capture {
            code: None,
            ..Default::default()
        };
        assert!(matches!(capture.check(), Err(Error::ScraperSignaled(_))));
    }
}
