use std::fs;
use std::process::Command;

const TOKEN_VARS: [&str; 3] = ["GITHUB_ACCESS_TOKEN", "GH_TOKEN", "GITHUB_TOKEN"];

fn without_token(program: &str) -> Command {
    let mut cmd = Command::new(program);
    for var in TOKEN_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn scraper_without_token_fails() {
    let output = without_token(env!("CARGO_BIN_EXE_ghmarks"))
        .arg("OllieForrest/GroupProject")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("GITHUB_ACCESS_TOKEN"), "stderr: {}", stderr);
}

#[test]
fn scraper_rejects_bad_repository() {
    let output = without_token(env!("CARGO_BIN_EXE_ghmarks"))
        .arg("no-slash-here")
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn batch_writes_one_file_per_repository_even_when_scrapes_fail() {
    let dir = tempfile::tempdir().unwrap();
    let output = without_token(env!("CARGO_BIN_EXE_ghmarks-batch"))
        .arg("--output-dir")
        .arg(dir.path())
        .arg("--scraper")
        .arg(env!("CARGO_BIN_EXE_ghmarks"))
        .args([
            "https://github.com/OllieForrest/GroupProject.git",
            "https://github.com/AlteredOracle/ForumEdit",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success());

    let mut files: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    files.sort();
    assert_eq!(
        files,
        [
            "1 - OllieForrest-GroupProject.txt",
            "2 - AlteredOracle-ForumEdit.txt"
        ]
    );
}
