//! Temporary git repositories driven through the real `git` binary

#![allow(dead_code)]

use git_provider::core::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Temporary repository. Keep the value alive for the whole test; dropping it
/// deletes the directory.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute path of `name` inside the repository
    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

/// Fresh repository with a local identity so commits never prompt.
///
/// The path is canonical, matching what repository discovery reports.
pub fn setup_test_repo() -> Result<TestRepo> {
    let temp_dir = TempDir::new()?;
    let repo_path = temp_dir.path().canonicalize()?;

    git(&repo_path, &["init", "-q"])?;
    git(&repo_path, &["config", "user.name", "Test User"])?;
    git(&repo_path, &["config", "user.email", "test@example.com"])?;
    git(&repo_path, &["config", "commit.gpgsign", "false"])?;

    Ok(TestRepo {
        temp_dir,
        path: repo_path,
    })
}

/// Repository whose history holds one commit with `initial.txt`
pub fn setup_test_repo_with_initial_commit() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "initial.txt", "initial content\n")?;
    git_add(&repo.path, "initial.txt")?;
    git_commit(&repo.path, "Initial commit")?;

    Ok(repo)
}

/// Write `content` to `filename`, creating parent directories
pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    let path = repo_path.join(filename);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

pub fn remove_file(repo_path: &Path, filename: &str) -> Result<()> {
    fs::remove_file(repo_path.join(filename))?;
    Ok(())
}

pub fn git_add(repo_path: &Path, filename: &str) -> Result<()> {
    git(repo_path, &["add", filename])?;
    Ok(())
}

pub fn git_commit(repo_path: &Path, message: &str) -> Result<()> {
    git(repo_path, &["commit", "-q", "-m", message])?;
    Ok(())
}

/// `content{n}` files, one per name
pub fn create_test_files(repo_path: &Path, filenames: &[&str]) -> Result<()> {
    for (i, filename) in filenames.iter().enumerate() {
        create_file(repo_path, filename, &format!("content{}\nline 2\n", i + 1))?;
    }
    Ok(())
}

pub fn modify_test_files(repo_path: &Path, filenames: &[&str]) -> Result<()> {
    for (i, filename) in filenames.iter().enumerate() {
        create_file(
            repo_path,
            filename,
            &format!("modified{}\nline 2\nnew line\n", i + 1),
        )?;
    }
    Ok(())
}

/// Run git in `repo_path` and return its stdout
pub fn git(repo_path: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git").args(args).current_dir(repo_path).output()?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Subject line of the latest commit
pub fn last_commit_subject(repo_path: &Path) -> Result<String> {
    Ok(git(repo_path, &["log", "-1", "--format=%s"])?.trim().to_string())
}
