//! Ready-made repositories and providers

#![allow(dead_code)]

use super::repository::*;
use git_provider::core::{error::Result, provider::Provider};

/// Three committed files, all modified, plus two untracked ones
pub fn create_multi_file_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_test_files(&repo.path, &["file1.txt", "file2.txt", "file3.txt"])?;
    git_add(&repo.path, ".")?;
    git_commit(&repo.path, "Initial commit")?;

    modify_test_files(&repo.path, &["file1.txt", "file2.txt", "file3.txt"])?;
    create_test_files(&repo.path, &["file4.txt", "file5.txt"])?;

    Ok(repo)
}

/// Initialized provider on `repo` using the real git binary
pub fn provider_for(repo: &TestRepo) -> Result<Provider> {
    let provider = Provider::builder().start_dir(repo.path()).build();
    provider.init(true)?;
    Ok(provider)
}
