use git_provider::core::{
    command::{CommandResult, CommandStatus, Concurrency},
    error::ProviderError,
    file_status::FileStatus,
    operation::Operation,
    provider::{Provider, StateCacheUsage},
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

mod common;
use common::{fixtures::*, repository::*};

fn status_of(provider: &Provider, file: PathBuf) -> anyhow::Result<FileStatus> {
    Ok(provider.get_state(&[file], StateCacheUsage::ForceUpdate)?[0].status)
}

fn run_sync(provider: &Provider, operation: Operation, files: &[PathBuf]) -> anyhow::Result<CommandResult> {
    let result = provider
        .execute(operation, files, Concurrency::Synchronous, None)?
        .completed()
        .expect("synchronous command completes inline");
    Ok(result)
}

#[cfg(test)]
mod workflow_tests {
    use super::*;

    #[test]
    fn test_init_discovers_repository_root() -> anyhow::Result<()> {
        let repo = setup_test_repo()?;
        create_file(&repo.path, "nested/dir/file.txt", "x")?;

        let provider = Provider::builder()
            .start_dir(repo.file("nested/dir"))
            .build();
        provider.init(true)?;

        assert_eq!(provider.repository_root(), Some(repo.path.clone()));
        assert!(provider.status_text().contains(&repo.path.display().to_string()));
        Ok(())
    }

    #[test]
    fn test_init_outside_repository_fails() -> anyhow::Result<()> {
        let dir = tempfile::TempDir::new()?;
        let provider = Provider::builder().start_dir(dir.path()).build();

        assert!(matches!(provider.init(false), Err(ProviderError::NotInGitRepo)));
        assert!(!provider.is_enabled());
        Ok(())
    }

    #[test]
    fn test_status_reports_each_kind_of_change() -> anyhow::Result<()> {
        let repo = create_multi_file_repo()?;
        create_file(&repo.path, ".gitignore", "*.log\n")?;
        create_file(&repo.path, "debug.log", "noise")?;
        git_add(&repo.path, "file2.txt")?;
        remove_file(&repo.path, "file3.txt")?;
        let provider = provider_for(&repo)?;

        let files: Vec<PathBuf> = ["file1.txt", "file2.txt", "file3.txt", "file4.txt", "debug.log"]
            .iter()
            .map(|name| repo.file(name))
            .collect();
        let statuses: Vec<FileStatus> = provider
            .get_state(&files, StateCacheUsage::ForceUpdate)?
            .iter()
            .map(|state| state.status)
            .collect();

        assert_eq!(
            statuses,
            vec![
                FileStatus::Modified,
                FileStatus::Modified,
                FileStatus::Deleted,
                FileStatus::NotControlled,
                FileStatus::Ignored,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_clean_tracked_file_is_unmodified() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        let provider = provider_for(&repo)?;

        assert_eq!(status_of(&provider, repo.file("initial.txt"))?, FileStatus::Unmodified);
        Ok(())
    }

    #[test]
    fn test_add_commit_cycle() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        create_file(&repo.path, "docs/guide with spaces.md", "# Guide\n")?;
        let provider = provider_for(&repo)?;
        let file = repo.file("docs/guide with spaces.md");

        assert_eq!(status_of(&provider, file.clone())?, FileStatus::NotControlled);

        let added = run_sync(&provider, Operation::mark_for_add(), &[file.clone()])?;
        assert!(added.is_success());
        assert_eq!(provider.cache().get(&file).map(|state| state.status), Some(FileStatus::Added));

        let committed = run_sync(&provider, Operation::check_in("Add guide"), &[file.clone()])?;
        assert!(committed.is_success(), "{:?}", committed.error_messages);
        assert!(committed.info_messages[0].contains("Add guide"));
        assert_eq!(last_commit_subject(&repo.path)?, "Add guide");
        assert_eq!(
            provider.cache().get(&file).map(|state| state.status),
            Some(FileStatus::Unmodified)
        );
        Ok(())
    }

    #[test]
    fn test_commit_without_message_fails() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        modify_test_files(&repo.path, &["initial.txt"])?;
        let provider = provider_for(&repo)?;

        let result = run_sync(&provider, Operation::new("CheckIn"), &[repo.file("initial.txt")])?;
        assert_eq!(result.status, CommandStatus::Failed);
        assert_eq!(last_commit_subject(&repo.path)?, "Initial commit");
        Ok(())
    }

    #[test]
    fn test_revert_restores_modified_and_unstages_added() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        modify_test_files(&repo.path, &["initial.txt"])?;
        create_file(&repo.path, "new.txt", "new\n")?;
        git_add(&repo.path, "new.txt")?;
        let provider = provider_for(&repo)?;
        let files = vec![repo.file("initial.txt"), repo.file("new.txt")];

        let result = run_sync(&provider, Operation::revert(), &files)?;
        assert!(result.is_success(), "{:?}", result.error_messages);

        assert_eq!(std::fs::read_to_string(repo.file("initial.txt"))?, "initial content\n");
        assert!(repo.file("new.txt").exists());
        let statuses: Vec<FileStatus> = provider
            .get_state(&files, StateCacheUsage::UseCache)?
            .iter()
            .map(|state| state.status)
            .collect();
        assert_eq!(statuses, vec![FileStatus::Unmodified, FileStatus::NotControlled]);
        Ok(())
    }

    #[test]
    fn test_delete_removes_tracked_file() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        let provider = provider_for(&repo)?;
        let file = repo.file("initial.txt");

        let result = run_sync(&provider, Operation::delete(), &[file.clone()])?;
        assert!(result.is_success(), "{:?}", result.error_messages);
        assert!(!file.exists());
        assert_eq!(provider.cache().get(&file).map(|state| state.status), Some(FileStatus::Deleted));
        Ok(())
    }

    #[test]
    fn test_connect_reports_git_version() -> anyhow::Result<()> {
        let repo = setup_test_repo()?;
        let provider = provider_for(&repo)?;

        let result = run_sync(&provider, Operation::connect(), &[] as &[PathBuf])?;
        assert!(result.is_success());
        assert!(result.info_messages[0].starts_with("git version"));
        Ok(())
    }

    #[test]
    fn test_async_add_is_reconciled_by_tick() -> anyhow::Result<()> {
        let repo = create_multi_file_repo()?;
        let provider = provider_for(&repo)?;
        let files = vec![repo.file("file4.txt"), repo.file("file5.txt")];
        let done = Arc::new(Mutex::new(None));
        let done_in_callback = done.clone();

        provider.execute(
            Operation::mark_for_add(),
            &files,
            Concurrency::Asynchronous,
            Some(Box::new(move |result: &CommandResult| {
                *done_in_callback.lock().unwrap() = Some(result.status);
            })),
        )?;

        let deadline = Instant::now() + Duration::from_secs(10);
        while done.lock().unwrap().is_none() && Instant::now() < deadline {
            provider.tick();
            thread::sleep(Duration::from_millis(10));
        }

        assert_eq!(*done.lock().unwrap(), Some(CommandStatus::Succeeded));
        let statuses: Vec<FileStatus> = provider
            .get_state(&files, StateCacheUsage::UseCache)?
            .iter()
            .map(|state| state.status)
            .collect();
        assert_eq!(statuses, vec![FileStatus::Added, FileStatus::Added]);
        Ok(())
    }

    #[test]
    fn test_whole_repository_status_without_files() -> anyhow::Result<()> {
        let repo = create_multi_file_repo()?;
        let provider = provider_for(&repo)?;

        let result = run_sync(&provider, Operation::update_status(), &[] as &[PathBuf])?;
        assert!(result.is_success());

        let changed = provider
            .cache()
            .states_matching(|state| state.status.has_local_changes());
        assert_eq!(changed.len(), 3);
        let untracked = provider
            .cache()
            .states_matching(|state| state.status == FileStatus::NotControlled);
        assert_eq!(untracked.len(), 2);
        Ok(())
    }
}
