//! Integration tests for the Git interface.
//!
//! These tests use real git repositories created via tempfile to verify
//! that every query works against actual git output.

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{Duration, Utc};
use tempfile::TempDir;

use reflens::core::types::{Oid, Ref, RefType};
use reflens::git::{Capability, Git, GitError};

/// Test fixture that creates a real git repository on `master`.
struct TestRepo {
    dir: TempDir,
    now: i64,
}

impl TestRepo {
    /// Create a new, empty test repository.
    fn empty() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");

        run_git(dir.path(), &["init"]);
        // Independent of init.defaultBranch and of the git version.
        run_git(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/master"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["config", "user.name", "Test User"]);
        run_git(dir.path(), &["config", "commit.gpgsign", "false"]);

        Self {
            dir,
            now: Utc::now().timestamp(),
        }
    }

    /// Create a new test repository with an initial commit.
    fn new() -> Self {
        let repo = Self::empty();
        repo.commit_file("README.md", "# Test Repo\n", "Initial commit");
        repo
    }

    /// Get the path to the repository.
    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Open a Git interface to this repository.
    fn git(&self) -> Git {
        Git::open(self.path()).expect("failed to open test repo")
    }

    /// Write a file and commit it now, returning the new commit id.
    fn commit_file(&self, path: &str, content: &str, message: &str) -> Oid {
        self.commit_file_at(path, content, message, 0)
    }

    /// Write a file and commit it `days_ago` days in the past.
    fn commit_file_at(&self, path: &str, content: &str, message: &str, days_ago: i64) -> Oid {
        let file = self.path().join(path);
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&file, content).unwrap();
        run_git(self.path(), &["add", path]);

        let date = format!("{} +0000", self.now - days_ago * 86_400);
        let output = Command::new("git")
            .args(["commit", "-m", message])
            .env("GIT_AUTHOR_DATE", &date)
            .env("GIT_COMMITTER_DATE", &date)
            .current_dir(self.path())
            .output()
            .expect("failed to run git commit");
        assert!(
            output.status.success(),
            "git commit failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        self.head_oid_raw()
    }

    /// Create and switch to a new branch.
    fn new_branch(&self, name: &str) {
        run_git(self.path(), &["checkout", "-b", name]);
    }

    /// Checkout a branch.
    fn checkout(&self, name: &str) {
        run_git(self.path(), &["checkout", name]);
    }

    /// Add a bare repository as a remote.
    fn add_remote(&self, name: &str) -> TempDir {
        let remote = TempDir::new().expect("failed to create remote dir");
        run_git(remote.path(), &["init", "--bare"]);
        let url = remote.path().to_str().unwrap().to_string();
        run_git(self.path(), &["remote", "add", name, &url]);
        remote
    }

    /// Get HEAD OID using git directly.
    fn head_oid_raw(&self) -> Oid {
        let output = Command::new("git")
            .args(["rev-parse", "HEAD"])
            .current_dir(self.path())
            .output()
            .expect("git rev-parse failed");
        Oid::new(String::from_utf8(output.stdout).unwrap().trim()).unwrap()
    }
}

/// Run a git command in the given directory.
fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to run git");

    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn local(name: &str, sha: &Oid) -> Ref {
    Ref::new(name, RefType::LocalBranch, sha.clone())
}

fn remote(name: &str, sha: &Oid) -> Ref {
    Ref::new(name, RefType::RemoteBranch, sha.clone())
}

fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap()
}

// =============================================================================
// Current ref and upstream
// =============================================================================

mod current_ref {
    use super::*;

    #[test]
    fn follows_checkouts() {
        let repo = TestRepo::empty();
        repo.commit_file("file1.txt", "one", "c0");
        repo.new_branch("branch2");
        repo.commit_file("file1.txt", "two", "c1");
        repo.checkout("master");
        let master = repo.commit_file("file1.txt", "three", "c2");
        repo.new_branch("branch3");
        let branch3 = repo.commit_file("file1.txt", "four", "c3");

        let git = repo.git();
        assert_eq!(git.current_ref().unwrap(), local("branch3", &branch3));

        repo.checkout("master");
        assert_eq!(git.current_ref().unwrap(), local("master", &master));
    }

    #[test]
    fn detached_head_is_named_by_sha() {
        let repo = TestRepo::new();
        let sha = repo.head_oid_raw();
        run_git(repo.path(), &["checkout", "--detach"]);

        let head = repo.git().current_ref().unwrap();
        assert_eq!(head, Ref::detached(sha.clone()));
        assert_eq!(head.name, sha.as_str());
    }

    #[test]
    fn empty_repository_has_no_commits() {
        let repo = TestRepo::empty();
        let err = repo.git().current_ref().unwrap_err();
        assert!(matches!(err, GitError::NoCommits { .. }), "got {err:?}");
    }

    #[test]
    fn outside_a_repository() {
        let dir = TempDir::new().unwrap();
        let err = Git::open(dir.path()).unwrap_err();
        assert!(matches!(err, GitError::NotARepo { .. }), "got {err:?}");
    }

    #[test]
    fn upstream_after_push() {
        let repo = TestRepo::new();
        let master = repo.commit_file("file1.txt", "content", "second");
        let _origin = repo.add_remote("origin");
        run_git(
            repo.path(),
            &["push", "-u", "origin", "master:someremotebranch"],
        );

        let git = repo.git();
        assert_eq!(
            git.current_remote_ref().unwrap(),
            remote("origin/someremotebranch", &master)
        );
        assert_eq!(
            git.remote_ref_name_for_current_branch().unwrap(),
            "origin/someremotebranch"
        );
        assert_eq!(git.remote_for_current_branch().unwrap(), "origin");
    }

    #[test]
    fn no_upstream_is_an_error() {
        let repo = TestRepo::new();
        let err = repo.git().remote_ref_name_for_current_branch().unwrap_err();
        assert!(matches!(err, GitError::NoUpstream { ref branch } if branch == "master"));
    }

    #[test]
    fn upstream_configured_but_never_fetched() {
        let repo = TestRepo::new();
        run_git(repo.path(), &["config", "branch.master.remote", "origin"]);
        run_git(repo.path(), &["config", "branch.master.merge", "refs/heads/master"]);

        let err = repo.git().current_remote_ref().unwrap_err();
        assert!(matches!(err, GitError::RefNotFound { ref refname } if refname == "origin/master"));
    }
}

// =============================================================================
// Recent branches
// =============================================================================

mod recent_branches {
    use super::*;

    struct Fixture {
        repo: TestRepo,
        master: Oid,
        included: Oid,
        included_2: Oid,
        _remotes: Vec<TempDir>,
    }

    /// Commits at day offsets -20, -15, -12, -6, -3 and 0, pushed to two remotes.
    fn fixture() -> Fixture {
        let repo = TestRepo::empty();
        repo.commit_file_at("file1.txt", "0", "c0", 20);
        repo.new_branch("excluded_branch");
        repo.commit_file_at("file1.txt", "1", "c1", 15);
        run_git(repo.path(), &["tag", "excluded_tag"]);
        repo.checkout("master");
        repo.commit_file_at("file1.txt", "2", "c2", 12);
        repo.new_branch("included_branch");
        let included = repo.commit_file_at("file1.txt", "3", "c3", 6);
        repo.new_branch("included_branch_2");
        let included_2 = repo.commit_file_at("file1.txt", "4", "c4", 3);
        repo.checkout("master");
        let master = repo.commit_file_at("file1.txt", "5", "c5", 0);

        let origin = repo.add_remote("origin");
        let upstream = repo.add_remote("upstream");
        run_git(repo.path(), &["push", "origin", "master"]);
        run_git(repo.path(), &["push", "origin", "excluded_branch"]);
        run_git(repo.path(), &["push", "origin", "included_branch"]);
        run_git(repo.path(), &["push", "upstream", "master"]);
        run_git(repo.path(), &["push", "upstream", "included_branch_2"]);

        Fixture {
            repo,
            master,
            included,
            included_2,
            _remotes: vec![origin, upstream],
        }
    }

    fn week_ago(repo: &TestRepo) -> chrono::DateTime<Utc> {
        chrono::DateTime::from_timestamp(repo.now, 0).unwrap() - Duration::days(7)
    }

    #[test]
    fn local_only() {
        let f = fixture();
        let refs = f
            .repo
            .git()
            .recent_branches(week_ago(&f.repo), false, "")
            .unwrap();

        assert_eq!(
            refs,
            vec![
                local("master", &f.master),
                local("included_branch_2", &f.included_2),
                local("included_branch", &f.included),
            ]
        );
    }

    #[test]
    fn all_remotes() {
        let f = fixture();
        let refs = f
            .repo
            .git()
            .recent_branches(week_ago(&f.repo), true, "")
            .unwrap();

        assert_eq!(
            refs,
            vec![
                local("master", &f.master),
                remote("origin/master", &f.master),
                remote("upstream/master", &f.master),
                local("included_branch_2", &f.included_2),
                remote("upstream/included_branch_2", &f.included_2),
                local("included_branch", &f.included),
                remote("origin/included_branch", &f.included),
            ]
        );
    }

    #[test]
    fn single_remote() {
        let f = fixture();
        let refs = f
            .repo
            .git()
            .recent_branches(week_ago(&f.repo), true, "origin")
            .unwrap();

        assert_eq!(
            refs,
            vec![
                local("master", &f.master),
                remote("origin/master", &f.master),
                local("included_branch_2", &f.included_2),
                local("included_branch", &f.included),
                remote("origin/included_branch", &f.included),
            ]
        );
    }

    #[test]
    fn tags_are_never_listed() {
        let f = fixture();
        let long_ago = week_ago(&f.repo) - Duration::days(30);
        let refs = f.repo.git().recent_branches(long_ago, true, "").unwrap();

        assert!(refs.iter().all(|r| r.ref_type != RefType::Tag));
        assert!(refs.iter().any(|r| r.name == "excluded_branch"));
        assert!(refs.iter().any(|r| r.name == "origin/excluded_branch"));
    }
}

// =============================================================================
// Worktrees
// =============================================================================

mod worktrees {
    use super::*;

    #[test]
    fn each_worktree_reports_its_own_head() {
        let repo = TestRepo::new();
        let git = repo.git();
        if !git.capabilities().unwrap().has(Capability::Worktrees) {
            return;
        }

        let master = repo.head_oid_raw();
        repo.new_branch("branch2");
        let branch2 = repo.commit_file("file1.txt", "b2", "c1");
        repo.checkout("master");
        repo.new_branch("branch3");
        repo.commit_file("file1.txt", "b3", "c2");
        repo.checkout("master");
        repo.new_branch("branch4");
        let branch4 = repo.commit_file("file1.txt", "b4", "c3");
        repo.checkout("master");

        let trees = TempDir::new().unwrap();
        let wt2 = trees.path().join("branch2_wt");
        let wt4 = trees.path().join("branch4_wt");
        run_git(repo.path(), &["worktree", "add", wt2.to_str().unwrap(), "branch2"]);
        run_git(repo.path(), &["worktree", "add", wt4.to_str().unwrap(), "branch4"]);

        let heads = git.all_worktree_heads(&repo.path().join(".git")).unwrap();
        assert_eq!(
            heads,
            vec![
                local("master", &master),
                local("branch2", &branch2),
                local("branch4", &branch4),
            ]
        );

        // Same answer from inside a linked worktree.
        let linked = Git::open(&wt2).unwrap();
        let info = linked.repo_info().unwrap();
        assert_eq!(canonical(&info.common_dir), canonical(&repo.path().join(".git")));
        assert_eq!(linked.current_ref().unwrap(), local("branch2", &branch2));
        assert_eq!(linked.all_worktree_heads(&info.common_dir).unwrap(), heads);
    }

    #[test]
    fn detached_worktree() {
        let repo = TestRepo::new();
        let git = repo.git();
        if !git.capabilities().unwrap().has(Capability::Worktrees) {
            return;
        }

        let sha = repo.head_oid_raw();
        let trees = TempDir::new().unwrap();
        let wt = trees.path().join("detached_wt");
        run_git(
            repo.path(),
            &["worktree", "add", "--detach", wt.to_str().unwrap(), "HEAD"],
        );

        let heads = git.all_worktree_heads(&repo.path().join(".git")).unwrap();
        assert_eq!(heads, vec![local("master", &sha), Ref::detached(sha.clone())]);
    }
}

// =============================================================================
// Tracked files
// =============================================================================

mod tracked_files {
    use super::*;

    fn sorted(mut files: Vec<String>) -> Vec<String> {
        files.sort();
        files
    }

    fn fixture() -> TestRepo {
        let repo = TestRepo::empty();
        for path in [
            "file1.txt",
            "file2.txt",
            "folder1/file10.txt",
            "folder1/anotherfile.txt",
        ] {
            std::fs::create_dir_all(repo.path().join("folder1")).unwrap();
            std::fs::write(repo.path().join(path), path).unwrap();
        }
        run_git(repo.path(), &["add", "."]);
        run_git(repo.path(), &["commit", "-m", "c0"]);

        for path in [
            "file3.txt",
            "file4.txt",
            "folder2/something.txt",
            "folder2/folder3/deep.txt",
        ] {
            std::fs::create_dir_all(repo.path().join("folder2/folder3")).unwrap();
            std::fs::write(repo.path().join(path), path).unwrap();
        }
        run_git(repo.path(), &["add", "."]);
        run_git(repo.path(), &["commit", "-m", "c1"]);
        repo
    }

    const ALL_TXT: [&str; 8] = [
        "file1.txt",
        "file2.txt",
        "file3.txt",
        "file4.txt",
        "folder1/anotherfile.txt",
        "folder1/file10.txt",
        "folder2/folder3/deep.txt",
        "folder2/something.txt",
    ];

    #[test]
    fn glob_patterns() {
        let repo = fixture();
        let git = repo.git();
        let root = repo.path();

        assert_eq!(sorted(git.tracked_files(root, "*.txt").unwrap()), ALL_TXT);
        assert_eq!(
            sorted(git.tracked_files(root, "*file*.txt").unwrap()),
            [
                "file1.txt",
                "file2.txt",
                "file3.txt",
                "file4.txt",
                "folder1/anotherfile.txt",
                "folder1/file10.txt",
            ]
        );
        assert_eq!(
            sorted(git.tracked_files(root, "folder1/*").unwrap()),
            ["folder1/anotherfile.txt", "folder1/file10.txt"]
        );
        assert_eq!(
            sorted(git.tracked_files(root, "folder2/*").unwrap()),
            ["folder2/folder3/deep.txt", "folder2/something.txt"]
        );
    }

    #[test]
    fn relative_to_base_dir() {
        let repo = fixture();
        let git = repo.git();

        assert_eq!(
            sorted(git.tracked_files(&repo.path().join("folder1"), "*.txt").unwrap()),
            ["anotherfile.txt", "file10.txt"]
        );
        assert_eq!(
            sorted(git.tracked_files(Path::new("folder1"), "*.txt").unwrap()),
            ["anotherfile.txt", "file10.txt"]
        );
    }

    #[test]
    fn reflects_index_state() {
        let repo = fixture();
        let git = repo.git();
        let root = repo.path();

        let mut expected: Vec<String> = ALL_TXT.iter().map(|s| s.to_string()).collect();

        // Staged but uncommitted.
        std::fs::write(root.join("z_newfile.txt"), "Hello world").unwrap();
        run_git(root, &["add", "z_newfile.txt"]);
        expected.push("z_newfile.txt".to_string());
        assert_eq!(sorted(git.tracked_files(root, "*.txt").unwrap()), expected);

        // Modified, not staged.
        std::fs::write(root.join("file1.txt"), "Modifications").unwrap();
        assert_eq!(sorted(git.tracked_files(root, "*.txt").unwrap()), expected);

        // Modified and staged.
        run_git(root, &["add", "file1.txt"]);
        assert_eq!(sorted(git.tracked_files(root, "*.txt").unwrap()), expected);

        // Removal staged, not committed.
        run_git(root, &["rm", "file2.txt"]);
        expected.retain(|f| f != "file2.txt");
        assert_eq!(sorted(git.tracked_files(root, "*.txt").unwrap()), expected);
    }

    #[test]
    fn untracked_files_are_excluded() {
        let repo = fixture();
        std::fs::write(repo.path().join("untracked.txt"), "nope").unwrap();

        let files = repo.git().tracked_files(repo.path(), "*.txt").unwrap();
        assert!(!files.contains(&"untracked.txt".to_string()));
    }
}

// =============================================================================
// Repository info and version
// =============================================================================

mod repo_info {
    use super::*;

    #[test]
    fn git_dir_is_inside_work_dir() {
        let repo = TestRepo::new();
        let info = repo.git().repo_info().unwrap();

        let work_dir = info.work_dir.expect("non-bare repo has a work dir");
        assert_eq!(canonical(&info.git_dir), canonical(&work_dir.join(".git")));
        assert_eq!(canonical(&info.common_dir), canonical(&info.git_dir));
    }

    #[test]
    fn from_a_subdirectory() {
        let repo = TestRepo::new();
        std::fs::create_dir_all(repo.path().join("sub/dir")).unwrap();

        let info = Git::open(repo.path().join("sub/dir"))
            .unwrap()
            .repo_info()
            .unwrap();
        assert_eq!(canonical(&info.work_dir.unwrap()), canonical(repo.path()));
    }

    #[test]
    fn bare_repository_has_no_work_dir() {
        let dir = TempDir::new().unwrap();
        run_git(dir.path(), &["init", "--bare"]);

        let info = Git::open(dir.path()).unwrap().repo_info().unwrap();
        assert!(info.work_dir.is_none());
        assert_eq!(canonical(&info.git_dir), canonical(dir.path()));
    }

    #[test]
    fn installed_git_version_parses() {
        let repo = TestRepo::new();
        let version = repo.git().version().unwrap();
        assert!(version.is_at_least("1"));
    }

    #[test]
    fn resolve_tag() {
        let repo = TestRepo::new();
        let sha = repo.head_oid_raw();
        run_git(repo.path(), &["tag", "v1"]);

        let r = repo.git().resolve_ref("refs/tags/v1").unwrap();
        assert_eq!(r, Ref::new("v1", RefType::Tag, sha));
    }
}
