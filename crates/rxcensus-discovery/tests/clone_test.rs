//! Tests for clone planning, execution and allow-list generation.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use rxcensus_core::config::CloneConfig;
use rxcensus_core::errors::CloneError;
use rxcensus_core::types::Dialect;
use rxcensus_discovery::{
    allow_list_from_clones, ClonePlan, Cloner, RepositoryManifest, RepositoryRecord,
};

fn record(owner: &str, name: &str, stars: u64) -> RepositoryRecord {
    RepositoryRecord {
        id: stars,
        full_name: format!("{owner}/{name}"),
        owner: owner.to_string(),
        name: name.to_string(),
        stargazers_count: stars,
        forks_count: 0,
        language: None,
        size: 0,
    }
}

fn manifest() -> RepositoryManifest {
    RepositoryManifest {
        dialect: Dialect::RxJava,
        query: "rxjava".to_string(),
        repositories: vec![
            record("small", "app", 20),
            record("ReactiveX", "RxJava", 9000),
            record("big", "app", 800),
            record("mid", "app", 300),
        ],
    }
}

/// Creates the target directory, or fails for URLs containing `fail`
/// after leaving a partial directory behind.
#[derive(Default)]
struct FakeCloner {
    calls: RefCell<Vec<String>>,
}

impl Cloner for FakeCloner {
    fn clone_repo(&self, url: &str, target: &Path) -> Result<(), CloneError> {
        self.calls.borrow_mut().push(url.to_string());
        std::fs::create_dir_all(target).unwrap();
        if url.contains("fail") {
            return Err(CloneError::Failed {
                url: url.to_string(),
                target: target.to_path_buf(),
                message: "remote hung up".to_string(),
            });
        }
        Ok(())
    }
}

#[test]
fn test_plan_orders_by_stars_and_excludes_owners() {
    let config = CloneConfig {
        per_dialect: Some(2),
        ..Default::default()
    };
    let plan = ClonePlan::build(&manifest(), &config, Path::new("repos"));
    assert_eq!(plan.dialect, Dialect::RxJava);
    let ids: Vec<&str> = plan.targets.iter().map(|t| t.repository.as_str()).collect();
    assert_eq!(ids, vec!["big_app", "mid_app"]);
    assert_eq!(plan.targets[0].url, "https://github.com/big/app.git");
    assert_eq!(plan.targets[0].path, PathBuf::from("repos/rxjava/big_app"));
}

#[test]
fn test_plan_uses_configured_remote_and_exclusions() {
    let config = CloneConfig {
        per_dialect: Some(10),
        excluded_owners: vec!["big".to_string()],
        remote_base: Some("https://mirror.test/git/".to_string()),
    };
    let plan = ClonePlan::build(&manifest(), &config, Path::new("repos"));
    let ids: Vec<&str> = plan.targets.iter().map(|t| t.repository.as_str()).collect();
    assert_eq!(ids, vec!["ReactiveX_RxJava", "mid_app", "small_app"]);
    assert_eq!(plan.targets[1].url, "https://mirror.test/git/mid/app.git");
}

#[test]
fn test_execute_skips_existing_and_records_failures() {
    let dir = tempfile::TempDir::new().unwrap();
    let manifest = RepositoryManifest {
        dialect: Dialect::RxSwift,
        query: "rxswift".to_string(),
        repositories: vec![
            record("done", "app", 30),
            record("fail", "app", 20),
            record("new", "app", 10),
        ],
    };
    std::fs::create_dir_all(dir.path().join("rxswift/done_app")).unwrap();

    let plan = ClonePlan::build(&manifest, &CloneConfig::default(), dir.path());
    let cloner = FakeCloner::default();
    let report = plan.execute(&cloner);

    assert_eq!(report.skipped_existing.len(), 1);
    assert_eq!(report.cloned.len(), 1);
    assert_eq!(report.cloned[0].as_str(), "new_app");
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0.as_str(), "fail_app");
    assert_eq!(report.attempted(), 3);
    assert_eq!(cloner.calls.borrow().len(), 2);
    assert!(!dir.path().join("rxswift/fail_app").exists());

    // Second run is a no-op apart from the failed repository.
    let again = plan.execute(&cloner);
    assert_eq!(again.skipped_existing.len(), 2);
    assert_eq!(again.failed.len(), 1);
}

#[test]
fn test_allow_list_from_clone_directories() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("rxjs/a_b")).unwrap();
    std::fs::create_dir_all(dir.path().join("rxjs/c_d")).unwrap();
    std::fs::create_dir_all(dir.path().join("rxjs/.cache")).unwrap();
    std::fs::write(dir.path().join("rxjs/notes.txt"), "x").unwrap();

    let list = allow_list_from_clones(dir.path(), &[Dialect::RxJs, Dialect::RxDart]).unwrap();
    assert!(list.contains(Dialect::RxJs, "a_b"));
    assert!(list.contains(Dialect::RxJs, "c_d"));
    assert_eq!(list.len_for(Dialect::RxJs), 2);
    assert_eq!(list.len_for(Dialect::RxDart), 0);
    assert!(list.dialects().any(|d| d == Dialect::RxDart));
}
