mod common;

use common::{commit, git, manager, origin_with_script};
use pretty_assertions::assert_eq;
use rig_catalog::CatalogError;
use rig_core::enums::MirrorAction;
use rig_db::service::RigService;

async fn service() -> RigService {
    RigService::new_local(":memory:").await.unwrap()
}

#[tokio::test]
async fn first_sync_clones_then_checks_out() {
    let (dir, origin) = origin_with_script();
    let base = dir.path().join("repos");
    let svc = service().await;
    let mgr = manager(&base, false);
    let url = origin.to_string_lossy().to_string();

    let first = mgr.sync_repository(&svc, "lab", &url, "main").await.unwrap();
    assert_eq!(first.action, MirrorAction::Cloned);
    assert_eq!(first.scripts.len(), 1);
    assert_eq!(first.scripts[0].topology.as_deref(), Some("star"));
    assert_eq!(first.scripts[0].description.as_deref(), Some("Ping every host."));
    assert!(first.repo.last_synced_at.is_some());

    let second = mgr.sync_repository(&svc, "lab", &url, "main").await.unwrap();
    assert_eq!(second.action, MirrorAction::CheckedOut);
    assert_eq!(second.repo.id, first.repo.id);
    assert_eq!(svc.count_scripts(&first.repo.id).await.unwrap(), 1);

    let response = second.into_response();
    assert_eq!(response.scripts_count, 1);
    assert!(response.msg.contains("'lab'"));
}

#[tokio::test]
async fn resync_does_not_fetch_new_commits() {
    let (dir, origin) = origin_with_script();
    let base = dir.path().join("repos");
    let svc = service().await;
    let mgr = manager(&base, false);
    let url = origin.to_string_lossy().to_string();

    mgr.sync_repository(&svc, "lab", &url, "main").await.unwrap();
    commit(&origin, "checks/later.py", "# Later\n");

    let again = mgr.sync_repository(&svc, "lab", &url, "main").await.unwrap();
    assert_eq!(again.scripts.len(), 1);
}

#[tokio::test]
async fn checkout_switches_to_a_cloned_branch() {
    let (dir, origin) = origin_with_script();
    git(&origin, &["branch", "release"]);
    let base = dir.path().join("repos");
    let svc = service().await;
    let mgr = manager(&base, true);
    let url = origin.to_string_lossy().to_string();

    let synced = mgr.sync_repository(&svc, "lab", &url, "main").await.unwrap();
    assert!(synced.repo.last_synced_at.is_some());

    let checkout = mgr.checkout_current("release").await.unwrap();
    assert_eq!(checkout.repo, "lab");
    assert_eq!(checkout.branch.as_deref(), Some("release"));
    assert!(checkout.head.is_some());
}

#[tokio::test]
async fn failed_clone_leaves_no_record() {
    let dir = tempfile::tempdir().unwrap();
    let svc = service().await;
    let mgr = manager(&dir.path().join("repos"), false);
    let missing = dir.path().join("nowhere").to_string_lossy().to_string();

    let err = mgr
        .sync_repository(&svc, "lab", &missing, "main")
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Git(_)), "got {err:?}");
    assert!(svc.find_repo_by_name("lab").await.unwrap().is_none());
}

#[tokio::test]
async fn invalid_names_and_option_like_branches_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let svc = service().await;
    let mgr = manager(&dir.path().join("repos"), false);

    for name in ["../escape", ".hidden", "a/b", ""] {
        let err = mgr
            .sync_repository(&svc, name, "file:///x", "main")
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)), "{name:?}: {err:?}");
    }

    let err = mgr
        .sync_repository(&svc, "lab", "file:///x", "--upload-pack=evil")
        .await
        .unwrap_err();
    assert!(
        matches!(err, CatalogError::Git(rig_git::GitError::InvalidArgument(_))),
        "got {err:?}"
    );
}

#[tokio::test]
async fn checkout_without_current_repo_is_validation() {
    let dir = tempfile::tempdir().unwrap();
    let storage = rig_config::StorageConfig {
        repos_base_path: dir.path().to_path_buf(),
        ..rig_config::StorageConfig::default()
    };
    let mgr = rig_catalog::MirrorManager::new(&storage, &rig_config::CatalogConfig::default());
    assert!(matches!(
        mgr.checkout_current("main").await.unwrap_err(),
        CatalogError::Validation(_)
    ));
}
