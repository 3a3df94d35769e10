use std::sync::Arc;

use partsadmin::catalog::ModelYearGroups;
use partsadmin::chain::LevelState;
use partsadmin::links::{ChainDriver, FinalLinkChain, LinkChain, ModelYearChain};
use partsadmin::models::RecordId;
use partsadmin::shell::{AlwaysConfirm, CrudShell};

mod common;
use common::{RecordingNotifier, spawn_backend};

#[tokio::test]
async fn test_final_link_chain_resolves_level_by_level() {
    common::init_tracing();
    let backend = spawn_backend().await;
    let notifier = RecordingNotifier::default();
    let mut driver: ChainDriver<FinalLinkChain> =
        ChainDriver::new(backend.client(), Arc::new(notifier.clone()));

    driver.open().await.unwrap();

    // Models populated, detail level preset from the full part list,
    // everything in between locked.
    assert_eq!(driver.chain().options(0).unwrap().len(), 2);
    assert_eq!(driver.chain().state(1).unwrap(), LevelState::Locked);
    assert_eq!(driver.chain().state(2).unwrap(), LevelState::Locked);
    assert_eq!(driver.chain().options(3).unwrap().len(), 2);
    assert!(driver.chain().is_enabled(3).unwrap());

    driver.select(0, RecordId::from(1)).await.unwrap();
    // Year groups narrowed to the chosen model.
    assert_eq!(backend.requests_to("api/YearGroup/yearGroups/1").len(), 1);
    let year_options = driver.chain().options(1).unwrap();
    assert_eq!(year_options.len(), 1);
    assert_eq!(year_options[0].label, "2010-2015");

    driver.select(1, RecordId::from(10)).await.unwrap();
    let scoped = backend.requests_to("api/DetailGroup/getByModelIdAndYearGroupId");
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].query.as_deref(), Some("modelId=1&yearGroupId=10"));
    assert_eq!(driver.chain().options(2).unwrap().len(), 1);

    driver.select(2, RecordId::from(20)).await.unwrap();
    driver.select(3, RecordId::from(30)).await.unwrap();
    assert!(driver.chain().is_complete());
}

#[tokio::test]
async fn test_incomplete_chain_submits_nothing() {
    let backend = spawn_backend().await;
    let notifier = RecordingNotifier::default();
    let mut driver: ChainDriver<FinalLinkChain> =
        ChainDriver::new(backend.client(), Arc::new(notifier.clone()));
    driver.open().await.unwrap();
    driver.select(0, RecordId::from(1)).await.unwrap();

    assert!(!driver.submit().await);

    assert_eq!(
        notifier.last().unwrap(),
        ("warning", "Select every field first".to_string())
    );
    assert!(
        backend
            .requests_to("api/ModelYearGroupDetailGroupDetail/add")
            .is_empty()
    );
}

#[tokio::test]
async fn test_submit_posts_the_key_as_query_parameters() {
    let backend = spawn_backend().await;
    let notifier = RecordingNotifier::default();
    let mut driver: ChainDriver<FinalLinkChain> =
        ChainDriver::new(backend.client(), Arc::new(notifier.clone()));
    driver.open().await.unwrap();
    driver.select(0, RecordId::from(1)).await.unwrap();
    driver.select(1, RecordId::from(10)).await.unwrap();
    driver.select(2, RecordId::from(20)).await.unwrap();
    driver.select(3, RecordId::from(30)).await.unwrap();

    assert!(driver.submit().await);

    let posts = backend.requests_to("api/ModelYearGroupDetailGroupDetail/add");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].method, "POST");
    assert_eq!(
        posts[0].query.as_deref(),
        Some("modelId=1&yearGroupId=10&detailGroupId=20&detailId=30")
    );
    assert!(posts[0].body.is_empty());

    // Selections clear for the next entry; the option sets survive where
    // they can (first level and preset levels).
    assert!(!driver.chain().is_complete());
    assert!(driver.chain().selected(0).unwrap().is_none());
    assert_eq!(driver.chain().options(0).unwrap().len(), 2);
    assert_eq!(driver.chain().options(3).unwrap().len(), 2);
}

#[tokio::test]
async fn test_failed_option_fetch_leaves_level_retryable() {
    let backend = spawn_backend().await;
    let notifier = RecordingNotifier::default();
    let mut driver: ChainDriver<FinalLinkChain> =
        ChainDriver::new(backend.client(), Arc::new(notifier.clone()));
    driver.open().await.unwrap();

    backend.fail_path("api/YearGroup/yearGroups/1");
    driver.select(0, RecordId::from(1)).await.unwrap();

    assert_eq!(driver.chain().state(1).unwrap(), LevelState::Ready);
    assert!(driver.chain().options(1).unwrap().is_empty());
    assert!(!driver.chain().is_enabled(1).unwrap());
    assert_eq!(
        notifier.last().unwrap(),
        ("error", "Could not load year group options".to_string())
    );

    // Re-selecting the model retries and recovers.
    backend.restore_path("api/YearGroup/yearGroups/1");
    driver.select(0, RecordId::from(1)).await.unwrap();
    assert_eq!(driver.chain().options(1).unwrap().len(), 1);
}

#[tokio::test]
async fn test_model_with_no_linked_year_groups_disables_the_level() {
    let backend = spawn_backend().await;
    let notifier = RecordingNotifier::default();
    let mut driver: ChainDriver<FinalLinkChain> =
        ChainDriver::new(backend.client(), Arc::new(notifier.clone()));
    driver.open().await.unwrap();

    driver.select(0, RecordId::from(2)).await.unwrap();

    assert_eq!(driver.chain().state(1).unwrap(), LevelState::Ready);
    assert!(!driver.chain().is_enabled(1).unwrap());
    assert_eq!(
        driver.chain().placeholder(1).unwrap(),
        "no options for this selection"
    );
}

#[tokio::test]
async fn test_created_link_appears_after_the_screen_reloads() {
    let backend = spawn_backend().await;
    let notifier = RecordingNotifier::default();
    let mut shell: CrudShell<ModelYearGroups> = CrudShell::new(
        backend.client(),
        Arc::new(notifier.clone()),
        Arc::new(AlwaysConfirm),
    );
    let mut driver: ChainDriver<ModelYearChain> =
        ChainDriver::new(backend.client(), Arc::new(notifier.clone()));
    shell.load().await;
    driver.open().await.unwrap();

    driver.select(0, RecordId::from(1)).await.unwrap();
    driver.select(1, RecordId::from(10)).await.unwrap();
    let created = driver.submit().await;
    if created {
        shell.load().await;
    }

    assert!(created);
    assert_eq!(shell.items().len(), 1);
    assert_eq!(shell.items()[0].model_id, RecordId::from(1));
    // One list fetch before the create, one reload after.
    let lists: Vec<_> = backend
        .requests_to("api/v1/ModelYearGroup")
        .into_iter()
        .filter(|req| req.method == "GET")
        .collect();
    assert_eq!(lists.len(), 2);
}

#[tokio::test]
async fn test_level_options_reject_missing_upstream_ids() {
    let backend = spawn_backend().await;
    let client = backend.client();

    let err = FinalLinkChain::level_options(&client, 1, &[]).await.unwrap_err();
    assert_eq!(err.user_message(), "upstream selection 0 is missing");

    let err = FinalLinkChain::level_options(&client, 2, &[RecordId::from(1)])
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "upstream selection 1 is missing");
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_two_level_chain_with_preset_year_groups() {
    let backend = spawn_backend().await;
    let notifier = RecordingNotifier::default();
    let mut driver: ChainDriver<ModelYearChain> =
        ChainDriver::new(backend.client(), Arc::new(notifier.clone()));
    driver.open().await.unwrap();

    // The year-group level offers the full list regardless of model.
    assert_eq!(driver.chain().options(1).unwrap().len(), 2);
    assert_eq!(driver.chain().options(1).unwrap()[1].label, "2016-2020");

    driver.select(0, RecordId::from(2)).await.unwrap();
    driver.select(1, RecordId::from(11)).await.unwrap();
    assert!(driver.submit().await);

    let posts = backend.requests_to("api/v1/ModelYearGroup");
    let post = posts.iter().find(|req| req.method == "POST").unwrap();
    assert_eq!(post.query.as_deref(), Some("modelId=2&yearGroupId=11"));
}
