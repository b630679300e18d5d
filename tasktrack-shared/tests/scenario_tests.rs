/// End-to-end walk through a shared organization
///
/// Run with: cargo test -p tasktrack-shared --test scenario_tests

mod common;

use common::seed_user;
use tasktrack_shared::auth::authorization::authorize;
use tasktrack_shared::models::activity::ActivityAction;
use tasktrack_shared::models::membership::MembershipRole;
use tasktrack_shared::models::task::TaskStatus;
use tasktrack_shared::operations::{
    organizations,
    projects::{self, NewProject},
    tasks::{self, NewTask},
    OperationError,
};
use tasktrack_shared::store::{MemoryStore, Store};

#[tokio::test]
async fn test_acme_launch_scenario() {
    let store = MemoryStore::new();
    let a = seed_user(&store, "A").await;
    let b = seed_user(&store, "B").await;
    let c = seed_user(&store, "C").await;

    // A creates Acme and is its admin
    let acme = organizations::create_organization(&store, a.id, "Acme")
        .await
        .unwrap();
    assert_eq!(
        authorize(&store, a.id, acme.id).await.unwrap().role(),
        MembershipRole::Admin
    );

    // B joins
    let joined = organizations::join_organization(&store, b.id, &acme.id.to_string())
        .await
        .unwrap();
    assert_eq!(joined.membership.role, MembershipRole::Member);
    let feed = store.list_activities(acme.id, 50).await.unwrap();
    assert_eq!(
        feed.iter()
            .filter(|e| e.activity.action == ActivityAction::MemberJoined)
            .count(),
        1
    );

    // A creates Launch
    let launch = projects::create_project(
        &store,
        a.id,
        NewProject {
            name: "Launch".to_string(),
            description: None,
            organization_id: acme.id,
        },
    )
    .await
    .unwrap();
    let feed = store.list_activities(acme.id, 50).await.unwrap();
    assert_eq!(feed[0].activity.action, ActivityAction::ProjectCreated);
    assert_eq!(feed[0].activity.user_id, a.id);

    // B creates Write copy with the default status
    let task = tasks::create_task(
        &store,
        b.id,
        NewTask {
            title: "Write copy".to_string(),
            description: None,
            project_id: launch.id,
            status: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(task.status, TaskStatus::Todo);
    let feed = store.list_activities(acme.id, 50).await.unwrap();
    assert_eq!(feed[0].activity.action, ActivityAction::TaskCreated);
    assert_eq!(feed[0].activity.user_id, b.id);

    // B moves it to in-progress
    tasks::update_task_status(&store, b.id, task.id, TaskStatus::InProgress)
        .await
        .unwrap();
    let feed = store.list_activities(acme.id, 50).await.unwrap();
    assert_eq!(feed.len(), 5);
    assert_eq!(feed[0].activity.action, ActivityAction::TaskUpdated);
    assert_eq!(feed[0].activity.organization_id, acme.id);
    assert!(feed[0].activity.description.ends_with("to in-progress"));

    // C is not a member
    let err = tasks::list_tasks(&store, c.id, launch.id).await.unwrap_err();
    assert!(matches!(
        err,
        OperationError::NotAMember { organization_id } if organization_id == acme.id
    ));
    assert_eq!(store.list_activities(acme.id, 50).await.unwrap().len(), 5);
}
