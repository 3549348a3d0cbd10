// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{create_test_db, seed_owner};
use taskfy::domain::models::task::TaskStatus;
use taskfy::domain::repositories::task_repository::RepositoryError;
use taskfy::domain::services::task_service::TaskServiceError;

#[tokio::test]
async fn test_create_task_starts_pending() {
    let test_db = create_test_db().await;
    let service = test_db.task_service();
    let (user_id, category_id) = seed_owner(&service).await;

    let task = service
        .create("  Write report  ", user_id, category_id)
        .await
        .unwrap();

    assert_eq!(task.description, "Write report");
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.user_id, user_id);
    assert_eq!(task.category_id, category_id);

    let loaded = service.get_by_id(task.id).await.unwrap().unwrap();
    assert_eq!(loaded.description, "Write report");
}

#[tokio::test]
async fn test_create_task_rejects_empty_description() {
    let test_db = create_test_db().await;
    let service = test_db.task_service();
    let (user_id, category_id) = seed_owner(&service).await;

    let result = service.create("   ", user_id, category_id).await;

    assert!(matches!(result, Err(TaskServiceError::Validation(_))));
    assert!(service.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_task_with_unknown_user_fails() {
    let test_db = create_test_db().await;
    let service = test_db.task_service();
    let (_, category_id) = seed_owner(&service).await;

    let result = service.create("Orphan", 999, category_id).await;

    assert!(matches!(
        result,
        Err(TaskServiceError::Repository(RepositoryError::Database(_)))
    ));
    assert!(service.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_mark_completed_absent_id_mutates_nothing() {
    let test_db = create_test_db().await;
    let service = test_db.task_service();
    let (user_id, category_id) = seed_owner(&service).await;
    let task = service.create("Buy milk", user_id, category_id).await.unwrap();

    assert!(!service.mark_completed(task.id + 100).await.unwrap());

    let tasks = service.list_all().await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].status, TaskStatus::Pending);
}

#[tokio::test]
async fn test_mark_completed_removes_task_from_pending() {
    let test_db = create_test_db().await;
    let service = test_db.task_service();
    let (user_id, category_id) = seed_owner(&service).await;
    let first = service.create("First", user_id, category_id).await.unwrap();
    let second = service.create("Second", user_id, category_id).await.unwrap();

    assert!(service.mark_completed(first.id).await.unwrap());

    let pending = service.list_pending().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, second.id);

    let all = service.list_all().await.unwrap();
    assert_eq!(all.iter().map(|t| t.id).collect::<Vec<_>>(), vec![first.id, second.id]);
    assert_eq!(all[0].status, TaskStatus::Completed);
}

#[tokio::test]
async fn test_delete_task() {
    let test_db = create_test_db().await;
    let service = test_db.task_service();
    let (user_id, category_id) = seed_owner(&service).await;
    let task = service.create("Temporary", user_id, category_id).await.unwrap();

    assert!(!service.delete(task.id + 1).await.unwrap());
    assert_eq!(service.list_all().await.unwrap().len(), 1);

    assert!(service.delete(task.id).await.unwrap());
    assert!(service.get_by_id(task.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_user_email_is_rejected() {
    let test_db = create_test_db().await;
    let service = test_db.task_service();
    seed_owner(&service).await;

    let result = service.create_user("Other Ana", "ana@example.com").await;

    assert!(matches!(
        result,
        Err(TaskServiceError::Repository(RepositoryError::Database(_)))
    ));
    assert_eq!(service.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_categories_in_id_order() {
    let test_db = create_test_db().await;
    let service = test_db.task_service();
    service.create_category("Work").await.unwrap();
    service.create_category("Home").await.unwrap();

    let names: Vec<String> = service
        .list_categories()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();

    assert_eq!(names, vec!["Work", "Home"]);
}
