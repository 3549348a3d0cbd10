// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::create_test_db;
use taskfy::domain::models::report::{CategoryPendingCountRow, PendingTaskRow, UserTaskRow};
use taskfy::domain::services::report_service::ReportService;
use taskfy::infrastructure::services::report_service_impl::ReportServiceImpl;

#[tokio::test]
async fn test_join_reports() {
    let test_db = create_test_db().await;
    let service = test_db.task_service();

    let ana = service.create_user("Ana", "ana@example.com").await.unwrap();
    let bob = service.create_user("Bob", "bob@example.com").await.unwrap();
    service.create_category("Empty").await.unwrap();
    let home = service.create_category("Home").await.unwrap();
    let work = service.create_category("Work").await.unwrap();

    service.create("T1", ana.id, home.id).await.unwrap();
    let t2 = service.create("T2", ana.id, work.id).await.unwrap();
    assert!(service.mark_completed(t2.id).await.unwrap());

    let reports = ReportServiceImpl::new(test_db.db.clone());

    let pending = reports.pending_tasks().await.unwrap();
    assert_eq!(
        pending,
        vec![PendingTaskRow {
            description: "T1".to_string(),
            status: "Pending".to_string(),
            user_name: "Ana".to_string(),
            category_name: "Home".to_string(),
        }]
    );

    let counts = reports.pending_count_by_category().await.unwrap();
    let counts: Vec<(String, i64)> = counts
        .into_iter()
        .map(|CategoryPendingCountRow { category_name, pending_tasks_count }| {
            (category_name, pending_tasks_count)
        })
        .collect();
    assert_eq!(
        counts,
        vec![
            ("Empty".to_string(), 0),
            ("Home".to_string(), 1),
            ("Work".to_string(), 0),
        ]
    );

    let users = reports.users_with_tasks().await.unwrap();
    assert_eq!(
        users,
        vec![
            UserTaskRow {
                user_name: "Ana".to_string(),
                task_description: Some("T1".to_string()),
            },
            UserTaskRow {
                user_name: "Ana".to_string(),
                task_description: Some("T2".to_string()),
            },
            UserTaskRow {
                user_name: bob.name.clone(),
                task_description: None,
            },
        ]
    );
}

#[tokio::test]
async fn test_reports_on_empty_database() {
    let test_db = create_test_db().await;
    let reports = ReportServiceImpl::new(test_db.db.clone());

    assert!(reports.pending_tasks().await.unwrap().is_empty());
    assert!(reports.pending_count_by_category().await.unwrap().is_empty());
    assert!(reports.users_with_tasks().await.unwrap().is_empty());
}
