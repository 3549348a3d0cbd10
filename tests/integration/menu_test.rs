// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::{create_test_db, seed_owner};
use taskfy::domain::models::task::TaskStatus;
use taskfy::domain::services::task_service::TaskService;
use taskfy::presentation::menu::Menu;

async fn run_menu(service: &TaskService, script: &str) -> String {
    let mut output = Vec::new();
    Menu::new(service, script.as_bytes(), &mut output)
        .run()
        .await
        .unwrap();
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn test_menu_add_complete_and_list() {
    let test_db = create_test_db().await;
    let service = test_db.task_service();
    let (user_id, category_id) = seed_owner(&service).await;

    let script = format!(
        "1\nWater plants\n{}\n{}\n2\n5\n1\n2\n3\n7\n",
        user_id, category_id
    );
    let output = run_menu(&service, &script).await;

    assert!(output.contains("Success! Task 'Water plants' (ID: 1) was added."));
    assert!(output.contains("ID: 1 | Status: Pending | Description: Water plants"));
    assert!(output.contains("Success! Task 1 marked as completed."));
    assert!(output.contains("No pending tasks."));
    assert!(output.contains("ID: 1 | Status: Completed | Description: Water plants"));
    assert!(output.trim_end().ends_with("Exiting. See you soon!"));

    let task = service.get_by_id(1).await.unwrap().unwrap();
    assert_eq!(task.status, TaskStatus::Completed);
}

#[tokio::test]
async fn test_menu_rejects_bad_input() {
    let test_db = create_test_db().await;
    let service = test_db.task_service();

    let output = run_menu(&service, "9\n4\nabc\n6\n42\n3\n").await;

    assert!(output.contains("Invalid option. Please try again."));
    assert!(output.contains("Error: please enter a valid numeric ID."));
    assert!(output.contains("Error: task with ID 42 not found."));
    assert!(output.contains("No tasks registered."));
    assert!(!output.contains("Exiting."));
}
