// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::task_service::TaskService;
use std::io::{self, BufRead, Write};

/// 交互式任务菜单
///
/// 从 `input` 逐行读取选项，结果写到 `output`。输入结束（EOF）时退出。
pub struct Menu<'a, R: BufRead, W: Write> {
    service: &'a TaskService,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(service: &'a TaskService, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// 运行菜单循环直到选择退出或输入结束
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                break;
            };

            match choice.as_str() {
                "1" => self.add_task().await?,
                "2" => self.list_pending().await?,
                "3" => self.list_all().await?,
                "4" => self.view_task().await?,
                "5" => self.complete_task().await?,
                "6" => self.delete_task().await?,
                "7" => {
                    writeln!(self.output, "Exiting. See you soon!")?;
                    break;
                }
                _ => writeln!(self.output, "Invalid option. Please try again.")?,
            }
        }
        Ok(())
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n===== Taskfy =====")?;
        writeln!(self.output, "1. Add task")?;
        writeln!(self.output, "2. List pending tasks")?;
        writeln!(self.output, "3. List all tasks")?;
        writeln!(self.output, "4. View task")?;
        writeln!(self.output, "5. Mark task as completed")?;
        writeln!(self.output, "6. Delete task")?;
        writeln!(self.output, "7. Exit")
    }

    /// 打印提示并读取一行，EOF 时返回 `None`
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// 读取一个ID，非数字时打印提示并返回 `None`
    fn prompt_id(&mut self, label: &str) -> io::Result<Option<i32>> {
        let Some(raw) = self.prompt(label)? else {
            return Ok(None);
        };
        match raw.parse::<i32>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                writeln!(self.output, "Error: please enter a valid numeric ID.")?;
                Ok(None)
            }
        }
    }

    async fn add_task(&mut self) -> io::Result<()> {
        let Some(description) = self.prompt("Task description: ")? else {
            return Ok(());
        };
        let Some(user_id) = self.prompt_id("User ID: ")? else {
            return Ok(());
        };
        let Some(category_id) = self.prompt_id("Category ID: ")? else {
            return Ok(());
        };

        match self.service.create(&description, user_id, category_id).await {
            Ok(task) => writeln!(
                self.output,
                "\nSuccess! Task '{}' (ID: {}) was added.",
                task.description, task.id
            ),
            Err(e) => writeln!(self.output, "Error: {}", e),
        }
    }

    async fn list_pending(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- Pending tasks ---")?;
        match self.service.list_pending().await {
            Ok(tasks) if tasks.is_empty() => writeln!(self.output, "No pending tasks."),
            Ok(tasks) => {
                for task in tasks {
                    writeln!(self.output, "{}", task)?;
                }
                Ok(())
            }
            Err(e) => writeln!(self.output, "Error: {}", e),
        }
    }

    async fn list_all(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- All tasks ---")?;
        match self.service.list_all().await {
            Ok(tasks) if tasks.is_empty() => writeln!(self.output, "No tasks registered."),
            Ok(tasks) => {
                for task in tasks {
                    writeln!(self.output, "{}", task)?;
                }
                Ok(())
            }
            Err(e) => writeln!(self.output, "Error: {}", e),
        }
    }

    async fn view_task(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt_id("Task ID: ")? else {
            return Ok(());
        };
        match self.service.get_by_id(id).await {
            Ok(Some(task)) => writeln!(self.output, "{}", task),
            Ok(None) => writeln!(self.output, "Error: task with ID {} not found.", id),
            Err(e) => writeln!(self.output, "Error: {}", e),
        }
    }

    async fn complete_task(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt_id("ID of the task to mark as completed: ")? else {
            return Ok(());
        };
        match self.service.mark_completed(id).await {
            Ok(true) => writeln!(self.output, "Success! Task {} marked as completed.", id),
            Ok(false) => writeln!(self.output, "Error: task with ID {} not found.", id),
            Err(e) => writeln!(self.output, "Error: {}", e),
        }
    }

    async fn delete_task(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt_id("ID of the task to remove: ")? else {
            return Ok(());
        };
        match self.service.delete(id).await {
            Ok(true) => writeln!(self.output, "Success! Task {} was removed.", id),
            Ok(false) => writeln!(self.output, "Error: task with ID {} not found.", id),
            Err(e) => writeln!(self.output, "Error: {}", e),
        }
    }
}
