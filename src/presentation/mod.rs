// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 控制台界面：命令行、交互菜单与报表输出
pub mod cli;
pub mod console;
pub mod menu;
