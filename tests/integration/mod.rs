// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod helpers;

pub mod menu_test;
pub mod report_test;
pub mod scraping_report_test;
pub mod scraping_test;
pub mod task_service_test;
