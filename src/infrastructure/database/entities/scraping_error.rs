// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "scraping_error")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub page_id: Option<i32>,
    pub url_attempted: String,
    pub error_type: String,
    #[sea_orm(column_type = "Text")]
    pub error_message: String,
    pub occurred_at: ChronoDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
