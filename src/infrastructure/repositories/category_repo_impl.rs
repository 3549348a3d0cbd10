// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::category::{Category, NewCategory};
use crate::domain::repositories::task_repository::RepositoryError;
use crate::domain::repositories::user_repository::CategoryRepository;
use crate::infrastructure::database::entities::category as category_entity;
use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait};
use std::sync::Arc;

/// 分类仓库实现
#[derive(Clone)]
pub struct CategoryRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl CategoryRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<category_entity::Model> for Category {
    fn from(model: category_entity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

#[async_trait]
impl CategoryRepository for CategoryRepositoryImpl {
    async fn create(&self, category: &NewCategory) -> Result<Category, RepositoryError> {
        let txn = self.db.begin().await?;

        let model = category_entity::ActiveModel {
            name: Set(category.name.clone()),
            ..Default::default()
        };

        match model.insert(&txn).await {
            Ok(inserted) => {
                txn.commit().await?;
                Ok(inserted.into())
            }
            Err(e) => {
                txn.rollback().await?;
                Err(e.into())
            }
        }
    }

    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let models = category_entity::Entity::find()
            .order_by_asc(category_entity::Column::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
