//! Lead repository implementation.
//!
//! Leads are append-only: the store assigns `id` and `created_at` on insert
//! and nothing here ever updates or deletes a row.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryOrder, QuerySelect, Set, Statement,
};

use super::entities::lead::{self, ActiveModel, Entity as LeadEntity};
use common::{AppError, AppResult};
use domain::{Lead, LeadSubmission};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Lead repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LeadRepository: Send + Sync {
    /// Insert one lead and return the stored row, including the
    /// store-generated `id` and `created_at`
    async fn create(&self, submission: LeadSubmission) -> AppResult<Lead>;

    /// Most recently created leads first, at most `limit` rows
    async fn list_recent(&self, limit: u64) -> AppResult<Vec<Lead>>;

    /// Check that the store answers queries
    async fn ping(&self) -> AppResult<()>;
}

/// Concrete implementation of LeadRepository backed by SeaORM
pub struct LeadStore {
    db: DatabaseConnection,
}

impl LeadStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LeadRepository for LeadStore {
    async fn create(&self, submission: LeadSubmission) -> AppResult<Lead> {
        let services = submission.services_or_default();
        let active_model = ActiveModel {
            id: NotSet,
            name: Set(submission.name),
            phone: Set(submission.phone),
            city: Set(submission.city),
            address: Set(submission.address),
            object_type: Set(submission.object_type),
            object_type_other: Set(submission.object_type_other),
            area: Set(submission.area),
            rooms: Set(submission.rooms),
            services: Set(Some(services)),
            start_time: Set(submission.start_time),
            deadline: Set(submission.deadline),
            budget: Set(submission.budget),
            materials_interest: Set(submission.materials_interest),
            consultation_type: Set(submission.consultation_type),
            created_at: NotSet,
        };

        // Single INSERT ... RETURNING, committed on its own
        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Lead::from(model))
    }

    async fn list_recent(&self, limit: u64) -> AppResult<Vec<Lead>> {
        let models = LeadEntity::find()
            .order_by_desc(lead::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Lead::from).collect())
    }

    async fn ping(&self) -> AppResult<()> {
        self.db
            .execute(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await
            .map_err(AppError::from)?;
        Ok(())
    }
}
