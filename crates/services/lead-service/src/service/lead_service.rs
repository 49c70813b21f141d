//! Lead service - Handles lead submission and listing.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult};
use domain::{Lead, LeadSubmission, SubmittedLead};

use crate::repository::LeadRepository;

/// Lead service trait for dependency injection.
#[async_trait]
pub trait LeadService: Send + Sync {
    /// Persist one lead and report its store-assigned id and timestamp
    async fn submit_lead(&self, submission: LeadSubmission) -> AppResult<SubmittedLead>;

    /// Up to `limit` leads, newest first
    async fn list_leads(&self, limit: u64) -> AppResult<Vec<Lead>>;

    /// Verify the leads store is reachable
    async fn check_store(&self) -> AppResult<()>;
}

/// Concrete implementation of LeadService using repository.
pub struct LeadManager {
    repo: Arc<dyn LeadRepository>,
}

impl LeadManager {
    /// Create new lead service instance with repository
    pub fn new(repo: Arc<dyn LeadRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl LeadService for LeadManager {
    async fn submit_lead(&self, submission: LeadSubmission) -> AppResult<SubmittedLead> {
        let lead = self.repo.create(submission).await?;

        let submitted = SubmittedLead::from_stored(&lead)
            .ok_or_else(|| AppError::internal("store returned no created_at for the new lead"))?;

        tracing::info!(lead_id = submitted.lead_id, "Lead stored");
        Ok(submitted)
    }

    async fn list_leads(&self, limit: u64) -> AppResult<Vec<Lead>> {
        let leads = self.repo.list_recent(limit).await?;
        tracing::debug!(limit, returned = leads.len(), "Leads listed");
        Ok(leads)
    }

    async fn check_store(&self) -> AppResult<()> {
        self.repo.ping().await
    }
}
