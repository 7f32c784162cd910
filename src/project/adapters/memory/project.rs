//! In-memory project repository.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::identity::domain::Email;
use crate::project::{
    domain::{Project, ProjectId},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    state: Arc<RwLock<InMemoryProjectState>>,
}

#[derive(Debug, Default)]
struct InMemoryProjectState {
    last_id: u64,
    projects: BTreeMap<ProjectId, Project>,
}

impl InMemoryProjectRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Collects the projects matching `predicate`; the map keeps them ordered by id.
fn collect_matching(
    state: &InMemoryProjectState,
    predicate: impl Fn(&Project) -> bool,
) -> Vec<Project> {
    state
        .projects
        .values()
        .filter(|project| predicate(project))
        .cloned()
        .collect()
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn next_id(&self) -> ProjectRepositoryResult<ProjectId> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.last_id = state.last_id.saturating_add(1);
        Ok(ProjectId::new(state.last_id))
    }

    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;

        if state.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }

        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;

        let Some(slot) = state.projects.get_mut(&project.id()) else {
            return Err(ProjectRepositoryError::NotFound(project.id()));
        };
        *slot = project.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner: &Email) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(collect_matching(&state, |project| project.owner() == owner))
    }

    async fn find_by_collaborator(
        &self,
        collaborator: &Email,
    ) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(collect_matching(&state, |project| {
            project.has_collaborator(collaborator)
        }))
    }
}
