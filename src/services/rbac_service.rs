// src/services/rbac_service.rs

use chrono::Utc;

use crate::common::error::{translate_db_error, AppError};
use crate::common::pagination::{PageParams, PaginatedResult};
use crate::db::RoleRepository;
use crate::models::rbac::{Role, RoleFilter, RoleOrderBy, RoleWithPermissions};

#[derive(Clone)]
pub struct RoleService {
    repo: RoleRepository,
}

impl RoleService {
    pub fn new(repo: RoleRepository) -> Self {
        Self { repo }
    }

    // Sem ordenação explícita, ordena por id. Erros do banco sobem sem tradução.
    #[tracing::instrument(skip(self))]
    pub async fn list(
        &self,
        filter: RoleFilter,
        order_by: Option<RoleOrderBy>,
        page: PageParams,
    ) -> Result<PaginatedResult<Role>, AppError> {
        let (roles, total) = self
            .repo
            .list(&filter, order_by.unwrap_or_default(), &page)
            .await?;

        Ok(PaginatedResult::new(roles, total, &page))
    }

    #[tracing::instrument(skip(self))]
    pub async fn create(&self, name: &str) -> Result<Role, AppError> {
        let role = self.repo.create(name).await.map_err(translate_db_error)?;

        tracing::info!(role_id = role.id, "Cargo criado");
        Ok(role)
    }

    #[tracing::instrument(skip(self))]
    pub async fn find_by_id(&self, id: i32) -> Result<RoleWithPermissions, AppError> {
        let rows = self.repo.find_with_permissions(id).await?;

        RoleWithPermissions::from_rows(rows).ok_or(AppError::RoleNotFound)
    }

    // Troca o nome (se informado) e carimba updated_at com o horário atual.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: i32, name: Option<&str>) -> Result<Role, AppError> {
        self.repo
            .update(id, name, Utc::now())
            .await
            .map_err(translate_db_error)
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, id: i32) -> Result<Role, AppError> {
        let role = self.repo.delete(id).await.map_err(translate_db_error)?;

        tracing::info!(role_id = role.id, "Cargo removido");
        Ok(role)
    }
}
