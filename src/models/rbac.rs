// src/models/rbac.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

// O que sai do banco (Tabela roles)
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[schema(example = 1)]
    pub id: i32,

    #[schema(example = "admin")]
    pub name: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Linha do JOIN roles -> role_has_permissions -> permissions.
// `permission_name` é NULL quando o cargo não tem vínculos ou o vínculo
// aponta para uma permissão ausente.
#[derive(Debug, FromRow)]
pub struct RolePermissionRow {
    #[sqlx(flatten)]
    pub role: Role,
    pub permission_name: Option<String>,
}

// Resposta completa (Cargo + nomes das permissões)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleWithPermissions {
    #[serde(flatten)]
    pub role: Role,

    #[schema(example = json!(["user:read", "user:write"]))]
    pub permissions: Vec<String>,
}

impl RoleWithPermissions {
    // None se não houver nenhuma linha (cargo inexistente)
    pub fn from_rows(rows: Vec<RolePermissionRow>) -> Option<Self> {
        let mut rows = rows.into_iter();
        let first = rows.next()?;

        let permissions = std::iter::once(first.permission_name)
            .chain(rows.map(|row| row.permission_name))
            .flatten()
            .collect();

        Some(Self {
            role: first.role,
            permissions,
        })
    }
}

// Payload para criar um cargo
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRolePayload {
    #[validate(length(min = 1, max = 255, message = "O nome deve ter entre 1 e 255 caracteres."))]
    #[schema(example = "editor")]
    pub name: String,
}

// Payload parcial: campo ausente mantém o valor atual
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRolePayload {
    #[validate(length(min = 1, max = 255, message = "O nome deve ter entre 1 e 255 caracteres."))]
    #[schema(example = "editor-chefe")]
    pub name: Option<String>,
}

// Filtro da listagem. Campos `None` não restringem nada.
#[derive(Debug, Clone, Default)]
pub struct RoleFilter {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub name_contains: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum RoleSortField {
    #[default]
    Id,
    Name,
    CreatedAt,
    UpdatedAt,
}

impl RoleSortField {
    pub fn column(self) -> &'static str {
        match self {
            RoleSortField::Id => "id",
            RoleSortField::Name => "name",
            RoleSortField::CreatedAt => "created_at",
            RoleSortField::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoleOrderBy {
    pub field: RoleSortField,
    pub direction: SortOrder,
}
