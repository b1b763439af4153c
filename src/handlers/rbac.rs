// src/handlers/rbac.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        pagination::PageParams,
    },
    config::AppState,
    middleware::i18n::Locale,
    models::rbac::{
        CreateRolePayload, Role, RoleFilter, RoleOrderBy, RoleSortField, RoleWithPermissions,
        SortOrder, UpdateRolePayload,
    },
};

// Query string da listagem (?page=1&perPage=10&nameContains=adm&sortBy=name&order=desc)
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListRolesQuery {
    /// Página (a partir de 1)
    pub page: Option<i64>,
    /// Itens por página (padrão 10, máximo 100)
    pub per_page: Option<i64>,
    pub id: Option<i32>,
    /// Nome exato
    pub name: Option<String>,
    /// Trecho do nome (sem diferenciar maiúsculas)
    pub name_contains: Option<String>,
    pub sort_by: Option<RoleSortField>,
    pub order: Option<SortOrder>,
}

impl ListRolesQuery {
    pub fn into_parts(self) -> (RoleFilter, Option<RoleOrderBy>, PageParams) {
        let filter = RoleFilter {
            id: self.id,
            name: self.name,
            name_contains: self.name_contains,
        };

        let order_by = match (self.sort_by, self.order) {
            (None, None) => None,
            (field, direction) => Some(RoleOrderBy {
                field: field.unwrap_or_default(),
                direction: direction.unwrap_or_default(),
            }),
        };

        (filter, order_by, PageParams::new(self.page, self.per_page))
    }
}

// GET /api/roles
#[utoipa::path(
    get,
    path = "/api/roles",
    tag = "Roles",
    params(ListRolesQuery),
    responses(
        (status = 200, description = "Página de cargos", body = crate::common::pagination::PaginatedResult<Role>)
    )
)]
pub async fn list_roles(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ListRolesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (filter, order_by, page) = query.into_parts();

    let roles = app_state
        .role_service
        .list(filter, order_by, page)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(roles))
}

// POST /api/roles
#[utoipa::path(
    post,
    path = "/api/roles",
    tag = "Roles",
    request_body = CreateRolePayload,
    responses(
        (status = 201, description = "Cargo criado", body = Role),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Já existe um cargo com esse nome")
    )
)]
pub async fn create_role(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateRolePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let role = app_state
        .role_service
        .create(&payload.name)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(role)))
}

// GET /api/roles/{id}
#[utoipa::path(
    get,
    path = "/api/roles/{id}",
    tag = "Roles",
    params(("id" = i32, Path, description = "ID do cargo")),
    responses(
        (status = 200, description = "Cargo com suas permissões", body = RoleWithPermissions),
        (status = 404, description = "Cargo não encontrado")
    )
)]
pub async fn get_role(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let role = app_state
        .role_service
        .find_by_id(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(role))
}

// PATCH /api/roles/{id}
#[utoipa::path(
    patch,
    path = "/api/roles/{id}",
    tag = "Roles",
    params(("id" = i32, Path, description = "ID do cargo")),
    request_body = UpdateRolePayload,
    responses(
        (status = 200, description = "Cargo atualizado", body = Role),
        (status = 404, description = "Cargo não encontrado"),
        (status = 409, description = "Já existe um cargo com esse nome")
    )
)]
pub async fn update_role(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateRolePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let role = app_state
        .role_service
        .update(id, payload.name.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(role))
}

// DELETE /api/roles/{id}
#[utoipa::path(
    delete,
    path = "/api/roles/{id}",
    tag = "Roles",
    params(("id" = i32, Path, description = "ID do cargo")),
    responses(
        (status = 200, description = "Cargo removido", body = Role),
        (status = 400, description = "Cargo ainda vinculado a permissões"),
        (status = 404, description = "Cargo não encontrado")
    )
)]
pub async fn delete_role(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let role = app_state
        .role_service
        .remove(id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(role))
}
