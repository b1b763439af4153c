// src/docs.rs

use utoipa::OpenApi;

use crate::common::pagination::PaginationMeta;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Roles ---
        handlers::rbac::list_roles,
        handlers::rbac::create_role,
        handlers::rbac::get_role,
        handlers::rbac::update_role,
        handlers::rbac::delete_role,
    ),
    components(
        schemas(
            models::rbac::Role,
            models::rbac::RoleWithPermissions,
            models::rbac::RoleSortField,
            models::rbac::SortOrder,
            models::rbac::CreateRolePayload,
            models::rbac::UpdateRolePayload,
            PaginationMeta,
        )
    ),
    tags(
        (name = "Roles", description = "Cargos e suas permissões")
    ),
    info(
        title = "Roles API",
        description = "CRUD de cargos com projeção das permissões vinculadas"
    )
)]
pub struct ApiDoc;
