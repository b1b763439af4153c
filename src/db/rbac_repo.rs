// src/db/rbac_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::common::pagination::PageParams;
use crate::models::rbac::{Role, RoleFilter, RoleOrderBy, RolePermissionRow, RoleSortField};

// Repositório de cargos. Devolve o sqlx::Error cru: quem decide como
// traduzir é o serviço.
#[derive(Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Página de cargos + total de linhas que batem com o filtro
    pub async fn list(
        &self,
        filter: &RoleFilter,
        order_by: RoleOrderBy,
        page: &PageParams,
    ) -> Result<(Vec<Role>, i64), sqlx::Error> {
        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM roles");
        push_filter(&mut count_query, filter);

        let mut select_query = QueryBuilder::new("SELECT id, name, created_at, updated_at FROM roles");
        push_filter(&mut select_query, filter);
        push_order_by(&mut select_query, order_by);
        select_query
            .push(" LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        // As duas consultas são independentes, rodam juntas
        let (total, roles) = tokio::try_join!(
            count_query.build_query_scalar::<i64>().fetch_one(&self.pool),
            select_query.build_query_as::<Role>().fetch_all(&self.pool),
        )?;

        Ok((roles, total))
    }

    pub async fn create(&self, name: &str) -> Result<Role, sqlx::Error> {
        sqlx::query_as::<_, Role>(
            "INSERT INTO roles (name) VALUES ($1) RETURNING id, name, created_at, updated_at",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
    }

    // Cargo + nomes das permissões, numa consulta só (LEFT JOIN)
    pub async fn find_with_permissions(
        &self,
        id: i32,
    ) -> Result<Vec<RolePermissionRow>, sqlx::Error> {
        sqlx::query_as::<_, RolePermissionRow>(
            r#"
            SELECT r.id, r.name, r.created_at, r.updated_at, p.name AS permission_name
            FROM roles r
            LEFT JOIN role_has_permissions rp ON rp.role_id = r.id
            LEFT JOIN permissions p ON p.id = rp.permission_id
            WHERE r.id = $1
            ORDER BY rp.permission_id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
    }

    // `name = None` mantém o nome atual. Linha inexistente -> RowNotFound.
    pub async fn update(
        &self,
        id: i32,
        name: Option<&str>,
        updated_at: DateTime<Utc>,
    ) -> Result<Role, sqlx::Error> {
        sqlx::query_as::<_, Role>(
            r#"
            UPDATE roles
            SET name = COALESCE($2, name), updated_at = $3
            WHERE id = $1
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(updated_at)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn delete(&self, id: i32) -> Result<Role, sqlx::Error> {
        sqlx::query_as::<_, Role>(
            "DELETE FROM roles WHERE id = $1 RETURNING id, name, created_at, updated_at",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
    }
}

fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &RoleFilter) {
    let mut separator = " WHERE ";

    if let Some(id) = filter.id {
        query.push(separator).push("id = ").push_bind(id);
        separator = " AND ";
    }
    if let Some(name) = &filter.name {
        query.push(separator).push("name = ").push_bind(name.clone());
        separator = " AND ";
    }
    if let Some(fragment) = &filter.name_contains {
        query
            .push(separator)
            .push("name ILIKE ")
            .push_bind(format!("%{}%", escape_like(fragment)));
    }
}

fn push_order_by(query: &mut QueryBuilder<'_, Postgres>, order_by: RoleOrderBy) {
    query
        .push(" ORDER BY ")
        .push(order_by.field.column())
        .push(" ")
        .push(order_by.direction.keyword());

    // desempate estável para a paginação
    if order_by.field != RoleSortField::Id {
        query.push(", id ASC");
    }
}

fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rbac::SortOrder;

    #[test]
    fn empty_filter_adds_no_where_clause() {
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM roles");
        push_filter(&mut query, &RoleFilter::default());
        assert_eq!(query.sql(), "SELECT COUNT(*) FROM roles");
    }

    #[test]
    fn filter_fields_are_joined_with_and() {
        let filter = RoleFilter {
            id: Some(3),
            name: Some("admin".into()),
            name_contains: Some("adm".into()),
        };
        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM roles");
        push_filter(&mut query, &filter);

        assert_eq!(
            query.sql(),
            "SELECT COUNT(*) FROM roles WHERE id = $1 AND name = $2 AND name ILIKE $3"
        );
    }

    #[test]
    fn order_by_adds_id_tiebreak() {
        let mut query = QueryBuilder::<Postgres>::new("SELECT id FROM roles");
        push_order_by(
            &mut query,
            RoleOrderBy {
                field: RoleSortField::Name,
                direction: SortOrder::Desc,
            },
        );
        assert_eq!(query.sql(), "SELECT id FROM roles ORDER BY name DESC, id ASC");

        let mut query = QueryBuilder::<Postgres>::new("SELECT id FROM roles");
        push_order_by(&mut query, RoleOrderBy::default());
        assert_eq!(query.sql(), "SELECT id FROM roles ORDER BY id ASC");
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("admin"), "admin");
    }
}
