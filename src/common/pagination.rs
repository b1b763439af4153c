// src/common/pagination.rs

use serde::Serialize;
use utoipa::ToSchema;

pub const DEFAULT_PER_PAGE: i64 = 10;
pub const MAX_PER_PAGE: i64 = 100;

// Página pedida pelo cliente. Valores ausentes ou menores que 1 caem no
// padrão (página 1, 10 por página); per_page é limitado a MAX_PER_PAGE.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PageParams {
    pub fn new(page: Option<i64>, per_page: Option<i64>) -> Self {
        Self { page, per_page }
    }

    pub fn page(&self) -> i64 {
        self.page.filter(|p| *p >= 1).unwrap_or(1)
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
            .filter(|p| *p >= 1)
            .map(|p| p.min(MAX_PER_PAGE))
            .unwrap_or(DEFAULT_PER_PAGE)
    }

    pub fn limit(&self) -> i64 {
        self.per_page()
    }

    // Satura em vez de estourar: página absurda vira OFFSET enorme (página vazia)
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.per_page())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    #[schema(example = 2)]
    pub total: i64,
    // total de páginas
    #[schema(example = 2)]
    pub last_page: i64,
    #[schema(example = 1)]
    pub current_page: i64,
    #[schema(example = 10)]
    pub per_page: i64,
    pub prev: Option<i64>,
    pub next: Option<i64>,
}

impl PaginationMeta {
    pub fn new(total: i64, params: &PageParams) -> Self {
        let current_page = params.page();
        let per_page = params.per_page();
        let last_page = (total + per_page - 1) / per_page;

        Self {
            total,
            last_page,
            current_page,
            per_page,
            prev: (current_page > 1).then(|| current_page - 1),
            next: (current_page < last_page).then(|| current_page + 1),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResult<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> PaginatedResult<T> {
    pub fn new(data: Vec<T>, total: i64, params: &PageParams) -> Self {
        Self {
            data,
            meta: PaginationMeta::new(total, params),
        }
    }
}
