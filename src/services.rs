pub mod rbac_service;
pub use rbac_service::RoleService;
