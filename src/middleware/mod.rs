pub mod auth;
pub mod db;
pub mod response;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use db::{DbConn, RequestConnection};
pub use response::{ApiResponse, ApiResult};
