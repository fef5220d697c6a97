pub mod accounts;
pub mod middleware;
pub mod password;
pub mod token;

pub use accounts::DepartmentRole;
pub use middleware::{CitizenSession, DepartmentSession};
pub use token::{CitizenClaims, DepartmentClaims, TokenKeys};
