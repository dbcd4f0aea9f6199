pub mod access;
pub mod permission;
pub mod role;

pub use role::RoleSet;
