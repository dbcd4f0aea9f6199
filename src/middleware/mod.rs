/*
 * Responsibility
 * - Router-level middleware, one `apply(...)` per concern
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
