pub mod bypass;
pub mod factory;
pub mod gate;
pub mod resolver;
pub mod token;
pub mod user;

pub use bypass::BypassPolicy;
pub use factory::build_auth_service;
pub use gate::AuthService;
pub use resolver::UserResolver;
pub use token::{TokenClaims, TokenCodec, TokenError};
pub use user::AuthenticatedUser;
