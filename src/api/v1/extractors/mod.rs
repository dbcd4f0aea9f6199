/*!
 * Request extractors
 *
 * Public API:
 * - CurrentUser: the AuthenticatedUser placed in extensions by the access middleware
 */
mod current_user;

pub use current_user::CurrentUser;
