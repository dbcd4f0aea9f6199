/**
 * Responsibility
 * - What a repo reports upward: a store-level fault, never "not found"
 *   (absence is `Ok(None)` / `Ok(false)`)
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;
