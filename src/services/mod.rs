pub mod local_dir;
pub mod repo_access;

#[cfg(test)]
pub mod fake_repo;

pub use local_dir::LocalDirAccess;
pub use repo_access::{query_optional, RepoAccess};
