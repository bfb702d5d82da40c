//! Raw data collectors, one per check domain.
//!
//! A collector only reads from the [`crate::services::RepoAccess`] it is
//! given and returns the same data for the same answers. An unsupported
//! capability yields zero-value data; only definitive backend failures are
//! errors.

pub mod binary_artifacts;
pub mod branch_protection;
pub mod code_review;
pub mod file_matcher;
pub mod sbom;
