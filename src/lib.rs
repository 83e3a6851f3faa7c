#![doc = "repo-cache: publish a public JSON snapshot of an organization's repositories."]

//! This crate lists every repository of a GitHub organization, projects each
//! into a small public summary (name, description, stars, forks, language,
//! last-push timestamp, URL), and uploads the collection as a JSON array to an
//! S3 object with public-read access.
//!
//! The pipeline is strictly sequential: load config from the environment, page
//! through the organization's repositories, project, serialize, upload. The
//! first error aborts the invocation and nothing is partially published; the
//! previously published object is left untouched on failure.

pub mod cli;
pub mod config;
pub mod github;
pub mod publish;
pub mod run;
pub mod summary;
