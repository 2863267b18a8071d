//! CLI command implementations.

pub(crate) mod query;
pub(crate) mod serve;

pub(crate) use query::{MenuArgs, SitemapArgs, UrlArgs};
pub(crate) use serve::ServeArgs;
