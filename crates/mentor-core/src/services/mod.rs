//! Services - the blog use cases built on the ports.
//!
//! - [`PostService`] is the repository accessor: validated CRUD over the content store.
//! - [`AdminGuard`] and [`AdminManager`] gate and drive the operator workflow.
//! - [`BlogReader`] produces the public listing and detail views.
//! - [`SitemapGenerator`] emits the sitemap document.

mod admin;
mod posts;
mod reader;
mod sitemap;

pub use admin::{
    AdminDelete, AdminGuard, AdminIdentity, AdminManager, Authorization, Confirmation,
    PUBLIC_HOME_PATH, Redirect, SIGN_IN_PATH,
};
pub use posts::{DeleteOutcome, PostService};
pub use reader::{BLOG_INDEX_PATH, BlogReader, DetailView, ListingView, TEASER_LIMIT};
pub use sitemap::{ChangeFreq, Sitemap, SitemapEntry, SitemapGenerator, StaticRoute};
