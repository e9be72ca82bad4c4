pub mod config;
pub mod logger;
pub mod server;
pub mod site_builder;
pub mod pages;
pub mod post_store;
pub mod post_list;
pub mod content;
pub mod content_cache;
pub mod text_utils;
pub mod query_string;
pub mod paginator;
pub mod toc;
pub mod share;
pub mod seo;
pub mod view;
pub mod util;
mod test_data;
