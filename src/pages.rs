use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use spdlog::{debug, error, info};

use crate::config::Config;
use crate::content::Post;
use crate::content_cache::{modified_time, ContentCache};
use crate::post_store::{count_labels, with_category, with_tag, LabelCount, PostStore};
use crate::seo::robots::render_robots;
use crate::seo::sitemap::{render_sitemap, sitemap_entries};
use crate::text_utils::{label_name, normalize_label};
use crate::view::landing_renderer::LandingRenderer;
use crate::view::list_renderer::{ListContent, ListRenderer, Listing};
use crate::view::post_renderer::PostRenderer;
use crate::view::{render_not_found, Templates, LANDING_TEMPLATE, LIST_TEMPLATE, NOT_FOUND_TEMPLATE, POST_TEMPLATE};

/// How blog index pages link to each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkStyle {
    /// `/blog?page=2`, answered by the server
    Query,
    /// `/blog/page/2`, one directory per page in the static build
    Path,
}

impl LinkStyle {
    pub fn blog_page(&self, page: u32) -> String {
        match (self, page) {
            (_, 0 | 1) => "/blog".to_string(),
            (LinkStyle::Query, n) => format!("/blog?page={}", n),
            (LinkStyle::Path, n) => format!("/blog/page/{}", n),
        }
    }
}

/// Every page of the site, rendered from the post store on each call.
pub struct Pages<'a> {
    pub config: &'a Config,
    pub templates: &'a Templates,
    pub store: &'a PostStore,
}

impl<'a> Pages<'a> {
    pub fn new(config: &'a Config, templates: &'a Templates, store: &'a PostStore) -> Self {
        Pages { config, templates, store }
    }

    pub fn index(&self, current_year: i32) -> Result<String> {
        let template = self.templates.get(LANDING_TEMPLATE)?;
        let posts = self.store.all_posts();
        Ok(LandingRenderer::new(self.config).render(template, &posts, current_year))
    }

    pub fn blog(&self, cur_page: u32, link_style: LinkStyle) -> Result<String> {
        let template = self.templates.get(LIST_TEMPLATE)?;
        let posts = self.store.all_posts();
        let featured: Vec<Post> = posts.iter().filter(|p| p.frontmatter.featured).cloned().collect();
        let (tags, categories) = labels(&posts);

        let content = ListContent {
            posts: &posts,
            featured: &featured,
            tags: &tags,
            categories: &categories,
        };
        Ok(ListRenderer::new(self.config).render(template, &Listing::blog(self.config), &content, cur_page,
                                                 |page| link_style.blog_page(page)))
    }

    /// Number of blog index pages; zero without posts.
    pub fn blog_page_count(&self, posts: &[Post]) -> u32 {
        ListRenderer::new(self.config).page_count(posts)
    }

    /// `None` when there is no loadable post under `slug`.
    pub fn post(&self, slug: &str, cache: &mut ContentCache<String>) -> Result<Option<String>> {
        let post = match self.store.load_post(slug) {
            Ok(Some(post)) => post,
            Ok(None) => {
                cache.invalidate(slug);
                return Ok(None);
            }
            Err(e) => {
                error!("Error loading post {}: {}", slug, e);
                cache.invalidate(slug);
                return Ok(None);
            }
        };

        let template = self.templates.get(POST_TEMPLATE)?;
        let body = self.post_body(&post, cache)
            .with_context(|| format!("Error rendering post {}", slug))?;
        Ok(Some(PostRenderer::new(self.config).render_with_content(template, &post, body)))
    }

    fn post_body(&self, post: &Post, cache: &mut ContentCache<String>) -> Result<String> {
        let modified = match self.store.source_path(&post.slug) {
            Some(path) if cache.is_enabled() => modified_time(&path).ok(),
            _ => None,
        };

        if let Some(modified) = modified {
            if let Some(body) = cache.get_post(&post.slug, modified) {
                debug!("Rendered body of {} found in cache", post.slug);
                return Ok((*body).clone());
            }
        }

        info!("Rendering post {}", post.slug);
        let body = PostRenderer::render_content(post)?;
        if let Some(modified) = modified {
            cache.add_post(&post.slug, modified, body.clone());
        }
        Ok(body)
    }

    /// `None` when no post carries the tag.
    pub fn tag(&self, tag: &str) -> Result<Option<String>> {
        let posts = self.store.all_posts();
        let (tags, categories) = labels(&posts);
        let tagged = with_tag(posts, tag);
        if tagged.is_empty() {
            return Ok(None);
        }

        let listing = Listing::tag(&display_name(&tags, tag), tagged.len());
        self.label_listing(&listing, &tagged, &tags, &categories).map(Some)
    }

    /// `None` when no post is filed under the category.
    pub fn category(&self, category: &str) -> Result<Option<String>> {
        let posts = self.store.all_posts();
        let (tags, categories) = labels(&posts);
        let filed = with_category(posts, category);
        if filed.is_empty() {
            return Ok(None);
        }

        let listing = Listing::category(&display_name(&categories, category), filed.len());
        self.label_listing(&listing, &filed, &tags, &categories).map(Some)
    }

    fn label_listing(&self, listing: &Listing, posts: &[Post], tags: &[LabelCount],
                     categories: &[LabelCount]) -> Result<String> {
        let template = self.templates.get(LIST_TEMPLATE)?;
        let content = ListContent {
            posts,
            featured: &[],
            tags,
            categories,
        };
        let path = listing.path.clone();
        Ok(ListRenderer::unpaged(self.config).render(template, listing, &content, 1, |_| path.clone()))
    }

    pub fn not_found(&self, message: &str) -> Result<String> {
        let template = self.templates.get(NOT_FOUND_TEMPLATE)?;
        Ok(render_not_found(template, self.config, message))
    }

    pub fn sitemap(&self, now: NaiveDateTime) -> Result<Vec<u8>> {
        let posts = self.store.all_posts();
        let entries = sitemap_entries(&self.config.site, &posts, now);
        render_sitemap(&entries).context("Error writing sitemap")
    }

    pub fn robots(&self) -> String {
        render_robots(&self.config.robots, &self.config.site)
    }
}

fn labels(posts: &[Post]) -> (Vec<LabelCount>, Vec<LabelCount>) {
    (
        count_labels(posts, |p| &p.frontmatter.tags),
        count_labels(posts, |p| &p.frontmatter.categories),
    )
}

/// Label as first written in a post, or a readable form of the slug.
fn display_name(labels: &[LabelCount], wanted: &str) -> String {
    let slug = normalize_label(wanted);
    labels.iter()
        .find(|l| l.slug == slug)
        .map(|l| l.name.clone())
        .unwrap_or_else(|| label_name(&slug))
}
