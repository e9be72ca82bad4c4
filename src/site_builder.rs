use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use spdlog::{info, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::content_cache::ContentCache;
use crate::pages::{LinkStyle, Pages};
use crate::post_store::{count_labels, PostStore};
use crate::view::Templates;

/// What a build wrote, for the summary line.
#[derive(Debug, Default, PartialEq)]
pub struct BuildReport {
    pub pages: usize,
    pub posts: usize,
    pub public_files: usize,
}

/// Writes the whole site as static files under `output_dir`.
pub struct SiteBuilder<'a> {
    config: &'a Config,
    output_dir: PathBuf,
}

impl<'a> SiteBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        SiteBuilder {
            config,
            output_dir: config.paths.output_dir.clone(),
        }
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn build(&self) -> Result<BuildReport> {
        let templates = Templates::load(&self.config.paths.template_dir)?;
        let store = PostStore::from_config(self.config);
        let pages = Pages::new(self.config, &templates, &store);
        let mut cache = ContentCache::non_caching();
        let mut report = BuildReport::default();

        info!("Building site into {}", self.output_dir.display());
        fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("Error creating {}", self.output_dir.display()))?;

        let now = Utc::now();
        self.write_page(&mut report, "index.html", &pages.index(now.year())?)?;

        let posts = store.all_posts();
        self.write_page(&mut report, "blog/index.html", &pages.blog(1, LinkStyle::Path)?)?;
        for page in 2..=pages.blog_page_count(&posts) {
            let html = pages.blog(page, LinkStyle::Path)?;
            self.write_page(&mut report, &format!("blog/page/{}/index.html", page), &html)?;
        }

        for post in &posts {
            match pages.post(&post.slug, &mut cache)? {
                Some(html) => {
                    self.write_page(&mut report, &format!("blog/{}/index.html", post.slug), &html)?;
                    report.posts += 1;
                }
                None => warn!("Post {} disappeared while building", post.slug),
            }
        }

        for tag in count_labels(&posts, |p| &p.frontmatter.tags) {
            if !is_path_segment(&tag.slug) {
                warn!("Skipping tag {:?}, it is not a valid page name", tag.name);
                continue;
            }
            if let Some(html) = pages.tag(&tag.slug)? {
                self.write_page(&mut report, &format!("blog/tag/{}/index.html", tag.slug), &html)?;
            }
        }
        for category in count_labels(&posts, |p| &p.frontmatter.categories) {
            if !is_path_segment(&category.slug) {
                warn!("Skipping category {:?}, it is not a valid page name", category.name);
                continue;
            }
            if let Some(html) = pages.category(&category.slug)? {
                self.write_page(&mut report, &format!("blog/category/{}/index.html", category.slug), &html)?;
            }
        }

        self.write_page(&mut report, "404.html", &pages.not_found("The page you are looking for does not exist.")?)?;
        self.write_file("sitemap.xml", &pages.sitemap(now.naive_utc())?)?;
        self.write_file("robots.txt", pages.robots().as_bytes())?;

        report.public_files = copy_dir(&self.config.paths.public_dir, &self.output_dir.join("public"))?;

        info!("Built {} pages ({} posts) and copied {} public files",
            report.pages, report.posts, report.public_files);
        Ok(report)
    }

    fn write_page(&self, report: &mut BuildReport, rel_path: &str, html: &str) -> Result<()> {
        self.write_file(rel_path, html.as_bytes())?;
        report.pages += 1;
        Ok(())
    }

    fn write_file(&self, rel_path: &str, content: &[u8]) -> Result<()> {
        let path = self.output_dir.join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Error writing {}", path.display()))
    }
}

/// A label slug must name exactly one directory below `blog/tag` or
/// `blog/category`.
fn is_path_segment(slug: &str) -> bool {
    !(slug.is_empty() || slug.contains('/') || slug.contains('\\') || slug.contains(".."))
}

/// Copies every file under `from` into `to`, returning how many were copied.
/// A missing source directory copies nothing.
fn copy_dir(from: &Path, to: &Path) -> Result<usize> {
    if !from.is_dir() {
        warn!("Public directory {} not found, nothing copied", from.display());
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(from).into_iter().filter_map(|e| e.ok()).filter(|e| e.path().is_file()) {
        let relative_path = entry.path().strip_prefix(from)?;
        let dest_file = to.join(relative_path);
        if let Some(parent) = dest_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &dest_file)
            .with_context(|| format!("Error copying {}", entry.path().display()))?;
        copied += 1;
    }
    Ok(copied)
}
