use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Utc};
use ramhorns::{Ramhorns, Template};

use crate::config::Config;
use crate::content::Post;
use crate::post_store::LabelCount;
use crate::seo::{image_of, PageMeta};
use crate::text_utils::{display_date, normalize_label};

pub mod landing_renderer;
pub mod list_renderer;
pub mod post_renderer;

pub const LANDING_TEMPLATE: &str = "index.tpl";
pub const LIST_TEMPLATE: &str = "postlist.tpl";
pub const POST_TEMPLATE: &str = "post.tpl";
pub const NOT_FOUND_TEMPLATE: &str = "404.tpl";

/// The template folder, partials included. Loaded per render so template
/// edits show up without a restart.
pub struct Templates {
    ramhorns: Ramhorns,
}

impl Templates {
    pub fn load(template_dir: &Path) -> Result<Self> {
        let ramhorns: Ramhorns = Ramhorns::from_folder_with_extension(template_dir, "tpl")
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("Error loading templates from {}", template_dir.display()))?;
        Ok(Templates { ramhorns })
    }

    pub fn get(&self, name: &str) -> Result<&Template<'static>> {
        self.ramhorns.get(name)
            .ok_or_else(|| anyhow!("Template {} not found", name))
    }
}

#[derive(ramhorns::Content)]
pub struct ViewText {
    pub text: String,
}

impl ViewText {
    pub fn list(items: &[String]) -> Vec<ViewText> {
        items.iter().map(|t| ViewText { text: t.clone() }).collect()
    }
}

#[derive(ramhorns::Content)]
pub struct ViewLink {
    pub name: String,
    pub url: String,
}

#[derive(ramhorns::Content)]
pub struct ViewLabel {
    pub name: String,
    pub slug: String,
    pub count: u32,
}

impl ViewLabel {
    pub fn from_label(label: &str) -> Self {
        ViewLabel {
            name: label.to_string(),
            slug: normalize_label(label),
            count: 0,
        }
    }

    pub fn from_count(label: &LabelCount) -> Self {
        ViewLabel {
            name: label.name.clone(),
            slug: label.slug.clone(),
            count: label.count as u32,
        }
    }
}

/// Header and footer data shared by every page.
#[derive(ramhorns::Content)]
pub struct ViewSite {
    pub name: String,
    pub language: String,
    pub footer_text: String,
    pub social: Vec<ViewLink>,
    pub year: i32,
}

impl ViewSite {
    pub fn from_config(config: &Config) -> Self {
        ViewSite {
            name: config.site.name.clone(),
            language: config.site.language.clone(),
            footer_text: config.landing.footer_text.clone(),
            social: config.landing.social.iter()
                .map(|s| ViewLink { name: s.name.clone(), url: s.url.clone() })
                .collect(),
            year: Utc::now().year(),
        }
    }
}

#[derive(ramhorns::Content)]
pub struct ViewMeta {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub keywords: String,
    pub og_title: String,
    pub og_description: String,
    pub og_type: String,
    pub og_published_time: Option<ViewText>,
    pub og_authors: Vec<ViewText>,
    pub og_images: Vec<ViewText>,
    pub og_locale: String,
    pub og_site_name: String,
    pub twitter_card: String,
    pub twitter_title: String,
    pub twitter_description: String,
    pub twitter_images: Vec<ViewText>,
    pub json_ld: Option<ViewText>,
}

impl From<&PageMeta> for ViewMeta {
    fn from(meta: &PageMeta) -> Self {
        ViewMeta {
            title: meta.title.clone(),
            description: meta.description.clone(),
            canonical: meta.canonical.clone(),
            keywords: meta.keywords.join(", "),
            og_title: meta.open_graph.title.clone(),
            og_description: meta.open_graph.description.clone(),
            og_type: meta.open_graph.kind.clone(),
            og_published_time: meta.open_graph.published_time.clone().map(|text| ViewText { text }),
            og_authors: ViewText::list(&meta.open_graph.authors),
            og_images: ViewText::list(&meta.open_graph.images),
            og_locale: meta.open_graph.locale.clone(),
            og_site_name: meta.open_graph.site_name.clone(),
            twitter_card: meta.twitter.card.clone(),
            twitter_title: meta.twitter.title.clone(),
            twitter_description: meta.twitter.description.clone(),
            twitter_images: ViewText::list(&meta.twitter.images),
            json_ld: meta.json_ld.clone().map(|text| ViewText { text }),
        }
    }
}

/// A post as shown in lists.
#[derive(ramhorns::Content)]
pub struct PostCard {
    pub slug: String,
    pub link: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub reading_time: String,
    pub image: Option<ViewText>,
    pub categories: Vec<ViewLabel>,
    pub featured: bool,
}

impl PostCard {
    pub fn from_post(post: &Post, config: &Config) -> Self {
        let fm = &post.frontmatter;
        PostCard {
            slug: post.slug.clone(),
            link: format!("/blog/{}", post.slug),
            title: fm.title.clone(),
            description: fm.description.clone(),
            date: display_date(&fm.date, &config.site.date_format),
            reading_time: post.reading_time.text.clone(),
            image: image_of(&config.site, post).map(|text| ViewText { text }),
            // Cards only have room for two
            categories: fm.categories.iter().take(2).map(|c| ViewLabel::from_label(c)).collect(),
            featured: fm.featured,
        }
    }

    pub fn list(posts: &[Post], config: &Config) -> Vec<PostCard> {
        posts.iter().map(|p| Self::from_post(p, config)).collect()
    }
}

#[derive(ramhorns::Content)]
struct NotFoundPage {
    site: ViewSite,
    meta: ViewMeta,
    message: String,
}

pub fn render_not_found(template: &Template, config: &Config, message: &str) -> String {
    let meta = PageMeta::for_listing(&config.site, "/404", "Not found", message);
    template.render(&NotFoundPage {
        site: ViewSite::from_config(config),
        meta: ViewMeta::from(&meta),
        message: message.to_string(),
    })
}
