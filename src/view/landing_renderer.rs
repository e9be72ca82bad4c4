use std::collections::BTreeSet;

use ramhorns::Template;

use crate::config::{Config, GalleryItem, Skill};
use crate::content::Post;
use crate::seo::PageMeta;
use crate::view::{PostCard, ViewMeta, ViewSite, ViewText};

#[derive(ramhorns::Content)]
struct LandingPage {
    site: ViewSite,
    meta: ViewMeta,
    hero: ViewHero,
    skills: Vec<ViewSkill>,
    gallery: Vec<ViewGalleryItem>,
    gallery_categories: Vec<ViewText>,
    contact: ViewContact,
    recent_posts: Vec<PostCard>,
    has_recent_posts: bool,
}

#[derive(ramhorns::Content)]
struct ViewHero {
    badge: String,
    headline: String,
    role: String,
    experience: String,
    cta_label: String,
    cta_link: String,
    video: Option<ViewText>,
}

#[derive(ramhorns::Content)]
struct ViewSkill {
    id: String,
    number: String,
    title: String,
    description: String,
    tools: Vec<ViewText>,
    open: bool,
}

#[derive(ramhorns::Content)]
struct ViewGalleryItem {
    title: String,
    category: String,
    src: String,
    video: bool,
}

#[derive(ramhorns::Content)]
struct ViewContact {
    heading: String,
    text: String,
    email: Option<ViewText>,
}

/// Years since the first year of activity, never negative.
pub fn years_of_experience(activity_start_year: i32, current_year: i32) -> i32 {
    (current_year - activity_start_year).max(0)
}

pub struct LandingRenderer<'a> {
    pub config: &'a Config,
}

impl<'a> LandingRenderer<'a> {
    pub fn new(config: &'a Config) -> Self {
        LandingRenderer { config }
    }

    /// `posts` is the full listing, most recent first.
    pub fn render(&self, template: &Template, posts: &[Post], current_year: i32) -> String {
        let landing = &self.config.landing;
        let years = years_of_experience(self.config.personal.activity_start_year, current_year);

        let hero = ViewHero {
            badge: landing.hero.badge.clone(),
            headline: landing.hero.headline.clone(),
            role: landing.hero.role.clone(),
            experience: landing.hero.experience.replace("{years}", &years.to_string()),
            cta_label: landing.hero.cta_label.clone(),
            cta_link: landing.hero.cta_link.clone(),
            video: landing.hero.video.clone().map(|text| ViewText { text }),
        };

        let recent: Vec<PostCard> = posts.iter()
            .take(landing.recent_posts)
            .map(|p| PostCard::from_post(p, self.config))
            .collect();

        let meta = PageMeta::for_site(&self.config.site, "/");
        template.render(&LandingPage {
            site: ViewSite::from_config(self.config),
            meta: ViewMeta::from(&meta),
            hero,
            skills: view_skills(&landing.skills),
            gallery: landing.gallery.iter().map(view_gallery_item).collect(),
            gallery_categories: gallery_categories(&landing.gallery),
            contact: ViewContact {
                heading: landing.contact.heading.clone(),
                text: landing.contact.text.clone(),
                email: landing.contact.email.clone().map(|text| ViewText { text }),
            },
            has_recent_posts: !recent.is_empty(),
            recent_posts: recent,
        })
    }
}

fn view_skills(skills: &[Skill]) -> Vec<ViewSkill> {
    skills.iter().enumerate()
        .map(|(i, skill)| ViewSkill {
            id: format!("item-{}", i + 1),
            number: format!("{:02}", i + 1),
            title: skill.title.clone(),
            description: skill.description.clone(),
            tools: ViewText::list(&skill.tools),
            // First panel starts expanded
            open: i == 0,
        })
        .collect()
}

fn view_gallery_item(item: &GalleryItem) -> ViewGalleryItem {
    ViewGalleryItem {
        title: item.title.clone(),
        category: item.category.clone(),
        src: item.src.clone(),
        video: item.video,
    }
}

fn gallery_categories(items: &[GalleryItem]) -> Vec<ViewText> {
    let categories: BTreeSet<&str> = items.iter().map(|i| i.category.as_str()).collect();
    categories.into_iter().map(|c| ViewText { text: c.to_string() }).collect()
}
