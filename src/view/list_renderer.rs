use ramhorns::Template;

use crate::config::Config;
use crate::content::Post;
use crate::paginator::Paginator;
use crate::post_store::LabelCount;
use crate::seo::PageMeta;
use crate::text_utils::normalize_label;
use crate::view::{PostCard, ViewLabel, ViewMeta, ViewSite, ViewText};

#[derive(ramhorns::Content)]
struct ListPage {
    site: ViewSite,
    meta: ViewMeta,
    heading: String,
    subheading: String,
    badge: Option<ViewText>,
    featured: Vec<PostCard>,
    has_featured: bool,
    post_list: Vec<PostCard>,
    is_empty: bool,
    tags: Vec<ViewLabel>,
    categories: Vec<ViewLabel>,
    page_list: Vec<ViewPagination>,
    show_pagination: bool,
}

#[derive(ramhorns::Content)]
struct ViewPagination {
    current: bool,
    number: u32,
    link: String,
}

/// Which listing is being rendered.
pub struct Listing {
    pub path: String,
    pub heading: String,
    pub subheading: String,
    pub badge: Option<String>,
}

impl Listing {
    pub fn blog(config: &Config) -> Self {
        Listing {
            path: "/blog".to_string(),
            heading: "Blog".to_string(),
            subheading: config.site.description.clone(),
            badge: None,
        }
    }

    /// `name` is the label as written in posts; the path uses its slug.
    pub fn tag(name: &str, count: usize) -> Self {
        Listing {
            path: format!("/blog/tag/{}", normalize_label(name)),
            heading: name.to_string(),
            subheading: post_count(count),
            badge: Some("Tag".to_string()),
        }
    }

    pub fn category(name: &str, count: usize) -> Self {
        Listing {
            path: format!("/blog/category/{}", normalize_label(name)),
            heading: name.to_string(),
            subheading: post_count(count),
            badge: Some("Category".to_string()),
        }
    }
}

fn post_count(count: usize) -> String {
    match count {
        1 => "1 post".to_string(),
        n => format!("{} posts", n),
    }
}

/// Posts and the side lists a listing page shows next to them.
pub struct ListContent<'a> {
    pub posts: &'a [Post],
    /// Shown above the list on the first page only
    pub featured: &'a [Post],
    pub tags: &'a [LabelCount],
    pub categories: &'a [LabelCount],
}

pub struct ListRenderer<'a> {
    pub config: &'a Config,
    pub page_size: u32,
}

impl<'a> ListRenderer<'a> {
    pub fn new(config: &'a Config) -> Self {
        ListRenderer {
            config,
            page_size: config.defaults.page_size,
        }
    }

    /// Renders everything on one page.
    pub fn unpaged(config: &'a Config) -> Self {
        ListRenderer {
            config,
            page_size: u32::MAX,
        }
    }

    pub fn page_count(&self, posts: &[Post]) -> u32 {
        Paginator::from(posts, self.page_size).page_count()
    }

    /// `page_link` maps a page number to the URL of that page. Out of range
    /// pages fall back to the first one.
    pub fn render<F>(&self, template: &Template, listing: &Listing, content: &ListContent,
                     cur_page: u32, page_link: F) -> String
        where F: Fn(u32) -> String
    {
        let paginator = Paginator::from(content.posts, self.page_size);
        let cur_page = paginator.sanitize(cur_page);
        let page_posts = paginator.get_page(cur_page).unwrap_or(&[]);

        let page_list: Vec<ViewPagination> = (1..=paginator.page_count())
            .map(|number| ViewPagination {
                current: number == cur_page,
                number,
                link: page_link(number),
            })
            .collect();

        let featured = if cur_page == 1 {
            PostCard::list(content.featured, self.config)
        } else {
            vec![]
        };

        let path = if cur_page == 1 { listing.path.clone() } else { page_link(cur_page) };
        let meta = PageMeta::for_listing(&self.config.site, &path, &listing.heading, &listing.subheading);

        template.render(&ListPage {
            site: ViewSite::from_config(self.config),
            meta: ViewMeta::from(&meta),
            heading: listing.heading.clone(),
            subheading: listing.subheading.clone(),
            badge: listing.badge.clone().map(|text| ViewText { text }),
            has_featured: !featured.is_empty(),
            featured,
            post_list: PostCard::list(page_posts, self.config),
            is_empty: page_posts.is_empty(),
            tags: content.tags.iter().map(ViewLabel::from_count).collect(),
            categories: content.categories.iter().map(ViewLabel::from_count).collect(),
            show_pagination: page_list.len() > 1,
            page_list,
        })
    }
}
