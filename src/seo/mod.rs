use serde_json::json;

use crate::config::Site;
use crate::content::Post;

pub mod robots;
pub mod sitemap;

#[derive(Debug, Clone, PartialEq)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    /// `website` or `article`
    pub kind: String,
    pub published_time: Option<String>,
    pub authors: Vec<String>,
    pub images: Vec<String>,
    pub locale: String,
    pub site_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

/// What goes into the `<head>` of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub keywords: Vec<String>,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    /// Serialized JSON-LD, articles only
    pub json_ld: Option<String>,
}

impl PageMeta {
    /// Site wide defaults; used as is by the landing page.
    pub fn for_site(site: &Site, path: &str) -> Self {
        PageMeta {
            title: site.title.clone(),
            description: site.description.clone(),
            canonical: site.url(path),
            keywords: site.keywords.clone(),
            open_graph: OpenGraph {
                title: site.title.clone(),
                description: site.description.clone(),
                kind: "website".to_string(),
                published_time: None,
                authors: vec![site.name.clone()],
                images: vec![],
                locale: site.locale.clone(),
                site_name: site.name.clone(),
            },
            twitter: TwitterCard {
                card: "summary_large_image".to_string(),
                title: site.title.clone(),
                description: site.description.clone(),
                images: vec![],
            },
            json_ld: None,
        }
    }

    /// Metadata of a listing page such as a tag or the blog index.
    pub fn for_listing(site: &Site, path: &str, title: &str, description: &str) -> Self {
        let mut meta = Self::for_site(site, path);
        meta.title = site.page_title(title);
        meta.description = description.to_string();
        meta.open_graph.title = title.to_string();
        meta.open_graph.description = description.to_string();
        meta.twitter.title = title.to_string();
        meta.twitter.description = description.to_string();
        meta
    }

    pub fn for_post(site: &Site, post: &Post) -> Self {
        let fm = &post.frontmatter;
        let path = format!("/blog/{}", post.slug);
        let author = author_name(site, post);
        let images: Vec<String> = image_of(site, post).into_iter().map(|i| site.url(&i)).collect();

        let mut meta = Self::for_site(site, &path);
        meta.title = site.page_title(&fm.title);
        meta.description = fm.description.clone();
        meta.keywords = fm.tags.clone();
        meta.open_graph = OpenGraph {
            title: fm.title.clone(),
            description: fm.description.clone(),
            kind: "article".to_string(),
            published_time: Some(fm.date.clone()).filter(|d| !d.is_empty()),
            authors: vec![author.clone()],
            images: images.clone(),
            locale: site.locale.clone(),
            site_name: site.name.clone(),
        };
        meta.twitter = TwitterCard {
            card: "summary_large_image".to_string(),
            title: fm.title.clone(),
            description: fm.description.clone(),
            images: images.clone(),
        };
        meta.json_ld = Some(article_json_ld(site, post, &author, images.first().map(|s| s.as_str())));
        meta
    }
}

/// Author name with the site default when the post doesn't name one.
pub fn author_name(site: &Site, post: &Post) -> String {
    let name = post.frontmatter.author.name.trim();
    if name.is_empty() {
        site.default_author.clone()
    } else {
        name.to_string()
    }
}

/// Post image, or the placeholder image, or nothing.
pub fn image_of(site: &Site, post: &Post) -> Option<String> {
    [&post.frontmatter.image, &site.placeholder_image].into_iter()
        .find(|i| !i.trim().is_empty())
        .cloned()
}

fn article_json_ld(site: &Site, post: &Post, author: &str, image: Option<&str>) -> String {
    let fm = &post.frontmatter;
    let mut publisher = json!({
        "@type": "Organization",
        "name": site.name,
    });
    if !site.publisher_logo.is_empty() {
        publisher["logo"] = json!({
            "@type": "ImageObject",
            "url": site.url(&site.publisher_logo),
        });
    }

    let ld = json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": fm.title,
        "description": fm.description,
        "image": image,
        "datePublished": fm.date,
        "author": {
            "@type": "Person",
            "name": author,
        },
        "publisher": publisher,
    });

    // Goes inside a <script> element
    ld.to_string().replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use crate::config::parse_config;
    use crate::config::tests::CONFIG_DATA;
    use crate::test_data::POST_DATA_MDX;

    use super::*;

    #[test]
    fn test_post_meta() {
        let cfg = parse_config(CONFIG_DATA).unwrap();
        let post = Post::from_string("designing-with-constraints", POST_DATA_MDX, 200).unwrap();
        let meta = PageMeta::for_post(&cfg.site, &post);

        assert_eq!(meta.title, "Designing with constraints | example.com");
        assert_eq!(meta.canonical, "https://example.com/blog/designing-with-constraints");
        assert_eq!(meta.open_graph.kind, "article");
        assert_eq!(meta.open_graph.published_time.as_deref(), Some("2025-09-15"));
        assert_eq!(meta.open_graph.authors, vec!["Jane Doe"]);
        assert_eq!(meta.twitter.card, "summary_large_image");
        assert_eq!(meta.twitter.images, vec!["https://example.com/images/posts/constraints.jpg"]);

        let ld: serde_json::Value = serde_json::from_str(meta.json_ld.as_ref().unwrap()).unwrap();
        assert_eq!(ld["@type"], "Article");
        assert_eq!(ld["headline"], "Designing with constraints");
        assert_eq!(ld["author"]["name"], "Jane Doe");
        assert_eq!(ld["publisher"]["name"], "Jane Doe");
        assert!(ld["publisher"].get("logo").is_none());
    }

    #[test]
    fn test_post_meta_fallbacks() {
        let cfg = parse_config(CONFIG_DATA).unwrap();
        let post = Post::from_string("bare", "---\ntitle: Bare\n---\nbody", 200).unwrap();
        let meta = PageMeta::for_post(&cfg.site, &post);

        assert_eq!(meta.open_graph.authors, vec!["Anonymous"]);
        assert_eq!(meta.open_graph.images, vec!["https://example.com/images/placeholder.jpg"]);
        assert!(meta.open_graph.published_time.is_none());
    }

    #[test]
    fn test_listing_meta() {
        let cfg = parse_config(CONFIG_DATA).unwrap();
        let meta = PageMeta::for_listing(&cfg.site, "/blog/tag/rust", "Tag: rust", "All posts tagged rust");
        assert_eq!(meta.title, "Tag: rust | example.com");
        assert_eq!(meta.open_graph.kind, "website");
        assert!(meta.json_ld.is_none());
    }

    #[test]
    fn test_json_ld_escapes_script_end() {
        let cfg = parse_config(CONFIG_DATA).unwrap();
        let post = Post::from_string("x", "---\ntitle: \"</script><b>\"\n---\nbody", 200).unwrap();
        let meta = PageMeta::for_post(&cfg.site, &post);
        assert!(!meta.json_ld.unwrap().contains("</script>"));
    }
}
