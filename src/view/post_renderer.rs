use std::io;

use ramhorns::Template;

use crate::config::Config;
use crate::content::mdx_renderer::MdxRenderer;
use crate::content::Post;
use crate::seo::{author_name, image_of, PageMeta};
use crate::share::ShareLinks;
use crate::text_utils::display_date;
use crate::toc::{ObserverBand, TocTracker};
use crate::view::{ViewLabel, ViewMeta, ViewSite, ViewText};

#[derive(ramhorns::Content)]
struct ViewAuthor {
    name: String,
    title: String,
    bio: String,
    avatar: Option<ViewText>,
}

#[derive(ramhorns::Content)]
struct ViewTocEntry {
    id: String,
    text: String,
    active: bool,
}

#[derive(ramhorns::Content)]
struct ViewShare {
    twitter: String,
    linkedin: String,
    copy_url: String,
}

#[derive(ramhorns::Content)]
struct PostPage<'a> {
    site: ViewSite,
    meta: ViewMeta,
    slug: &'a str,
    title: &'a str,
    description: &'a str,
    date: String,
    reading_time: &'a str,
    image: Option<ViewText>,
    image_caption: Option<ViewText>,
    categories: Vec<ViewLabel>,
    tags: Vec<ViewLabel>,
    author: ViewAuthor,
    toc: Vec<ViewTocEntry>,
    has_toc: bool,
    toc_root_margin: String,
    share: ViewShare,
    post_content: String,
}

pub struct PostRenderer<'a> {
    pub config: &'a Config,
}

impl<'a> PostRenderer<'a> {
    pub fn new(config: &'a Config) -> Self {
        PostRenderer { config }
    }

    /// Body of the post as HTML, without the page around it.
    pub fn render_content(post: &Post) -> io::Result<String> {
        MdxRenderer::render(&post.content)
    }

    pub fn render(&self, template: &Template, post: &Post) -> io::Result<String> {
        let post_content = Self::render_content(post)?;
        Ok(self.render_with_content(template, post, post_content))
    }

    /// Renders the page around an already rendered body.
    pub fn render_with_content(&self, template: &Template, post: &Post, post_content: String) -> String {
        let site = &self.config.site;
        let fm = &post.frontmatter;
        let meta = PageMeta::for_post(site, post);

        // Only headings the body really carries can be navigated to
        let mut tracker = TocTracker::new();
        tracker.observe(&post.headings, |id| post_content.contains(&format!(r#"id="{}""#, id)));
        let toc: Vec<ViewTocEntry> = tracker.entries().into_iter()
            .map(|e| ViewTocEntry { id: e.id, text: e.text, active: e.active })
            .collect();

        let share = ShareLinks::new(&meta.canonical, &fm.title);
        let author = ViewAuthor {
            name: author_name(site, post),
            title: fm.author.title.clone(),
            bio: fm.author.bio.clone(),
            avatar: Some(fm.author.avatar.clone())
                .filter(|a| !a.is_empty())
                .map(|text| ViewText { text }),
        };

        template.render(&PostPage {
            site: ViewSite::from_config(self.config),
            meta: ViewMeta::from(&meta),
            slug: &post.slug,
            title: &fm.title,
            description: &fm.description,
            date: display_date(&fm.date, &site.date_format),
            reading_time: &post.reading_time.text,
            image: image_of(site, post).map(|text| ViewText { text }),
            image_caption: fm.image_caption.clone().map(|text| ViewText { text }),
            categories: fm.categories.iter().map(|c| ViewLabel::from_label(c)).collect(),
            tags: fm.tags.iter().map(|t| ViewLabel::from_label(t)).collect(),
            author,
            has_toc: tracker.is_observing(),
            toc,
            toc_root_margin: ObserverBand::default().root_margin(),
            share: ViewShare {
                twitter: share.twitter,
                linkedin: share.linkedin,
                copy_url: share.copy_url,
            },
            post_content,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::config::parse_config;
    use crate::config::tests::CONFIG_DATA;
    use crate::test_data::POST_DATA_MDX;

    use super::*;

    #[test]
    fn render_view() {
        let template_src = r##"
TITLE=[{{title}}]
AUTHOR=[{{#author}}{{name}}/{{title}}{{/author}}]
DATE=[{{date}}]
READING=[{{reading_time}}]
CAPTION=[{{#image_caption}}{{text}}{{/image_caption}}]
TAGS=[{{#tags}}({{slug}}){{/tags}}]
TOC=[{{#toc}}<{{id}}>{{/toc}}]
MARGIN=[{{toc_root_margin}}]
COPY=[{{#share}}{{copy_url}}{{/share}}]"##;
        let cfg = parse_config(CONFIG_DATA).unwrap();
        let template = Template::new(template_src).unwrap();
        let post = Post::from_string("designing-with-constraints", POST_DATA_MDX, 200).unwrap();
        let res = PostRenderer::new(&cfg).render(&template, &post).unwrap();
        assert_eq!(res, r##"
TITLE=[Designing with constraints]
AUTHOR=[Jane Doe/Digital Solutions Architect]
DATE=[15.09.2025]
READING=[1 min read]
CAPTION=[Sketches on a desk]
TAGS=[(rust)(static-sites)]
TOC=[<why-constraints><a-worked-example><why-constraints-1>]
MARGIN=[0% 0% -80% 0%]
COPY=[https://example.com/blog/designing-with-constraints]"##);
    }

    #[test]
    fn render_body_unescaped() {
        let cfg = parse_config(CONFIG_DATA).unwrap();
        let template = Template::new("{{{post_content}}}").unwrap();
        let post = Post::from_string("p", "---\ntitle: P\n---\n## Hello\n", 200).unwrap();
        let res = PostRenderer::new(&cfg).render(&template, &post).unwrap();
        assert!(res.starts_with(r#"<h2 id="hello">"#));
    }

    #[test]
    fn toc_skips_headings_missing_from_body() {
        let cfg = parse_config(CONFIG_DATA).unwrap();
        let template = Template::new("{{#has_toc}}TOC{{/has_toc}}[{{#toc}}{{id}}{{/toc}}]").unwrap();
        let post = Post::from_string("p", "---\ntitle: P\n---\n## Hello\n", 200).unwrap();
        let res = PostRenderer::new(&cfg).render_with_content(&template, &post, "<p>no headings</p>".to_string());
        assert_eq!(res, "[hello]");
    }
}
