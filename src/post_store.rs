use std::cmp::Ordering;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use spdlog::{debug, error};

use crate::config::Config;
use crate::content::{Post, PostError};
use crate::content::content_file::ContentFile;
use crate::content::reading_time::DEFAULT_WORDS_PER_MINUTE;
use crate::post_list::PostList;
use crate::text_utils::normalize_label;

/// A category or tag with the number of posts using it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCount {
    /// Label as written in the first post that used it
    pub name: String,
    pub slug: String,
    pub count: usize,
}

/// Read-only queries over the post directory.
///
/// Nothing is kept between calls: each query lists and parses the directory
/// again, so an edit to a post file is visible on the next call.
pub struct PostStore {
    post_list: PostList,
    words_per_minute: u32,
}

impl PostStore {
    pub fn new(posts_dir: PathBuf, extension: &str) -> Self {
        PostStore {
            post_list: PostList {
                root_dir: posts_dir,
                extension: extension.to_string(),
            },
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.paths.posts_dir.clone(), &config.defaults.content_extension)
            .with_words_per_minute(config.defaults.words_per_minute)
    }

    pub fn with_words_per_minute(mut self, words_per_minute: u32) -> Self {
        self.words_per_minute = words_per_minute;
        self
    }

    /// Every post, most recent first. Posts sharing a date are ordered by
    /// slug and posts without a parseable date come last.
    pub fn all_posts(&self) -> Vec<Post> {
        let links = match self.post_list.retrieve_files() {
            Ok(links) => links,
            Err(e) => {
                error!("Error listing posts in {}: {}", self.post_list.root_dir.display(), e);
                return vec![];
            }
        };

        let mut posts: Vec<Post> = links.into_iter()
            .filter_map(|link| self.post_by_slug(&link.slug))
            .collect();
        sort_by_date_desc(&mut posts);
        posts
    }

    /// The post stored under `slug`. Missing and malformed files are both
    /// `None`; the reason for a malformed one goes to the log.
    pub fn post_by_slug(&self, slug: &str) -> Option<Post> {
        match self.load_post(slug) {
            Ok(post) => post,
            Err(e) => {
                error!("Error loading post {}: {}", slug, e);
                None
            }
        }
    }

    pub fn load_post(&self, slug: &str) -> Result<Option<Post>, PostError> {
        let Some(path) = self.post_list.path_for(slug) else {
            return Ok(None);
        };
        if !path.is_file() {
            return Ok(None);
        }

        debug!("Loading post {} from {}", slug, path.display());
        let content_file = ContentFile::from_file(slug.to_string(), path)?;
        Post::from_file(&content_file, self.words_per_minute).map(Some)
    }

    /// Slugs of every post file, loadable or not.
    pub fn post_slugs(&self) -> io::Result<Vec<String>> {
        Ok(self.post_list.retrieve_files()?.into_iter().map(|link| link.slug).collect())
    }

    /// File a slug is read from, whether or not it exists.
    pub fn source_path(&self, slug: &str) -> Option<PathBuf> {
        self.post_list.path_for(slug)
    }

    pub fn posts_by_category(&self, category: &str) -> Vec<Post> {
        with_category(self.all_posts(), category)
    }

    pub fn posts_by_tag(&self, tag: &str) -> Vec<Post> {
        with_tag(self.all_posts(), tag)
    }

    pub fn featured_posts(&self) -> Vec<Post> {
        self.all_posts().into_iter()
            .filter(|post| post.frontmatter.featured)
            .collect()
    }

    /// Slugs of the posts that load, in listing order.
    pub fn all_slugs(&self) -> Vec<String> {
        self.all_posts().into_iter().map(|post| post.slug).collect()
    }

    pub fn all_tags(&self) -> Vec<LabelCount> {
        count_labels(&self.all_posts(), |post| &post.frontmatter.tags)
    }

    pub fn all_categories(&self) -> Vec<LabelCount> {
        count_labels(&self.all_posts(), |post| &post.frontmatter.categories)
    }
}

pub fn sort_by_date_desc(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        let by_date = match (a.published(), b.published()) {
            (Some(da), Some(db)) => db.cmp(&da),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_date.then_with(|| a.slug.cmp(&b.slug))
    });
}

/// Posts filed under `category`, order kept.
pub fn with_category(posts: Vec<Post>, category: &str) -> Vec<Post> {
    let category = normalize_label(category);
    posts.into_iter()
        .filter(|post| has_label(&post.frontmatter.categories, &category))
        .collect()
}

pub fn with_tag(posts: Vec<Post>, tag: &str) -> Vec<Post> {
    let tag = normalize_label(tag);
    posts.into_iter()
        .filter(|post| has_label(&post.frontmatter.tags, &tag))
        .collect()
}

fn has_label(labels: &[String], wanted: &str) -> bool {
    !wanted.is_empty() && labels.iter().any(|label| normalize_label(label) == wanted)
}

/// Labels by usage, most used first. A label repeated inside one post counts
/// once for that post.
pub fn count_labels<F>(posts: &[Post], labels_of: F) -> Vec<LabelCount>
    where F: Fn(&Post) -> &Vec<String>
{
    let mut label_map: HashMap<String, LabelCount> = HashMap::new();

    for post in posts {
        let mut seen: Vec<String> = vec![];
        for label in labels_of(post) {
            let slug = normalize_label(label);
            if slug.is_empty() || seen.contains(&slug) {
                continue;
            }
            label_map.entry(slug.clone())
                .or_insert_with(|| LabelCount { name: label.clone(), slug: slug.clone(), count: 0 })
                .count += 1;
            seen.push(slug);
        }
    }

    let mut label_list: Vec<LabelCount> = label_map.into_values().collect();
    label_list.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.slug.cmp(&b.slug)));
    label_list
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::test_data::post_mdx;

    use super::*;

    fn write_post(dir: &TempDir, slug: &str, raw: &str) -> io::Result<()> {
        fs::write(dir.path().join(format!("{}.mdx", slug)), raw)
    }

    fn store(dir: &TempDir) -> PostStore {
        PostStore::new(dir.path().to_path_buf(), "mdx")
    }

    fn slugs(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    fn sample_store() -> io::Result<(TempDir, PostStore)> {
        let dir = TempDir::new()?;
        write_post(&dir, "a", &post_mdx("A", "2025-09-01", &["Web Development"], &["rust"], false))?;
        write_post(&dir, "b", &post_mdx("B", "2025-09-15", &["Design", "Web Development"], &["ux", "Rust"], true))?;
        write_post(&dir, "c", &post_mdx("C", "2025-08-20", &[], &[], true))?;
        write_post(&dir, "d", &post_mdx("D", "2025-10-02", &["design"], &["Static Sites"], false))?;
        let store = store(&dir);
        Ok((dir, store))
    }

    #[test]
    fn test_all_posts_sorted_by_date() -> io::Result<()> {
        let dir = TempDir::new()?;
        write_post(&dir, "a", &post_mdx("A", "2025-09-01", &[], &[], false))?;
        write_post(&dir, "b", &post_mdx("B", "2025-09-15", &[], &[], false))?;

        let posts = store(&dir).all_posts();
        assert_eq!(slugs(&posts), vec!["b", "a"]);
        Ok(())
    }

    #[test]
    fn test_all_posts_order_property() -> io::Result<()> {
        let (_dir, store) = sample_store()?;
        let posts = store.all_posts();
        assert_eq!(slugs(&posts), vec!["d", "b", "a", "c"]);
        for pair in posts.windows(2) {
            assert!(pair[0].published() >= pair[1].published());
        }
        Ok(())
    }

    #[test]
    fn test_same_date_and_undated() -> io::Result<()> {
        let dir = TempDir::new()?;
        write_post(&dir, "zeta", &post_mdx("Z", "2025-09-01", &[], &[], false))?;
        write_post(&dir, "alpha", &post_mdx("A", "2025-09-01", &[], &[], false))?;
        write_post(&dir, "undated", "---\ntitle: No date\n---\nbody")?;
        write_post(&dir, "old", &post_mdx("O", "2020-01-01", &[], &[], false))?;

        let posts = store(&dir).all_posts();
        assert_eq!(slugs(&posts), vec!["alpha", "zeta", "old", "undated"]);
        Ok(())
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let store = PostStore::new(PathBuf::from("/no/such/content/posts"), "mdx");
        assert!(store.all_posts().is_empty());
        assert!(store.featured_posts().is_empty());
        assert!(store.post_by_slug("anything").is_none());
    }

    #[test]
    fn test_post_by_slug() -> io::Result<()> {
        let (_dir, store) = sample_store()?;
        for slug in ["a", "b", "c", "d"] {
            assert_eq!(store.post_by_slug(slug).unwrap().slug, slug);
        }
        assert!(store.post_by_slug("e").is_none());
        assert!(store.post_by_slug("../a").is_none());
        Ok(())
    }

    #[test]
    fn test_malformed_post_is_skipped() -> io::Result<()> {
        let (dir, store) = sample_store()?;
        write_post(&dir, "broken", "---\ntitle: [never closed\n---\nbody")?;
        write_post(&dir, "unterminated", "---\ntitle: Hi\n")?;

        assert!(store.post_by_slug("broken").is_none());
        assert!(matches!(store.load_post("broken"), Err(PostError::Yaml(_))));
        assert!(matches!(store.load_post("unterminated"), Err(PostError::UnterminatedFrontmatter)));
        assert_eq!(store.all_posts().len(), 4);
        assert_eq!(store.post_slugs()?, vec!["a", "b", "broken", "c", "d", "unterminated"]);
        Ok(())
    }

    #[test]
    fn test_featured_posts() -> io::Result<()> {
        let (_dir, store) = sample_store()?;
        let featured = store.featured_posts();
        assert_eq!(slugs(&featured), vec!["b", "c"]);
        assert!(featured.iter().all(|p| p.frontmatter.featured));
        Ok(())
    }

    #[test]
    fn test_posts_by_category() -> io::Result<()> {
        let (_dir, store) = sample_store()?;
        assert_eq!(slugs(&store.posts_by_category("web-development")), vec!["b", "a"]);
        assert_eq!(slugs(&store.posts_by_category("design")), vec!["d", "b"]);
        assert_eq!(slugs(&store.posts_by_category("Web Development")), vec!["b", "a"]);
        assert!(store.posts_by_category("cooking").is_empty());
        assert!(store.posts_by_category("").is_empty());
        Ok(())
    }

    #[test]
    fn test_posts_by_tag() -> io::Result<()> {
        let (_dir, store) = sample_store()?;
        assert_eq!(slugs(&store.posts_by_tag("rust")), vec!["b", "a"]);
        assert_eq!(slugs(&store.posts_by_tag("static-sites")), vec!["d"]);
        Ok(())
    }

    #[test]
    fn test_all_slugs() -> io::Result<()> {
        let (_dir, store) = sample_store()?;
        assert_eq!(store.all_slugs(), vec!["d", "b", "a", "c"]);
        Ok(())
    }

    #[test]
    fn test_label_counts() -> io::Result<()> {
        let (_dir, store) = sample_store()?;

        let tags = store.all_tags();
        assert_eq!(tags[0], LabelCount { name: "Rust".to_string(), slug: "rust".to_string(), count: 2 });
        let tag_slugs: Vec<&str> = tags.iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(tag_slugs, vec!["rust", "static-sites", "ux"]);

        let categories = store.all_categories();
        let category_counts: Vec<(&str, usize)> = categories.iter().map(|c| (c.slug.as_str(), c.count)).collect();
        assert_eq!(category_counts, vec![("design", 2), ("web-development", 2)]);
        Ok(())
    }
}
