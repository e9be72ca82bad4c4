use std::{fs, io};
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::content::content_file::ContentFile;

#[derive(Debug, Clone, PartialEq)]
pub struct PostLink {
    pub slug: String,
    pub post_path: PathBuf,
}

/// Directory listing of the post files, nothing is parsed here.
pub struct PostList {
    pub root_dir: PathBuf,
    pub extension: String,
}

impl PostList {
    /// Post files of the root directory, sorted by slug. A missing root
    /// directory is an empty list.
    pub fn retrieve_files(&self) -> io::Result<Vec<PostLink>> {
        let entries = match fs::read_dir(self.root_dir.as_path()) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e),
        };

        let mut posts = vec![];
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let post_path = entry.path();
            if let Ok(slug) = ContentFile::slug_from_path(&post_path, &self.extension) {
                posts.push(PostLink { slug, post_path });
            }
        }

        posts.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(posts)
    }

    /// Path the post with `slug` would live in. Slugs that could escape the
    /// root directory have no path.
    pub fn path_for(&self, slug: &str) -> Option<PathBuf> {
        if slug.is_empty() || slug.contains('/') || slug.contains('\\') || slug.contains("..") {
            return None;
        }
        Some(self.root_dir.join(format!("{}.{}", slug, self.extension)))
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_retrieve_files() -> io::Result<()> {
        let dir = TempDir::new()?;
        File::create(dir.path().join("b-post.mdx"))?;
        File::create(dir.path().join("a-post.mdx"))?;
        File::create(dir.path().join("notes.md"))?;
        fs::create_dir(dir.path().join("drafts.mdx"))?;

        let post_list = PostList { root_dir: dir.path().to_path_buf(), extension: "mdx".to_string() };
        let posts = post_list.retrieve_files()?;
        let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a-post", "b-post"]);
        assert_eq!(posts[0].post_path, dir.path().join("a-post.mdx"));
        Ok(())
    }

    #[test]
    fn test_missing_dir() -> io::Result<()> {
        let post_list = PostList { root_dir: PathBuf::from("/definitely/not/here"), extension: "mdx".to_string() };
        assert!(post_list.retrieve_files()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_path_for() {
        let post_list = PostList { root_dir: PathBuf::from("posts"), extension: "mdx".to_string() };
        assert_eq!(post_list.path_for("hello"), Some(PathBuf::from("posts/hello.mdx")));
        assert_eq!(post_list.path_for("../secret"), None);
        assert_eq!(post_list.path_for("a/b"), None);
        assert_eq!(post_list.path_for(""), None);
    }
}
