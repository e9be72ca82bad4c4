use std::{fmt, io};
use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

use crate::content::content_file::ContentFile;
use crate::content::frontmatter::{parse_frontmatter, split_frontmatter, Frontmatter};
use crate::content::headings::extract_headings;
use crate::content::reading_time::ReadingTime;
use crate::text_utils::parse_date_time;

pub mod content_file;
pub mod frontmatter;
pub mod headings;
pub mod mdx_renderer;
pub mod reading_time;
pub mod slugger;

#[derive(Debug, Error)]
pub enum PostError {
    #[error("could not read post: {0}")]
    Io(#[from] io::Error),
    #[error("frontmatter block is opened but never closed")]
    UnterminatedFrontmatter,
    #[error("invalid frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub id: String,
    pub level: u8,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub slug: String,
    pub content: String,
    pub frontmatter: Frontmatter,
    pub reading_time: ReadingTime,
    pub headings: Vec<Heading>,
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "slug={}, date={}, title={}, {}, {} headings",
               self.slug,
               self.frontmatter.date,
               self.frontmatter.title,
               self.reading_time,
               self.headings.len(),
        )
    }
}

impl Post {
    pub fn from_file(content_file: &ContentFile, words_per_minute: u32) -> Result<Post, PostError> {
        Self::from_string(&content_file.slug, &content_file.raw_content, words_per_minute)
    }

    pub fn from_string(slug: &str, raw: &str, words_per_minute: u32) -> Result<Post, PostError> {
        let (yaml, body) = split_frontmatter(raw)?;
        let frontmatter = parse_frontmatter(yaml)?;
        let headings = extract_headings(body);
        let reading_time = ReadingTime::estimate(body, words_per_minute);

        Ok(Post {
            slug: slug.to_string(),
            content: body.to_string(),
            frontmatter,
            reading_time,
            headings,
        })
    }

    /// Publication date, if the frontmatter carries a parseable one.
    pub fn published(&self) -> Option<NaiveDateTime> {
        parse_date_time(&self.frontmatter.date).ok()
    }
}
