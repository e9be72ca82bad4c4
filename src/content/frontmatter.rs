use serde::{Deserialize, Serialize};

use crate::content::PostError;

const DELIMITER: &str = "---";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Author {
    pub name: String,
    pub title: String,
    pub bio: String,
    pub avatar: String,
}

/// Metadata block of a post. Nothing is validated here: absent keys come out
/// empty and the views decide on placeholders.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Frontmatter {
    pub title: String,
    pub description: String,
    pub date: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub image: String,
    pub image_caption: Option<String>,
    pub author: Author,
    pub featured: bool,
}

/// Splits `raw` into the YAML block and the body that follows it.
///
/// A file that doesn't open with `---` has no frontmatter and the whole text
/// is the body. Opening the block without closing it is an error.
pub fn split_frontmatter(raw: &str) -> Result<(Option<&str>, &str), PostError> {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let mut lines = text.split_inclusive('\n');
    match lines.next() {
        Some(first) if first.trim_end() == DELIMITER => {}
        _ => return Ok((None, text)),
    }

    let yaml_start = text.find('\n').map(|i| i + 1).unwrap_or(text.len());
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let yaml = &text[yaml_start..offset];
            let body = &text[offset + line.len()..];
            return Ok((Some(yaml), body));
        }
        offset += line.len();
    }

    Err(PostError::UnterminatedFrontmatter)
}

pub fn parse_frontmatter(yaml: Option<&str>) -> Result<Frontmatter, PostError> {
    match yaml {
        Some(yaml) if !yaml.trim().is_empty() => Ok(serde_yaml::from_str::<Frontmatter>(yaml)?),
        _ => Ok(Frontmatter::default()),
    }
}
