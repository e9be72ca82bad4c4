use lazy_static::lazy_static;
use regex::Regex;

use crate::content::Heading;
use crate::content::slugger::Slugger;

/// Level of the headings that make up the table of contents.
pub const TOC_LEVEL: u8 = 2;

/// Extracts the level-2 outline of a post body, in document order.
///
/// Deeper headings are left out of the outline even though they render.
/// The ids come from a fresh [`Slugger`], so they are the ones the renderer
/// assigns as long as the document only uses `##` sections.
pub fn extract_headings(content: &str) -> Vec<Heading> {
    lazy_static! {
        static ref HEADING_REGEX: Regex = Regex::new(r"(?m)^(#{2})\s+(.+)$").unwrap();
    }

    let mut slugger = Slugger::new();
    HEADING_REGEX.captures_iter(content)
        .map(|cap| {
            let level = cap[1].len() as u8;
            let text = cap[2].trim().to_string();
            let id = slugger.slug(&text);
            Heading { id, level, text }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(id: &str, text: &str) -> Heading {
        Heading {
            id: id.to_string(),
            level: TOC_LEVEL,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_distinct_headings() {
        let body = "Intro text\n\n## First step\nbody\n\n## Second step\nmore\n\n## Wrap-up!\n";
        let headings = extract_headings(body);
        assert_eq!(headings, vec![
            heading("first-step", "First step"),
            heading("second-step", "Second step"),
            heading("wrap-up", "Wrap-up!"),
        ]);
    }

    #[test]
    fn test_duplicate_headings() {
        let headings = extract_headings("## Intro\n...\n## Intro\n...");
        assert_eq!(headings, vec![
            heading("intro", "Intro"),
            heading("intro-1", "Intro"),
        ]);
    }

    #[test]
    fn test_only_level_two() {
        let body = "# Title\n## Section\n### Detail\n#### Deeper\n##NoSpace\n  ## Indented\n## Last";
        let headings = extract_headings(body);
        assert_eq!(headings, vec![
            heading("section", "Section"),
            heading("last", "Last"),
        ]);
    }

    #[test]
    fn test_trims_text() {
        let headings = extract_headings("##   Spaced out   \r\nbody");
        assert_eq!(headings, vec![heading("spaced-out", "Spaced out")]);
    }

    #[test]
    fn test_idempotent() {
        let body = "## Setup\n## Usage\n## Setup\n";
        assert_eq!(extract_headings(body), extract_headings(body));
        assert_eq!(extract_headings(body)[2].id, "setup-1");
    }

    #[test]
    fn test_no_headings() {
        assert!(extract_headings("").is_empty());
        assert!(extract_headings("just text\nand more").is_empty());
    }
}
