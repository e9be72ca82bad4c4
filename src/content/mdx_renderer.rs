use std::io;
use std::io::ErrorKind;

use lazy_static::lazy_static;
use markdown::{CompileOptions, Options, ParseOptions};
use regex::{Captures, Regex};

use crate::content::slugger::Slugger;

/// Renders a post body to HTML.
///
/// Every heading gets an `id` from one slugger over the whole document, in
/// document order, plus a leading self-link. For `##`-only documents the ids
/// are the ones `extract_headings` reports.
pub struct MdxRenderer {}

impl MdxRenderer {
    pub fn render(body: &str) -> io::Result<String> {
        let buf = remove_comments(body, "<!--", "-->")?;
        let buf = remove_comments(&buf, "{/*", "*/}")?;

        let options = Options {
            parse: ParseOptions::gfm(),
            compile: CompileOptions {
                allow_dangerous_html: true,
                ..CompileOptions::gfm()
            },
        };
        let html = match markdown::to_html_with_options(buf.as_str(), &options) {
            Ok(x) => x,
            Err(e) => return Err(io::Error::new(ErrorKind::InvalidInput, e.reason)),
        };

        let html = Self::add_heading_ids(&html);
        let html = Self::decorate_links(&html);
        Ok(Self::wrap_code_blocks(&html))
    }

    fn add_heading_ids(html: &str) -> String {
        lazy_static! {
            static ref HEADING_REGEX: Regex = Regex::new(r"<h([1-6])>(.*?)</h[1-6]>").unwrap();
        }

        let mut slugger = Slugger::new();
        HEADING_REGEX.replace_all(html, |cap: &Captures| {
            let level = &cap[1];
            let inner = &cap[2];
            let id = slugger.slug(&text_content(inner));
            format!(r##"<h{level} id="{id}"><a aria-hidden="true" tabindex="-1" href="#{id}"><span class="icon icon-link"></span></a>{inner}</h{level}>"##)
        }).to_string()
    }

    fn decorate_links(html: &str) -> String {
        lazy_static! {
            static ref LINK_REGEX: Regex = Regex::new(r#"<a href="(https?://[^"]*)""#).unwrap();
        }

        LINK_REGEX.replace_all(html, r#"<a href="$1" target="_blank" rel="noopener noreferrer""#).to_string()
    }

    fn wrap_code_blocks(html: &str) -> String {
        html.replace("<pre>", r#"<div class="code-block"><button type="button" class="copy-code" aria-label="Copy code">Copy</button><pre>"#)
            .replace("</pre>", "</pre></div>")
    }
}

/// Text of an HTML fragment: tags dropped, basic entities decoded.
pub fn text_content(html: &str) -> String {
    lazy_static! {
        static ref TAG_REGEX: Regex = Regex::new(r"<[^>]*>").unwrap();
    }

    TAG_REGEX.replace_all(html, "")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Drops every `start` .. `end` block. An opened block without an end is an
/// error.
pub fn remove_comments(text: &str, start: &str, end: &str) -> io::Result<String> {
    let mut res = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(begin) = rest.find(start) {
        res.push_str(&rest[..begin]);
        let after = &rest[begin + start.len()..];
        match after.find(end) {
            Some(stop) => rest = &after[stop + end.len()..],
            None => return Err(io::Error::new(ErrorKind::InvalidData,
                                              format!("Error finding end of comment {}", end))),
        }
    }
    res.push_str(rest);

    Ok(res)
}
