use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct Site {
    pub name: String,
    pub title: String,
    /// `%s` is replaced by the page title
    #[serde(default = "default_title_template")]
    pub title_template: String,
    pub description: String,
    pub base_url: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_author")]
    pub default_author: String,
    #[serde(default)]
    pub placeholder_image: String,
    #[serde(default)]
    pub publisher_logo: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Deserialize, Clone)]
pub struct Personal {
    pub activity_start_year: i32,
}

#[derive(Deserialize, Clone)]
pub struct Paths {
    pub template_dir: PathBuf,
    pub public_dir: PathBuf,
    pub posts_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

#[derive(Deserialize, Clone)]
pub struct Defaults {
    #[serde(default = "default_content_extension")]
    pub content_extension: String,
    pub page_size: u32,
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,
    #[serde(default)]
    pub rendering_cache_enabled: bool,
}

#[derive(Deserialize, Clone)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

#[derive(Deserialize, Clone)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Clone)]
pub struct Robots {
    #[serde(default = "default_allow")]
    pub allow: Vec<String>,
    #[serde(default = "default_disallow")]
    pub disallow: Vec<String>,
}

impl Default for Robots {
    fn default() -> Self {
        Robots {
            allow: default_allow(),
            disallow: default_disallow(),
        }
    }
}

#[derive(Deserialize, Clone, Default)]
pub struct Hero {
    pub badge: String,
    pub headline: String,
    pub role: String,
    /// `{years}` is replaced by the years since `activity_start_year`
    pub experience: String,
    pub cta_label: String,
    pub cta_link: String,
    #[serde(default)]
    pub video: Option<String>,
}

#[derive(Deserialize, Clone)]
pub struct Skill {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tools: Vec<String>,
}

#[derive(Deserialize, Clone)]
pub struct GalleryItem {
    pub title: String,
    pub category: String,
    pub src: String,
    #[serde(default)]
    pub video: bool,
}

#[derive(Deserialize, Clone, Default)]
pub struct Contact {
    pub heading: String,
    pub text: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Deserialize, Clone)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

/// Content of the landing page.
#[derive(Deserialize, Clone, Default)]
pub struct Landing {
    #[serde(default)]
    pub hero: Hero,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub gallery: Vec<GalleryItem>,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub footer_text: String,
    #[serde(default)]
    pub social: Vec<SocialLink>,
    /// Number of most recent posts shown on the landing page
    #[serde(default = "default_recent_posts")]
    pub recent_posts: usize,
}

#[derive(Deserialize, Clone)]
pub struct Config {
    pub site: Site,
    pub personal: Personal,
    pub paths: Paths,
    pub defaults: Defaults,
    pub server: Server,
    pub log: Option<Log>,
    #[serde(default)]
    pub robots: Robots,
    #[serde(default)]
    pub landing: Landing,
}

fn default_title_template() -> String { "%s".to_string() }
fn default_locale() -> String { "en_US".to_string() }
fn default_language() -> String { "en".to_string() }
fn default_author() -> String { "Author".to_string() }
fn default_date_format() -> String { "%Y-%m-%d".to_string() }
fn default_output_dir() -> PathBuf { PathBuf::from("out") }
fn default_content_extension() -> String { "mdx".to_string() }
fn default_words_per_minute() -> u32 { 200 }
fn default_recent_posts() -> usize { 3 }
fn default_allow() -> Vec<String> { vec!["/".to_string(), "/blog".to_string(), "/blog/*".to_string()] }
fn default_disallow() -> Vec<String> { vec!["/api/".to_string(), "/admin/".to_string()] }

impl Site {
    pub fn page_title(&self, title: &str) -> String {
        self.title_template.replace("%s", title)
    }

    /// Absolute URL of a site path.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        if path.is_empty() || path == "/" {
            return base.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}

fn parse_path(path: PathBuf, exe_dir: &Path) -> PathBuf {
    match path.strip_prefix("${exe_dir}") {
        Ok(rest) => exe_dir.join(rest),
        Err(_) => path,
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => Ok(cfg),
        Err(e) => Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    }
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    let mut cfg = parse_config(&cfg_content)?;

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent().unwrap_or(Path::new("."));
    cfg.paths = Paths {
        template_dir: parse_path(cfg.paths.template_dir, exe_dir),
        public_dir: parse_path(cfg.paths.public_dir, exe_dir),
        posts_dir: parse_path(cfg.paths.posts_dir, exe_dir),
        output_dir: parse_path(cfg.paths.output_dir, exe_dir),
    };

    Ok(cfg)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const CONFIG_DATA: &str = r##"
[site]
name = "Jane Doe"
title = "Jane Doe - Digital Solutions Architect"
title_template = "%s | example.com"
description = "Portfolio and blog"
base_url = "https://example.com/"
default_author = "Anonymous"
placeholder_image = "/images/placeholder.jpg"
date_format = "%d.%m.%Y"

[personal]
activity_start_year = 2013

[paths]
template_dir = "res/template"
public_dir = "res/public"
posts_dir = "${exe_dir}/content/posts"

[defaults]
page_size = 2

[server]
address = "127.0.0.1"
port = 8001

[landing.hero]
badge = "Available"
headline = "I turn ambitious projects into digital products."
role = "Digital Solutions Architect"
experience = "over {years} years"
cta_label = "Book a call"
cta_link = "#contact"

[[landing.skills]]
title = "Product design"
description = "From research to prototypes."
tools = ["UX", "UI"]

[[landing.gallery]]
title = "Project one"
category = "UX/UI Design"
src = "/public/one.mp4"
video = true

[[landing.social]]
name = "GitHub"
url = "https://github.com/example"
"##;

    #[test]
    fn test_parse_config() {
        let cfg = parse_config(CONFIG_DATA).unwrap();
        assert_eq!(cfg.site.page_title("Blog"), "Blog | example.com");
        assert_eq!(cfg.site.url("/blog/hello"), "https://example.com/blog/hello");
        assert_eq!(cfg.site.url("/"), "https://example.com");
        assert_eq!(cfg.site.locale, "en_US");
        assert_eq!(cfg.defaults.content_extension, "mdx");
        assert_eq!(cfg.defaults.words_per_minute, 200);
        assert!(!cfg.defaults.rendering_cache_enabled);
        assert_eq!(cfg.paths.output_dir, PathBuf::from("out"));
        assert!(cfg.log.is_none());
        assert_eq!(cfg.robots.disallow, vec!["/api/", "/admin/"]);
        assert_eq!(cfg.landing.skills[0].tools, vec!["UX", "UI"]);
        assert!(cfg.landing.gallery[0].video);
        assert_eq!(cfg.landing.recent_posts, 3);
    }

    #[test]
    fn test_parse_path() {
        let exe_dir = Path::new("/opt/folio");
        assert_eq!(parse_path(PathBuf::from("${exe_dir}/content/posts"), exe_dir), PathBuf::from("/opt/folio/content/posts"));
        assert_eq!(parse_path(PathBuf::from("content/posts"), exe_dir), PathBuf::from("content/posts"));
    }

    #[test]
    fn test_invalid_config() {
        let err = parse_config("[site]\nname = 1").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }
}
