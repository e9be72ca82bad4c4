const TWITTER_INTENT: &str = "https://twitter.com/intent/tweet";
const LINKEDIN_SHARE: &str = "https://www.linkedin.com/shareArticle";

#[derive(Debug, Clone, PartialEq)]
pub struct ShareLinks {
    pub twitter: String,
    pub linkedin: String,
    /// What the copy button puts on the clipboard
    pub copy_url: String,
}

impl ShareLinks {
    pub fn new(url: &str, title: &str) -> Self {
        ShareLinks {
            twitter: share_url(TWITTER_INTENT, &[("url", url), ("text", title)]),
            linkedin: share_url(LINKEDIN_SHARE, &[("mini", "true"), ("url", url), ("title", title)]),
            copy_url: url.to_string(),
        }
    }
}

fn share_url(endpoint: &str, params: &[(&str, &str)]) -> String {
    match serde_urlencoded::to_string(params) {
        Ok(query) => format!("{}?{}", endpoint, query),
        Err(_) => endpoint.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_links() {
        let links = ShareLinks::new("https://example.com/blog/hello-world", "Hello & welcome");
        assert_eq!(links.twitter, "https://twitter.com/intent/tweet?url=https%3A%2F%2Fexample.com%2Fblog%2Fhello-world&text=Hello+%26+welcome");
        assert_eq!(links.linkedin, "https://www.linkedin.com/shareArticle?mini=true&url=https%3A%2F%2Fexample.com%2Fblog%2Fhello-world&title=Hello+%26+welcome");
        assert_eq!(links.copy_url, "https://example.com/blog/hello-world");
    }
}
