use std::collections::HashMap;

/// Decoded request query parameters. Later duplicates win.
#[derive(PartialEq, Debug, Default)]
pub struct QueryString {
    params: HashMap<String, String>,
}

impl QueryString {
    pub fn parse(query: &str) -> Self {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).unwrap_or_default();
        QueryString {
            params: pairs.into_iter().collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Requested list page, 1 when absent or not a positive number.
    pub fn page(&self) -> u32 {
        self.get("page")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|page| *page > 0)
            .unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_falls_back_to_first() {
        assert_eq!(QueryString::parse("page=3").page(), 3);
        assert_eq!(QueryString::parse("page=0").page(), 1);
        assert_eq!(QueryString::parse("page=-2").page(), 1);
        assert_eq!(QueryString::parse("page=abc").page(), 1);
        assert_eq!(QueryString::parse("sort=new").page(), 1);
        assert_eq!(QueryString::parse("").page(), 1);
    }

    #[test]
    fn decodes_values() {
        let qs = QueryString::parse("tag=static%20sites&q=caf%C3%A9+menu&page=2&page=4");
        assert_eq!(qs.get("tag"), Some("static sites"));
        assert_eq!(qs.get("q"), Some("café menu"));
        assert_eq!(qs.page(), 4);
        assert_eq!(qs.get("missing"), None);
    }

    #[test]
    fn key_without_value() {
        let qs = QueryString::parse("preview");
        assert_eq!(qs.get("preview"), Some(""));
        assert_ne!(qs, QueryString::default());
    }
}
