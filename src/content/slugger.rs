use std::collections::HashMap;

/// Issues github-slugger compatible identifiers.
///
/// The same text yields the same slug the first time; repeated texts get a
/// `-1`, `-2`, ... suffix. A slugger must be used for exactly one document,
/// since the heading ids in the page depend on the issue order.
#[derive(Debug, Default)]
pub struct Slugger {
    occurrences: HashMap<String, u32>,
}

impl Slugger {
    pub fn new() -> Self {
        Slugger {
            occurrences: HashMap::new(),
        }
    }

    pub fn slug(&mut self, value: &str) -> String {
        let original = slug(value);
        let mut result = original.clone();

        while self.occurrences.contains_key(&result) {
            let counter = self.occurrences.entry(original.clone()).or_insert(0);
            *counter += 1;
            result = format!("{}-{}", original, counter);
        }

        self.occurrences.insert(result.clone(), 0);
        result
    }
}

/// Slug for a single value, without any collision tracking.
///
/// Keeps what `char::is_alphanumeric` accepts plus `-` and `_`. This differs
/// from github-slugger on a few code points: combining marks are dropped and
/// numeric symbols such as `²` are kept. Rendered ids and the table of
/// contents both come from here, so they always agree.
pub fn slug(value: &str) -> String {
    value.to_lowercase()
        .chars()
        .filter(|&c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_')
        .map(|c| if c == ' ' { '-' } else { c })
        .collect()
}
