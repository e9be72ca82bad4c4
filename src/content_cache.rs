use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

/// Rendered content by slug. An entry is only handed out while the source
/// file still has the modification time it was rendered from.
pub struct ContentCache<T> {
    cache: Option<CacheMap<T>>,
}

type CacheMap<T> = HashMap<String, CacheValue<T>>;

struct CacheValue<T> {
    modified: SystemTime,
    value: Arc<T>,
}

pub fn modified_time(path: &Path) -> io::Result<SystemTime> {
    fs::metadata(path)?.modified()
}

impl<T> ContentCache<T> {
    pub fn new() -> Self {
        ContentCache {
            cache: Some(HashMap::new()),
        }
    }

    pub fn non_caching() -> Self {
        ContentCache {
            cache: None,
        }
    }

    pub fn from_flag(enabled: bool) -> Self {
        if enabled { Self::new() } else { Self::non_caching() }
    }

    pub fn is_enabled(&self) -> bool {
        self.cache.is_some()
    }

    pub fn add_post(&mut self, slug: &str, modified: SystemTime, content: T) -> Arc<T> {
        let value = Arc::new(content);
        if let Some(ref mut cache) = self.cache {
            cache.insert(slug.to_string(), CacheValue {
                modified,
                value: value.clone(),
            });
        }
        value
    }

    /// Cached content for `slug`; a stale entry is dropped.
    pub fn get_post(&mut self, slug: &str, modified: SystemTime) -> Option<Arc<T>> {
        let cache = self.cache.as_mut()?;
        match cache.get(slug) {
            Some(cache_value) if cache_value.modified == modified => Some(cache_value.value.clone()),
            Some(_) => {
                cache.remove(slug);
                None
            }
            None => None,
        }
    }

    pub fn invalidate(&mut self, slug: &str) {
        if let Some(ref mut cache) = self.cache {
            cache.remove(slug);
        }
    }

    pub fn len(&self) -> usize {
        self.cache.as_ref().map_or(0, |c| c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for ContentCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
