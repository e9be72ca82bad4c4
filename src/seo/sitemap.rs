use std::io::Cursor;

use chrono::{NaiveDateTime, SecondsFormat, TimeZone, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::config::Site;
use crate::content::Post;

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://example.com/blog/hello-world</loc>
    <lastmod>2025-09-15T00:00:00.000Z</lastmod>
    <changefreq>weekly</changefreq>
    <priority>0.8</priority>
  </url>
</urlset>
*/

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: Option<NaiveDateTime>,
    pub change_frequency: &'static str,
    pub priority: f32,
}

/// Home and blog index first, then one entry per post dated with the post.
pub fn sitemap_entries(site: &Site, posts: &[Post], now: NaiveDateTime) -> Vec<SitemapEntry> {
    let mut entries = vec![
        SitemapEntry {
            url: site.url("/"),
            last_modified: Some(now),
            change_frequency: "daily",
            priority: 1.0,
        },
        SitemapEntry {
            url: site.url("/blog"),
            last_modified: Some(now),
            change_frequency: "daily",
            priority: 0.9,
        },
    ];

    entries.extend(posts.iter().map(|post| SitemapEntry {
        url: site.url(&format!("/blog/{}", post.slug)),
        last_modified: post.published(),
        change_frequency: "weekly",
        priority: 0.8,
    }));

    entries
}

pub fn render_sitemap(entries: &[SitemapEntry]) -> quick_xml::Result<Vec<u8>> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", "http://www.sitemaps.org/schemas/sitemap/0.9"));
    writer.write_event(Event::Start(urlset))?;

    for entry in entries {
        writer.write_event(Event::Start(BytesStart::new("url")))?;
        push_text(&mut writer, "loc", &entry.url)?;
        if let Some(ref dt) = entry.last_modified {
            let dt = Utc.from_utc_datetime(dt);
            push_text(&mut writer, "lastmod", &dt.to_rfc3339_opts(SecondsFormat::Millis, true))?;
        }
        push_text(&mut writer, "changefreq", entry.change_frequency)?;
        push_text(&mut writer, "priority", &format!("{:.1}", entry.priority))?;
        writer.write_event(Event::End(BytesEnd::new("url")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("urlset")))?;

    Ok(writer.into_inner().into_inner())
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
