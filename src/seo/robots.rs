use std::fmt::Write;

use crate::config::{Robots, Site};

pub fn render_robots(robots: &Robots, site: &Site) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "User-Agent: *");
    for path in &robots.allow {
        let _ = writeln!(&mut buf, "Allow: {}", path);
    }
    for path in &robots.disallow {
        let _ = writeln!(&mut buf, "Disallow: {}", path);
    }
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "Sitemap: {}", site.url("/sitemap.xml"));

    buf
}
