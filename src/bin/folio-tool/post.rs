use std::fmt::Write;
use std::fs::OpenOptions;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};

use folio::content::slugger;
use folio::util::os_helper::author_or_os_user;

use crate::{PostArgs, PostOutput};

fn render_frontmatter(name: &str, date: &NaiveDate, title: Option<&str>) -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf, "title: \"{}\"", title.unwrap_or("Replace with title").replace('"', "\\\""));
    let _ = writeln!(&mut buf, "description: \"\"");
    let _ = writeln!(&mut buf, "date: \"{}\"", date.format("%Y-%m-%d"));
    let _ = writeln!(&mut buf, "categories: []");
    let _ = writeln!(&mut buf, "tags: []");
    let _ = writeln!(&mut buf, "image: \"\"");
    let _ = writeln!(&mut buf, "author:");
    let _ = writeln!(&mut buf, "  name: \"{}\"", name.replace('"', "\\\""));
    let _ = writeln!(&mut buf, "featured: false");
    let _ = writeln!(&mut buf, "---");
    let _ = writeln!(&mut buf);
    buf
}

fn render_body() -> String {
    let mut buf = String::new();

    let _ = writeln!(&mut buf, "This is a body example.");
    let _ = writeln!(&mut buf, "{{/* MDX comments like this one are not rendered */}}");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "## First section");
    let _ = writeln!(&mut buf);
    let _ = writeln!(&mut buf, "Second level headings make up the table of contents.");

    buf
}

/// File slug for a title: transliterated to ASCII, then slugged the way
/// heading ids are.
fn slug_from_title(title: &str) -> String {
    let ascii = unidecode::unidecode(title);
    let slug = slugger::slug(&ascii);

    let mut collapsed = String::with_capacity(slug.len());
    for c in slug.chars() {
        if c != '-' || !collapsed.ends_with('-') {
            collapsed.push(c);
        }
    }
    collapsed.trim_matches('-').to_string()
}

pub fn post_cmd(args: PostArgs) -> Result<()> {
    let name = author_or_os_user(args.name.as_deref());
    let date = Utc::now().date_naive();

    let content = render_frontmatter(&name, &date, args.title.as_deref()) + &render_body();

    match args.output {
        PostOutput::Stdout => {
            print!("{}", content);
        }
        PostOutput::File => {
            use std::io::Write;

            let Some(ref title) = args.title else {
                bail!("For file output, title is required");
            };
            let slug = slug_from_title(title);
            if slug.is_empty() {
                bail!("Title {} has no characters usable in a file name", title);
            }

            let file_name = PathBuf::from(format!("{}.mdx", slug));
            println!("Creating file {}", file_name.display());
            let mut file = OpenOptions::new().write(true).create_new(true).open(&file_name)
                .with_context(|| format!("Error creating {}", file_name.display()))?;
            file.write_all(content.as_bytes())?;
        }
    };

    Ok(())
}
