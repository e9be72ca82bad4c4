#[cfg(test)]
pub const POST_DATA_MDX: &str = r###"---
title: Designing with constraints
description: Why a short list of rules makes better products
date: "2025-09-15"
categories:
  - Web Development
  - Design
tags:
  - rust
  - static sites
image: /images/posts/constraints.jpg
imageCaption: Sketches on a desk
author:
  name: Jane Doe
  title: Digital Solutions Architect
  bio: Builds websites and the tools behind them.
  avatar: /images/avatar.jpg
featured: true
---
Every project starts with a blank page, and a blank page is the hardest one to fill.

{/* draft note: add the client story */}

## Why constraints

Constraints remove choices that don't matter. Visit [the docs](https://example.com/docs) or the [about page](/about).

### A smaller detail

Detail text.

## A worked example

```rust
fn main() {
    println!("## not a heading");
}
```

> Less, but better.

## Why constraints

Yes, again.
"###;

#[cfg(test)]
pub fn post_mdx(title: &str, date: &str, categories: &[&str], tags: &[&str], featured: bool) -> String {
    let list = |items: &[&str]| {
        items.iter().map(|i| format!("\n  - {}", i)).collect::<String>()
    };
    format!("---\ntitle: {}\ndescription: About {}\ndate: \"{}\"\ncategories:{}\ntags:{}\nimage: /images/{}.jpg\nfeatured: {}\n---\n## Intro\n\nBody of {}.\n",
            title, title, date,
            if categories.is_empty() { " []".to_string() } else { list(categories) },
            if tags.is_empty() { " []".to_string() } else { list(tags) },
            title.to_lowercase(), featured, title)
}
