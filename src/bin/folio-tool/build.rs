use anyhow::{bail, Result};

use folio::config::{read_config, Config};
use folio::post_store::PostStore;
use folio::site_builder::SiteBuilder;

use crate::SiteArgs;

fn open_config(args: &SiteArgs) -> Result<Config> {
    let mut config = read_config(&args.config_path)?;
    if let Some(ref out_dir) = args.out_dir {
        config.paths.output_dir = out_dir.clone();
    }
    Ok(config)
}

pub fn build_cmd(args: SiteArgs) -> Result<()> {
    let config = open_config(&args)?;
    let report = SiteBuilder::new(&config).build()?;
    println!("Wrote {} pages ({} posts) and {} public files to {}",
             report.pages, report.posts, report.public_files, config.paths.output_dir.display());
    Ok(())
}

pub fn check_cmd(args: SiteArgs) -> Result<()> {
    let config = open_config(&args)?;
    let store = PostStore::from_config(&config);
    let slugs = store.post_slugs()?;

    let mut failures = 0;
    for slug in &slugs {
        match store.load_post(slug) {
            Ok(Some(post)) => println!("ok    {}", post),
            Ok(None) => println!("gone  {}", slug),
            Err(e) => {
                failures += 1;
                println!("error {}: {}", slug, e);
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} posts failed to load", failures, slugs.len());
    }
    println!("{} posts loaded", slugs.len());
    Ok(())
}
