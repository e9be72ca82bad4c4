use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::decompress::decompress_files;
use crate::BootstrapArgs;

fn get_sample_cfg() -> &'static str {
    include_str!("../../../res/folio.toml")
}

fn write_folio_cfg(out_dir: &Path) -> Result<()> {
    let file = File::create(out_dir.join("folio.toml"))?;
    let mut writer = BufWriter::new(file);

    let sample_cfg = replace_paths(out_dir, get_sample_cfg());

    writer.write_all(sample_cfg.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Points every `res/...` path of the sample config at `prefix`.
fn replace_paths(prefix: &Path, config_data: &str) -> String {
    lazy_static! {
        static ref RES_PATH: Regex = Regex::new(r#""res/([\w/]+)""#).unwrap();
    }

    let prefix = prefix.to_string_lossy();
    let prefix = prefix.trim_end_matches('/');
    RES_PATH.replace_all(config_data, |captures: &Captures| {
        format!("\"{}/{}\"", prefix, &captures[1])
    }).to_string()
}

pub fn bootstrap_cmd(args: BootstrapArgs) -> Result<()> {
    let out_path = fs::canonicalize(&args.out_dir)
        .with_context(|| format!("Error converting path to absolute: {}", &args.out_dir))?;

    if !out_path.is_dir() {
        bail!("Output path must be a directory: {}", out_path.display());
    }

    decompress_files(&out_path).context("Error bootstrapping")?;
    write_folio_cfg(&out_path).context("Error writing Folio configuration")?;

    println!("New site created in {}", out_path.display());
    println!("Run: folio --config-path {}", out_path.join("folio.toml").display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use folio::config::parse_config;

    use super::*;

    #[test]
    fn test_sample_cfg() {
        let res = replace_paths(&PathBuf::from("/abs/path/"), get_sample_cfg());
        assert!(res.contains(r##"template_dir = "/abs/path/template""##));
        assert!(res.contains(r##"public_dir = "/abs/path/public""##));
        assert!(res.contains(r##"posts_dir = "/abs/path/content/posts""##));
        assert!(res.contains(r##"output_dir = "/abs/path/out""##));

        let cfg = parse_config(&res).unwrap();
        assert_eq!(cfg.paths.posts_dir, PathBuf::from("/abs/path/content/posts"));
    }
}
