use std::fs::File;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use flate2::write::GzEncoder;
use flate2::Compression;

fn archive_path(out_dir: &Path, res_dir: &Path) -> PathBuf {
    let last = res_dir.file_name().and_then(|n| n.to_str()).unwrap_or("res");
    out_dir.join(format!("{}.tar.gz", last))
}

fn compress_dir(res_dir: &Path, archive_path: &Path) -> io::Result<()> {
    let _ = fs::remove_file(archive_path);

    let tar_gz = File::create(archive_path)?;
    let enc = GzEncoder::new(tar_gz, Compression::default());
    let mut tar = tar::Builder::new(enc);
    tar.append_dir_all(".", res_dir)?;
    tar.into_inner()?.finish()?;
    Ok(())
}

fn main() -> io::Result<()> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").map_err(io::Error::other)?;
    let out_dir = env::var("OUT_DIR").map_err(io::Error::other)?;

    let res_dir = PathBuf::from(manifest_dir).join("res");
    println!("cargo:rerun-if-changed={}", res_dir.display());

    compress_dir(&res_dir, &archive_path(Path::new(&out_dir), &res_dir))
}
