use std::io;
use std::path::Path;

use flate2::read::GzDecoder;
use tar::Archive;

/// The `res/` directory, packed by the build script.
const RESOURCES: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/res.tar.gz"));

pub fn decompress_files(output: &Path) -> io::Result<()> {
    let tar = GzDecoder::new(RESOURCES);
    let mut archive = Archive::new(tar);
    archive.unpack(output)
}
