use std::{fs, io};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct ContentFile {
    pub slug: String,
    pub file_path: PathBuf,
    pub raw_content: String,
}

impl ContentFile {
    pub fn from_file(slug: String, file_path: PathBuf) -> io::Result<ContentFile> {
        let raw_content = fs::read_to_string(&file_path)?;

        Ok(ContentFile {
            slug,
            file_path,
            raw_content,
        })
    }

    /// Slug of a content file: its stem, as long as the extension matches.
    pub fn slug_from_path(path: &Path, extension: &str) -> io::Result<String> {
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            return Err(io::Error::new(ErrorKind::InvalidInput,
                                      format!("Not a .{} file: {}", extension, path.display())));
        }

        match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) if !stem.is_empty() => Ok(stem.to_string()),
            _ => Err(io::Error::new(ErrorKind::InvalidInput, format!("Invalid post path: {}", path.display()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_from_path() {
        let slug = ContentFile::slug_from_path(Path::new("content/posts/hello-world.mdx"), "mdx").unwrap();
        assert_eq!(slug, "hello-world");

        let slug = ContentFile::slug_from_path(Path::new("content/posts/v1.2-notes.mdx"), "mdx").unwrap();
        assert_eq!(slug, "v1.2-notes");

        assert!(ContentFile::slug_from_path(Path::new("content/posts/readme.md"), "mdx").is_err());
        assert!(ContentFile::slug_from_path(Path::new("content/posts/noext"), "mdx").is_err());
    }
}
