use std::path::{Path, PathBuf};

/// Output file for an input document: `<output_dir>/<input stem>.json`
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| sanitize_filename(&s.to_string_lossy()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "document".to_string());

    output_dir.join(format!("{stem}.json"))
}

/// Convert a string to a sanitized filename
pub fn sanitize_filename(name: &str) -> String {
    let name = name.replace(['/', '\\', ':', '?', '&', '=', '#', '%', '*', '"', '<', '>', '|'], "_");

    // Limit filename length
    if name.chars().count() > 100 {
        name.chars().take(100).collect()
    } else {
        name
    }
}

/// Whether `path` looks like a saved HTML page
pub fn is_html_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_uses_stem() {
        assert_eq!(
            output_path(Path::new("./html/van-gogh-paintings.html"), Path::new("./output")),
            PathBuf::from("./output/van-gogh-paintings.json")
        );
        assert_eq!(
            output_path(Path::new("metallica.albums.html"), Path::new("out")),
            PathBuf::from("out/metallica.albums.json")
        );
    }

    #[test]
    fn test_output_path_without_stem() {
        assert_eq!(
            output_path(Path::new("/"), Path::new("out")),
            PathBuf::from("out/document.json")
        );
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("a:b?c"), "a_b_c");
        assert_eq!(sanitize_filename(&"x".repeat(150)).len(), 100);
    }
}
