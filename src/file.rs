// src/file.rs

use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use crate::config::options::ExportOptions;
use crate::enhance::Download;

/// Save a download into `export.out_dir()`, never overwriting an existing
/// file. Returns the final path written to.
pub fn save_download(export: &ExportOptions, download: &Download) -> Result<PathBuf, Box<dyn Error>> {
    let dir = export.out_dir();
    ensure_directory(dir)?;

    let path = resolve_download_path(dir, &download.filename);
    fs::write(&path, &download.bytes)?;
    logf!("File: Saved {} ({} bytes)", path.display(), download.bytes.len());
    Ok(path)
}

/// First free name in `dir`:
/// "<stem>.<ext>", then "<stem> (2).<ext>", "<stem> (3).<ext>", ...
pub fn resolve_download_path(dir: &Path, filename: &str) -> PathBuf {
    let first = dir.join(filename);
    if !first.exists() { return first; }

    let p = Path::new(filename);
    let stem = p.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let ext = p.extension().map(|s| s.to_string_lossy().into_owned());

    let mut n = 2usize;
    loop {
        let name = match &ext {
            Some(ext) => format!("{stem} ({n}).{ext}"),
            None => format!("{stem} ({n})"),
        };
        let candidate = dir.join(name);
        if !candidate.exists() { return candidate; }
        n += 1;
    }
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn Error>> {
    if dir.as_os_str().is_empty() { return Ok(()); }
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
