use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::time_utils::current_unix_timestamp;

/// Writes text using a temp file + rename so readers never observe partial data.
pub fn write_text_atomic(path: &Path, content: &str) -> Result<()> {
    if path.as_os_str().is_empty() {
        bail!("destination path cannot be empty");
    }
    if path.exists() && path.is_dir() {
        bail!("destination path '{}' is a directory", path.display());
    }

    let parent_dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent_dir)
        .with_context(|| format!("failed to create {}", parent_dir.display()))?;

    let temp_name = format!(
        ".{}.tmp-{}-{}",
        path.file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("kv-store"),
        std::process::id(),
        current_unix_timestamp()
    );
    let temp_path = parent_dir.join(temp_name);
    std::fs::write(&temp_path, content)
        .with_context(|| format!("failed to write temporary file {}", temp_path.display()))?;
    std::fs::rename(&temp_path, path).with_context(|| {
        format!(
            "failed to rename temporary file {} to {}",
            temp_path.display(),
            path.display()
        )
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::read_to_string;

    use super::*;

    #[test]
    fn writes_and_replaces_content() {
        let temp = tempfile::tempdir().expect("tempdir");
        let target = temp.path().join("store.json");

        write_text_atomic(&target, "first").expect("first write");
        assert_eq!(read_to_string(&target).expect("read"), "first");

        write_text_atomic(&target, "second").expect("second write");
        assert_eq!(read_to_string(&target).expect("read"), "second");
    }

    #[test]
    fn creates_missing_parent_directories() {
        let temp = tempfile::tempdir().expect("tempdir");
        let target = temp.path().join("nested").join("deep").join("store.json");

        write_text_atomic(&target, "payload").expect("write");
        assert_eq!(read_to_string(&target).expect("read"), "payload");
    }

    #[test]
    fn rejects_directory_destination() {
        let temp = tempfile::tempdir().expect("tempdir");
        let error = write_text_atomic(temp.path(), "payload").expect_err("must fail");
        assert!(error.to_string().contains("is a directory"));
    }

    #[test]
    fn leaves_no_temp_files_behind() {
        let temp = tempfile::tempdir().expect("tempdir");
        let target = temp.path().join("store.json");
        write_text_atomic(&target, "payload").expect("write");

        let leftovers: Vec<_> = std::fs::read_dir(temp.path())
            .expect("read_dir")
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().contains(".tmp-"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
