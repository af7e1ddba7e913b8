use std::path::Path;

/// Names of the immediate entries of `dir`, sorted.
///
/// Not recursive. Names that are not valid UTF-8 are converted lossily.
pub async fn list_directory(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut names = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }

    names.sort();
    Ok(names)
}
