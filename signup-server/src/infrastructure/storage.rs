use std::path::Path;

use tokio::fs;
use tracing::info;

/// Creates the record store holding an empty array when it does not exist yet.
pub async fn ensure_store(path: &Path) -> std::io::Result<()> {
    if fs::try_exists(path).await? {
        info!(path = %path.display(), "using existing user store");
        return Ok(());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, "[]").await?;
    info!(path = %path.display(), "created empty user store");
    Ok(())
}
