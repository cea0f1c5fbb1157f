use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VaultError};
use crate::export::{layout, paginate, DrawingSurface};
use crate::model::Library;
use crate::store::{LibraryBackend, LibraryStore};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Render the library onto `surface` and save it to `output`.
///
/// Every failure past reading the library is reported as `ExportFailed`.
pub fn run<B: LibraryBackend, S: DrawingSurface>(
    store: &LibraryStore<B>,
    library: &Library,
    mut surface: S,
    output: &Path,
) -> Result<CmdResult> {
    let text = store.read(library)?;
    let lines = layout(&text);

    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| VaultError::ExportFailed(e.to_string()))?;
    }

    let pages = paginate(&mut surface, &lines).map_err(into_export_error)?;
    surface.save(output).map_err(into_export_error)?;
    info!(library = %library.name, pages, output = %output.display(), "exported library");

    Ok(CmdResult::default()
        .with_output_path(output.to_path_buf())
        .with_message(CmdMessage::success(format!(
            "Exported to PDF: {}",
            output.display()
        ))))
}

/// Where an export goes: `requested` (or `<library>.pdf`) inside `export_dir`.
///
/// The requested name must be a plain file name; anything that would land
/// outside the export directory is `InvalidName`.
pub fn output_path(
    export_dir: &Path,
    library: &Library,
    requested: Option<&str>,
) -> Result<PathBuf> {
    let file_name = match requested.map(str::trim).filter(|r| !r.is_empty()) {
        Some(name) if name.contains(['/', '\\']) || name == "." || name == ".." => {
            return Err(VaultError::InvalidName(name.to_string()))
        }
        Some(name) if Path::new(name).extension().is_some() => name.to_string(),
        Some(name) => format!("{}.pdf", name),
        None => format!("{}.pdf", library.name),
    };
    Ok(export_dir.join(file_name))
}

fn into_export_error(err: VaultError) -> VaultError {
    match err {
        VaultError::ExportFailed(_) => err,
        other => VaultError::ExportFailed(other.to_string()),
    }
}
