//! Review-artifact packaging for generated packages.

use color_eyre::eyre::{WrapErr, eyre};
use std::{fs, io, path::Path};
use walkdir::WalkDir;
use zip::{CompressionMethod, ZipWriter, write::FileOptions};

use crate::result::Result;

/// Zip a generated package's source tree into a single review artifact.
///
/// Entry names are computed relative to the **parent** of `source_dir`, so
/// every entry is prefixed by the package's own directory name and the
/// archive stays self-describing when extracted elsewhere. Directories are
/// stored as bare entries with a trailing separator; files are
/// deflate-compressed.
///
/// Callers treat failures as soft: the archive is secondary output for
/// API-review tooling, never the primary deliverable.
pub fn package(source_dir: &Path, dest: &Path) -> Result<()> {
    let parent = source_dir.parent().ok_or_else(|| {
        eyre!("package directory {} has no parent", source_dir.display())
    })?;

    let dest_file = fs::File::create(dest).wrap_err_with(|| {
        format!("failed to create archive {}", dest.display())
    })?;
    let mut zip = ZipWriter::new(dest_file);
    let options =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in WalkDir::new(source_dir) {
        let entry = entry.wrap_err("failed to walk package directory")?;
        let name = entry
            .path()
            .strip_prefix(parent)
            .wrap_err("entry escaped the package directory")?
            .to_string_lossy()
            .replace('\\', "/");

        if entry.file_type().is_dir() {
            zip.add_directory(format!("{name}/"), options)?;
        } else {
            zip.start_file(name, options)?;
            let mut src = fs::File::open(entry.path())?;
            io::copy(&mut src, &mut zip)?;
        }
    }

    zip.finish()?;
    Ok(())
}
