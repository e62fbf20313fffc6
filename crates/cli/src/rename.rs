//! Renaming a single font file.

use std::path::{Path, PathBuf};

use anyhow::anyhow;
use log::{debug, info};
use read_fonts::FontRef;

use fontname_font_naming::{CffUpdate, DerivedNames, NameSpec, derive_names};
use fontname_font_ops::copy_tables;

use crate::{
    error::{Error, Result},
    io::FontFile,
};

/// What a successful rename produced.
#[derive(Debug)]
pub struct RenameOutcome {
    /// Where the renamed font was written.
    pub output: PathBuf,
    pub names: DerivedNames,
    /// Result of the optional CFF update; a failure here is only a warning.
    pub cff: CffUpdate,
}

/// Renames fonts and writes them next to each other in one output directory.
#[derive(Debug, Clone, Default)]
pub struct Renamer {
    output_dir: Option<PathBuf>,
}

impl Renamer {
    /// Outputs go to `output_dir`, or to the current directory when `None`.
    pub fn new(output_dir: Option<PathBuf>) -> Self {
        Self { output_dir }
    }

    /// Where the renamed copy of `input` is written.
    pub fn output_path(&self, input: &Path, names: &DerivedNames) -> PathBuf {
        let file_name = names.output_file_name(input);
        match &self.output_dir {
            Some(dir) => dir.join(file_name),
            None => file_name,
        }
    }

    /// Load `input`, apply the names derived from `spec`, and save the result.
    ///
    /// The font is only held for the duration of the call. Load and save
    /// failures are errors; a CFF failure is reported in the outcome and the
    /// font is still saved.
    pub fn rename(&self, input: &Path, spec: &NameSpec) -> Result<RenameOutcome> {
        let load_err = |cause: anyhow::Error| Error::Load { path: input.to_path_buf(), cause };

        let data = FontFile::new(input).read().map_err(load_err)?;
        let font = FontRef::new(&data).map_err(|e| load_err(anyhow!(e)))?;
        debug!("{}: loaded {} bytes", input.display(), data.len());

        let names = derive_names(spec);
        let output = self.output_path(input, &names);
        let save_err = |cause: anyhow::Error| Error::Save { path: output.clone(), cause };

        let name = names.name_table(&font).map_err(load_err)?;
        let mut builder = copy_tables(&font);
        builder.add_table(&name).map_err(|e| save_err(anyhow!(e)))?;

        let cff = names.apply_cff(&font, &mut builder);
        debug!("{}: CFF update {cff:?}", input.display());

        FontFile::new(&output).write(builder.build()).map_err(save_err)?;
        info!("{} -> {}", input.display(), output.display());

        Ok(RenameOutcome { output, names, cff })
    }
}
