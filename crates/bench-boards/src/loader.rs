//! Catalogue loading from TOML.
//!
//! A catalogue is a list of `[[platform]]` tables. The built-in one is
//! embedded at compile time; a replacement can be read from disk.

use crate::{
    definition::PlatformDescriptor,
    error::{BoardError, Result},
};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// The catalogue shipped with the crate.
pub const BUILTIN_CATALOGUE: &str = include_str!("../catalogue/default.toml");

#[derive(Debug, Deserialize)]
struct CatalogueFile {
    #[serde(default, rename = "platform")]
    platforms: Vec<PlatformDescriptor>,
}

/// Parse catalogue TOML. `origin` names the source in error messages.
///
/// Every platform is validated; the first invalid one fails the whole catalogue.
pub fn parse_catalogue(contents: &str, origin: &str) -> Result<Vec<PlatformDescriptor>> {
    let file: CatalogueFile = toml::from_str(contents).map_err(|source| BoardError::ParseError {
        path: origin.to_string(),
        source,
    })?;

    for platform in &file.platforms {
        platform.validate()?;
        debug!(platform_id = %platform.id, origin, "parsed platform definition");
    }

    Ok(file.platforms)
}

/// Read and parse a catalogue file.
pub fn load_file(path: &Path) -> Result<Vec<PlatformDescriptor>> {
    let contents = std::fs::read_to_string(path)?;
    let platforms = parse_catalogue(&contents, &path.display().to_string())?;

    info!(
        count = platforms.len(),
        path = %path.display(),
        "loaded board catalogue file"
    );

    Ok(platforms)
}
