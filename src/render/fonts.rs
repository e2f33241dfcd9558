use std::path::{Path, PathBuf};

use ab_glyph::{FontVec, PxScale};

use crate::config::FontConfig;

/// (regular, bold) pairs to probe when the config names no fonts.
const FONT_CANDIDATES: &[(&str, &str)] = &[
    (
        "roboto/Roboto-Regular.ttf",
        "roboto/Roboto-Bold.ttf",
    ),
    (
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
    ),
    (
        "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
        "/usr/share/fonts/truetype/freefont/FreeSansBold.ttf",
    ),
];

#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// No candidate pair exists on this machine and none was configured.
    #[error("no usable font pair found; set [fonts] regular/bold in config.toml")]
    NoFontFound,

    #[error("failed to read font file {path}: {source}")]
    Unreadable {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("font file {path} is not a valid TrueType/OpenType font")]
    Invalid { path: PathBuf },
}

/// Regular and bold faces loaded once at startup. There is no fallback
/// face: layout assumes real glyph metrics, so a load failure is fatal.
pub struct FontBook {
    regular: FontVec,
    bold:    FontVec,
}

/// A regular/bold pair at one pixel size, as handed to the drawing code.
#[derive(Clone, Copy)]
pub struct SizedFont<'a> {
    pub regular: &'a FontVec,
    pub bold:    &'a FontVec,
    pub scale:   PxScale,
}

impl FontBook {
    pub fn load(config: Option<&FontConfig>) -> Result<Self, FontError> {
        if let Some(cfg) = config {
            if let (Some(regular), Some(bold)) = (&cfg.regular, &cfg.bold) {
                return Ok(Self {
                    regular: load_face(regular)?,
                    bold:    load_face(bold)?,
                });
            }
        }
        for (regular, bold) in FONT_CANDIDATES {
            let (regular, bold) = (Path::new(regular), Path::new(bold));
            if regular.exists() && bold.exists() {
                tracing::debug!(regular = %regular.display(), "using font pair");
                return Ok(Self {
                    regular: load_face(regular)?,
                    bold:    load_face(bold)?,
                });
            }
        }
        Err(FontError::NoFontFound)
    }

    pub fn sized(&self, px: f32) -> SizedFont<'_> {
        SizedFont {
            regular: &self.regular,
            bold:    &self.bold,
            scale:   PxScale::from(px),
        }
    }
}

impl SizedFont<'_> {
    pub fn face(&self, bold: bool) -> &FontVec {
        if bold { self.bold } else { self.regular }
    }
}

fn load_face(path: &Path) -> Result<FontVec, FontError> {
    let data = std::fs::read(path).map_err(|source| FontError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    FontVec::try_from_vec(data).map_err(|_| FontError::Invalid {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_font_file_is_reported_with_its_path() {
        let err = load_face(Path::new("/definitely/not/here.ttf")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.ttf"));
    }

    #[test]
    fn configured_pair_must_be_complete() {
        // Only one face configured: falls through to the candidate probe,
        // which either finds a real pair or reports NoFontFound.
        let cfg = FontConfig {
            regular: Some(PathBuf::from("/tmp/only-regular.ttf")),
            bold:    None,
        };
        match FontBook::load(Some(&cfg)) {
            Ok(_) | Err(FontError::NoFontFound) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}
