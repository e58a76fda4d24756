use std::{
    fmt,
    path::{Path, PathBuf},
};

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{constants::background::IMAGES, page::Document};

/// Path or URL of a static backdrop image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Maps a site-absolute reference such as `/images/a.jpg` under `assets_dir`.
    pub fn resolve(&self, assets_dir: &Path) -> PathBuf {
        assets_dir.join(self.0.trim_start_matches('/'))
    }

    /// The reference as it may appear inside a quoted `url('...')` in an HTML attribute.
    ///
    /// Quotes, brackets, backslashes, whitespace and controls are percent-encoded, `&` becomes an entity.
    pub fn css_url(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        for c in self.0.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '\'' | '"' | '<' | '>' | '\\' | '(' | ')' => out.push_str(&format!("%{:02X}", c as u32)),
                c if c.is_whitespace() || c.is_control() => {
                    let mut bytes = [0; 4];
                    for byte in c.encode_utf8(&mut bytes).bytes() {
                        out.push_str(&format!("%{byte:02X}"));
                    }
                },
                c => out.push(c),
            }
        }
        out
    }
}

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn images() -> Vec<ImageRef> {
    IMAGES.iter().copied().map(ImageRef::from).collect()
}

/// Sets the backdrop of `document` to one entry of `images`, chosen uniformly.
///
/// `images` must not be empty. An empty list leaves the backdrop untouched.
pub fn select_background<R, D>(images: &[ImageRef], rng: &mut R, document: &mut D)
where
    R: Rng + ?Sized,
    D: Document + ?Sized,
{
    match images.choose(rng) {
        Some(image) => {
            debug!("backdrop: {image}");
            document.set_backdrop(image);
        },
        None => warn!("no backdrop images configured"),
    }
}

pub fn apply_background<R, D>(rng: &mut R, document: &mut D)
where
    R: Rng + ?Sized,
    D: Document + ?Sized,
{
    select_background(&images(), rng, document);
}
