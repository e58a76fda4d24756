use std::fmt::Write;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    background::{self, ImageRef},
    snow::{self, DecorationNode},
};

/// The visual container the decoration routines write into.
///
/// Routines only ever write through this trait, they never read the page back.
pub trait Document {
    fn set_backdrop(&mut self, image: &ImageRef);

    fn append_child(&mut self, node: DecorationNode);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub backdrop: Option<ImageRef>,
    pub body: Vec<DecorationNode>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh page with both routines run once against it.
    pub fn load<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut page = Self::new();
        background::apply_background(rng, &mut page);
        snow::apply_snow(rng, &mut page);

        info!(backdrop = ?page.backdrop, nodes = page.body.len(), "page loaded");
        page
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        match &self.backdrop {
            Some(image) => {
                let _ = writeln!(html, "<body style=\"background-image: url('{}')\">", image.css_url());
            },
            None => html.push_str("<body>\n"),
        }
        for node in &self.body {
            let _ = writeln!(html, "  <div class=\"snow\" style=\"{}\"></div>", node.style());
        }
        html.push_str("</body>\n");
        html
    }
}

impl Document for Page {
    fn set_backdrop(&mut self, image: &ImageRef) {
        self.backdrop = Some(image.clone());
    }

    fn append_child(&mut self, node: DecorationNode) {
        self.body.push(node);
    }
}
