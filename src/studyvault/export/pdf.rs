use super::{DrawingSurface, FONT_SIZE, PAGE_HEIGHT, PAGE_WIDTH};
use crate::error::{Result, VaultError};
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const LAYER_NAME: &str = "Text";

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

fn export_err(e: impl std::fmt::Display) -> VaultError {
    VaultError::ExportFailed(e.to_string())
}

/// PDF output backed by `printpdf`, using the built-in Helvetica font.
pub struct PdfSurface {
    doc: PdfDocumentReference,
    font: IndirectFontRef,
    layer: PdfLayerReference,
}

impl PdfSurface {
    pub fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(
            title,
            pt_to_mm(PAGE_WIDTH),
            pt_to_mm(PAGE_HEIGHT),
            LAYER_NAME,
        );
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(export_err)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self { doc, font, layer })
    }
}

impl DrawingSurface for PdfSurface {
    fn draw_text(&mut self, text: &str, x: f32, y: f32) -> Result<()> {
        self.layer
            .use_text(text, FONT_SIZE, pt_to_mm(x), pt_to_mm(y), &self.font);
        Ok(())
    }

    fn new_page(&mut self) -> Result<()> {
        let (page, layer) =
            self.doc
                .add_page(pt_to_mm(PAGE_WIDTH), pt_to_mm(PAGE_HEIGHT), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
        Ok(())
    }

    fn save(self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(export_err)?;
        let mut writer = BufWriter::new(file);
        self.doc.save(&mut writer).map_err(export_err)?;
        Ok(())
    }
}
