//! Minimal image-only PDF writer.
//!
//! Each captured bitmap becomes one Flate-compressed DeviceRGB image XObject;
//! pages reference those images through placement matrices, so slicing a tall
//! canvas across pages stores the pixels once.

use std::io::Write as _;

use flate2::{write::ZlibEncoder, Compression};

use super::{
    error::ReportError,
    layout::{mm_to_pt, PageSize},
    raster::Bitmap,
};

/// Float noise below this (mm) never produces an extra trailing page.
const SLICE_EPSILON_MM: f64 = 0.01;

#[derive(Debug, Clone)]
struct PdfImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// An image drawn at `(x_mm, y_mm)` from the top-left page corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub image: usize,
    pub x_mm: f64,
    pub y_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfPage {
    pub placements: Vec<Placement>,
}

#[derive(Debug, Clone)]
pub struct PdfDocument {
    page_size: PageSize,
    title: String,
    images: Vec<PdfImage>,
    pages: Vec<PdfPage>,
}

impl PdfDocument {
    pub fn new(page_size: PageSize, title: impl Into<String>) -> Self {
        Self {
            page_size,
            title: title.into(),
            images: Vec::new(),
            pages: Vec::new(),
        }
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn pages(&self) -> &[PdfPage] {
        &self.pages
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Register a bitmap (alpha dropped) and return its handle.
    pub fn add_image(&mut self, bitmap: &Bitmap) -> Result<usize, ReportError> {
        let expected = bitmap.width as usize * bitmap.height as usize * 4;
        if bitmap.width == 0 || bitmap.height == 0 || bitmap.rgba.len() != expected {
            return Err(ReportError::Assemble(format!(
                "bitmap {}x{} carries {} bytes",
                bitmap.width,
                bitmap.height,
                bitmap.rgba.len()
            )));
        }
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        for px in bitmap.rgba.chunks_exact(4) {
            encoder
                .write_all(&px[..3])
                .map_err(|err| ReportError::Assemble(err.to_string()))?;
        }
        let data = encoder
            .finish()
            .map_err(|err| ReportError::Assemble(err.to_string()))?;
        self.images.push(PdfImage {
            width: bitmap.width,
            height: bitmap.height,
            data,
        });
        Ok(self.images.len() - 1)
    }

    pub fn add_page(&mut self) {
        self.pages.push(PdfPage::default());
    }

    /// Place an image on the most recently added page.
    pub fn place(&mut self, placement: Placement) -> Result<(), ReportError> {
        if placement.image >= self.images.len() {
            return Err(ReportError::Assemble(format!(
                "unknown image handle {}",
                placement.image
            )));
        }
        let page = self
            .pages
            .last_mut()
            .ok_or_else(|| ReportError::Assemble("no page to place on".into()))?;
        page.placements.push(placement);
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ReportError> {
        if self.pages.is_empty() {
            return Err(ReportError::Assemble("document has no pages".into()));
        }
        PdfWriter::new(self).write()
    }
}

/// Scale a bitmap to the page width and slice it across as many pages as its
/// height needs: the first page shows it at offset 0, each following page
/// shifts it up by one page height. Returns the number of pages added.
pub fn slice_into_pages(
    doc: &mut PdfDocument,
    image: usize,
    width_px: u32,
    height_px: u32,
) -> Result<usize, ReportError> {
    if width_px == 0 {
        return Err(ReportError::Assemble("zero-width capture".into()));
    }
    let page = doc.page_size();
    let img_w = page.width_mm;
    let img_h = f64::from(height_px) * img_w / f64::from(width_px);

    let place = |doc: &mut PdfDocument, position: f64| {
        doc.add_page();
        doc.place(Placement {
            image,
            x_mm: 0.0,
            y_mm: position,
            width_mm: img_w,
            height_mm: img_h,
        })
    };

    place(doc, 0.0)?;
    let mut pages = 1;
    let mut height_left = img_h - page.height_mm;
    while height_left > SLICE_EPSILON_MM {
        let position = height_left - img_h;
        place(doc, position)?;
        pages += 1;
        height_left -= page.height_mm;
    }
    Ok(pages)
}

/// One page per captured fragment, inset by `margin_mm` on every side and
/// scaled to the inner width.
pub fn one_per_page(
    doc: &mut PdfDocument,
    images: &[(usize, u32, u32)],
    margin_mm: f64,
) -> Result<usize, ReportError> {
    let inner_w = doc.page_size().width_mm - margin_mm * 2.0;
    for &(image, width_px, height_px) in images {
        if width_px == 0 {
            return Err(ReportError::Assemble("zero-width capture".into()));
        }
        doc.add_page();
        doc.place(Placement {
            image,
            x_mm: margin_mm,
            y_mm: margin_mm,
            width_mm: inner_w,
            height_mm: f64::from(height_px) * inner_w / f64::from(width_px),
        })?;
    }
    Ok(images.len())
}

/// PDF text string: literal for ASCII, UTF-16BE hex otherwise.
fn pdf_text(raw: &str) -> String {
    if raw.is_ascii() {
        let mut out = String::from("(");
        for ch in raw.chars() {
            match ch {
                '(' | ')' | '\\' => {
                    out.push('\\');
                    out.push(ch);
                }
                c if c.is_ascii_control() => {}
                c => out.push(c),
            }
        }
        out.push(')');
        out
    } else {
        let mut out = String::from("<FEFF");
        for unit in raw.encode_utf16() {
            out.push_str(&format!("{unit:04X}"));
        }
        out.push('>');
        out
    }
}

struct PdfWriter<'a> {
    doc: &'a PdfDocument,
    out: Vec<u8>,
    offsets: Vec<usize>,
}

impl<'a> PdfWriter<'a> {
    const CATALOG: usize = 1;
    const PAGES: usize = 2;
    const INFO: usize = 3;
    const FIRST_IMAGE: usize = 4;

    fn new(doc: &'a PdfDocument) -> Self {
        Self {
            doc,
            out: Vec::new(),
            offsets: Vec::new(),
        }
    }

    fn image_obj(&self, idx: usize) -> usize {
        Self::FIRST_IMAGE + idx
    }

    fn page_obj(&self, idx: usize) -> usize {
        Self::FIRST_IMAGE + self.doc.images.len() + idx * 2
    }

    fn begin(&mut self, id: usize) {
        if self.offsets.len() < id {
            self.offsets.resize(id, 0);
        }
        self.offsets[id - 1] = self.out.len();
        self.out.extend_from_slice(format!("{id} 0 obj\n").as_bytes());
    }

    fn end(&mut self) {
        self.out.extend_from_slice(b"endobj\n");
    }

    fn object(&mut self, id: usize, body: &str) {
        self.begin(id);
        self.out.extend_from_slice(body.as_bytes());
        self.out.push(b'\n');
        self.end();
    }

    fn stream(&mut self, id: usize, dict: &str, data: &[u8]) {
        self.begin(id);
        self.out
            .extend_from_slice(format!("<< {dict} /Length {} >>\nstream\n", data.len()).as_bytes());
        self.out.extend_from_slice(data);
        self.out.extend_from_slice(b"\nendstream\n");
        self.end();
    }

    fn write(mut self) -> Result<Vec<u8>, ReportError> {
        let doc = self.doc;
        let page = doc.page_size;
        let (page_w, page_h) = (page.width_pt(), page.height_pt());

        self.out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

        self.object(
            Self::CATALOG,
            &format!("<< /Type /Catalog /Pages {} 0 R >>", Self::PAGES),
        );
        let kids: Vec<String> = (0..doc.pages.len())
            .map(|idx| format!("{} 0 R", self.page_obj(idx)))
            .collect();
        self.object(
            Self::PAGES,
            &format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                doc.pages.len()
            ),
        );
        let created = time::OffsetDateTime::now_utc()
            .format(time::macros::format_description!(
                "[year][month][day][hour][minute][second]"
            ))
            .map_err(|err| ReportError::Assemble(err.to_string()))?;
        self.object(
            Self::INFO,
            &format!(
                "<< /Title {} /Producer (Sinergi) /CreationDate (D:{created}Z) >>",
                pdf_text(&doc.title)
            ),
        );

        for (idx, image) in doc.images.iter().enumerate() {
            let id = self.image_obj(idx);
            self.stream(
                id,
                &format!(
                    "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /FlateDecode",
                    image.width, image.height
                ),
                &image.data,
            );
        }

        for (idx, pdf_page) in doc.pages.iter().enumerate() {
            let page_id = self.page_obj(idx);
            let content_id = page_id + 1;

            let mut used: Vec<usize> = pdf_page.placements.iter().map(|p| p.image).collect();
            used.sort_unstable();
            used.dedup();
            let xobjects: Vec<String> = used
                .iter()
                .map(|img| format!("/Im{img} {} 0 R", self.image_obj(*img)))
                .collect();

            self.object(
                page_id,
                &format!(
                    "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {page_w:.2} {page_h:.2}] /Resources << /XObject << {} >> >> /Contents {content_id} 0 R >>",
                    Self::PAGES,
                    xobjects.join(" ")
                ),
            );

            let mut content = String::new();
            for p in &pdf_page.placements {
                let w = mm_to_pt(p.width_mm);
                let h = mm_to_pt(p.height_mm);
                let x = mm_to_pt(p.x_mm);
                let y = page_h - mm_to_pt(p.y_mm) - h;
                content.push_str(&format!(
                    "q {w:.4} 0 0 {h:.4} {x:.4} {y:.4} cm /Im{} Do Q\n",
                    p.image
                ));
            }
            self.stream(content_id, "", content.as_bytes());
        }

        let xref_at = self.out.len();
        let size = self.offsets.len() + 1;
        let mut xref = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for offset in &self.offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {size} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
            Self::CATALOG,
            Self::INFO
        ));
        self.out.extend_from_slice(xref.as_bytes());
        Ok(self.out)
    }
}
