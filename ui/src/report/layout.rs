//! Page geometry and the off-screen scratch region holding composed fragments.

use super::error::ReportError;

pub fn mm_to_pt(mm: f64) -> f64 {
    mm * 72.0 / 25.4
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageSize {
    pub const A4_PORTRAIT: Self = Self {
        width_mm: 210.0,
        height_mm: 297.0,
    };
    pub const A4_LANDSCAPE: Self = Self {
        width_mm: 297.0,
        height_mm: 210.0,
    };

    pub fn width_pt(&self) -> f64 {
        mm_to_pt(self.width_mm)
    }

    pub fn height_pt(&self) -> f64 {
        mm_to_pt(self.height_mm)
    }
}

/// How captured bitmaps map onto physical pages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageLayout {
    /// One tall bitmap at full page width, sliced across as many pages as needed.
    SingleCanvas,
    /// One bitmap per page, inset by a uniform margin.
    Fragments { margin_mm: f64 },
}

pub const FRAGMENT_MARGIN_MM: f64 = 15.0;

/// Fixed-pixel size of one explicit page fragment (A4 at 96 dpi, minus chrome).
pub const FRAGMENT_WIDTH_PX: u32 = 794;
pub const FRAGMENT_HEIGHT_PX: u32 = 1050;

/// Width of single-canvas reports; height follows the content.
pub const CANVAS_WIDTH_PX: u32 = 1000;

/// A composed page: an SVG document of known pixel size, addressed by id.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFragment {
    pub id: String,
    pub width_px: u32,
    pub height_px: u32,
    pub svg: String,
}

/// Scratch region a job composes into. Built fresh per job and dropped with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScratchRegion {
    fragments: Vec<PageFragment>,
}

impl ScratchRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: PageFragment) {
        self.fragments.retain(|f| f.id != fragment.id);
        self.fragments.push(fragment);
    }

    pub fn find(&self, id: &str) -> Option<&PageFragment> {
        self.fragments.iter().find(|f| f.id == id)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Resolve every expected page in order. A missing id or a zero-sized
    /// fragment is fatal for the job.
    pub fn verify<'a>(&'a self, expected: &[String]) -> Result<Vec<&'a PageFragment>, ReportError> {
        expected
            .iter()
            .map(|id| {
                let fragment = self
                    .find(id)
                    .ok_or_else(|| ReportError::MissingPage(id.clone()))?;
                if fragment.width_px == 0 || fragment.height_px == 0 || fragment.svg.is_empty() {
                    return Err(ReportError::EmptyPage(id.clone()));
                }
                Ok(fragment)
            })
            .collect()
    }
}
