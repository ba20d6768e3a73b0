//! Rasterization of composed page fragments into RGBA bitmaps.
//!
//! Native builds render the SVG with `resvg`; the browser build decodes it
//! through an `<img>` and paints it onto a canvas, like a screenshot.

use std::future::Future;

use super::{error::ReportError, layout::PageFragment};

/// Straight RGBA pixels, row-major, fully opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub trait Rasterizer {
    fn rasterize(
        &self,
        fragment: &PageFragment,
        scale: f32,
    ) -> impl Future<Output = Result<Bitmap, ReportError>>;
}

fn scaled(px: u32, scale: f32) -> u32 {
    ((px as f32) * scale).round().max(1.0) as u32
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::ResvgRasterizer as PlatformRasterizer;
#[cfg(target_arch = "wasm32")]
pub use web::CanvasRasterizer as PlatformRasterizer;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::sync::Arc;

    use once_cell::sync::Lazy;

    use super::*;

    /// System fonts are scanned once per process.
    static FONTS: Lazy<Arc<usvg::fontdb::Database>> = Lazy::new(|| {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "loaded system fonts for report capture");
        Arc::new(db)
    });

    #[derive(Debug, Clone, Copy, Default)]
    pub struct ResvgRasterizer;

    impl ResvgRasterizer {
        pub fn render(fragment: &PageFragment, scale: f32) -> Result<Bitmap, ReportError> {
            let options = usvg::Options {
                fontdb: FONTS.clone(),
                ..usvg::Options::default()
            };
            let tree = usvg::Tree::from_str(&fragment.svg, &options)
                .map_err(|err| ReportError::Capture(format!("{}: {err}", fragment.id)))?;

            let width = scaled(fragment.width_px, scale);
            let height = scaled(fragment.height_px, scale);
            let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
                ReportError::Capture(format!("{}: cannot allocate {width}x{height}", fragment.id))
            })?;
            pixmap.fill(tiny_skia::Color::WHITE);
            resvg::render(
                &tree,
                tiny_skia::Transform::from_scale(scale, scale),
                &mut pixmap.as_mut(),
            );
            // The background is opaque, so premultiplied and straight RGBA agree.
            Ok(Bitmap {
                width,
                height,
                rgba: pixmap.take(),
            })
        }
    }

    impl Rasterizer for ResvgRasterizer {
        async fn rasterize(
            &self,
            fragment: &PageFragment,
            scale: f32,
        ) -> Result<Bitmap, ReportError> {
            Self::render(fragment, scale)
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Url,
    };

    use super::*;

    fn capture_err(id: &str, what: &str) -> ReportError {
        ReportError::Capture(format!("{id}: {what}"))
    }

    #[derive(Debug, Clone, Copy, Default)]
    pub struct CanvasRasterizer;

    impl Rasterizer for CanvasRasterizer {
        async fn rasterize(
            &self,
            fragment: &PageFragment,
            scale: f32,
        ) -> Result<Bitmap, ReportError> {
            let id = fragment.id.as_str();
            let mut opts = BlobPropertyBag::new();
            opts.type_("image/svg+xml;charset=utf-8");
            let parts = js_sys::Array::new();
            parts.push(&JsValue::from_str(&fragment.svg));
            let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
                .map_err(|_| capture_err(id, "unable to build SVG blob"))?;
            let url = Url::create_object_url_with_blob(&blob)
                .map_err(|_| capture_err(id, "unable to create SVG URL"))?;

            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or_else(|| capture_err(id, "document unavailable"))?;

            let width = scaled(fragment.width_px, scale);
            let height = scaled(fragment.height_px, scale);
            let canvas: HtmlCanvasElement = document
                .create_element("canvas")
                .map_err(|_| capture_err(id, "unable to create canvas"))?
                .dyn_into()
                .map_err(|_| capture_err(id, "canvas cast failed"))?;
            canvas.set_width(width);
            canvas.set_height(height);

            let context: CanvasRenderingContext2d = canvas
                .get_context("2d")
                .map_err(|_| capture_err(id, "canvas context unavailable"))?
                .ok_or_else(|| capture_err(id, "canvas context missing"))?
                .dyn_into()
                .map_err(|_| capture_err(id, "context cast failed"))?;

            let image = HtmlImageElement::new().map_err(|_| capture_err(id, "unable to create image"))?;
            let decode = image.decode();
            image.set_src(&url);
            let decoded = JsFuture::from(decode).await;
            Url::revoke_object_url(&url).ok();
            decoded.map_err(|_| capture_err(id, "image decode failed"))?;

            context.set_fill_style(&JsValue::from_str("#ffffff"));
            context.fill_rect(0.0, 0.0, f64::from(width), f64::from(height));
            context
                .draw_image_with_html_image_element_and_dw_and_dh(
                    &image,
                    0.0,
                    0.0,
                    f64::from(width),
                    f64::from(height),
                )
                .map_err(|_| capture_err(id, "unable to draw image"))?;

            let data = context
                .get_image_data(0.0, 0.0, f64::from(width), f64::from(height))
                .map_err(|_| capture_err(id, "unable to read pixels"))?;
            Ok(Bitmap {
                width,
                height,
                rgba: data.data().0,
            })
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn renders_at_capture_scale_on_white() {
        let fragment = PageFragment {
            id: "p".into(),
            width_px: 20,
            height_px: 10,
            svg: r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10"><rect x="0" y="0" width="10" height="10" fill="#ff0000"/></svg>"##.into(),
        };
        let bitmap = PlatformRasterizer::render(&fragment, 2.0).unwrap();
        assert_eq!((bitmap.width, bitmap.height), (40, 20));
        assert_eq!(bitmap.rgba.len(), 40 * 20 * 4);
        // left half red, right half white background
        assert_eq!(&bitmap.rgba[..4], &[255, 0, 0, 255]);
        let last = bitmap.rgba.len() - 4;
        assert_eq!(&bitmap.rgba[last..], &[255, 255, 255, 255]);
    }

    #[test]
    fn malformed_markup_is_a_capture_error() {
        let fragment = PageFragment {
            id: "broken".into(),
            width_px: 10,
            height_px: 10,
            svg: "<svg".into(),
        };
        assert!(matches!(
            PlatformRasterizer::render(&fragment, 2.0),
            Err(ReportError::Capture(msg)) if msg.starts_with("broken")
        ));
    }
}
