//! Drawing surfaces.
//!
//! The controller only orchestrates drawing; rasterization is delegated to a
//! [`Surface`]. Hosts provide their own (a browser 2D context, for example);
//! [`RasterSurface`] is the in-memory implementation used natively and in
//! tests.

use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use crate::color::Color;
use crate::error::{CanvasError, CanvasResult};
use crate::event::Point;
use crate::snapshot::Snapshot;

/// Style of a single stroke segment. Caps and joins are always round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Color,
    /// Line width in device pixels.
    pub width: f32,
}

/// A 2D raster the controller can draw on.
pub trait Surface {
    /// Backing buffer size in device pixels.
    fn size(&self) -> (u32, u32);

    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    /// Stroke a straight segment with round caps and joins.
    ///
    /// A segment whose width is not positive paints nothing.
    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle);

    /// Encode the current contents as a PNG snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot be encoded.
    fn snapshot(&self) -> CanvasResult<Snapshot>;

    /// Fill the whole surface with a solid color.
    #[allow(clippy::cast_precision_loss)]
    fn fill(&mut self, color: Color) {
        let (width, height) = self.size();
        self.fill_rect(0.0, 0.0, width as f32, height as f32, color);
    }
}

/// In-memory RGBA raster backed by a tiny-skia pixmap.
#[derive(Clone)]
pub struct RasterSurface {
    pixmap: Pixmap,
}

impl RasterSurface {
    /// Create a transparent raster of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::ZeroSizeSurface`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> CanvasResult<Self> {
        let pixmap = Pixmap::new(width, height)
            .ok_or(CanvasError::ZeroSizeSurface { width, height })?;

        Ok(Self { pixmap })
    }

    /// Read a single pixel as a straight-alpha color.
    ///
    /// `None` outside the raster.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        // Pixmap::pixel only bounds-checks the flat index
        if x >= self.pixmap.width() || y >= self.pixmap.height() {
            return None;
        }
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            Color {
                r: c.red(),
                g: c.green(),
                b: c.blue(),
                a: c.alpha(),
            }
        })
    }

    /// Whether every pixel equals `color`.
    #[must_use]
    pub fn is_filled_with(&self, color: Color) -> bool {
        self.pixmap.pixels().iter().all(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()] == color.to_rgba()
        })
    }

    /// Raw premultiplied RGBA bytes.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Encode the raster as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Encoding`] if PNG encoding fails.
    pub fn to_png(&self) -> CanvasResult<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| CanvasError::Encoding(format!("PNG encoding failed: {e}")))
    }

    fn paint(color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = true;
        paint
    }
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .finish()
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let Some(rect) = Rect::from_xywh(x, y, width, height) else {
            tracing::trace!("Skipping empty fill {width}x{height} at ({x}, {y})");
            return;
        };
        let paint = Self::paint(color);
        self.pixmap
            .fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        // tiny-skia turns a zero width into a hairline
        if style.width.is_nan() || style.width <= 0.0 {
            tracing::trace!("Skipping segment with width {}", style.width);
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        let Some(path) = pb.finish() else {
            tracing::trace!("Skipping degenerate segment {from:?} -> {to:?}");
            return;
        };

        let stroke = Stroke {
            width: style.width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        let paint = Self::paint(style.color);
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn snapshot(&self) -> CanvasResult<Snapshot> {
        let png = self.to_png()?;
        let (width, height) = self.size();
        Ok(Snapshot::from_png(width, height, &png))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(color: Color, width: f32) -> StrokeStyle {
        StrokeStyle { color, width }
    }

    #[test]
    fn test_zero_size_is_rejected() {
        assert!(matches!(
            RasterSurface::new(0, 300),
            Err(CanvasError::ZeroSizeSurface {
                width: 0,
                height: 300
            })
        ));
        assert!(RasterSurface::new(400, 0).is_err());
    }

    #[test]
    fn test_fill_covers_every_pixel() {
        let mut surface = RasterSurface::new(32, 16).unwrap();
        assert!(!surface.is_filled_with(Color::WHITE));

        surface.fill(Color::WHITE);
        assert!(surface.is_filled_with(Color::WHITE));
        assert_eq!(surface.pixel(31, 15), Some(Color::WHITE));
        assert_eq!(surface.pixel(32, 0), None);
    }

    #[test]
    fn test_pixel_outside_raster_is_none() {
        let mut surface = RasterSurface::new(4, 2).unwrap();
        surface.fill(Color::WHITE);
        surface.fill_rect(0.0, 1.0, 1.0, 1.0, Color::BLACK);

        assert_eq!(surface.pixel(0, 1), Some(Color::BLACK));
        assert_eq!(surface.pixel(3, 0), Some(Color::WHITE));
        assert_eq!(surface.pixel(4, 0), None);
        assert_eq!(surface.pixel(5, 0), None);
        assert_eq!(surface.pixel(0, 2), None);
    }

    #[test]
    fn test_zero_width_stroke_paints_nothing() {
        let mut surface = RasterSurface::new(40, 20).unwrap();
        surface.fill(Color::WHITE);
        surface.stroke_segment(
            Point::new(5.0, 10.0),
            Point::new(35.0, 10.0),
            &style(Color::BLACK, 0.0),
        );
        assert!(surface.is_filled_with(Color::WHITE));
    }

    #[test]
    fn test_stroke_paints_segment_only() {
        let mut surface = RasterSurface::new(80, 40).unwrap();
        surface.fill(Color::WHITE);

        let red = Color::rgb(255, 0, 0);
        surface.stroke_segment(Point::new(10.0, 20.0), Point::new(60.0, 20.0), &style(red, 6.0));

        assert_eq!(surface.pixel(30, 20), Some(red));
        assert_eq!(surface.pixel(30, 2), Some(Color::WHITE));
        assert_eq!(surface.pixel(75, 20), Some(Color::WHITE));
    }

    #[test]
    fn test_round_cap_extends_past_endpoint() {
        let mut surface = RasterSurface::new(80, 40).unwrap();
        surface.fill(Color::WHITE);
        surface.stroke_segment(
            Point::new(20.0, 20.0),
            Point::new(40.0, 20.0),
            &style(Color::BLACK, 10.0),
        );

        // Round cap reaches half the width beyond the end point
        assert_eq!(surface.pixel(42, 20), Some(Color::BLACK));
        assert_eq!(surface.pixel(50, 20), Some(Color::WHITE));
    }

    #[test]
    fn test_snapshot_is_png() {
        let mut surface = RasterSurface::new(40, 30).unwrap();
        surface.fill(Color::WHITE);

        let snapshot = surface.snapshot().expect("encode");
        assert_eq!((snapshot.width(), snapshot.height()), (40, 30));

        let png = snapshot.png_bytes().unwrap();
        let decoded = image::load_from_memory(&png).expect("decode png").to_rgba8();
        assert_eq!(decoded.dimensions(), (40, 30));
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }
}
