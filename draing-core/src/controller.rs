//! The drawing surface controller.
//!
//! Owns the surface, turns pointer input into stroke segments and keeps the
//! tool, color and width chosen by the user.

use crate::color::{BrushWidth, Color, Tool};
use crate::error::CanvasResult;
use crate::event::{map_to_buffer, DisplayRect, Point, PointerInput};
use crate::snapshot::Snapshot;
use crate::surface::{RasterSurface, StrokeStyle, Surface};

/// Controller for a single drawing surface.
///
/// Until a surface is mounted every drawing operation is a no-op and input
/// maps to the origin.
#[derive(Debug)]
pub struct DrawingController<S = RasterSurface> {
    surface: Option<S>,
    background: Color,
    tool: Tool,
    color: Color,
    width: u32,
    drawing: bool,
    anchor: Option<Point>,
}

impl<S: Surface> DrawingController<S> {
    /// Create an unmounted controller with a white background.
    #[must_use]
    pub fn new() -> Self {
        Self {
            surface: None,
            background: Color::WHITE,
            tool: Tool::Brush,
            color: Color::BLACK,
            width: BrushWidth::DEFAULT,
            drawing: false,
            anchor: None,
        }
    }

    /// Attach a surface and fill it with the background color.
    ///
    /// The surface size is fixed from here on; there is no resize handling.
    pub fn mount(&mut self, mut surface: S) {
        let (width, height) = surface.size();
        surface.fill(self.background);
        tracing::debug!("Mounted {width}x{height} surface");
        self.surface = Some(surface);
    }

    /// Whether a surface is attached.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    /// The attached surface, if any.
    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Start a stroke at `point`.
    pub fn begin_stroke(&mut self, point: Point) {
        self.drawing = true;
        self.anchor = Some(point);
    }

    /// Draw a segment from the current anchor to `point`.
    ///
    /// Does nothing unless a stroke is active, an anchor exists and a
    /// surface is mounted.
    pub fn continue_stroke(&mut self, point: Point) {
        if !self.drawing {
            return;
        }
        let Some(anchor) = self.anchor else {
            return;
        };
        let style = self.stroke_style();
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        surface.stroke_segment(anchor, point, &style);
        self.anchor = Some(point);
    }

    /// Finish the current stroke. Safe to call at any time.
    pub fn end_stroke(&mut self) {
        self.drawing = false;
        self.anchor = None;
    }

    /// Select the active tool.
    pub fn set_tool(&mut self, tool: Tool) {
        tracing::debug!("Tool: {tool:?}");
        self.tool = tool;
    }

    /// Choose the brush color. Has no visible effect while erasing.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Set the stroke width. Range policy belongs to the caller.
    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    /// Refill the whole surface with the background color.
    pub fn clear(&mut self) {
        let background = self.background;
        if let Some(surface) = self.surface.as_mut() {
            surface.fill(background);
            tracing::debug!("Surface cleared");
        }
    }

    /// Map raw input into surface coordinates.
    ///
    /// `displayed` is the on-screen box of the surface. Returns the origin
    /// when no surface is mounted.
    #[must_use]
    pub fn map_input_to_point(&self, input: &PointerInput, displayed: &DisplayRect) -> Point {
        match &self.surface {
            Some(surface) => map_to_buffer(input, displayed, surface.size()),
            None => Point::ORIGIN,
        }
    }

    /// Encode the current surface. `None` when nothing is mounted.
    #[must_use]
    pub fn snapshot(&self) -> Option<CanvasResult<Snapshot>> {
        self.surface.as_ref().map(Surface::snapshot)
    }

    /// The active tool.
    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// The chosen brush color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// The stroke width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The background color.
    #[must_use]
    pub fn background(&self) -> Color {
        self.background
    }

    /// The color the next segment will be painted with.
    #[must_use]
    pub fn effective_color(&self) -> Color {
        match self.tool {
            Tool::Brush => self.color,
            Tool::Eraser => self.background,
        }
    }

    /// Whether a stroke is in progress.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    #[allow(clippy::cast_precision_loss)]
    fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.effective_color(),
            width: self.width as f32,
        }
    }
}

impl<S: Surface> Default for DrawingController<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingController<RasterSurface> {
    /// Create a controller mounted on an in-memory raster.
    ///
    /// A zero-size raster cannot be created; the controller then stays
    /// unmounted and every operation degrades to a no-op.
    #[must_use]
    pub fn with_raster(width: u32, height: u32) -> Self {
        let mut controller = Self::new();
        match RasterSurface::new(width, height) {
            Ok(surface) => controller.mount(surface),
            Err(e) => tracing::warn!("Drawing surface unavailable: {e}"),
        }
        controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every call so tests can check what reached the surface.
    #[derive(Debug, Default)]
    struct RecordingSurface {
        fills: Vec<Color>,
        segments: Vec<(Point, Point, StrokeStyle)>,
    }

    impl Surface for RecordingSurface {
        fn size(&self) -> (u32, u32) {
            (200, 100)
        }

        fn fill_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32, color: Color) {
            self.fills.push(color);
        }

        fn stroke_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
            self.segments.push((from, to, *style));
        }

        fn snapshot(&self) -> CanvasResult<Snapshot> {
            Ok(Snapshot::from_png(200, 100, &[]))
        }
    }

    fn mounted() -> DrawingController<RecordingSurface> {
        let mut controller = DrawingController::new();
        controller.mount(RecordingSurface::default());
        controller
    }

    fn segments(controller: &DrawingController<RecordingSurface>) -> &[(Point, Point, StrokeStyle)] {
        &controller.surface().unwrap().segments
    }

    #[test]
    fn test_mount_fills_background() {
        let controller = mounted();
        assert_eq!(controller.background(), Color::WHITE);
        assert_eq!(controller.surface().unwrap().fills, vec![Color::WHITE]);
    }

    #[test]
    fn test_continue_before_begin_is_noop() {
        let mut controller = mounted();
        controller.continue_stroke(Point::new(5.0, 5.0));
        assert!(segments(&controller).is_empty());
        assert!(!controller.is_drawing());
    }

    #[test]
    fn test_stroke_chains_segments() {
        let mut controller = mounted();
        controller.begin_stroke(Point::new(1.0, 1.0));
        controller.continue_stroke(Point::new(2.0, 2.0));
        controller.continue_stroke(Point::new(3.0, 5.0));
        controller.end_stroke();
        controller.continue_stroke(Point::new(9.0, 9.0));

        let segs = segments(&controller);
        assert_eq!(segs.len(), 2);
        assert_eq!((segs[0].0, segs[0].1), (Point::new(1.0, 1.0), Point::new(2.0, 2.0)));
        assert_eq!((segs[1].0, segs[1].1), (Point::new(2.0, 2.0), Point::new(3.0, 5.0)));
        assert_eq!(segs[0].2.width, 5.0);
        assert_eq!(segs[0].2.color, Color::BLACK);
    }

    #[test]
    fn test_end_stroke_is_idempotent() {
        let mut controller = mounted();
        controller.end_stroke();
        controller.end_stroke();
        assert!(!controller.is_drawing());
    }

    #[test]
    fn test_eraser_uses_background() {
        let mut controller = mounted();
        let blue = Color::rgb(0, 0, 255);
        controller.set_color(blue);
        controller.set_width(12);

        controller.set_tool(Tool::Eraser);
        assert_eq!(controller.effective_color(), Color::WHITE);
        controller.begin_stroke(Point::new(0.0, 0.0));
        controller.continue_stroke(Point::new(10.0, 0.0));
        controller.end_stroke();

        controller.set_tool(Tool::Brush);
        controller.begin_stroke(Point::new(0.0, 0.0));
        controller.continue_stroke(Point::new(10.0, 0.0));

        let segs = segments(&controller);
        assert_eq!(segs[0].2.color, Color::WHITE);
        assert_eq!(segs[1].2.color, blue);
        assert_eq!(segs[1].2.width, 12.0);
        assert_eq!(controller.color(), blue);
    }

    #[test]
    fn test_width_is_not_range_checked() {
        let mut controller = mounted();
        controller.set_width(64);
        assert_eq!(controller.width(), 64);
    }

    #[test]
    fn test_clear_refills_background() {
        let mut controller = mounted();
        controller.clear();
        controller.clear();
        assert_eq!(controller.surface().unwrap().fills.len(), 3);
    }

    #[test]
    fn test_unmounted_controller_degrades() {
        let mut controller: DrawingController<RecordingSurface> = DrawingController::new();
        controller.begin_stroke(Point::new(1.0, 1.0));
        controller.continue_stroke(Point::new(2.0, 2.0));
        controller.clear();
        controller.end_stroke();

        let rect = DisplayRect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(
            controller.map_input_to_point(&PointerInput::mouse(40.0, 40.0), &rect),
            Point::ORIGIN
        );
        assert!(controller.snapshot().is_none());
    }

    #[test]
    fn test_map_uses_surface_size() {
        let controller = mounted();
        let rect = DisplayRect::new(0.0, 0.0, 100.0, 50.0);
        let p = controller.map_input_to_point(&PointerInput::touch(25.0, 10.0), &rect);
        assert_eq!(p, Point::new(50.0, 20.0));
    }

    #[test]
    fn test_zero_size_raster_stays_unmounted() {
        let mut controller = DrawingController::with_raster(0, 0);
        assert!(!controller.is_mounted());
        controller.begin_stroke(Point::new(1.0, 1.0));
        controller.continue_stroke(Point::new(2.0, 2.0));
        assert!(controller.snapshot().is_none());
    }

    #[test]
    fn test_zero_width_reaches_surface_as_zero() {
        let mut controller = mounted();
        controller.set_width(0);
        controller.begin_stroke(Point::new(1.0, 1.0));
        controller.continue_stroke(Point::new(4.0, 4.0));
        assert_eq!(segments(&controller)[0].2.width, 0.0);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Input {
            Begin(Point),
            Continue(Point),
            End,
            Tool(Tool),
            Clear,
        }

        fn arb_point() -> impl Strategy<Value = Point> {
            (-50.0f32..250.0, -50.0f32..150.0).prop_map(|(x, y)| Point::new(x, y))
        }

        fn arb_input() -> impl Strategy<Value = Input> {
            prop_oneof![
                arb_point().prop_map(Input::Begin),
                arb_point().prop_map(Input::Continue),
                Just(Input::End),
                prop_oneof![Just(Tool::Brush), Just(Tool::Eraser)].prop_map(Input::Tool),
                Just(Input::Clear),
            ]
        }

        proptest! {
            #[test]
            fn prop_segments_only_inside_a_stroke(
                inputs in prop::collection::vec(arb_input(), 0..40)
            ) {
                let mut controller = mounted();
                let mut anchor: Option<Point> = None;

                for input in inputs {
                    let before = segments(&controller).len();
                    match input {
                        Input::Begin(p) => {
                            controller.begin_stroke(p);
                            anchor = Some(p);
                        }
                        Input::Continue(p) => {
                            controller.continue_stroke(p);
                            if let Some(from) = anchor {
                                let segs = segments(&controller);
                                prop_assert_eq!(segs.len(), before + 1);
                                prop_assert_eq!((segs[before].0, segs[before].1), (from, p));
                                prop_assert_eq!(segs[before].2.color, controller.effective_color());
                                anchor = Some(p);
                                continue;
                            }
                        }
                        Input::End => {
                            controller.end_stroke();
                            anchor = None;
                        }
                        Input::Tool(tool) => controller.set_tool(tool),
                        Input::Clear => controller.clear(),
                    }
                    prop_assert_eq!(
                        segments(&controller).len(),
                        before,
                        "only a continue inside a stroke may draw"
                    );
                    prop_assert_eq!(controller.is_drawing(), anchor.is_some());
                }
            }
        }
    }
}
