//! Pointer and touch input, and its mapping into surface coordinates.

use serde::{Deserialize, Serialize};

/// A coordinate in surface (backing buffer) space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X position in device pixels.
    pub x: f32,
    /// Y position in device pixels.
    pub y: f32,
}

impl Point {
    /// The origin, returned whenever input cannot be mapped.
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A single touch point in client (page) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Client X coordinate.
    pub client_x: f32,
    /// Client Y coordinate.
    pub client_y: f32,
}

/// Raw pointer input as delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerInput {
    /// Mouse-style event with a single client coordinate.
    Mouse {
        /// Client X coordinate.
        client_x: f32,
        /// Client Y coordinate.
        client_y: f32,
    },
    /// Touch-style event carrying every active touch.
    Touch {
        /// Active touches; only the first is used.
        touches: Vec<TouchPoint>,
    },
}

impl PointerInput {
    /// Mouse input at the given client position.
    #[must_use]
    pub fn mouse(client_x: f32, client_y: f32) -> Self {
        Self::Mouse { client_x, client_y }
    }

    /// Single-finger touch input at the given client position.
    #[must_use]
    pub fn touch(client_x: f32, client_y: f32) -> Self {
        Self::Touch {
            touches: vec![TouchPoint { client_x, client_y }],
        }
    }

    /// The client coordinate this input refers to.
    ///
    /// `None` for a touch event without touches.
    #[must_use]
    pub fn client_position(&self) -> Option<(f32, f32)> {
        match self {
            Self::Mouse { client_x, client_y } => Some((*client_x, *client_y)),
            Self::Touch { touches } => touches.first().map(|t| (t.client_x, t.client_y)),
        }
    }
}

/// The displayed (layout) box of the surface in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Displayed width.
    pub width: f32,
    /// Displayed height.
    pub height: f32,
}

impl DisplayRect {
    /// Create a display rect.
    #[must_use]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Map raw input into buffer coordinates.
///
/// Each axis is scaled by `buffer_dim / displayed_dim`. Returns
/// [`Point::ORIGIN`] when the input has no position or the displayed box has
/// no area.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn map_to_buffer(input: &PointerInput, rect: &DisplayRect, buffer: (u32, u32)) -> Point {
    if !rect.has_area() {
        return Point::ORIGIN;
    }
    let Some((client_x, client_y)) = input.client_position() else {
        return Point::ORIGIN;
    };

    let scale_x = buffer.0 as f32 / rect.width;
    let scale_y = buffer.1 as f32 / rect.height;

    Point {
        x: (client_x - rect.left) * scale_x,
        y: (client_y - rect.top) * scale_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_mapping() {
        let rect = DisplayRect::new(0.0, 0.0, 400.0, 300.0);
        let p = map_to_buffer(&PointerInput::mouse(120.0, 80.0), &rect, (400, 300));
        assert_eq!(p, Point::new(120.0, 80.0));
    }

    #[test]
    fn test_offset_and_scale() {
        // Displayed at half size, offset by the page layout
        let rect = DisplayRect::new(10.0, 20.0, 200.0, 150.0);
        let p = map_to_buffer(&PointerInput::mouse(60.0, 95.0), &rect, (400, 300));
        assert_eq!(p, Point::new(100.0, 150.0));
    }

    #[test]
    fn test_mouse_and_touch_agree() {
        let rect = DisplayRect::new(16.0, 64.0, 320.0, 240.0);
        for &(x, y) in &[(16.0, 64.0), (100.5, 200.25), (336.0, 304.0)] {
            let mouse = map_to_buffer(&PointerInput::mouse(x, y), &rect, (640, 480));
            let touch = map_to_buffer(&PointerInput::touch(x, y), &rect, (640, 480));
            assert_eq!(mouse, touch);
        }
    }

    #[test]
    fn test_only_first_touch_is_used() {
        let rect = DisplayRect::new(0.0, 0.0, 100.0, 100.0);
        let input = PointerInput::Touch {
            touches: vec![
                TouchPoint {
                    client_x: 5.0,
                    client_y: 6.0,
                },
                TouchPoint {
                    client_x: 90.0,
                    client_y: 90.0,
                },
            ],
        };
        assert_eq!(map_to_buffer(&input, &rect, (100, 100)), Point::new(5.0, 6.0));
    }

    #[test]
    fn test_degenerate_input_maps_to_origin() {
        let rect = DisplayRect::new(0.0, 0.0, 100.0, 100.0);
        let empty = PointerInput::Touch {
            touches: Vec::new(),
        };
        assert_eq!(map_to_buffer(&empty, &rect, (100, 100)), Point::ORIGIN);

        let collapsed = DisplayRect::new(0.0, 0.0, 0.0, 100.0);
        assert_eq!(
            map_to_buffer(&PointerInput::mouse(50.0, 50.0), &collapsed, (100, 100)),
            Point::ORIGIN
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_mapping_is_linear_and_input_agnostic(
                left in -500.0f32..500.0,
                top in -500.0f32..500.0,
                width in 1.0f32..2000.0,
                height in 1.0f32..2000.0,
                buffer in (1u32..4000, 1u32..4000),
                x in -1000.0f32..3000.0,
                y in -1000.0f32..3000.0,
            ) {
                let rect = DisplayRect::new(left, top, width, height);
                let mouse = map_to_buffer(&PointerInput::mouse(x, y), &rect, buffer);
                let touch = map_to_buffer(&PointerInput::touch(x, y), &rect, buffer);

                prop_assert_eq!(mouse, touch);

                #[allow(clippy::cast_precision_loss)]
                let expected = Point::new(
                    (x - left) * (buffer.0 as f32 / width),
                    (y - top) * (buffer.1 as f32 / height),
                );
                prop_assert_eq!(mouse, expected);
            }
        }
    }
}
