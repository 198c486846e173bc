use super::controller::PointerPosition;

/// Width the tooltip panel is laid out with, in px.
pub const TOOLTIP_WIDTH: f64 = 180.0;
/// Gap between the pointer and the panel.
pub const TOOLTIP_OFFSET: f64 = 10.0;
const EDGE_MARGIN: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipPlacement {
    pub left: f64,
    pub top: f64,
    /// Panel sits to the left of the pointer.
    pub flipped: bool,
}

impl TooltipPlacement {
    pub fn style(&self) -> String {
        format!("left: {:.0}px; top: {:.0}px;", self.left, self.top)
    }
}

/// Positions the tooltip beside the pointer, flipping to the left side when
/// it would run past the container's right edge. Vertical overflow is not
/// corrected.
pub fn place_tooltip(
    pointer: PointerPosition,
    container_width: f64,
    tooltip_width: f64,
) -> TooltipPlacement {
    let flipped = pointer.x + tooltip_width + EDGE_MARGIN > container_width;
    let left = if flipped {
        pointer.x - tooltip_width - TOOLTIP_OFFSET
    } else {
        pointer.x + TOOLTIP_OFFSET
    };
    TooltipPlacement {
        left,
        top: pointer.y + TOOLTIP_OFFSET,
        flipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_flips_near_right_edge() {
        let p = place_tooltip(PointerPosition { x: 300.0, y: 40.0 }, 400.0, 180.0);
        assert!(p.flipped);
        assert_eq!(p.left, 110.0);
        assert_eq!(p.top, 50.0);
    }

    #[test]
    fn test_default_placement() {
        let p = place_tooltip(PointerPosition { x: 100.0, y: 0.0 }, 400.0, TOOLTIP_WIDTH);
        assert!(!p.flipped);
        assert_eq!(p.left, 110.0);
        assert_eq!(p.top, 10.0);
        assert_eq!(p.style(), "left: 110px; top: 10px;");
    }

    #[test]
    fn test_exact_fit_does_not_flip() {
        // 200 + 180 + 20 == 400 is not past the edge
        let p = place_tooltip(PointerPosition { x: 200.0, y: 0.0 }, 400.0, 180.0);
        assert!(!p.flipped);
        assert_eq!(p.left, 210.0);
    }

    proptest! {
        #[test]
        fn left_offset_follows_flip_rule(
            x in 0.0f64..2000.0,
            y in 0.0f64..2000.0,
            width in 1.0f64..2000.0,
            tooltip in 1.0f64..400.0,
        ) {
            let p = place_tooltip(PointerPosition { x, y }, width, tooltip);
            if x + tooltip + 20.0 > width {
                prop_assert!(p.flipped);
                prop_assert_eq!(p.left, x - tooltip - 10.0);
            } else {
                prop_assert!(!p.flipped);
                prop_assert_eq!(p.left, x + 10.0);
            }
            prop_assert_eq!(p.top, y + 10.0);
        }
    }
}
