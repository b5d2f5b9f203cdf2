//! Positioning of anchored popups (job tooltips, detail cards).
//!
//! Candidates are tried in a fixed order: right of the anchor, left, above,
//! below. The first one that clears the exclusion zones wins. If none does,
//! the popup is clamped into the free region. Whatever was chosen is finally
//! clamped into the screen, so the result never leaves it unless the popup is
//! larger than the screen, in which case that axis is pinned to `0`.

/// Bounding box of the element a popup is attached to, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorBox {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl AnchorBox {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }

    fn center_y(&self) -> f32 {
        self.top + self.height / 2.0
    }

    fn sanitized(self) -> Self {
        Self {
            top: finite(self.top),
            left: finite(self.left),
            width: size(self.width),
            height: size(self.height),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupSize {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSize {
    pub width: f32,
    pub height: f32,
}

/// Screen bands popups must stay out of.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExclusionZones {
    /// Height of the band across the top (toolbar, overview strip).
    pub header_height: f32,
    /// Width of the band down the right edge (details sidebar).
    pub sidebar_width: f32,
    pub left_padding: f32,
    pub bottom_margin: f32,
}

impl Default for ExclusionZones {
    fn default() -> Self {
        Self {
            header_height: 60.0,
            sidebar_width: 300.0,
            left_padding: 0.0,
            bottom_margin: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementConfig {
    /// Gap between anchor and popup.
    pub margin: f32,
    pub zones: ExclusionZones,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            margin: 8.0,
            zones: ExclusionZones::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Right,
    Left,
    Above,
    Below,
    /// No candidate fit; clamped into the free region.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub top: f32,
    pub left: f32,
    pub side: Side,
}

/// Choose where to put a popup of `popup` size next to `anchor`.
pub fn place_popup(
    anchor: AnchorBox,
    popup: PopupSize,
    screen: ScreenSize,
    config: &PlacementConfig,
) -> Placement {
    let anchor = anchor.sanitized();
    let (pw, ph) = (size(popup.width), size(popup.height));
    let (sw, sh) = (size(screen.width), size(screen.height));
    let margin = size(config.margin);
    let zones = &config.zones;

    // Free region outside the exclusion bands.
    let min_x = size(zones.left_padding);
    let max_x = sw - size(zones.sidebar_width);
    let min_y = size(zones.header_height);
    let max_y = sh - size(zones.bottom_margin);

    let beside_top = || {
        let top = anchor.center_y() - ph / 2.0;
        fit_axis(top, ph, min_y, max_y).unwrap_or(top)
    };
    let stacked_left = || {
        let left = anchor.center_x() - pw / 2.0;
        fit_axis(left, pw, min_x, max_x).unwrap_or(left)
    };

    let right = anchor.right() + margin;
    let left = anchor.left - margin - pw;
    let above = anchor.top - margin - ph;
    let below = anchor.bottom() + margin;

    let (top, left, side) = if right + pw <= max_x {
        (beside_top(), right, Side::Right)
    } else if left >= min_x {
        (beside_top(), left, Side::Left)
    } else if above >= min_y {
        (above, stacked_left(), Side::Above)
    } else if below >= min_y && below + ph <= max_y {
        (below, stacked_left(), Side::Below)
    } else {
        let top = fit_axis(below, ph, min_y, max_y).unwrap_or(min_y);
        let left = fit_axis(anchor.center_x() - pw / 2.0, pw, min_x, max_x).unwrap_or(min_x);
        (top, left, Side::Fallback)
    };

    Placement {
        top: fit_axis(top, ph, 0.0, sh).unwrap_or(0.0),
        left: fit_axis(left, pw, 0.0, sw).unwrap_or(0.0),
        side,
    }
}

/// Clamp `value` so `[value, value + extent]` lies in `[lo, hi]`, or `None`
/// when the extent does not fit at all.
fn fit_axis(value: f32, extent: f32, lo: f32, hi: f32) -> Option<f32> {
    if hi - lo >= extent {
        Some(value.clamp(lo, hi - extent))
    } else {
        None
    }
}

fn finite(v: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

fn size(v: f32) -> f32 {
    finite(v).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> AnchorBox {
        AnchorBox {
            top: 100.0,
            left: 100.0,
            width: 50.0,
            height: 20.0,
        }
    }

    fn popup() -> PopupSize {
        PopupSize {
            width: 300.0,
            height: 150.0,
        }
    }

    fn screen(width: f32, height: f32) -> ScreenSize {
        ScreenSize { width, height }
    }

    fn assert_on_screen(p: Placement, popup: PopupSize, screen: ScreenSize) {
        assert!(p.left.is_finite() && p.top.is_finite(), "{p:?}");
        assert!(p.left >= 0.0 && p.top >= 0.0, "{p:?}");
        assert!(p.left + popup.width <= screen.width, "{p:?}");
        assert!(p.top + popup.height <= screen.height, "{p:?}");
    }

    #[test]
    fn prefers_right_of_anchor() {
        let config = PlacementConfig::default();
        let p = place_popup(anchor(), popup(), screen(1200.0, 800.0), &config);
        assert_eq!(p.side, Side::Right);
        assert_eq!(p.left, 100.0 + 50.0 + config.margin);
        // Vertically centred would poke into the header band.
        assert_eq!(p.top, config.zones.header_height);
    }

    #[test]
    fn narrow_screen_falls_through_to_below() {
        let config = PlacementConfig::default();
        let s = screen(500.0, 800.0);
        let p = place_popup(anchor(), popup(), s, &config);
        assert_eq!(p.side, Side::Below);
        assert_eq!(p.top, 100.0 + 20.0 + config.margin);
        assert_on_screen(p, popup(), s);
    }

    #[test]
    fn below_never_starts_inside_the_header() {
        let config = PlacementConfig::default();
        let a = AnchorBox {
            top: 30.0,
            left: 100.0,
            width: 50.0,
            height: 10.0,
        };
        let s = screen(500.0, 800.0);
        let p = place_popup(a, popup(), s, &config);
        assert_eq!(p.side, Side::Fallback);
        assert_eq!(p.top, config.zones.header_height);
        assert_on_screen(p, popup(), s);
    }

    #[test]
    fn left_when_right_is_blocked() {
        let config = PlacementConfig::default();
        let a = AnchorBox {
            top: 300.0,
            left: 700.0,
            width: 60.0,
            height: 20.0,
        };
        let p = place_popup(a, popup(), screen(1200.0, 800.0), &config);
        assert_eq!(p.side, Side::Left);
        assert_eq!(p.left, 700.0 - config.margin - 300.0);
        assert_eq!(p.top, 310.0 - 75.0);
    }

    #[test]
    fn above_when_both_sides_are_blocked() {
        let config = PlacementConfig::default();
        let a = AnchorBox {
            top: 500.0,
            left: 120.0,
            width: 40.0,
            height: 20.0,
        };
        let p = place_popup(a, popup(), screen(500.0, 800.0), &config);
        assert_eq!(p.side, Side::Above);
        assert_eq!(p.top, 500.0 - config.margin - 150.0);
    }

    #[test]
    fn fallback_stays_on_screen() {
        let config = PlacementConfig::default();
        let s = screen(400.0, 240.0);
        let p = place_popup(anchor(), popup(), s, &config);
        assert_eq!(p.side, Side::Fallback);
        assert_on_screen(p, popup(), s);
    }

    #[test]
    fn oversized_popup_is_pinned_to_origin() {
        let config = PlacementConfig::default();
        let huge = PopupSize {
            width: 2000.0,
            height: 2000.0,
        };
        let p = place_popup(anchor(), huge, screen(800.0, 600.0), &config);
        assert_eq!((p.left, p.top), (0.0, 0.0));
    }

    #[test]
    fn placement_is_deterministic() {
        let config = PlacementConfig::default();
        let a = place_popup(anchor(), popup(), screen(640.0, 480.0), &config);
        let b = place_popup(anchor(), popup(), screen(640.0, 480.0), &config);
        assert_eq!(a, b);
    }

    #[test]
    fn never_leaves_the_screen() {
        let config = PlacementConfig::default();
        let s = screen(1024.0, 768.0);
        let sizes = [(40.0, 20.0), (300.0, 150.0), (600.0, 400.0), (1024.0, 768.0)];
        for &(w, h) in &sizes {
            let p_size = PopupSize {
                width: w,
                height: h,
            };
            for ax in (-100..1200).step_by(97) {
                for ay in (-100..900).step_by(83) {
                    let a = AnchorBox {
                        top: ay as f32,
                        left: ax as f32,
                        width: 30.0,
                        height: 18.0,
                    };
                    assert_on_screen(place_popup(a, p_size, s, &config), p_size, s);
                }
            }
        }
    }

    #[test]
    fn non_finite_inputs_do_not_leak() {
        let config = PlacementConfig::default();
        let a = AnchorBox {
            top: f32::NAN,
            left: f32::INFINITY,
            width: f32::NEG_INFINITY,
            height: 10.0,
        };
        let p = place_popup(a, popup(), screen(1200.0, 800.0), &config);
        assert!(p.left.is_finite() && p.top.is_finite());
    }
}
