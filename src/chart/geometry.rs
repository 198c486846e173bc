use std::f64::consts::{FRAC_PI_2, TAU};

use super::distribution::CategoryDisplayEntry;

// keeps a lone full-circle sector from collapsing into a zero-length arc
const FULL_TURN_EPSILON: f64 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonutLayout {
    pub cx: f64,
    pub cy: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Extra outer radius for the highlighted sector.
    pub active_offset: f64,
}

impl Default for DonutLayout {
    fn default() -> Self {
        Self {
            cx: 160.0,
            cy: 160.0,
            inner_radius: 70.0,
            outer_radius: 130.0,
            active_offset: 12.0,
        }
    }
}

impl DonutLayout {
    pub fn view_box(&self) -> String {
        let side = 2.0 * (self.outer_radius + self.active_offset);
        let min_x = self.cx - side / 2.0;
        let min_y = self.cy - side / 2.0;
        format!("{min_x} {min_y} {side} {side}")
    }
}

/// Start/end angles in radians, clockwise from twelve o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorSpan {
    pub start: f64,
    pub end: f64,
}

impl SectorSpan {
    pub fn sweep(&self) -> f64 {
        self.end - self.start
    }
}

/// Splits the circle between `entries` by count. When every count is zero
/// the circle is divided evenly.
pub fn sector_spans(entries: &[&CategoryDisplayEntry]) -> Vec<SectorSpan> {
    if entries.is_empty() {
        return Vec::new();
    }
    let total = entries.iter().map(|e| e.count as f64).sum::<f64>();
    let weight = |e: &CategoryDisplayEntry| {
        if total == 0.0 {
            1.0 / entries.len() as f64
        } else {
            e.count as f64 / total
        }
    };
    let mut start = 0.0;
    entries
        .iter()
        .map(|e| {
            let end = start + weight(e) * TAU;
            let span = SectorSpan { start, end };
            start = end;
            span
        })
        .collect()
}

fn point(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    let a = angle - FRAC_PI_2;
    (cx + r * a.cos(), cy + r * a.sin())
}

/// SVG path data for one annular sector.
pub fn sector_path(layout: &DonutLayout, span: SectorSpan, active: bool) -> String {
    let outer = if active {
        layout.outer_radius + layout.active_offset
    } else {
        layout.outer_radius
    };
    let inner = layout.inner_radius;
    let end = if span.sweep() >= TAU - FULL_TURN_EPSILON {
        span.start + TAU - FULL_TURN_EPSILON
    } else {
        span.end
    };
    let large_arc = if end - span.start > std::f64::consts::PI {
        1
    } else {
        0
    };

    let (x0, y0) = point(layout.cx, layout.cy, outer, span.start);
    let (x1, y1) = point(layout.cx, layout.cy, outer, end);
    let (x2, y2) = point(layout.cx, layout.cy, inner, end);
    let (x3, y3) = point(layout.cx, layout.cy, inner, span.start);
    format!(
        "M {x0:.3} {y0:.3} A {outer} {outer} 0 {large_arc} 1 {x1:.3} {y1:.3} \
         L {x2:.3} {y2:.3} A {inner} {inner} 0 {large_arc} 0 {x3:.3} {y3:.3} Z"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::distribution::{build_display_entries, CategoryRecord};

    fn entries(counts: &[u64]) -> Vec<CategoryDisplayEntry> {
        let records = counts
            .iter()
            .enumerate()
            .map(|(i, c)| CategoryRecord::new(format!("c{i}"), *c))
            .collect::<Vec<_>>();
        build_display_entries(&records)
    }

    #[test]
    fn test_spans_cover_circle() {
        let e = entries(&[30, 10]);
        let refs = e.iter().collect::<Vec<_>>();
        let spans = sector_spans(&refs);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].start, 0.0);
        assert!((spans[0].sweep() - 0.75 * TAU).abs() < 1e-9);
        assert!((spans[1].end - TAU).abs() < 1e-9);
        assert_eq!(spans[0].end, spans[1].start);
    }

    #[test]
    fn test_zero_counts_split_evenly() {
        let e = entries(&[0, 0, 0, 0]);
        let refs = e.iter().collect::<Vec<_>>();
        let spans = sector_spans(&refs);
        for s in spans {
            assert!((s.sweep() - TAU / 4.0).abs() < 1e-9);
        }
        assert!(sector_spans(&[]).is_empty());
    }

    #[test]
    fn test_huge_counts_stay_within_circle() {
        let e = entries(&[u64::MAX, u64::MAX, 1]);
        let refs = e.iter().collect::<Vec<_>>();
        let spans = sector_spans(&refs);
        assert_eq!(spans.len(), 3);
        assert!((spans[0].sweep() - TAU / 2.0).abs() < 1e-9);
        assert!((spans[2].end - TAU).abs() < 1e-9);
    }

    #[test]
    fn test_single_sector_path_is_drawable() {
        let layout = DonutLayout::default();
        let path = sector_path(&layout, SectorSpan { start: 0.0, end: TAU }, false);
        assert!(path.starts_with("M 160.000 30.000 A 130 130 0 1 1"));
        assert!(path.ends_with('Z'));
    }

    #[test]
    fn test_active_sector_is_expanded() {
        let layout = DonutLayout::default();
        let span = SectorSpan {
            start: 0.0,
            end: FRAC_PI_2,
        };
        let path = sector_path(&layout, span, true);
        assert!(path.starts_with("M 160.000 18.000 A 142 142 0 0 1"));
    }
}
