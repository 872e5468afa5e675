// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained marks.
//!
//! A [`Mark`] is the scene-side counterpart of one visual element: a circle, a rectangle, a
//! straight rule or a text label. Numeric attributes live in a small attribute list so the
//! transition scheduler can interpolate any of them by name.

extern crate alloc;

use alloc::string::String;

use kurbo::{Circle, Point, Rect, Shape};
use peniko::Color;
use smallvec::SmallVec;

use crate::MarkId;

/// The element kind of a mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// A circle (`cx`, `cy`, `r`).
    Circle,
    /// An axis-aligned rectangle (`x`, `y`, `width`, `height`).
    Rect,
    /// A straight line segment (`x`, `y`, `x2`, `y2`).
    Rule,
    /// A text label anchored at (`x`, `y`).
    Text,
}

/// A numeric mark attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attr {
    /// Circle center x.
    Cx,
    /// Circle center y.
    Cy,
    /// Circle radius.
    R,
    /// Left edge (rects), start x (rules), anchor x (text).
    X,
    /// Top edge (rects), start y (rules), anchor y (text).
    Y,
    /// End x (rules).
    X2,
    /// End y (rules).
    Y2,
    /// Rectangle width.
    Width,
    /// Rectangle height.
    Height,
    /// Fill opacity in `0..=1`.
    FillOpacity,
    /// Font size (text).
    FontSize,
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Anchor at the start of the text.
    Start,
    /// Anchor at the middle of the text.
    #[default]
    Middle,
    /// Anchor at the end of the text.
    End,
}

/// Attribute storage; most marks carry at most six numeric attributes.
pub type Attrs = SmallVec<[(Attr, f64); 6]>;

/// A retained visual element.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Element kind.
    pub kind: MarkKind,
    /// Paint order hint; renderers sort by `(z_index, id)`.
    pub z_index: i32,
    /// Numeric attributes.
    pub attrs: Attrs,
    /// Fill paint. `None` leaves the shape unfilled.
    pub fill: Option<Color>,
    /// Stroke paint. `None` leaves the shape unstroked.
    pub stroke: Option<Color>,
    /// Stroke width in scene units.
    pub stroke_width: f64,
    /// Text content for [`MarkKind::Text`].
    pub text: Option<String>,
    /// Text anchor for [`MarkKind::Text`].
    pub anchor: TextAnchor,
}

impl Mark {
    /// Starts building a mark with the given id (a rectangle unless changed).
    pub fn builder(id: MarkId) -> MarkBuilder {
        MarkBuilder {
            mark: Self {
                id,
                kind: MarkKind::Rect,
                z_index: 0,
                attrs: Attrs::new(),
                fill: None,
                stroke: None,
                stroke_width: 1.0,
                text: None,
                anchor: TextAnchor::default(),
            },
        }
    }

    /// Returns the current value of `attr`, if set.
    pub fn get(&self, attr: Attr) -> Option<f64> {
        self.attrs.iter().find(|(a, _)| *a == attr).map(|(_, v)| *v)
    }

    /// Returns the current value of `attr`, or `0.0` if unset.
    pub fn get_or_zero(&self, attr: Attr) -> f64 {
        self.get(attr).unwrap_or(0.0)
    }

    /// Sets `attr` to `value`. Returns `true` if the stored value changed.
    pub fn set(&mut self, attr: Attr, value: f64) -> bool {
        match self.attrs.iter_mut().find(|(a, _)| *a == attr) {
            Some((_, v)) => {
                // NaN never compares equal, so a NaN write always counts as a change.
                if *v == value {
                    false
                } else {
                    *v = value;
                    true
                }
            }
            None => {
                self.attrs.push((attr, value));
                true
            }
        }
    }

    /// Returns the geometric bounds of the mark, if it has any area or extent.
    ///
    /// Text marks report no bounds; their extent depends on font metrics.
    pub fn bounds(&self) -> Option<Rect> {
        match self.kind {
            MarkKind::Circle => Some(self.circle().bounding_box()),
            MarkKind::Rect => Some(self.rect()),
            MarkKind::Rule => Some(Rect::from_points(
                (self.get_or_zero(Attr::X), self.get_or_zero(Attr::Y)),
                (self.get_or_zero(Attr::X2), self.get_or_zero(Attr::Y2)),
            )),
            MarkKind::Text => None,
        }
    }

    /// Returns `true` if `pos` falls inside the mark's filled geometry.
    ///
    /// Zero-sized and non-finite shapes never hit, and neither do rules or text.
    pub fn hit(&self, pos: Point) -> bool {
        match self.kind {
            MarkKind::Circle => {
                let c = self.circle();
                c.radius.is_finite() && c.radius > 0.0 && c.contains(pos)
            }
            MarkKind::Rect => {
                let r = self.rect();
                r.is_finite() && r.area() > 0.0 && r.contains(pos)
            }
            MarkKind::Rule | MarkKind::Text => false,
        }
    }

    fn circle(&self) -> Circle {
        Circle::new(
            (self.get_or_zero(Attr::Cx), self.get_or_zero(Attr::Cy)),
            self.get_or_zero(Attr::R).max(0.0),
        )
    }

    fn rect(&self) -> Rect {
        let x = self.get_or_zero(Attr::X);
        let y = self.get_or_zero(Attr::Y);
        Rect::new(
            x,
            y,
            x + self.get_or_zero(Attr::Width).max(0.0),
            y + self.get_or_zero(Attr::Height).max(0.0),
        )
    }
}

/// Builder for [`Mark`].
#[derive(Clone, Debug)]
pub struct MarkBuilder {
    mark: Mark,
}

impl MarkBuilder {
    /// Makes this a circle mark.
    pub fn circle(mut self) -> Self {
        self.mark.kind = MarkKind::Circle;
        self
    }

    /// Makes this a rectangle mark.
    pub fn rect(mut self) -> Self {
        self.mark.kind = MarkKind::Rect;
        self
    }

    /// Makes this a rule mark.
    pub fn rule(mut self) -> Self {
        self.mark.kind = MarkKind::Rule;
        self
    }

    /// Makes this a text mark with the given content.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.mark.kind = MarkKind::Text;
        self.mark.text = Some(text.into());
        self
    }

    /// Sets the z-index.
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.mark.z_index = z_index;
        self
    }

    /// Sets a numeric attribute.
    pub fn attr(mut self, attr: Attr, value: f64) -> Self {
        self.mark.set(attr, value);
        self
    }

    /// Sets the fill paint.
    pub fn fill(mut self, color: Color) -> Self {
        self.mark.fill = Some(color);
        self
    }

    /// Sets the stroke paint and width.
    pub fn stroke(mut self, color: Color, width: f64) -> Self {
        self.mark.stroke = Some(color);
        self.mark.stroke_width = width;
        self
    }

    /// Sets the text anchor.
    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.mark.anchor = anchor;
        self
    }

    /// Finishes the mark.
    pub fn build(self) -> Mark {
        self.mark
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::{LayerId, MarkId};

    fn circle(r: f64) -> Mark {
        Mark::builder(MarkId::for_row(LayerId(1), 0))
            .circle()
            .attr(Attr::Cx, 10.0)
            .attr(Attr::Cy, 10.0)
            .attr(Attr::R, r)
            .build()
    }

    #[test]
    fn set_reports_changes_only() {
        let mut m = circle(4.0);
        assert!(!m.set(Attr::R, 4.0), "same value is not a change");
        assert!(m.set(Attr::R, 5.0), "new value is a change");
        assert!(m.set(Attr::FillOpacity, 0.7), "new attribute is a change");
        assert_eq!(m.get(Attr::FillOpacity), Some(0.7));
    }

    #[test]
    fn zero_radius_circles_never_hit() {
        let m = circle(0.0);
        assert!(!m.hit(Point::new(10.0, 10.0)), "collapsed circle is not hittable");
        let m = circle(4.0);
        assert!(m.hit(Point::new(12.0, 10.0)), "point inside the radius hits");
        assert!(!m.hit(Point::new(15.0, 10.0)), "point outside the radius misses");
    }

    #[test]
    fn zero_height_rects_never_hit() {
        let m = Mark::builder(MarkId::from_raw(1))
            .rect()
            .attr(Attr::X, 0.0)
            .attr(Attr::Y, 10.0)
            .attr(Attr::Width, 5.0)
            .attr(Attr::Height, 0.0)
            .build();
        assert!(!m.hit(Point::new(2.0, 10.0)), "collapsed bar is not hittable");
    }
}
