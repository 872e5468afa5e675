// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory SVG surface.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use peniko::Color;

use crate::{Attr, Mark, MarkDiff, MarkId, MarkKind, Surface, TextAnchor};

/// A surface that keeps the latest state of every mark and serializes it as SVG.
#[derive(Clone, Debug, Default)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    id: Option<String>,
    marks: HashMap<MarkId, Mark>,
}

impl SvgSurface {
    /// Creates an empty surface with the given canvas size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            id: None,
            marks: HashMap::new(),
        }
    }

    /// Sets the `id` attribute of the root `<svg>` element.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Returns the canvas width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the canvas height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the number of elements on the surface.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if the surface holds no elements.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Returns the mirrored mark with the given id.
    pub fn get(&self, id: MarkId) -> Option<&Mark> {
        self.marks.get(&id)
    }

    /// Serializes the surface as a standalone SVG document.
    ///
    /// Elements are written in paint order, `(z_index, id)`.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg""#);
        if let Some(id) = &self.id {
            out.push_str(&format!(r#" id="{}""#, escape_xml(id)));
        }
        out.push_str(&format!(
            r#" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        ));
        out.push('\n');

        let mut marks: Vec<&Mark> = self.marks.values().collect();
        marks.sort_by_key(|m| (m.z_index, m.id));
        for mark in marks {
            write_mark(&mut out, mark);
        }

        out.push_str("</svg>\n");
        out
    }
}

impl Surface for SvgSurface {
    fn apply_diffs(&mut self, diffs: &[MarkDiff]) {
        for diff in diffs {
            match diff {
                MarkDiff::Enter { id, new } | MarkDiff::Update { id, new } => {
                    self.marks.insert(*id, (**new).clone());
                }
                MarkDiff::Exit { id } => {
                    self.marks.remove(id);
                }
            }
        }
    }
}

fn write_mark(out: &mut String, m: &Mark) {
    let a = |attr| m.get_or_zero(attr);
    match m.kind {
        MarkKind::Circle => {
            out.push_str(&format!(
                r#"<circle cx="{}" cy="{}" r="{}""#,
                a(Attr::Cx),
                a(Attr::Cy),
                a(Attr::R)
            ));
            write_paint(out, m);
            out.push_str("/>\n");
        }
        MarkKind::Rect => {
            out.push_str(&format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                a(Attr::X),
                a(Attr::Y),
                a(Attr::Width),
                a(Attr::Height)
            ));
            write_paint(out, m);
            out.push_str("/>\n");
        }
        MarkKind::Rule => {
            out.push_str(&format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                a(Attr::X),
                a(Attr::Y),
                a(Attr::X2),
                a(Attr::Y2)
            ));
            write_paint(out, m);
            out.push_str("/>\n");
        }
        MarkKind::Text => {
            out.push_str(&format!(r#"<text x="{}" y="{}""#, a(Attr::X), a(Attr::Y)));
            if let Some(size) = m.get(Attr::FontSize) {
                out.push_str(&format!(r#" font-size="{size}""#));
            }
            out.push_str(match m.anchor {
                TextAnchor::Start => r#" text-anchor="start""#,
                TextAnchor::Middle => r#" text-anchor="middle""#,
                TextAnchor::End => r#" text-anchor="end""#,
            });
            write_paint(out, m);
            out.push('>');
            out.push_str(&escape_xml(m.text.as_deref().unwrap_or_default()));
            out.push_str("</text>\n");
        }
    }
}

fn write_paint(out: &mut String, m: &Mark) {
    match m.fill {
        Some(fill) => out.push_str(&format!(r#" fill="{}""#, hex(fill))),
        None => out.push_str(r#" fill="none""#),
    }
    if let Some(opacity) = m.get(Attr::FillOpacity) {
        out.push_str(&format!(r#" fill-opacity="{opacity}""#));
    }
    if let Some(stroke) = m.stroke {
        out.push_str(&format!(
            r#" stroke="{}" stroke-width="{}""#,
            hex(stroke),
            m.stroke_width
        ));
    }
}

fn hex(color: Color) -> String {
    let rgba = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::boxed::Box;
    use alloc::vec;

    use peniko::color::palette::css;

    use super::*;
    use crate::LayerId;

    #[test]
    fn svg_paints_in_z_then_id_order() {
        let back = Mark::builder(MarkId::for_row(LayerId(1), 5))
            .circle()
            .attr(Attr::R, 3.0)
            .fill(css::RED)
            .build();
        let front = Mark::builder(MarkId::for_row(LayerId(0), 0))
            .text("A & B")
            .z_index(40)
            .fill(css::BLACK)
            .build();
        let mut surface = SvgSurface::new(500.0, 200.0).with_id("parties");
        surface.apply_diffs(&vec![
            MarkDiff::Enter {
                id: front.id,
                new: Box::new(front),
            },
            MarkDiff::Enter {
                id: back.id,
                new: Box::new(back),
            },
        ]);

        let svg = surface.to_svg_string();
        assert!(svg.contains(r#"id="parties""#), "root id is written: {svg}");
        assert!(svg.contains(r##"fill="#ff0000""##), "solid fill is hex: {svg}");
        assert!(svg.contains("A &amp; B"), "text is escaped: {svg}");
        let circle = svg.find("<circle").unwrap();
        let text = svg.find("<text").unwrap();
        assert!(circle < text, "lower z paints first");
    }

    #[test]
    fn rect_writes_geometry_then_paint() {
        let mark = Mark::builder(MarkId::from_raw(1))
            .rect()
            .attr(Attr::X, 1.0)
            .attr(Attr::Y, 2.0)
            .attr(Attr::Width, 3.0)
            .attr(Attr::Height, 4.5)
            .attr(Attr::FillOpacity, 0.5)
            .fill(css::BLACK)
            .stroke(css::WHITE, 1.0)
            .build();
        let mut surface = SvgSurface::new(10.0, 10.0);
        surface.apply_diffs(&[MarkDiff::Enter {
            id: mark.id,
            new: Box::new(mark),
        }]);

        assert_eq!(
            surface.to_svg_string(),
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10">"#,
                "\n",
                r##"<rect x="1" y="2" width="3" height="4.5" fill="#000000" fill-opacity="0.5" stroke="#ffffff" stroke-width="1"/>"##,
                "\n</svg>\n",
            )
        );
    }

    #[test]
    fn exit_removes_elements() {
        let mark = Mark::builder(MarkId::from_raw(7)).rect().build();
        let mut surface = SvgSurface::new(10.0, 10.0);
        surface.apply_diffs(&[MarkDiff::Enter {
            id: mark.id,
            new: Box::new(mark),
        }]);
        assert_eq!(surface.len(), 1);
        surface.apply_diffs(&[MarkDiff::Exit {
            id: MarkId::from_raw(7),
        }]);
        assert!(surface.is_empty(), "exit drops the element");
    }
}
