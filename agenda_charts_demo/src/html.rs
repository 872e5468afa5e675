// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single-page HTML report of SVG snapshots.

/// One captioned snapshot.
#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) svg: String,
}

pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html><head><meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", escape(title)));
    out.push_str(
        "<style>body{font-family:sans-serif;margin:2em;}\
         section{margin-bottom:2em;}\
         svg{border:1px solid #ddd;}</style>\n",
    );
    out.push_str(&format!("</head><body><h1>{}</h1>\n", escape(title)));
    for section in sections {
        out.push_str(&format!(
            "<section><h2>{}</h2><p>{}</p>\n{}</section>\n",
            escape(&section.title),
            escape(&section.description),
            section.svg
        ));
    }
    out.push_str("</body></html>\n");
    out
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_escapes_captions_but_not_svg() {
        let html = render_report(
            "a & b",
            &[HtmlSection {
                title: "<one>".into(),
                description: "d".into(),
                svg: "<svg></svg>".into(),
            }],
        );
        assert!(html.contains("<title>a &amp; b</title>"));
        assert!(html.contains("<h2>&lt;one&gt;</h2>"));
        assert!(html.contains("<svg></svg>"));
    }
}
