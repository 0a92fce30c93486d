//! Retained vector scene produced by a render pass, plus its SVG form.
//!
//! The scene is plain data: the same layout and width always produce an
//! equal `Scene`, and serialising it twice yields identical bytes.

use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Style {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub dash: Option<String>,
}

impl Style {
    pub fn fill(color: &str) -> Self {
        Style {
            fill: Some(color.to_string()),
            ..Default::default()
        }
    }

    pub fn stroke(color: &str, width: f64) -> Self {
        Style {
            fill: Some("none".to_string()),
            stroke: Some(color.to_string()),
            stroke_width: Some(width),
            dash: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Font {
    pub size: f64,
    pub bold: bool,
    pub fill: String,
}

impl Font {
    pub fn new(size: f64, fill: &str) -> Self {
        Font {
            size,
            bold: false,
            fill: fill.to_string(),
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// One line of a stacked label, offset from the previous one in `em`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Span {
    pub text: String,
    pub dy_em: f64,
    pub font: Font,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Node {
    Rect {
        rect: crate::PxRect,
        rx: Option<f64>,
        style: Style,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        stroke: String,
        width: f64,
    },
    Circle {
        center: (f64, f64),
        r: f64,
        style: Style,
    },
    Text {
        at: (f64, f64),
        text: String,
        font: Font,
        anchor: Anchor,
        middle: bool,
    },
    Label {
        at: (f64, f64),
        spans: Vec<Span>,
    },
    Group {
        class: String,
        offset: (f64, f64),
        opacity: Option<f64>,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn group(class: &str, offset: (f64, f64), children: Vec<Node>) -> Node {
        Node::Group {
            class: class.to_string(),
            offset,
            opacity: None,
            children,
        }
    }

    pub fn text(at: (f64, f64), text: impl Into<String>, font: Font, anchor: Anchor) -> Node {
        Node::Text {
            at,
            text: text.into(),
            font,
            anchor,
            middle: false,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Group { children, .. } => children,
            _ => &[],
        }
    }

    pub fn class(&self) -> Option<&str> {
        match self {
            Node::Group { class, .. } => Some(class),
            _ => None,
        }
    }
}

/// Square grid drawn behind the land boundary.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GridPattern {
    pub id: String,
    pub cell_w: f64,
    pub cell_h: f64,
    pub stroke: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub grid: Option<GridPattern>,
    pub nodes: Vec<Node>,
}

impl Scene {
    /// Top-level groups with the given class, in paint order.
    pub fn groups<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.iter().filter(move |n| n.class() == Some(class))
    }

    pub fn to_svg(&self) -> String {
        let mut s = String::new();
        s.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        s.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" font-family=\"sans-serif\">\n",
            num(self.width),
            num(self.height),
            num(self.width),
            num(self.height)
        ));
        if let Some(g) = &self.grid {
            s.push_str("<defs>\n");
            s.push_str(&format!(
                "<pattern id=\"{}\" width=\"{}\" height=\"{}\" patternUnits=\"userSpaceOnUse\">",
                attr_escape(&g.id),
                num(g.cell_w),
                num(g.cell_h)
            ));
            s.push_str(&format!(
                "<path d=\"M {} 0 L 0 0 0 {}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1\"/></pattern>\n",
                num(g.cell_w),
                num(g.cell_h),
                attr_escape(&g.stroke)
            ));
            s.push_str("</defs>\n");
        }
        for n in &self.nodes {
            write_node(&mut s, n);
        }
        s.push_str("</svg>\n");
        s
    }
}

fn write_style(s: &mut String, style: &Style) {
    if let Some(f) = &style.fill {
        s.push_str(&format!(" fill=\"{}\"", attr_escape(f)));
    }
    if let Some(c) = &style.stroke {
        s.push_str(&format!(" stroke=\"{}\"", attr_escape(c)));
    }
    if let Some(w) = style.stroke_width {
        s.push_str(&format!(" stroke-width=\"{}\"", num(w)));
    }
    if let Some(d) = &style.dash {
        s.push_str(&format!(" stroke-dasharray=\"{}\"", attr_escape(d)));
    }
}

fn write_font(s: &mut String, font: &Font) {
    s.push_str(&format!(
        " font-size=\"{}px\" fill=\"{}\"",
        num(font.size),
        attr_escape(&font.fill)
    ));
    if font.bold {
        s.push_str(" font-weight=\"bold\"");
    }
}

fn write_node(s: &mut String, node: &Node) {
    match node {
        Node::Rect { rect, rx, style } => {
            s.push_str(&format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                num(rect.x),
                num(rect.y),
                num(rect.w),
                num(rect.h)
            ));
            if let Some(rx) = rx {
                s.push_str(&format!(" rx=\"{}\"", num(*rx)));
            }
            write_style(s, style);
            s.push_str("/>\n");
        }
        Node::Line {
            from,
            to,
            stroke,
            width,
        } => {
            s.push_str(&format!(
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
                num(from.0),
                num(from.1),
                num(to.0),
                num(to.1),
                attr_escape(stroke),
                num(*width)
            ));
        }
        Node::Circle { center, r, style } => {
            s.push_str(&format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"",
                num(center.0),
                num(center.1),
                num(*r)
            ));
            write_style(s, style);
            s.push_str("/>\n");
        }
        Node::Text {
            at,
            text,
            font,
            anchor,
            middle,
        } => {
            s.push_str(&format!("<text x=\"{}\" y=\"{}\"", num(at.0), num(at.1)));
            if *anchor != Anchor::Start {
                s.push_str(&format!(" text-anchor=\"{}\"", anchor.as_str()));
            }
            if *middle {
                s.push_str(" dominant-baseline=\"middle\"");
            }
            write_font(s, font);
            s.push_str(&format!(">{}</text>\n", svg_escape(text)));
        }
        Node::Label { at, spans } => {
            s.push_str(&format!(
                "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\" pointer-events=\"none\">",
                num(at.0),
                num(at.1)
            ));
            for sp in spans {
                s.push_str(&format!("<tspan x=\"{}\" dy=\"{}em\"", num(at.0), num(sp.dy_em)));
                write_font(s, &sp.font);
                s.push_str(&format!(">{}</tspan>", svg_escape(&sp.text)));
            }
            s.push_str("</text>\n");
        }
        Node::Group {
            class,
            offset,
            opacity,
            children,
        } => {
            s.push_str(&format!("<g class=\"{}\"", attr_escape(class)));
            if *offset != (0.0, 0.0) {
                s.push_str(&format!(
                    " transform=\"translate({}, {})\"",
                    num(offset.0),
                    num(offset.1)
                ));
            }
            if let Some(o) = opacity {
                s.push_str(&format!(" opacity=\"{}\"", num(*o)));
            }
            s.push_str(">\n");
            for c in children {
                write_node(s, c);
            }
            s.push_str("</g>\n");
        }
    }
}

/// Two decimals, trailing zeros dropped; `-0` prints as `0`.
fn num(v: f64) -> String {
    let t = format!("{:.2}", v);
    let t = t.trim_end_matches('0').trim_end_matches('.');
    if t == "-0" { "0".to_string() } else { t.to_string() }
}

fn svg_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn attr_escape(s: &str) -> String {
    svg_escape(s).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PxRect;

    #[test]
    fn numbers_are_compact() {
        assert_eq!(num(10.0), "10");
        assert_eq!(num(10.5), "10.5");
        assert_eq!(num(1.0 / 3.0), "0.33");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(-2.25), "-2.25");
    }

    #[test]
    fn untrusted_text_is_escaped() {
        let scene = Scene {
            width: 100.0,
            height: 50.0,
            grid: None,
            nodes: vec![
                Node::text((1.0, 2.0), "Bed <1> & \"2\"", Font::new(9.0, "#000"), Anchor::Start),
                Node::Rect {
                    rect: PxRect {
                        x: 0.0,
                        y: 0.0,
                        w: 1.0,
                        h: 1.0,
                    },
                    rx: None,
                    style: Style::fill("red\" onload=\"x"),
                },
            ],
        };
        let svg = scene.to_svg();
        assert!(svg.contains("Bed &lt;1&gt; &amp; \"2\""));
        assert!(svg.contains("fill=\"red&quot; onload=&quot;x\""));
        assert!(svg.starts_with("<?xml"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn groups_emit_translate_only_when_offset() {
        let scene = Scene {
            width: 10.0,
            height: 10.0,
            grid: None,
            nodes: vec![
                Node::group("a", (0.0, 0.0), Vec::new()),
                Node::group("b", (0.0, 12.5), Vec::new()),
            ],
        };
        let svg = scene.to_svg();
        assert!(svg.contains("<g class=\"a\">"));
        assert!(svg.contains("<g class=\"b\" transform=\"translate(0, 12.5)\">"));
        assert_eq!(scene.groups("b").count(), 1);
    }
}
