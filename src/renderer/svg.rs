//! SVG document assembly

use std::collections::HashSet;

use crate::layout::{Point, Rect};

use super::SvgConfig;

/// Which list new elements are appended to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Card content
    Content,
    /// Debug and preview annotations, drawn on top of content
    Overlay,
}

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    defs: Vec<String>,
    elements: Vec<String>,
    overlay: Vec<String>,
    clip_ids: HashSet<String>,
    layer: Layer,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            defs: vec![],
            elements: vec![],
            overlay: vec![],
            clip_ids: HashSet::new(),
            layer: Layer::Content,
            indent: 1,
        }
    }

    /// Direct subsequent elements to `layer`
    pub fn set_layer(&mut self, layer: Layer) {
        self.layer = layer;
    }

    pub fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn class(&self, name: &str) -> String {
        format!("{}{}", self.prefix(), name)
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn push(&mut self, markup: String) {
        let line = format!("{}{}", self.indent_str(), markup);
        match self.layer {
            Layer::Content => self.elements.push(line),
            Layer::Overlay => self.overlay.push(line),
        }
    }

    /// Register a rounded clip rectangle and return its id.
    ///
    /// Ids are derived from `hint` with unsafe characters removed, and made
    /// unique with a numeric suffix.
    pub fn add_clip_path(&mut self, hint: &str, rect: Rect, radius: f64) -> String {
        let base = format!("clip-{}", sanitize_id(hint));
        let mut id = base.clone();
        let mut n = 2;
        while self.clip_ids.contains(&id) {
            id = format!("{}-{}", base, n);
            n += 1;
        }
        self.clip_ids.insert(id.clone());

        self.defs.push(format!(
            r#"<clipPath id="{}"><rect x="{}" y="{}" width="{}" height="{}" rx="{}"/></clipPath>"#,
            id,
            fmt_num(rect.x),
            fmt_num(rect.y),
            fmt_num(rect.width),
            fmt_num(rect.height),
            fmt_num(radius)
        ));
        id
    }

    /// Add a rectangle element
    pub fn add_rect(&mut self, id: Option<&str>, rect: Rect, radius: f64, class: &str, styles: &str) {
        let id_attr = id_attr(id);
        let radius_attr = if radius > 0.0 {
            format!(r#" rx="{}""#, fmt_num(radius))
        } else {
            String::new()
        };
        let markup = format!(
            r#"<rect{} class="{}" x="{}" y="{}" width="{}" height="{}"{}{}/>"#,
            id_attr,
            self.class(class),
            fmt_num(rect.x),
            fmt_num(rect.y),
            fmt_num(rect.width),
            fmt_num(rect.height),
            radius_attr,
            styles
        );
        self.push(markup);
    }

    /// Add a circle element
    pub fn add_circle(&mut self, center: Point, r: f64, class: &str, styles: &str) {
        let markup = format!(
            r#"<circle class="{}" cx="{}" cy="{}" r="{}"{}/>"#,
            self.class(class),
            fmt_num(center.x),
            fmt_num(center.y),
            fmt_num(r),
            styles
        );
        self.push(markup);
    }

    /// Add a line element
    pub fn add_line(&mut self, from: Point, to: Point, class: &str, styles: &str) {
        let markup = format!(
            r#"<line class="{}" x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            self.class(class),
            fmt_num(from.x),
            fmt_num(from.y),
            fmt_num(to.x),
            fmt_num(to.y),
            styles
        );
        self.push(markup);
    }

    /// Add a text element; `text` is escaped
    pub fn add_text(&mut self, id: Option<&str>, text: &str, at: Point, class: &str, styles: &str) {
        let markup = format!(
            r#"<text{} class="{}" x="{}" y="{}"{}>{}</text>"#,
            id_attr(id),
            self.class(class),
            fmt_num(at.x),
            fmt_num(at.y),
            styles,
            escape_xml(text)
        );
        self.push(markup);
    }

    /// Add an image element, optionally clipped by a registered clip path
    pub fn add_image(
        &mut self,
        id: Option<&str>,
        href: &str,
        rect: Rect,
        preserve_aspect_ratio: &str,
        clip_id: Option<&str>,
    ) {
        let clip_attr = clip_id
            .map(|c| format!(r#" clip-path="url(#{})""#, c))
            .unwrap_or_default();
        let markup = format!(
            r#"<image{} class="{}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="{}" href="{}"{}/>"#,
            id_attr(id),
            self.class("image"),
            fmt_num(rect.x),
            fmt_num(rect.y),
            fmt_num(rect.width),
            fmt_num(rect.height),
            preserve_aspect_ratio,
            escape_xml(href),
            clip_attr
        );
        self.push(markup);
    }

    /// Add a group element with optional ID and classes
    pub fn start_group(&mut self, id: Option<&str>, classes: &[&str]) {
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            let list = classes
                .iter()
                .map(|c| self.class(c))
                .collect::<Vec<_>>()
                .join(" ");
            format!(r#" class="{}""#, list)
        };
        let markup = format!("<g{}{}>", id_attr(id), class_attr);
        self.push(markup);
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.push("</g>".to_string());
    }

    /// Build the final SVG string for a `width` by `height` canvas
    pub fn build(self, width: f64, height: f64) -> String {
        let nl = self.newline();
        let inner = if self.config.pretty_print { "  " } else { "" };
        let mut svg = String::new();

        // XML declaration for standalone
        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        let (w, h) = (fmt_num(width), fmt_num(height));
        svg.push_str(&format!(
            r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" fill="none" xmlns="http://www.w3.org/2000/svg">"#
        ));
        svg.push_str(nl);

        if !self.defs.is_empty() {
            svg.push_str(inner);
            svg.push_str("<defs>");
            svg.push_str(nl);
            for def in &self.defs {
                svg.push_str(inner);
                svg.push_str(inner);
                svg.push_str(def);
                svg.push_str(nl);
            }
            svg.push_str(inner);
            svg.push_str("</defs>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        // Annotations (rendered on top)
        for elem in &self.overlay {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg
    }
}

fn id_attr(id: Option<&str>) -> String {
    id.map(|i| format!(r#" id="{}""#, escape_xml(i)))
        .unwrap_or_default()
}

/// Format a presentation attribute, e.g. ` fill="#fff"`; the value is escaped
pub fn attr(name: &str, value: &str) -> String {
    format!(r#" {}="{}""#, name, escape_xml(value))
}

/// Format a numeric presentation attribute
pub fn num_attr(name: &str, value: f64) -> String {
    format!(r#" {}="{}""#, name, fmt_num(value))
}

/// Format a number with at most three decimals and no trailing zeros
pub fn fmt_num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{:.3}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Keep only characters that are safe in an XML id and a `url(#...)` reference
pub fn sanitize_id(id: &str) -> String {
    id.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

/// Escape special XML characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
