//! Template preview: structure outlines, labels and selection highlighting

use std::fs;

use cardsmith::model::NodeKind;
use cardsmith::{
    render_template_preview, render_template_preview_json, render_template_preview_with_config,
    RenderConfig, Selection, SvgConfig, Template,
};

fn load_demo(name: &str) -> (String, Template) {
    let source = fs::read_to_string(format!("demos/{}", name)).expect("demo template");
    let template = Template::from_json(&source).expect("valid demo template");
    (source, template)
}

/// The markup line carrying `id="<id>"`
fn line_with_id<'s>(svg: &'s str, id: &str) -> &'s str {
    let needle = format!(r#"id="{}""#, id);
    svg.lines()
        .find(|l| l.contains(&needle))
        .unwrap_or_else(|| panic!("no element with {}", needle))
}

#[test]
fn test_preview_labels_every_node() {
    let (_, template) = load_demo("hero.template.json");
    let svg = render_template_preview(&template, None);

    assert_eq!(svg.matches("card-section-outline").count(), 9);
    assert_eq!(svg.matches("card-item-outline").count(), 8);
    assert!(svg.contains(">Banner</text>"));
    assert!(svg.contains(">banner-name</text>"));
    assert!(svg.contains(">Portrait</text>"));
    assert!(svg.contains(">Rules text</text>"));
    assert_eq!(svg.matches(r#"stroke-dasharray="6 6""#).count(), 9);
}

#[test]
fn test_preview_carries_no_card_content() {
    let (_, template) = load_demo("hero.template.json");
    let svg = render_template_preview(&template, None);
    assert!(svg.contains("card-background"));
    assert!(!svg.contains("card-text"));
    assert!(!svg.contains("card-frame"));
    assert!(!svg.contains("<image"));
    assert!(!svg.contains("DEBUG RENDER"));
}

#[test]
fn test_selected_section_is_highlighted() {
    let (_, template) = load_demo("hero.template.json");
    let svg = render_template_preview(&template, Some(&Selection::section("art")));

    let art = line_with_id(&svg, "art");
    assert!(art.contains("card-section-outline"));
    assert!(art.contains(r##"stroke="#c65a32""##));
    assert!(art.contains(r#"fill-opacity="0.08""#));
    assert_eq!(svg.matches("fill-opacity").count(), 1);

    let rules = line_with_id(&svg, "rules");
    assert!(!rules.contains("fill-opacity"));
}

#[test]
fn test_selected_item_is_highlighted() {
    let (_, template) = load_demo("hero.template.json");
    let selection: Selection = "item:portrait".parse().unwrap();
    let svg = render_template_preview(&template, Some(&selection));

    let portrait = line_with_id(&svg, "portrait");
    assert!(portrait.contains("card-item-outline"));
    assert!(portrait.contains(r#"stroke-width="2.5""#));
    assert!(portrait.contains(r#"fill-opacity="0.15""#));
    assert_eq!(svg.matches("fill-opacity").count(), 1);
}

#[test]
fn test_selection_kind_must_match() {
    let (_, template) = load_demo("hero.template.json");
    // "art" is a section, and "portrait" an item
    let svg = render_template_preview(&template, Some(&Selection::item("art")));
    assert!(!svg.contains("fill-opacity"));
    let svg = render_template_preview(&template, Some(&Selection::section("portrait")));
    assert!(!svg.contains("fill-opacity"));
}

#[test]
fn test_selection_parsing() {
    assert_eq!(
        "section:body".parse::<Selection>(),
        Ok(Selection::section("body"))
    );
    let item: Selection = "item:a:b".parse().unwrap();
    assert_eq!(item.kind, NodeKind::Item);
    assert_eq!(item.id, "a:b");
    assert!("body".parse::<Selection>().is_err());
    assert!("item:".parse::<Selection>().is_err());
    assert!("widget:x".parse::<Selection>().is_err());
}

#[test]
fn test_tangled_template_preview_marks_fallbacks() {
    let (source, _) = load_demo("tangled.template.json");
    let svg = render_template_preview_json(&source, None, &RenderConfig::default()).unwrap();

    assert!(svg.contains(">missing section:nowhere</text>"));
    assert!(svg.contains(">missing item:ghost</text>"));
    assert!(svg.contains(">cycle item:a</text>"));
    assert_eq!(svg.matches("card-item-outline").count(), 4);
    // a and b draw connectors; missing targets do not
    assert_eq!(svg.matches("card-connector").count(), 2);
}

#[test]
fn test_compact_preview_is_one_line() {
    let (_, template) = load_demo("starter.template.json");
    let config = RenderConfig::new().with_svg(SvgConfig::inline());
    let svg = render_template_preview_with_config(&template, None, &config);
    assert!(!svg.contains('\n'));
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(">Header</text>"));
    assert!(svg.contains(">Title</text>"));
}
