use scribe::error::Error;
use scribe::renderer::{MiniJinjaRenderer, TemplateRenderer};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_render_named_template() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("greeting.j2"), "Hello {{ name }}!\n").unwrap();

    let renderer = MiniJinjaRenderer::from_dir(temp_dir.path());
    let result = renderer
        .render("greeting.j2", &json!({ "name": "World" }))
        .unwrap();

    assert_eq!(result, "Hello World!\n");
}

#[test]
fn test_render_missing_template() {
    let temp_dir = TempDir::new().unwrap();

    let renderer = MiniJinjaRenderer::from_dir(temp_dir.path());
    let result = renderer.render("missing.j2", &json!({}));

    match result {
        Err(Error::MinijinjaError(_)) => (),
        _ => panic!("Expected MinijinjaError variant"),
    }
}

#[test]
fn test_render_inline() {
    let renderer = MiniJinjaRenderer::new();
    let result = renderer
        .render_inline("{% for i in items %}{{ i }}{% endfor %}", &json!({ "items": [1, 2, 3] }))
        .unwrap();

    assert_eq!(result, "123");
}

#[test]
fn test_render_inline_keeps_trailing_newline() {
    let renderer = MiniJinjaRenderer::new();
    let result = renderer
        .render_inline("name: {{ name }}\n", &json!({ "name": "demo" }))
        .unwrap();

    assert_eq!(result, "name: demo\n");
}

#[test]
fn test_render_inline_syntax_error() {
    let renderer = MiniJinjaRenderer::new();
    let result = renderer.render_inline("{% if %}", &json!({}));

    match result {
        Err(Error::MinijinjaError(_)) => (),
        _ => panic!("Expected MinijinjaError variant"),
    }
}

#[test]
fn test_named_templates_visible_to_inline_includes() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("base.j2"), "from base").unwrap();

    let renderer = MiniJinjaRenderer::from_dir(temp_dir.path());
    let result = renderer
        .render_inline("{% include 'base.j2' %}", &json!({}))
        .unwrap();

    assert_eq!(result, "from base");
}
