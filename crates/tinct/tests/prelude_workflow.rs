//! A host session driven only through the prelude.

use tinct::prelude::*;
use tinct::{EmbedAction, EmbedMessage, EmbedOrigin};
use web_time::{Duration, Instant};

#[test]
fn edit_preview_and_export() -> Result<()> {
    let t0 = Instant::now();
    let mut editor = ThemeEditor::with_config(EditorConfig::default());
    let mut preview = EmbedSession::new(EmbedOrigin::SameOrigin, EditorConfig::default().embed);

    let actions = preview.start(editor.state(), t0);
    assert!(matches!(actions.as_slice(), [EmbedAction::Apply(_)]));

    editor.apply_theme_preset_at("claymorphism", t0 + Duration::from_millis(10))?;
    editor.toggle_mode();
    let actions = preview.theme_changed(editor.state(), t0 + Duration::from_millis(20));
    let [EmbedAction::Apply(state)] = actions.as_slice() else {
        panic!("same-origin preview applies directly: {actions:?}");
    };

    let mut root = StyledElement::new();
    tinct::apply_theme_to_element(state, &mut root);
    assert!(root.has_dark_class());
    assert_eq!(root.property("radius"), Some("1.25rem"));

    let css = editor.theme_code();
    assert!(css.starts_with(":root {"));
    assert!(css.contains("@theme inline"));
    Ok(())
}

#[test]
fn embed_messages_decode_from_json() {
    let msg = EmbedMessage::from_json(r#"{"type":"PONG"}"#);
    assert!(matches!(msg, Ok(EmbedMessage::Pong)));
    let err: tinct::Error = EmbedMessage::from_json("{}").unwrap_err().into();
    assert!(err.to_string().starts_with("malformed embed message"));
}

#[test]
fn color_helpers_are_reexported() {
    assert_eq!(
        tinct::color_formatter("#ff0000", ColorFormat::Hsl, TailwindVersion::V3),
        "0 100% 50%"
    );
    assert_eq!(theme::DEFAULT_PRESET, "default");
}
