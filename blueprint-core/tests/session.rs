use architect_core::{
    ADVISORY_MESSAGE, EditSession, HouseLayout, TransformError, starter_layout, transform,
};
use blueprint_core::{RenderOptions, render_layout};

#[test]
fn failed_transform_keeps_layout_and_scene() {
    let opts = RenderOptions::with_width(1100.0);
    let mut session = EditSession::new(starter_layout());
    let before_layout = session.layout().clone();
    let before_scene = render_layout(session.layout(), &opts).unwrap();

    let replaced = session
        .run("Expand the garage", |_, _| {
            Err(TransformError::Network("connection reset".into()))
        })
        .unwrap();

    assert!(!replaced);
    assert!(!session.is_pending());
    assert_eq!(session.layout(), &before_layout);
    assert_eq!(render_layout(session.layout(), &opts).unwrap(), before_scene);
    assert_eq!(session.advisory(), Some(ADVISORY_MESSAGE));
}

#[test]
fn malformed_body_is_treated_like_a_failure() {
    let mut session = EditSession::new(starter_layout());
    let body = r#"{"candidates":[{"content":{"parts":[{"text":"{\"land\":{}}"}]}}]}"#;
    session
        .run("anything", |_, _| transform::parse_response(body))
        .unwrap();
    assert_eq!(session.layout(), &starter_layout());
    assert_eq!(session.advisory(), Some(ADVISORY_MESSAGE));
}

#[test]
fn new_layout_re_renders_from_scratch() {
    let opts = RenderOptions::default();
    let mut session = EditSession::new(starter_layout());
    let mut next: HouseLayout = starter_layout();
    next.floors.truncate(1);
    let expected = next.clone();
    session.run("drop the second floor", move |_, _| Ok(next)).unwrap();
    let scene = render_layout(session.layout(), &opts).unwrap();
    assert_eq!(session.layout(), &expected);
    assert_eq!(scene.groups("floor").count(), 1);
    assert_eq!(session.advisory(), None);
}
