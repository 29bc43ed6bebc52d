use crate::common::{BrokenInterferer, CanvasProbe, CountingInk, FixedContent, INK};
use kaptcha::{
    CaptchaError, CompositeInterferer, Interferer, LineInterferer, NoiseInterferer, Producer,
    RenderConfig, Renderer, DEFAULT_SCALE,
};
use std::error::Error as _;
use std::sync::Arc;

#[test]
fn test_interferer_draws_on_supersampled_canvas() {
    let probe = CanvasProbe::default();
    let config = RenderConfig::builder()
        .size(160, 60)
        .interferer(probe.clone())
        .build()
        .unwrap();

    let captcha = Producer::new(config).next_captcha().unwrap();

    let scale = u32::from(DEFAULT_SCALE);
    assert_eq!(probe.seen(), [(160 * scale, 60 * scale)]);
    assert_eq!(captcha.image().dimensions(), (160, 60));
}

#[test]
fn test_custom_scale() {
    let probe = CanvasProbe::default();
    let config = RenderConfig::builder()
        .size(50, 20)
        .interferer(probe.clone())
        .build()
        .unwrap();

    let producer = Producer::with_renderer(config, Renderer::with_scale(1).unwrap());
    let captcha = producer.next_captcha().unwrap();

    assert_eq!(probe.seen(), [(50, 20)]);
    assert_eq!(captcha.image().dimensions(), (50, 20));
    assert!(Renderer::with_scale(0).is_err());
}

#[test]
fn test_matching_text_gets_one_color_per_character() {
    let ink = CountingInk::default();
    let config = RenderConfig::builder()
        .generator(FixedContent {
            answer: "abcd",
            draw_text: "abcd",
        })
        .colorizer(ink.clone())
        .no_interferer()
        .build()
        .unwrap();

    Producer::new(config).next_captcha().unwrap();
    assert_eq!(ink.count(), 4);
}

#[test]
fn test_expression_text_gets_single_color() {
    let ink = CountingInk::default();
    let config = RenderConfig::builder()
        .generator(FixedContent {
            answer: "7",
            draw_text: "3 + 4 = ?",
        })
        .colorizer(ink.clone())
        .no_interferer()
        .build()
        .unwrap();

    let captcha = Producer::new(config).next_captcha().unwrap();
    assert_eq!(ink.count(), 1);
    assert_eq!(captcha.answer(), "7");
}

#[test]
fn test_single_character_gets_single_color() {
    let ink = CountingInk::default();
    let config = RenderConfig::builder()
        .generator(FixedContent {
            answer: "x",
            draw_text: "x",
        })
        .colorizer(ink.clone())
        .build()
        .unwrap();

    Producer::new(config).next_captcha().unwrap();
    assert_eq!(ink.count(), 1);
}

#[test]
fn test_equal_length_but_different_text_still_colors_per_character() {
    let ink = CountingInk::default();
    let config = RenderConfig::builder()
        .generator(FixedContent {
            answer: "12",
            draw_text: "ab",
        })
        .colorizer(ink.clone())
        .no_interferer()
        .build()
        .unwrap();

    Producer::new(config).next_captcha().unwrap();
    assert_eq!(ink.count(), 2);
}

#[test]
fn test_text_is_drawn() {
    let background = kaptcha::producer::DEFAULT_BACKGROUND;
    let config = RenderConfig::builder()
        .generator(FixedContent {
            answer: "WXYZ",
            draw_text: "WXYZ",
        })
        .colorizer(CountingInk::default())
        .no_interferer()
        .build()
        .unwrap();

    let captcha = Producer::new(config).next_captcha().unwrap();
    let darkest = captcha
        .image()
        .pixels()
        .map(|p| u32::from(p[0]) + u32::from(p[1]) + u32::from(p[2]))
        .min()
        .unwrap();
    assert!(darkest < 200, "no ink near {INK:?} found");
    assert!(captcha.image().pixels().any(|p| *p == background));
}

#[test]
fn test_failing_interferer_aborts_render() {
    let config = RenderConfig::builder()
        .interferer(BrokenInterferer)
        .build()
        .unwrap();

    let err = Producer::new(config).next_captcha().unwrap_err();
    match &err {
        CaptchaError::Generation { stage, .. } => assert_eq!(*stage, "interferer"),
        other => panic!("expected generation error, got {other:?}"),
    }
    assert_eq!(err.source().unwrap().to_string(), "pen ran dry");
}

#[test]
fn test_failing_layer_inside_composite() {
    let ok: Arc<dyn Interferer> = Arc::new(LineInterferer::default());
    let broken: Arc<dyn Interferer> = Arc::new(BrokenInterferer);
    let composite = CompositeInterferer::new(vec![Some(ok), None, Some(broken)]);

    let config = RenderConfig::builder()
        .interferer(composite)
        .build()
        .unwrap();

    assert!(matches!(
        Producer::new(config).next_captcha(),
        Err(CaptchaError::Generation { .. })
    ));
}

#[test]
fn test_composite_skips_absent_layers() {
    let probe = CanvasProbe::default();
    let first: Arc<dyn Interferer> = Arc::new(probe.clone());
    let noise: Arc<dyn Interferer> = Arc::new(NoiseInterferer::default());
    let last: Arc<dyn Interferer> = Arc::new(probe.clone());
    let composite =
        CompositeInterferer::new(vec![None, Some(first), Some(noise), None, Some(last)]);

    let config = RenderConfig::builder()
        .size(40, 20)
        .interferer(composite)
        .build()
        .unwrap();

    Producer::new(config).next_captcha().unwrap();
    assert_eq!(probe.seen().len(), 2);
}
