use crate::common::{FixedContent, differs_from_background, quiet_producer};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::Rgb;
use kaptcha::{
    ArithmeticGenerator, BezierInterferer, CaptchaError, CharGenerator, CompositeInterferer,
    Interferer, LineInterferer, NoiseInterferer, PNG_DATA_URI_PREFIX, Producer, RenderConfig,
    WarpInterferer,
};
use std::io::BufWriter;
use std::sync::Arc;
use std::thread;

#[test]
fn test_default_producer() {
    let producer = Producer::new(RenderConfig::builder().build().unwrap());
    let captcha = producer.next_captcha().unwrap();

    assert_eq!(captcha.image().dimensions(), (120, 40));
    assert_eq!(captcha.answer().len(), 4);
    assert!(differs_from_background(captcha.image(), Rgb([255, 255, 255])));
}

#[test]
fn test_char_captcha_160x60() {
    let background = Rgb([240, 240, 240]);
    let config = RenderConfig::builder()
        .size(160, 60)
        .generator(CharGenerator::new(4).unwrap())
        .interferer(LineInterferer::new(5))
        .background(background)
        .build()
        .unwrap();

    let captcha = Producer::new(config).next_captcha().unwrap();
    assert_eq!((captcha.width(), captcha.height()), (160, 60));
    assert_eq!(captcha.answer().len(), 4);
    assert!(captcha.answer().chars().all(|c| c.is_ascii_alphanumeric()));
    assert!(differs_from_background(captcha.image(), background));
}

#[test]
fn test_arithmetic_captcha_with_full_distortion() {
    let layers: Vec<Arc<dyn Interferer>> = vec![
        Arc::new(LineInterferer::new(5)),
        Arc::new(BezierInterferer::new(2)),
        Arc::new(NoiseInterferer::new(0.6).unwrap()),
        Arc::new(WarpInterferer::default()),
    ];
    let config = RenderConfig::builder()
        .size(160, 60)
        .generator(ArithmeticGenerator::new(10).unwrap())
        .interferer(layers.into_iter().collect::<CompositeInterferer>())
        .build()
        .unwrap();
    let producer = Producer::new(config);

    for _ in 0..10 {
        let captcha = producer.next_captcha().unwrap();
        let answer: u64 = captcha.answer().parse().unwrap();
        assert!(answer <= 100);
        assert_eq!(captcha.image().dimensions(), (160, 60));
    }
}

#[test]
fn test_base64_export() {
    let producer = quiet_producer(
        100,
        40,
        FixedContent {
            answer: "ab12",
            draw_text: "ab12",
        },
    );
    let captcha = producer.next_captcha().unwrap();
    let encoded = captcha.to_base64().unwrap();

    assert!(encoded.starts_with("data:image/png;base64,"));
    let payload = encoded.strip_prefix(PNG_DATA_URI_PREFIX).unwrap();
    let bytes = STANDARD.decode(payload).unwrap();
    assert_eq!(bytes, captcha.to_png().unwrap());

    let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (100, 40));
    assert_eq!(&decoded, captcha.image());
}

#[test]
fn test_write_png_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("captcha.png");
    let producer = quiet_producer(
        80,
        30,
        FixedContent {
            answer: "9",
            draw_text: "4 + 5 = ?",
        },
    );
    let captcha = producer.next_captcha().unwrap();

    {
        let mut writer = BufWriter::new(std::fs::File::create(&path).unwrap());
        captcha.write_png(&mut writer).unwrap();
    }

    let reloaded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(&reloaded, captcha.image());
}

#[test]
fn test_concurrent_generation() {
    let config = RenderConfig::builder()
        .size(90, 30)
        .generator(CharGenerator::new(5).unwrap())
        .interferer(WarpInterferer::default())
        .build()
        .unwrap();
    let producer = Arc::new(Producer::new(config));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let producer = Arc::clone(&producer);
            thread::spawn(move || {
                (0..5)
                    .map(|_| producer.next_captcha().unwrap().answer().to_string())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let answers: Vec<String> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    assert_eq!(answers.len(), 20);
    assert!(answers.iter().all(|a| a.len() == 5));

    let clone = (*producer).clone();
    assert_eq!(clone.config().width(), 90);
}

#[test]
fn test_invalid_configuration_is_rejected_up_front() {
    assert!(matches!(
        RenderConfig::builder().size(0, 40).build(),
        Err(CaptchaError::Config(_))
    ));
    assert!(matches!(
        RenderConfig::builder().size(40, 0).build(),
        Err(CaptchaError::Config(_))
    ));
    assert!(NoiseInterferer::new(-1.0).is_err());
}
