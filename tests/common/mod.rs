use image::{Rgb, RgbImage};
use kaptcha::{
    CaptchaContent, Colorizer, ContentGenerator, Interferer, Producer, RenderConfig,
    StrategyError,
};
use rand::RngCore;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const INK: Rgb<u8> = Rgb([0, 0, 0]);

pub struct FixedContent {
    pub answer: &'static str,
    pub draw_text: &'static str,
}

impl ContentGenerator for FixedContent {
    fn generate(&self, _rng: &mut dyn RngCore) -> CaptchaContent {
        CaptchaContent::new(self.answer, self.draw_text)
    }
}

/// Black ink; counts requests.
#[derive(Default, Clone)]
pub struct CountingInk {
    pub calls: Arc<AtomicUsize>,
}

impl CountingInk {
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Colorizer for CountingInk {
    fn next_color(&self, _rng: &mut dyn RngCore) -> Result<Rgb<u8>, StrategyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(INK)
    }
}

/// Records the canvas size it was handed.
#[derive(Default, Clone)]
pub struct CanvasProbe {
    pub seen: Arc<Mutex<Vec<(u32, u32)>>>,
}

impl CanvasProbe {
    pub fn seen(&self) -> Vec<(u32, u32)> {
        self.seen.lock().unwrap().clone()
    }
}

impl Interferer for CanvasProbe {
    fn draw(&self, canvas: &mut RgbImage, _rng: &mut dyn RngCore) -> Result<(), StrategyError> {
        self.seen.lock().unwrap().push(canvas.dimensions());
        Ok(())
    }
}

pub struct BrokenInterferer;

impl Interferer for BrokenInterferer {
    fn draw(&self, _canvas: &mut RgbImage, _rng: &mut dyn RngCore) -> Result<(), StrategyError> {
        Err("pen ran dry".into())
    }
}

pub fn quiet_producer(
    width: u32,
    height: u32,
    generator: impl ContentGenerator + 'static,
) -> Producer {
    let config = RenderConfig::builder()
        .size(width, height)
        .generator(generator)
        .no_interferer()
        .colorizer(CountingInk::default())
        .build()
        .unwrap();
    Producer::new(config)
}

pub fn differs_from_background(image: &RgbImage, background: Rgb<u8>) -> bool {
    image.pixels().any(|p| *p != background)
}
