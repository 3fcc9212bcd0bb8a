#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use image::codecs::webp::WebPEncoder;
use image::{ColorType, Rgb, RgbImage, Rgba, RgbaImage};
use log::Level;
use webp2png::service::traits::i_service::ReporterTrait;

/// 寫出一張帶有漸層透明度的無損 WebP
pub fn write_rgba_webp(path: &Path, width: u32, height: u32) -> PathBuf {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 7) as u8, (y * 11) as u8, 128, ((x + y) * 16 % 256) as u8])
    });
    let mut bytes = Vec::new();
    WebPEncoder::new_lossless(&mut bytes)
        .encode(image.as_raw(), width, height, ColorType::Rgba8.into())
        .unwrap();
    fs::write(path, bytes).unwrap();
    path.to_path_buf()
}

pub fn write_rgb_webp(path: &Path, width: u32, height: u32) -> PathBuf {
    let image = RgbImage::from_fn(width, height, |x, y| Rgb([(x * 5) as u8, (y * 3) as u8, 200]));
    let mut bytes = Vec::new();
    WebPEncoder::new_lossless(&mut bytes)
        .encode(image.as_raw(), width, height, ColorType::Rgb8.into())
        .unwrap();
    fs::write(path, bytes).unwrap();
    path.to_path_buf()
}

/// 檔頭正確但內容無法解碼
pub fn write_corrupt_webp(path: &Path) -> PathBuf {
    let mut bytes = b"RIFF\x40\x00\x00\x00WEBPVP8 ".to_vec();
    bytes.extend_from_slice(&[0xAB; 52]);
    fs::write(path, bytes).unwrap();
    path.to_path_buf()
}

pub fn write_bytes(path: &Path, bytes: &[u8]) -> PathBuf {
    fs::write(path, bytes).unwrap();
    path.to_path_buf()
}

#[derive(Default)]
pub struct CaptureReporter {
    messages: Mutex<Vec<(Level, String)>>,
}

impl CaptureReporter {
    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn count(&self, level: Level) -> usize {
        self.messages().iter().filter(|(l, _)| *l == level).count()
    }
}

impl ReporterTrait for CaptureReporter {
    fn report(&self, level: Level, message: &str) {
        self.messages.lock().unwrap().push((level, message.to_string()));
    }
}
