use image::{ColorType, DynamicImage, ImageFormat};
use std::collections::BTreeMap;

/// 解碼後的影像，連同解碼器回報的格式與附帶資訊
pub struct DecodedImage {
    pub format: ImageFormat,
    pub image: DynamicImage,
    /// 例如 "icc_profile"；PNG 編碼時不會寫回
    pub ancillary: BTreeMap<String, Vec<u8>>,
}

impl DecodedImage {
    pub fn color(&self) -> ColorType {
        self.image.color()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }
}
