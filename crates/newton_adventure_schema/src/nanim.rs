//! Messages of the `im.bci.nanim` animation archive format.
//!
//! Mirrors `proto/nanim.proto`.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum PixelFormat {
    Rgb888 = 1,
    Rgba8888 = 2,
}

impl PixelFormat {
    /// Bytes written per pixel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb888 => 3,
            PixelFormat::Rgba8888 => 4,
        }
    }
}

/// Raw interleaved pixels, row-major, top-to-bottom.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Image {
    #[prost(string, required, tag = "1")]
    pub name: String,
    #[prost(int32, required, tag = "2")]
    pub width: i32,
    #[prost(int32, required, tag = "3")]
    pub height: i32,
    #[prost(enumeration = "PixelFormat", required, tag = "4")]
    pub format: i32,
    #[prost(bytes = "vec", required, tag = "5")]
    pub pixels: Vec<u8>,
}

impl Image {
    /// Decoded pixel format, `None` for values this crate does not know.
    pub fn pixel_format(&self) -> Option<PixelFormat> {
        PixelFormat::try_from(self.format).ok()
    }
}

/// One frame of an animation: an image region shown for `duration` ms.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Frame {
    #[prost(string, required, tag = "1")]
    pub image_name: String,
    #[prost(int32, required, tag = "2")]
    pub duration: i32,
    #[prost(float, required, tag = "3")]
    pub u1: f32,
    #[prost(float, required, tag = "4")]
    pub v1: f32,
    #[prost(float, required, tag = "5")]
    pub u2: f32,
    #[prost(float, required, tag = "6")]
    pub v2: f32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Animation {
    #[prost(string, required, tag = "1")]
    pub name: String,
    #[prost(message, repeated, tag = "2")]
    pub frames: Vec<Frame>,
}

/// Root message of a `.nanim` archive.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Nanim {
    #[prost(message, repeated, tag = "1")]
    pub images: Vec<Image>,
    #[prost(message, repeated, tag = "2")]
    pub animations: Vec<Animation>,
}

impl Nanim {
    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.animations.iter().find(|a| a.name == name)
    }

    pub fn image(&self, name: &str) -> Option<&Image> {
        self.images.iter().find(|i| i.name == name)
    }

    /// Image names referenced by frames that have no matching image.
    pub fn dangling_image_references(&self) -> Vec<&str> {
        self.animations
            .iter()
            .flat_map(|a| a.frames.iter())
            .map(|f| f.image_name.as_str())
            .filter(|name| self.image(name).is_none())
            .collect()
    }
}
