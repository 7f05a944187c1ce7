//! Texture loading and GPU upload

use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextureError {
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("image {width}x{height} is empty")]
    Empty { width: u32, height: u32 },
}

/// Decoded RGBA8 pixels
#[derive(Clone, Debug, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let image = image::open(path)?.to_rgba8();
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty { width, height });
        }
        Ok(Self {
            width,
            height,
            rgba: image.into_raw(),
        })
    }

    /// Load `path`, or fall back to a checker tinted with `tint`
    pub fn load_or_fallback(path: Option<&Path>, tint: [u8; 3]) -> Self {
        let Some(path) = path else {
            return Self::checker(tint);
        };

        match Self::load(path) {
            Ok(image) => {
                tracing::info!("Loaded texture {} ({}x{})", path.display(), image.width, image.height);
                image
            }
            Err(e) => {
                tracing::warn!("Failed to load texture {}: {e}; using generated fallback", path.display());
                Self::checker(tint)
            }
        }
    }

    /// 2x2 checker alternating `tint` and a darker shade of it
    pub fn checker(tint: [u8; 3]) -> Self {
        let [r, g, b] = tint;
        let dark = [r / 2, g / 2, b / 2];
        let mut rgba = Vec::with_capacity(16);
        for texel in [tint, dark, dark, tint] {
            rgba.extend_from_slice(&texel);
            rgba.push(255);
        }
        Self {
            width: 2,
            height: 2,
            rgba,
        }
    }
}

/// Texture, view and sampler living on the GPU
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl GpuTexture {
    pub fn from_image(device: &wgpu::Device, queue: &wgpu::Queue, image: &TextureImage, label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self { texture, view, sampler }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checker_layout() {
        let image = TextureImage::checker([200, 100, 50]);
        assert_eq!((image.width, image.height), (2, 2));
        assert_eq!(image.rgba.len(), 16);
        assert_eq!(&image.rgba[0..4], &[200, 100, 50, 255]);
        assert_eq!(&image.rgba[4..8], &[100, 50, 25, 255]);
    }

    #[test]
    fn test_missing_texture_falls_back() {
        let image = TextureImage::load_or_fallback(Some(Path::new("/no/such/sun.png")), [255, 200, 0]);
        assert_eq!(image, TextureImage::checker([255, 200, 0]));
    }

    #[test]
    fn test_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        image::RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 4]))
            .save(&path)
            .unwrap();

        let loaded = TextureImage::load(&path).unwrap();
        assert_eq!((loaded.width, loaded.height), (3, 2));
        assert_eq!(&loaded.rgba[0..4], &[1, 2, 3, 4]);
    }
}
