//! Texture registry
//!
//! Loads scene textures through the image codec, keeps them in a fixed table
//! of tagged slots and binds slot `i` to texture unit `i`. Shaders refer to a
//! texture by unit, so the position a texture was loaded at is part of its
//! identity for the whole life of the scene.

use thiserror::Error;

use super::{PixelFormat, RenderError, TextureDevice, TextureId, TextureParams, TextureUpload};
use crate::assets::{AssetError, ImageCodec};

/// Number of texture slots, matching the minimum number of texture units a
/// GL 3.3 context guarantees to the fragment stage.
pub const MAX_TEXTURE_SLOTS: usize = 16;

/// A loaded texture and the tag it is looked up by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureSlot {
    /// Lookup tag
    pub tag: String,
    /// GPU texture handle
    pub handle: TextureId,
}

/// Texture loading errors
#[derive(Error, Debug)]
pub enum TextureError {
    /// The codec could not decode the image
    #[error("Could not load image {path}: {source}")]
    Decode {
        /// Requested path
        path: String,
        /// Codec failure
        #[source]
        source: AssetError,
    },

    /// The image decoded to a layout other than RGB or RGBA
    #[error("Not implemented to handle image {path} with {channels} channels")]
    UnsupportedChannels {
        /// Requested path
        path: String,
        /// Decoded channel count
        channels: u8,
    },

    /// Every slot is already taken
    #[error("Texture table is full ({capacity} slots), cannot load '{tag}'")]
    CapacityExceeded {
        /// Tag that did not fit
        tag: String,
        /// Table capacity
        capacity: usize,
    },

    /// The graphics context refused the upload
    #[error(transparent)]
    Device(#[from] RenderError),
}

/// Result type for texture operations
pub type TextureResult<T> = Result<T, TextureError>;

/// Fixed-capacity table of tagged textures
///
/// Slots are kept in load order and never evicted. Tags are not required to
/// be unique: lookups return the first match, so a later texture loaded
/// under an existing tag can never be reached by tag.
#[derive(Debug)]
pub struct TextureRegistry {
    slots: Vec<TextureSlot>,
    params: TextureParams,
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            slots: Vec::with_capacity(MAX_TEXTURE_SLOTS),
            params: TextureParams::default(),
        }
    }

    /// Load an image and register it under `tag`
    ///
    /// Returns the slot index, which is also the texture unit the image is
    /// bound to by [`TextureRegistry::bind_all`]. A full table is rejected
    /// before the image is decoded, so nothing is uploaded on failure.
    pub fn load<D, C>(
        &mut self,
        device: &mut D,
        codec: &C,
        path: &str,
        tag: &str,
    ) -> TextureResult<usize>
    where
        D: TextureDevice + ?Sized,
        C: ImageCodec + ?Sized,
    {
        if self.slots.len() >= MAX_TEXTURE_SLOTS {
            log::error!("No free texture slot for '{}' ({})", tag, path);
            return Err(TextureError::CapacityExceeded {
                tag: tag.to_string(),
                capacity: MAX_TEXTURE_SLOTS,
            });
        }

        let image = codec.decode(path).map_err(|source| {
            log::warn!("Could not load image: {} ({})", path, source);
            TextureError::Decode {
                path: path.to_string(),
                source,
            }
        })?;

        let Some(format) = PixelFormat::from_channels(image.channels) else {
            log::error!(
                "Not implemented to handle image {} with {} channels",
                path, image.channels
            );
            return Err(TextureError::UnsupportedChannels {
                path: path.to_string(),
                channels: image.channels,
            });
        };

        let handle = device.create_texture(&TextureUpload {
            pixels: &image.pixels,
            width: image.width,
            height: image.height,
            format,
            params: self.params,
        })?;

        if self.resolve_unit(tag).is_some() {
            log::warn!("Texture tag '{}' is already registered; '{}' will be shadowed", tag, path);
        }

        let slot = self.slots.len();
        self.slots.push(TextureSlot {
            tag: tag.to_string(),
            handle,
        });

        log::debug!(
            "Loaded texture '{}' from {} ({}x{} {:?}) into slot {}",
            tag, path, image.width, image.height, format, slot
        );
        Ok(slot)
    }

    /// Bind every loaded texture to the unit matching its slot index
    ///
    /// Call once after all loads and before the first draw.
    pub fn bind_all<D: TextureDevice + ?Sized>(&self, device: &mut D) {
        for (unit, slot) in (0u32..).zip(&self.slots) {
            device.bind_texture_unit(unit, slot.handle);
        }
        log::debug!("Bound {} textures to units 0..{}", self.slots.len(), self.slots.len());
    }

    /// Texture unit of the first texture registered under `tag`
    pub fn resolve_unit(&self, tag: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.tag == tag)
    }

    /// GPU handle of the first texture registered under `tag`
    pub fn resolve_handle(&self, tag: &str) -> Option<TextureId> {
        self.slots
            .iter()
            .find(|slot| slot.tag == tag)
            .map(|slot| slot.handle)
    }

    /// Release every texture; the registry is empty afterwards
    pub fn release_all<D: TextureDevice + ?Sized>(&mut self, device: &mut D) {
        let count = self.slots.len();
        for slot in self.slots.drain(..) {
            device.delete_texture(slot.handle);
        }
        if count > 0 {
            log::debug!("Released {} textures", count);
        }
    }

    /// Loaded slots in load order
    pub fn slots(&self) -> &[TextureSlot] {
        &self.slots
    }

    /// Number of loaded textures
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no texture is loaded
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Maximum number of textures
    pub const fn capacity(&self) -> usize {
        MAX_TEXTURE_SLOTS
    }
}

impl Drop for TextureRegistry {
    fn drop(&mut self) {
        if !self.slots.is_empty() {
            log::warn!(
                "TextureRegistry dropping with {} unreleased textures",
                self.slots.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::DecodedImage;
    use crate::backend::{HeadlessContext, InMemoryCodec};
    use crate::render::{FilterMode, WrapMode};

    fn rgb(size: u32) -> DecodedImage {
        DecodedImage::solid_color(size, size, &[120, 80, 40])
    }

    #[test]
    fn test_units_follow_load_order() {
        let mut ctx = HeadlessContext::new();
        let codec = InMemoryCodec::new()
            .with_image("wood.jpg", rgb(64))
            .with_image("cheese.jpg", rgb(32))
            .with_image("bread.png", DecodedImage::solid_color(8, 8, &[1, 2, 3, 255]));
        let mut registry = TextureRegistry::new();

        assert_eq!(registry.load(&mut ctx, &codec, "wood.jpg", "table").unwrap(), 0);
        assert_eq!(registry.load(&mut ctx, &codec, "cheese.jpg", "cheese").unwrap(), 1);
        assert_eq!(registry.load(&mut ctx, &codec, "bread.png", "bread").unwrap(), 2);

        registry.bind_all(&mut ctx);

        for tag in ["table", "cheese", "bread"] {
            let unit = registry.resolve_unit(tag).unwrap();
            let handle = registry.resolve_handle(tag).unwrap();
            assert_eq!(ctx.bound_texture(unit as u32), Some(handle));
        }
        registry.release_all(&mut ctx);
    }

    #[test]
    fn test_upload_parameters() {
        let mut ctx = HeadlessContext::new();
        let codec = InMemoryCodec::new()
            .with_image("rgb.jpg", rgb(64))
            .with_image("rgba.png", DecodedImage::solid_color(16, 16, &[0, 0, 0, 128]));
        let mut registry = TextureRegistry::new();

        registry.load(&mut ctx, &codec, "rgb.jpg", "rgb").unwrap();
        registry.load(&mut ctx, &codec, "rgba.png", "rgba").unwrap();

        let rgb_tex = ctx.texture(registry.resolve_handle("rgb").unwrap()).unwrap();
        assert_eq!(rgb_tex.format, PixelFormat::Rgb8);
        assert_eq!(rgb_tex.params.wrap_mode, WrapMode::Repeat);
        assert_eq!(rgb_tex.params.filter_mode, FilterMode::Linear);
        assert_eq!(rgb_tex.mip_levels, 7);

        let rgba_tex = ctx.texture(registry.resolve_handle("rgba").unwrap()).unwrap();
        assert_eq!(rgba_tex.format, PixelFormat::Rgba8);
        registry.release_all(&mut ctx);
    }

    #[test]
    fn test_unsupported_channel_counts() {
        let mut ctx = HeadlessContext::new();
        let codec = InMemoryCodec::new()
            .with_image("gray.png", DecodedImage::solid_color(4, 4, &[200]))
            .with_image("gray_alpha.png", DecodedImage::solid_color(4, 4, &[200, 255]));
        let mut registry = TextureRegistry::new();

        for path in ["gray.png", "gray_alpha.png"] {
            let result = registry.load(&mut ctx, &codec, path, "gray");
            assert!(matches!(result, Err(TextureError::UnsupportedChannels { .. })));
        }
        assert!(registry.is_empty());
        assert_eq!(ctx.live_texture_count(), 0);
        assert_eq!(registry.resolve_unit("gray"), None);
    }

    #[test]
    fn test_decode_failure() {
        let mut ctx = HeadlessContext::new();
        let codec = InMemoryCodec::new();
        let mut registry = TextureRegistry::new();

        let result = registry.load(&mut ctx, &codec, "textures/missing.jpg", "missing");
        assert!(matches!(result, Err(TextureError::Decode { .. })));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_device_failure_leaves_registry_untouched() {
        let mut ctx = HeadlessContext::new();
        let mut broken = rgb(4);
        broken.pixels.truncate(5);
        let codec = InMemoryCodec::new().with_image("broken.jpg", broken);
        let mut registry = TextureRegistry::new();

        let result = registry.load(&mut ctx, &codec, "broken.jpg", "broken");
        assert!(matches!(result, Err(TextureError::Device(_))));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_capacity_rejects_seventeenth_texture() {
        let mut ctx = HeadlessContext::new();
        let codec = InMemoryCodec::new().with_image("tile.jpg", rgb(2));
        let mut registry = TextureRegistry::new();

        for i in 0..MAX_TEXTURE_SLOTS {
            let slot = registry.load(&mut ctx, &codec, "tile.jpg", &format!("tile{i}")).unwrap();
            assert_eq!(slot, i);
        }
        assert_eq!(registry.len(), registry.capacity());

        let result = registry.load(&mut ctx, &codec, "tile.jpg", "tile16");
        assert!(matches!(
            result,
            Err(TextureError::CapacityExceeded { capacity: MAX_TEXTURE_SLOTS, .. })
        ));
        assert_eq!(registry.len(), MAX_TEXTURE_SLOTS);
        assert_eq!(ctx.live_texture_count(), MAX_TEXTURE_SLOTS);
        assert_eq!(registry.resolve_unit("tile16"), None);
        assert_eq!(registry.resolve_unit("tile15"), Some(15));

        registry.release_all(&mut ctx);
    }

    #[test]
    fn test_duplicate_tag_is_shadowed() {
        let mut ctx = HeadlessContext::new();
        let codec = InMemoryCodec::new()
            .with_image("first.jpg", rgb(4))
            .with_image("second.jpg", rgb(8));
        let mut registry = TextureRegistry::new();

        registry.load(&mut ctx, &codec, "first.jpg", "stainless").unwrap();
        let second = registry.load(&mut ctx, &codec, "second.jpg", "stainless").unwrap();

        assert_eq!(second, 1);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.resolve_unit("stainless"), Some(0));
        assert_eq!(registry.resolve_handle("stainless"), Some(registry.slots()[0].handle));
        registry.release_all(&mut ctx);
    }

    #[test]
    fn test_unknown_tag_is_not_found() {
        let registry = TextureRegistry::new();
        assert_eq!(registry.resolve_unit("nothing"), None);
        assert_eq!(registry.resolve_handle("nothing"), None);
    }

    #[test]
    fn test_release_all() {
        let mut ctx = HeadlessContext::new();
        let codec = InMemoryCodec::new().with_image("a.jpg", rgb(4));
        let mut registry = TextureRegistry::new();

        registry.load(&mut ctx, &codec, "a.jpg", "a").unwrap();
        registry.load(&mut ctx, &codec, "a.jpg", "b").unwrap();
        registry.bind_all(&mut ctx);
        registry.release_all(&mut ctx);

        assert!(registry.is_empty());
        assert_eq!(ctx.live_texture_count(), 0);
        assert_eq!(ctx.deleted_textures().len(), 2);
        assert_eq!(ctx.bound_texture(0), None);
        assert_eq!(registry.resolve_unit("a"), None);
    }
}
