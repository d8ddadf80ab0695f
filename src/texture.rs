//! Card texture composition.
//!
//! A card texture is a white sheet with the article thumbnail in the upper
//! part and a light footer carrying an upper-case category badge in the
//! article color, followed by the wrapped title. Thumbnails come from a
//! [`ThumbnailSource`]; when there is none, or it fails, a generated
//! placeholder (color gradient with faint ring outlines and the category
//! name) is used instead. Texture creation never fails: without a usable
//! font the text is left out.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Pixel, Rgba, RgbaImage};
use rand::Rng;
use rusttype::Font;

use crate::article::{parse_hex_color, Article};
use crate::error::CardViewError;
use crate::options::AppearanceOptions;
use crate::text;

const CARD_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const FOOTER_BACKGROUND: Rgba<u8> = Rgba([0xf8, 0xf9, 0xfa, 255]);
const THUMBNAIL_BORDER: Rgba<u8> = Rgba([0xe0, 0xe0, 0xe0, 255]);
const RING_STROKE: Rgba<u8> = Rgba([255, 255, 255, 26]);
const BADGE_TEXT: Rgba<u8> = Rgba([255, 255, 255, 255]);
const TITLE_TEXT: Rgba<u8> = Rgba([0x33, 0x33, 0x33, 255]);
const PLACEHOLDER_LABEL: Rgba<u8> = Rgba([255, 255, 255, 230]);
const FALLBACK_ACCENT: [u8; 3] = [128, 128, 128];

/// Inset of the thumbnail from the card edges, in pixels.
const THUMBNAIL_INSET: u32 = 10;
/// Approximate advance of one badge glyph when no font is available.
const BADGE_GLYPH_WIDTH: u32 = 11;
const BADGE_HEIGHT: u32 = 25;
/// Horizontal padding around the badge text (both sides together).
const BADGE_PADDING: u32 = 16;
/// Left margin of footer text.
const TEXT_MARGIN: u32 = 15;

const BADGE_PX: f32 = 18.0;
const TITLE_PX: f32 = 22.0;
const TITLE_LINE_HEIGHT: u32 = 30;
const LABEL_PX: f32 = 24.0;

/// RGBA image bound to one card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardTexture {
    image: RgbaImage,
    placeholder: bool,
}

impl CardTexture {
    /// Wrap a composed image.
    #[must_use]
    pub fn new(image: RgbaImage, placeholder: bool) -> Self {
        Self { image, placeholder }
    }

    /// Pixel data.
    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Whether the thumbnail area shows a generated placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}

/// Where thumbnail bytes come from.
pub trait ThumbnailSource: Send + Sync {
    /// Fetch the raw (encoded) bytes at `location`.
    ///
    /// # Errors
    ///
    /// Returns [`CardViewError::ThumbnailFetch`] if the bytes cannot be
    /// obtained.
    fn fetch(&self, location: &str) -> Result<Vec<u8>, CardViewError>;
}

/// Thumbnails read from the local filesystem. Relative locations resolve
/// against `root`.
#[derive(Debug, Clone, Default)]
pub struct FileThumbnails {
    root: PathBuf,
}

impl FileThumbnails {
    /// Source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ThumbnailSource for FileThumbnails {
    fn fetch(&self, location: &str) -> Result<Vec<u8>, CardViewError> {
        let path = Path::new(location);
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };
        std::fs::read(&path).map_err(|e| CardViewError::ThumbnailFetch {
            location: location.to_owned(),
            reason: e.to_string(),
        })
    }
}

/// Thumbnails downloaded over HTTP(S).
#[cfg(feature = "net")]
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpThumbnails;

#[cfg(feature = "net")]
impl ThumbnailSource for HttpThumbnails {
    fn fetch(&self, location: &str) -> Result<Vec<u8>, CardViewError> {
        let fail = |e: ureq::Error| CardViewError::ThumbnailFetch {
            location: location.to_owned(),
            reason: e.to_string(),
        };
        ureq::get(location)
            .call()
            .map_err(fail)?
            .into_body()
            .read_to_vec()
            .map_err(fail)
    }
}

/// Generate a placeholder: diagonal gradient from the accent color (opaque)
/// to the same color at half alpha, overlaid with faint ring outlines at
/// random positions and `label` centered on top when a font is given.
pub fn placeholder_image<R: Rng + ?Sized>(
    rgb: [u8; 3],
    label: &str,
    font: Option<&Font<'_>>,
    options: &AppearanceOptions,
    rng: &mut R,
) -> RgbaImage {
    let w = options.placeholder_width.max(1);
    let h = options.placeholder_height.max(1);
    let (wf, hf) = (w as f32, h as f32);
    let norm = wf * wf + hf * hf;

    let mut img = RgbaImage::from_fn(w, h, |x, y| {
        let t = (x as f32 * wf + y as f32 * hf) / norm;
        let alpha = 255.0 - 127.0 * t.clamp(0.0, 1.0);
        Rgba([rgb[0], rgb[1], rgb[2], alpha.round() as u8])
    });

    for _ in 0..options.placeholder_rings {
        let cx = rng.random_range(0.0..wf);
        let cy = rng.random_range(0.0..hf);
        let radius = rng.random_range(20.0..50.0);
        stroke_circle(&mut img, cx, cy, radius, 1.0, RING_STROKE);
    }

    if let Some(font) = font {
        let x = (wf - text::text_width(font, LABEL_PX, label)) / 2.0;
        text::draw_text(&mut img, font, LABEL_PX, x, hf / 2.0, PLACEHOLDER_LABEL, label);
    }
    img
}

/// Compose a card texture around an already decoded thumbnail.
///
/// With `font` set, the badge is sized to the upper-case category and the
/// title is wrapped under it one character at a time. Without one, only
/// the shapes are drawn.
#[must_use]
pub fn compose_card_texture(
    article: &Article,
    thumbnail: &RgbaImage,
    font: Option<&Font<'_>>,
    options: &AppearanceOptions,
) -> RgbaImage {
    let w = options.texture_width.max(1);
    let h = options.texture_height.max(1);
    let mut card = RgbaImage::from_pixel(w, h, CARD_BACKGROUND);

    let footer_y = (h as f32 * options.thumbnail_fraction.clamp(0.0, 1.0)) as u32;
    let thumb_w = w.saturating_sub(2 * THUMBNAIL_INSET);
    let thumb_h = footer_y.saturating_sub(2 * THUMBNAIL_INSET);
    if thumb_w > 0 && thumb_h > 0 {
        let scaled =
            imageops::resize(thumbnail, thumb_w, thumb_h, FilterType::Triangle);
        let inset = i64::from(THUMBNAIL_INSET);
        imageops::overlay(&mut card, &scaled, inset, inset);
        stroke_rect(
            &mut card,
            THUMBNAIL_INSET,
            THUMBNAIL_INSET,
            thumb_w,
            thumb_h,
            THUMBNAIL_BORDER,
        );
    }

    fill_rect(&mut card, 0, footer_y, w, h - footer_y.min(h), FOOTER_BACKGROUND);

    let [r, g, b] = parse_hex_color(&article.color).unwrap_or(FALLBACK_ACCENT);
    let badge = article.category.to_uppercase();
    let text_w = font.map_or_else(
        || badge.chars().count() as u32 * BADGE_GLYPH_WIDTH,
        |font| text::text_width(font, BADGE_PX, &badge).ceil() as u32,
    );
    let badge_w = (text_w + BADGE_PADDING).min(w.saturating_sub(2 * TEXT_MARGIN));
    let badge_y = footer_y + 10;
    fill_rect(
        &mut card,
        TEXT_MARGIN,
        badge_y,
        badge_w,
        BADGE_HEIGHT,
        Rgba([r, g, b, 255]),
    );

    let Some(font) = font else {
        return card;
    };
    let left = (TEXT_MARGIN + BADGE_PADDING / 2) as f32;
    text::draw_text(
        &mut card,
        font,
        BADGE_PX,
        left,
        (badge_y + 17) as f32,
        BADGE_TEXT,
        &badge,
    );

    let max_width = w.saturating_sub(2 * TEXT_MARGIN) as f32;
    let mut baseline = footer_y + 60;
    for line in text::wrap_chars(font, TITLE_PX, &article.title, max_width) {
        if baseline >= h {
            break;
        }
        text::draw_text(
            &mut card,
            font,
            TITLE_PX,
            TEXT_MARGIN as f32,
            baseline as f32,
            TITLE_TEXT,
            &line,
        );
        baseline += TITLE_LINE_HEIGHT;
    }
    card
}

/// Decode thumbnail bytes into RGBA.
///
/// # Errors
///
/// Returns [`CardViewError::ThumbnailDecode`] if the bytes are not a
/// supported image.
pub fn decode_thumbnail(bytes: &[u8]) -> Result<RgbaImage, CardViewError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Build the texture for `article`, falling back to a generated placeholder
/// when the thumbnail is missing or cannot be fetched or decoded.
pub fn build_card_texture<R: Rng + ?Sized>(
    article: &Article,
    source: &dyn ThumbnailSource,
    options: &AppearanceOptions,
    rng: &mut R,
) -> CardTexture {
    let fetched = article.thumbnail.as_deref().map(|location| {
        source
            .fetch(location)
            .and_then(|bytes| decode_thumbnail(&bytes))
    });

    let font = text::font_for(&options.font_family);
    let (thumbnail, placeholder) = match fetched {
        Some(Ok(img)) => (img, false),
        Some(Err(e)) => {
            log::warn!(
                "Thumbnail for article {} ({}) unavailable, using placeholder: {e}",
                article.id,
                article.title
            );
            (placeholder_for(article, font, options, rng), true)
        }
        None => {
            log::debug!("Article {} has no thumbnail", article.id);
            (placeholder_for(article, font, options, rng), true)
        }
    };

    CardTexture::new(
        compose_card_texture(article, &thumbnail, font, options),
        placeholder,
    )
}

fn placeholder_for<R: Rng + ?Sized>(
    article: &Article,
    font: Option<&Font<'_>>,
    options: &AppearanceOptions,
    rng: &mut R,
) -> RgbaImage {
    let rgb = parse_hex_color(&article.color).unwrap_or(FALLBACK_ACCENT);
    placeholder_image(rgb, &article.category, font, options, rng)
}

/// Fill an axis-aligned rectangle, clipped to the image.
fn fill_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    let x1 = x.saturating_add(w).min(img.width());
    let y1 = y.saturating_add(h).min(img.height());
    for py in y.min(y1)..y1 {
        for px in x.min(x1)..x1 {
            img.put_pixel(px, py, color);
        }
    }
}

/// Outline a rectangle with a 2px stroke centered on its edges.
fn stroke_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    let x0 = x.saturating_sub(1);
    let y0 = y.saturating_sub(1);
    let right = x + w;
    let bottom = y + h;
    fill_rect(img, x0, y0, w + 2, 2, color);
    fill_rect(img, x0, bottom.saturating_sub(1), w + 2, 2, color);
    fill_rect(img, x0, y0, 2, h + 2, color);
    fill_rect(img, right.saturating_sub(1), y0, 2, h + 2, color);
}

/// Alpha-blend a circle outline of the given half-width.
fn stroke_circle(
    img: &mut RgbaImage,
    cx: f32,
    cy: f32,
    radius: f32,
    half_width: f32,
    color: Rgba<u8>,
) {
    let reach = radius + half_width;
    let x0 = (cx - reach).floor().max(0.0) as u32;
    let y0 = (cy - reach).floor().max(0.0) as u32;
    let x1 = ((cx + reach).ceil().max(0.0) as u32).min(img.width());
    let y1 = ((cy + reach).ceil().max(0.0) as u32).min(img.height());
    for py in y0..y1 {
        for px in x0..x1 {
            let dx = px as f32 + 0.5 - cx;
            let dy = py as f32 + 0.5 - cy;
            let d = (dx * dx + dy * dy).sqrt();
            if (d - radius).abs() <= half_width {
                img.get_pixel_mut(px, py).blend(&color);
            }
        }
    }
}
