//! Font lookup and text rasterization onto card images.
//!
//! Fonts come from the system font database and are cached per family for
//! the life of the process. When no usable face exists, card text is
//! skipped and everything else is still drawn.

use std::sync::{Mutex, OnceLock, PoisonError};

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use image::{Pixel, Rgba, RgbaImage};
use rustc_hash::FxHashMap;
use rusttype::{point, Font, Scale};

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        log::debug!("Font database holds {} faces", db.len());
        db
    })
}

/// Bold face of `family` (empty or `"Sans"` means the default sans-serif),
/// or `None` if the system has no matching font.
#[must_use]
pub fn font_for(family: &str) -> Option<&'static Font<'static>> {
    static CACHE: OnceLock<Mutex<FxHashMap<String, Option<&'static Font<'static>>>>> =
        OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(FxHashMap::default()));
    let mut cache = cache.lock().unwrap_or_else(PoisonError::into_inner);

    *cache.entry(family.to_owned()).or_insert_with(|| {
        let loaded = load_system_font(family);
        if loaded.is_none() {
            log::warn!("No font found for family {family:?}; card text disabled");
        }
        loaded.map(|font| &*Box::leak(Box::new(font)))
    })
}

fn load_system_font(family: &str) -> Option<Font<'static>> {
    let families = match family.trim() {
        "" | "Sans" => [Family::SansSerif],
        "Serif" => [Family::Serif],
        "Monospace" => [Family::Monospace],
        other => [Family::Name(other)],
    };
    let query = Query {
        families: &families,
        weight: Weight::BOLD,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };
    let id = db().query(&query)?;
    db().with_face_data(id, |data, index| {
        Font::try_from_vec_and_index(data.to_vec(), index)
    })?
}

/// Advance width of `text` at `px` pixels.
#[must_use]
pub fn text_width(font: &Font<'_>, px: f32, text: &str) -> f32 {
    font.layout(text, Scale::uniform(px), point(0.0, 0.0))
        .last()
        .map_or(0.0, |g| g.position().x + g.unpositioned().h_metrics().advance_width)
}

/// Blend `text` onto `img` with its left end at `x` and its baseline at
/// `baseline`. Glyph coverage scales the color's alpha; pixels outside
/// the image are dropped.
pub fn draw_text(
    img: &mut RgbaImage,
    font: &Font<'_>,
    px: f32,
    x: f32,
    baseline: f32,
    color: Rgba<u8>,
    text: &str,
) {
    let (w, h) = img.dimensions();
    for glyph in font.layout(text, Scale::uniform(px), point(x, baseline)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, coverage| {
            let (Ok(ix), Ok(iy)) = (
                u32::try_from(bb.min.x + gx as i32),
                u32::try_from(bb.min.y + gy as i32),
            ) else {
                return;
            };
            if ix >= w || iy >= h {
                return;
            }
            let mut ink = color;
            ink.0[3] = (f32::from(color.0[3]) * coverage).round() as u8;
            img.get_pixel_mut(ix, iy).blend(&ink);
        });
    }
}

/// Break `text` into lines no wider than `max_width`, one character at a
/// time so that unspaced scripts wrap too. A single character wider than
/// the limit still gets its own line.
#[must_use]
pub fn wrap_chars(font: &Font<'_>, px: f32, text: &str, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for ch in text.chars() {
        let mut candidate = line.clone();
        candidate.push(ch);
        if !line.is_empty() && text_width(font, px, &candidate) > max_width {
            lines.push(std::mem::take(&mut line));
            line.push(ch);
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
