use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

/// Average advance of a proportional sans-serif glyph, in ems.
const FALLBACK_ADVANCE_EM: f64 = 0.56;

/// Width of `text` using an installed font matching `font_family`, or
/// `None` when no matching face can be loaded.
pub fn measure_text_width(text: &str, font_size: f64, font_family: &str) -> Option<f64> {
    if text.is_empty() || font_size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = TEXT_MEASURER.lock().ok()?;
    guard.measure(text, font_size, font_family)
}

/// Font-free width estimate.
pub fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    text.chars().filter(|ch| *ch != '\n').count() as f64 * font_size * FALLBACK_ADVANCE_EM
}

/// Width of a row label. `fast` skips system font lookup entirely.
pub fn label_width(text: &str, font_size: f64, font_family: &str, fast: bool) -> f64 {
    if fast {
        return estimate_text_width(text, font_size);
    }
    measure_text_width(text, font_size, font_family)
        .unwrap_or_else(|| estimate_text_width(text, font_size))
}

struct FontData {
    bytes: Vec<u8>,
    index: u32,
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    faces: HashMap<String, Option<FontData>>,
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            faces: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font_size: f64, font_family: &str) -> Option<f64> {
        let key = font_family.trim().to_string();
        if !self.faces.contains_key(&key) {
            let loaded = self.load(font_family);
            self.faces.insert(key.clone(), loaded);
        }
        let data = self.faces.get(&key)?.as_ref()?;
        let face = Face::parse(&data.bytes, data.index).ok()?;
        let scale = font_size / face.units_per_em().max(1) as f64;
        let fallback = font_size * FALLBACK_ADVANCE_EM;
        let width = text
            .chars()
            .filter(|ch| *ch != '\n')
            .map(|ch| {
                face.glyph_index(ch)
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                    .map(|advance| advance as f64 * scale)
                    .unwrap_or(fallback)
            })
            .sum::<f64>();
        Some(width)
    }

    fn load(&mut self, font_family: &str) -> Option<FontData> {
        let names: Vec<&str> = font_family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\''))
            .filter(|name| !name.is_empty())
            .collect();
        let mut families: Vec<Family<'_>> = names
            .iter()
            .map(|name| match name.to_ascii_lowercase().as_str() {
                "serif" => Family::Serif,
                "monospace" | "ui-monospace" => Family::Monospace,
                "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => Family::SansSerif,
                _ => Family::Name(name),
            })
            .collect();
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        self.db
            .with_face_data(id, |bytes, index| {
                Face::parse(bytes, index).ok().map(|_| FontData {
                    bytes: bytes.to_vec(),
                    index,
                })
            })
            .flatten()
    }
}
