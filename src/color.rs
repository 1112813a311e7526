use std::collections::BTreeMap;

use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Srgb<u8>> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Srgb::new(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Resolve a CSS colour name (`"blue"`, `"orange"`, …).
pub fn named(name: &str) -> Option<Srgb<u8>> {
    palette::named::from_str(&name.to_ascii_lowercase())
}

/// `#rrggbb` form for renderers.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

// ---------------------------------------------------------------------------
// Color mapping: series name → colour
// ---------------------------------------------------------------------------

/// Maps series names to colours: the named colour from the series style
/// when it resolves, otherwise a generated one.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Srgb<u8>>,
    default_color: Srgb<u8>,
}

impl ColorMap {
    /// Build a colour map from `(series, colour name)` pairs.
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries: Vec<(&str, &str)> = entries.into_iter().collect();
        let mut fallback = generate_palette(entries.len()).into_iter();

        let mut mapping = BTreeMap::new();
        for (series, color_name) in entries {
            let generated = fallback.next();
            let color = match named(color_name) {
                Some(c) => c,
                None => {
                    log::warn!("unknown colour '{color_name}' for {series}, using a generated one");
                    generated.unwrap_or(Srgb::new(128, 128, 128))
                }
            };
            mapping.insert(series.to_string(), color);
        }

        ColorMap {
            mapping,
            default_color: Srgb::new(128, 128, 128),
        }
    }

    /// Look up the colour for a series.
    pub fn color_for(&self, series: &str) -> Srgb<u8> {
        self.mapping
            .get(series)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (series → `#rrggbb`).
    pub fn legend_entries(&self) -> Vec<(String, String)> {
        self.mapping
            .iter()
            .map(|(s, c)| (s.clone(), to_hex(*c)))
            .collect()
    }
}
