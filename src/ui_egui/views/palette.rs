use egui::Color32;

const DARK_TEXT: Color32 = Color32::from_rgb(0x2F, 0x31, 0x45);
const LIGHT_TEXT: Color32 = Color32::from_rgb(0xFD, 0xE9, 0xCF);

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Parse `#RRGGBB` or the short `#RGB` form
pub fn parse_color(hex: &str) -> Option<Color32> {
    let hex = hex
        .strip_prefix('#')
        .filter(|h| h.bytes().all(|b| b.is_ascii_hexdigit()))?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match hex.len() {
        6 => Some(Color32::from_rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
            Some(Color32::from_rgb(short(0)?, short(1)?, short(2)?))
        }
        _ => None,
    }
}

/// Dark text on light blocks, light text on dark ones
pub fn readable_text_color(background: Color32) -> Color32 {
    let luminance = (0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32)
        / 255.0;
    if luminance > 0.6 {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}

#[derive(Clone, Copy)]
pub(crate) struct TimetablePalette {
    pub grid_bg: Color32,
    pub today_bg: Color32,
    pub hour_line: Color32,
    pub half_hour_line: Color32,
    pub label: Color32,
    pub conflict: Color32,
    pub selected: Color32,
    pub fallback_block: Color32,
}

impl TimetablePalette {
    pub fn from_visuals(visuals: &egui::Visuals) -> Self {
        let line = visuals.widgets.noninteractive.bg_stroke.color;
        Self {
            grid_bg: visuals.extreme_bg_color,
            today_bg: with_alpha(visuals.selection.bg_fill, 40),
            hour_line: line,
            half_hour_line: with_alpha(line, 90),
            label: visuals.weak_text_color(),
            conflict: Color32::from_rgb(0xEF, 0x44, 0x44),
            selected: visuals.selection.stroke.color,
            fallback_block: Color32::from_rgb(0x4C, 0x58, 0x6B),
        }
    }
}
