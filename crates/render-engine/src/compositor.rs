//! Card compositor: combines template artwork, customer photos, and text
//! into a flat raster of exactly the requested dimensions.
//!
//! The same compositing rules serve the interactive editor preview and the
//! print export; [`RenderMode`] only changes presentational chrome (frame
//! treatment), never layering.

use image::{imageops, Rgba, RgbaImage};

use cardpress_deck_model::{Card, CardBack, ImageTransform};

/// Rendering context: interactive preview or flat print capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Interactive,
    Print,
}

/// Which side of the card a scene renders.
#[derive(Debug, Clone)]
pub enum SceneSide {
    /// A card face.
    Face(Card),
    /// The shared back; the context card only supplies the game kind.
    Back { back: CardBack, context: Card },
}

/// One render request for the off-screen surface.
#[derive(Debug, Clone)]
pub struct SceneSpec {
    pub side: SceneSide,
    pub width: u32,
    pub height: u32,
    pub mode: RenderMode,
}

/// Raster sources a scene wants resolved before compositing.
#[derive(Debug, Clone, Default)]
pub struct SceneSourceRefs {
    pub template: Option<String>,
    pub user: Option<String>,
}

/// Resolved raster sources. `None` means the source was absent or its
/// fetch failed; the compositor degrades to a placeholder either way.
#[derive(Debug, Clone, Default)]
pub struct SceneSources {
    pub template: Option<RgbaImage>,
    pub user: Option<RgbaImage>,
}

impl SceneSpec {
    pub fn face(card: Card, width: u32, height: u32, mode: RenderMode) -> Self {
        Self {
            side: SceneSide::Face(card),
            width,
            height,
            mode,
        }
    }

    pub fn back(back: CardBack, context: Card, width: u32, height: u32, mode: RenderMode) -> Self {
        Self {
            side: SceneSide::Back { back, context },
            width,
            height,
            mode,
        }
    }

    /// The raster sources this scene embeds.
    pub fn source_refs(&self) -> SceneSourceRefs {
        match &self.side {
            SceneSide::Face(card) => SceneSourceRefs {
                template: card.template_image.clone(),
                user: card.custom_image.clone(),
            },
            SceneSide::Back { back, .. } => SceneSourceRefs {
                template: None,
                user: back.custom_image.clone(),
            },
        }
    }
}

/// Template artwork drawn above the user photo (photo-in-costume styles)
/// is signaled by the face/figure tokens in the asset path.
pub fn is_mask_template(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.contains("oblicej") || lower.contains("figury")
}

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const PLACEHOLDER_GRAY: Rgba<u8> = Rgba([229, 231, 235, 255]);
const PLACEHOLDER_RED: Rgba<u8> = Rgba([220, 38, 38, 255]);
const PLACEHOLDER_BLACK: Rgba<u8> = Rgba([15, 23, 42, 255]);

/// Composite a scene into a raster of exactly `spec.width x spec.height`.
pub fn compose(spec: &SceneSpec, sources: &SceneSources) -> RgbaImage {
    let (w, h) = (spec.width.max(1), spec.height.max(1));
    let mut canvas = RgbaImage::from_pixel(w, h, WHITE);

    match &spec.side {
        SceneSide::Face(card) => compose_face(&mut canvas, card, sources),
        SceneSide::Back { back, .. } => compose_back(&mut canvas, back, sources),
    }

    draw_frame(&mut canvas, spec);
    canvas
}

fn compose_face(canvas: &mut RgbaImage, card: &Card, sources: &SceneSources) {
    let (w, h) = canvas.dimensions();
    let mask_style = card
        .template_image
        .as_deref()
        .map(is_mask_template)
        .unwrap_or(false);

    let template_expected = card.template_image.is_some();
    let template = sources.template.as_ref();

    // Layer 1: template as background (non-mask styles).
    if !mask_style {
        match template {
            Some(img) => {
                let fitted = place_cover(img, w, h, ImageTransform::IDENTITY, Anchor::Center);
                imageops::overlay(canvas, &fitted, 0, 0);
            }
            None if template_expected => draw_placeholder(canvas, card),
            None => {}
        }
    }

    // Layer 2: the customer photo, mirrored for double-headed variants.
    if let Some(user) = sources.user.as_ref() {
        if card.game.is_single_headed() {
            let layer = place_cover(user, w, h, card.transform, Anchor::Center);
            imageops::overlay(canvas, &layer, 0, 0);
        } else {
            draw_double_headed(canvas, user, card.transform);
        }
    } else if !template_expected {
        // No artwork at all: keep the placeholder visible.
        draw_placeholder(canvas, card);
    }

    // Layer 3: mask-style template drawn above the photo.
    if mask_style {
        match template {
            Some(img) => {
                let fitted = place_cover(img, w, h, ImageTransform::IDENTITY, Anchor::Center);
                imageops::overlay(canvas, &fitted, 0, 0);
            }
            None => draw_placeholder(canvas, card),
        }
    }

    if !card.custom_text.is_empty() {
        let cy = if card.game.is_single_headed() {
            // Single-headed art keeps the center free; banner sits low.
            (h as f64 * 0.90) as u32
        } else {
            h / 2
        };
        draw_text_banner(canvas, &card.custom_text, cy);
    }
}

fn compose_back(canvas: &mut RgbaImage, back: &CardBack, sources: &SceneSources) {
    let (w, h) = canvas.dimensions();

    match sources.user.as_ref() {
        Some(img) => {
            let layer = place_cover(img, w, h, back.transform, Anchor::Center);
            imageops::overlay(canvas, &layer, 0, 0);
        }
        None => {
            let fill = parse_hex_color(&back.color).unwrap_or(PLACEHOLDER_BLACK);
            fill_rect(canvas, 0, 0, w, h, fill);
        }
    }

    if !back.custom_text.is_empty() {
        draw_text_banner(canvas, &back.custom_text, h / 2);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Center,
    Top,
}

/// Cover-fit `img` into a `w x h` layer, then apply the user transform:
/// scale about the anchor and shift by percent offsets of the layer size.
fn place_cover(img: &RgbaImage, w: u32, h: u32, t: ImageTransform, anchor: Anchor) -> RgbaImage {
    let (iw, ih) = img.dimensions();
    let mut layer = RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 0]));
    if iw == 0 || ih == 0 {
        return layer;
    }

    let cover = f64::max(w as f64 / iw as f64, h as f64 / ih as f64);
    let scale = cover * t.scale;
    let sw = ((iw as f64 * scale).round() as u32).max(1);
    let sh = ((ih as f64 * scale).round() as u32).max(1);

    let resized = imageops::resize(img, sw, sh, imageops::FilterType::Lanczos3);

    let dx = (w as f64 - sw as f64) / 2.0 + t.offset_x / 100.0 * w as f64;
    let dy = match anchor {
        Anchor::Center => (h as f64 - sh as f64) / 2.0,
        Anchor::Top => 0.0,
    } + t.offset_y / 100.0 * h as f64;

    imageops::overlay(&mut layer, &resized, dx.round() as i64, dy.round() as i64);
    layer
}

/// Traditional double-ended art: the top half shows the photo anchored
/// top; the bottom half shows the same region rotated 180 degrees.
fn draw_double_headed(canvas: &mut RgbaImage, user: &RgbaImage, t: ImageTransform) {
    let (w, h) = canvas.dimensions();
    let half = h / 2;
    if half == 0 {
        return;
    }

    let full = place_cover(user, w, h, t, Anchor::Top);
    let top_half = imageops::crop_imm(&full, 0, 0, w, half).to_image();
    imageops::overlay(canvas, &top_half, 0, 0);

    let bottom_half = imageops::rotate180(&top_half);
    imageops::overlay(canvas, &bottom_half, 0, (h - half) as i64);
}

/// Vector placeholder for a missing or failed raster source: flat card
/// stock with a suit-colored diamond outline in the middle.
fn draw_placeholder(canvas: &mut RgbaImage, card: &Card) {
    let (w, h) = canvas.dimensions();
    fill_rect(canvas, 0, 0, w, h, PLACEHOLDER_GRAY);

    let accent = if card.suit.is_red() {
        PLACEHOLDER_RED
    } else {
        PLACEHOLDER_BLACK
    };
    let size = (w.min(h) / 4).max(2);
    let (cx, cy) = (w as i64 / 2, h as i64 / 2);
    for i in 0..size as i64 {
        let span = size as i64 - i;
        for offset in [-span, span] {
            put_pixel_checked(canvas, cx + offset, cy - i, accent);
            put_pixel_checked(canvas, cx + offset, cy + i, accent);
        }
    }
}

fn draw_frame(canvas: &mut RgbaImage, spec: &SceneSpec) {
    let (w, h) = canvas.dimensions();
    match spec.mode {
        RenderMode::Print => stroke_rect(canvas, 0, 0, w, h, 1, BLACK),
        RenderMode::Interactive => {
            let color = match &spec.side {
                SceneSide::Face(card) => parse_hex_color(&card.border_color),
                SceneSide::Back { back, .. } => parse_hex_color(&back.border_color),
            }
            .unwrap_or(Rgba([212, 175, 55, 255]));
            let thickness = (w.min(h) / 110).max(2);
            stroke_rect(canvas, 0, 0, w, h, thickness, color);
        }
    }
}

fn fill_rect(canvas: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    for py in y..(y + h).min(canvas.height()) {
        for px in x..(x + w).min(canvas.width()) {
            canvas.put_pixel(px, py, color);
        }
    }
}

fn stroke_rect(canvas: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, t: u32, color: Rgba<u8>) {
    fill_rect(canvas, x, y, w, t, color);
    fill_rect(canvas, x, y + h.saturating_sub(t), w, t, color);
    fill_rect(canvas, x, y, t, h, color);
    fill_rect(canvas, x + w.saturating_sub(t), y, t, h, color);
}

fn put_pixel_checked(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, color);
    }
}

/// Parse `#RRGGBB` (with or without the hash) into a pixel.
fn parse_hex_color(value: &str) -> Option<Rgba<u8>> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Rgba([r, g, b, 255]))
}

// --- text banner -----------------------------------------------------------

/// Candidate font files for banner text. Rendering degrades to a bare
/// banner when none of them exist (headless CI containers).
const FONT_PATHS: [&str; 4] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
];

fn banner_font() -> Option<&'static fontdue::Font> {
    use std::sync::OnceLock;
    static FONT: OnceLock<Option<fontdue::Font>> = OnceLock::new();
    FONT.get_or_init(|| {
        for path in FONT_PATHS {
            if let Ok(bytes) = std::fs::read(path) {
                if let Ok(font) = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
                {
                    return Some(font);
                }
            }
        }
        tracing::warn!("No banner font found, text renders as a bare band");
        None
    })
    .as_ref()
}

/// Horizontal banner centered on `cy`: card-stock band with the customer
/// text in black.
fn draw_text_banner(canvas: &mut RgbaImage, text: &str, cy: u32) {
    let (w, h) = canvas.dimensions();
    let band_h = (h / 14).max(8);
    let top = cy.saturating_sub(band_h / 2).min(h.saturating_sub(band_h));

    fill_rect(canvas, 0, top, w, band_h, WHITE);
    fill_rect(canvas, 0, top, w, 1, Rgba([212, 175, 55, 255]));
    fill_rect(canvas, 0, top + band_h - 1, w, 1, Rgba([212, 175, 55, 255]));

    let Some(font) = banner_font() else {
        return;
    };

    let px = band_h as f32 * 0.6;
    // Lay out glyphs to learn the total advance, then draw centered.
    let mut advance = 0.0f32;
    for ch in text.chars() {
        advance += font.metrics(ch, px).advance_width;
    }

    let mut x = (w as f32 - advance) / 2.0;
    let baseline = top as f32 + band_h as f32 * 0.75;
    for ch in text.chars() {
        let (metrics, bitmap) = font.rasterize(ch, px);
        let gx = x as i64 + metrics.xmin as i64;
        let gy = baseline as i64 - metrics.height as i64 - metrics.ymin as i64;
        for (row, chunk) in bitmap.chunks(metrics.width.max(1)).enumerate() {
            for (col, &alpha) in chunk.iter().enumerate() {
                if alpha == 0 {
                    continue;
                }
                let (tx, ty) = (gx + col as i64, gy + row as i64);
                if tx >= 0 && ty >= 0 && (tx as u32) < w && (ty as u32) < canvas.height() {
                    let dst = canvas.get_pixel_mut(tx as u32, ty as u32);
                    let a = alpha as f32 / 255.0;
                    for channel in 0..3 {
                        dst.0[channel] = (dst.0[channel] as f32 * (1.0 - a)) as u8;
                    }
                }
            }
        }
        x += metrics.advance_width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardpress_deck_model::{CardStyle, GameKind, Rank, Suit};

    fn sample_card(game: GameKind) -> Card {
        let mut card = Card::new("card-1".to_string(), Suit::Hearts, Rank::Ace, game);
        card.template_image = Some(
            cardpress_deck_model::template_url(
                "https://cdn.example.com/karty",
                game,
                CardStyle::BackAndFace,
                Suit::Hearts,
                Rank::Ace,
            ),
        );
        card
    }

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(rgba))
    }

    #[test]
    fn test_mask_detection_matches_face_and_figure_folders() {
        assert!(is_mask_template(
            "https://cdn.example.com/karty/M1H/RUB_a_LIC_oblicej/m1h_v3_00_kule_7.png"
        ));
        assert!(is_mask_template(
            "https://cdn.example.com/karty/PST2BIG/RUB_a_LIC_figury/p2b_v2_01_srdce_eso.png"
        ));
        assert!(!is_mask_template(
            "https://cdn.example.com/karty/PST2BIG/RUB_a_LIC/p2b_v3_01_srdce_eso.png"
        ));
    }

    #[test]
    fn test_compose_produces_exact_dimensions() {
        let spec = SceneSpec::face(sample_card(GameKind::PokerStandard), 744, 1039, RenderMode::Print);
        let out = compose(&spec, &SceneSources::default());
        assert_eq!(out.dimensions(), (744, 1039));
    }

    #[test]
    fn test_missing_template_degrades_to_placeholder() {
        let spec = SceneSpec::face(sample_card(GameKind::PokerStandard), 100, 140, RenderMode::Print);
        // Sources empty even though the card references a template: the
        // placeholder fill must cover the interior, not white card stock.
        let out = compose(&spec, &SceneSources::default());
        assert_eq!(out.get_pixel(50, 30).0, [229, 231, 235, 255]);
    }

    #[test]
    fn test_template_is_background_for_plain_styles() {
        let spec = SceneSpec::face(sample_card(GameKind::PokerStandard), 100, 140, RenderMode::Print);
        let sources = SceneSources {
            template: Some(solid(10, 14, [0, 128, 0, 255])),
            user: None,
        };
        let out = compose(&spec, &sources);
        assert_eq!(out.get_pixel(50, 70).0, [0, 128, 0, 255]);
    }

    #[test]
    fn test_mask_template_draws_above_user_photo() {
        let mut card = sample_card(GameKind::PokerStandard);
        card.template_image = Some(
            "https://cdn.example.com/karty/PST2BIG/RUB_a_LIC_figury/p2b_v2_01_srdce_eso.png"
                .to_string(),
        );
        card.custom_image = Some("data:image/png;base64,unused".to_string());
        let spec = SceneSpec::face(card, 100, 140, RenderMode::Print);
        let sources = SceneSources {
            template: Some(solid(10, 14, [0, 0, 200, 255])),
            user: Some(solid(10, 14, [200, 0, 0, 255])),
        };
        let out = compose(&spec, &sources);
        // Opaque mask template wins at the center.
        assert_eq!(out.get_pixel(50, 70).0, [0, 0, 200, 255]);
    }

    #[test]
    fn test_double_headed_mirrors_user_photo() {
        let mut card = sample_card(GameKind::MariasDouble);
        card.template_image = None;
        card.custom_image = Some("data:image/png;base64,unused".to_string());
        let spec = SceneSpec::face(card, 100, 140, RenderMode::Print);

        // Top-red, bottom-blue gradient source.
        let mut img = solid(100, 140, [0, 0, 255, 255]);
        for y in 0..70 {
            for x in 0..100 {
                img.put_pixel(x, y, Rgba([255, 0, 0, 255]));
            }
        }
        let sources = SceneSources {
            template: None,
            user: Some(img),
        };
        let out = compose(&spec, &sources);

        // Both outer edges show the top of the photo; the bottom half is
        // the same half rotated 180 degrees.
        assert_eq!(out.get_pixel(50, 5).0, [255, 0, 0, 255]);
        assert_eq!(out.get_pixel(50, 134).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_single_headed_renders_one_unrotated_image() {
        let mut card = sample_card(GameKind::MariasSingle);
        card.template_image = None;
        card.custom_image = Some("data:image/png;base64,unused".to_string());
        let spec = SceneSpec::face(card, 100, 140, RenderMode::Print);

        let mut img = solid(100, 140, [0, 0, 255, 255]);
        for y in 0..70 {
            for x in 0..100 {
                img.put_pixel(x, y, Rgba([255, 0, 0, 255]));
            }
        }
        let sources = SceneSources {
            template: None,
            user: Some(img),
        };
        let out = compose(&spec, &sources);

        assert_eq!(out.get_pixel(50, 5).0, [255, 0, 0, 255]);
        assert_eq!(out.get_pixel(50, 134).0, [0, 0, 255, 255]);
    }

    #[test]
    fn test_back_without_image_fills_fallback_color() {
        let mut back = CardBack::default();
        back.color = "#102030".to_string();
        let context = sample_card(GameKind::PokerStandard);
        let spec = SceneSpec::back(back, context, 100, 140, RenderMode::Print);
        let out = compose(&spec, &SceneSources::default());
        assert_eq!(out.get_pixel(50, 70).0, [16, 32, 48, 255]);
    }

    #[test]
    fn test_print_frame_is_black_hairline() {
        let spec = SceneSpec::face(sample_card(GameKind::PokerStandard), 100, 140, RenderMode::Print);
        let out = compose(&spec, &SceneSources::default());
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(out.get_pixel(99, 139).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#D4AF37"), Some(Rgba([212, 175, 55, 255])));
        assert_eq!(parse_hex_color("102030"), Some(Rgba([16, 32, 48, 255])));
        assert_eq!(parse_hex_color("not-a-color"), None);
    }
}
