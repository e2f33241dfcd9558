use anyhow::Result;
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub fn hex_to_rgb(hex: &str) -> Rgb<u8> {
    let h = hex.trim_start_matches('#');
    if h.len() != 6 { return Rgb([0, 0, 0]); }
    let r = u8::from_str_radix(&h[0..2], 16).unwrap_or(0);
    let g = u8::from_str_radix(&h[2..4], 16).unwrap_or(0);
    let b = u8::from_str_radix(&h[4..6], 16).unwrap_or(0);
    Rgb([r, g, b])
}

/// Colors for one rendered calendar sheet, stored as hex strings so they
/// round-trip through TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    /// Canvas fill.
    pub background: String,
    /// Month titles ("March 2020", "Previous March 2020", ...).
    pub title: String,
    /// Ordinary day numbers.
    pub workday: String,
    /// Weekend columns and the weekday header edges.
    pub holiday: String,
    /// Ring around the current day.
    pub circle: String,
}

impl Palette {
    // ── Color accessors ───────────────────────────────────────────────────────
    pub fn background(&self) -> Rgb<u8> { hex_to_rgb(&self.background) }
    pub fn title(&self)      -> Rgb<u8> { hex_to_rgb(&self.title) }
    pub fn workday(&self)    -> Rgb<u8> { hex_to_rgb(&self.workday) }
    pub fn holiday(&self)    -> Rgb<u8> { hex_to_rgb(&self.holiday) }
    pub fn circle(&self)     -> Rgb<u8> { hex_to_rgb(&self.circle) }

    // ── Persistence ───────────────────────────────────────────────────────────
    pub fn load() -> Result<Self> {
        let path = config_dir().join("palette.toml");
        if path.exists() {
            Ok(toml::from_str(&std::fs::read_to_string(&path)?)?)
        } else {
            let p = Palette::default();
            p.save()?;
            Ok(p)
        }
    }

    pub fn save(&self) -> Result<()> {
        let dir = config_dir();
        std::fs::create_dir_all(&dir)?;
        std::fs::write(dir.join("palette.toml"), toml::to_string_pretty(self)?)?;
        Ok(())
    }

    // ── Palette catalogue ─────────────────────────────────────────────────────
    pub fn all_palettes() -> Vec<Palette> {
        vec![
            Palette::default(), // the classic green sheet
            Palette::midnight(),
            Palette::paper(),
        ]
    }

    pub fn named(name: &str) -> Option<Palette> {
        Palette::all_palettes().into_iter().find(|p| p.name == name)
    }

    // ── Built-in palettes ─────────────────────────────────────────────────────

    /// Dark variant for feeds that frown at neon green.
    pub fn midnight() -> Self { Self {
        name: "midnight".into(),
        background: "#1e1e2e".into(),
        title:      "#cba6f7".into(),
        workday:    "#cdd6f4".into(),
        holiday:    "#f38ba8".into(),
        circle:     "#89b4fa".into(),
    }}

    /// Print-friendly: black on white, red weekends.
    pub fn paper() -> Self { Self {
        name: "paper".into(),
        background: "#ffffff".into(),
        title:      "#333333".into(),
        workday:    "#000000".into(),
        holiday:    "#cc0000".into(),
        circle:     "#2244cc".into(),
    }}
}

impl Default for Palette {
    fn default() -> Self { Self {
        name: "classic".into(),
        background: "#80ff80".into(),
        title:      "#800080".into(),
        workday:    "#000000".into(),
        holiday:    "#800000".into(),
        circle:     "#4040ff".into(),
    }}
}

fn config_dir() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("marchbot")
}
