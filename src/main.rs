use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use marchbot::config::AppConfig;
use marchbot::palette::Palette;
use marchbot::render::fonts::FontBook;
use marchbot::render::Renderer;
use marchbot::{calendar, tweet};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Logging to stderr so the tweet text on stdout stays clean.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage();
        return Ok(());
    }

    // ── march palettes ────────────────────────────────────────────────────────
    if args.first().map(String::as_str) == Some("palettes") {
        for p in Palette::all_palettes() {
            println!("{}", p.name);
        }
        return Ok(());
    }

    // ── march [DATE] [--out PATH] [--palette NAME] ────────────────────────────
    let mut day = chrono::Local::now().date_naive();
    let mut out: Option<PathBuf> = None;
    let mut palette_name: Option<String> = None;

    let mut it = args.iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--out" => {
                let path = it.next().ok_or_else(|| anyhow!("--out needs a path"))?;
                out = Some(PathBuf::from(path));
            }
            "--palette" => {
                let name = it.next().ok_or_else(|| anyhow!("--palette needs a name"))?;
                palette_name = Some(name.clone());
            }
            other => {
                day = NaiveDate::parse_from_str(other, "%Y-%m-%d")
                    .with_context(|| format!("not a YYYY-MM-DD date: {other}"))?;
            }
        }
    }

    let cfg = AppConfig::load()?;

    let palette = match palette_name.or_else(|| cfg.palette.clone()) {
        Some(name) => Palette::named(&name).ok_or_else(|| {
            anyhow!("unknown palette: {name}. Run  march palettes  to list them.")
        })?,
        None => Palette::load().unwrap_or_default(),
    };

    let fonts = FontBook::load(cfg.fonts.as_ref())?;
    let renderer = Renderer::new(fonts, palette);

    tracing::info!(%day, dom = calendar::reference(day), "rendering the endless March");
    let sheet = renderer.draw_calendars(day);

    let path = output_path(out, &cfg, day);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    sheet
        .save(&path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "sheet written");

    println!("{}", tweet::build_tweet(day));
    Ok(())
}

fn output_path(out: Option<PathBuf>, cfg: &AppConfig, day: NaiveDate) -> PathBuf {
    if let Some(path) = out {
        return path;
    }
    let dir = cfg
        .output
        .as_ref()
        .and_then(|o| o.dir.clone())
        .unwrap_or_else(std::env::temp_dir);
    dir.join(format!("march2020-{}.png", calendar::reference(day)))
}

fn print_usage() {
    println!(
        "march — renders a sheet of the endless March 2020\n\
         \n\
         Usage:\n\
         \x20 march [DATE] [--out PATH] [--palette NAME]   render (DATE defaults to today)\n\
         \x20 march palettes                               list built-in palettes\n\
         \n\
         DATE is YYYY-MM-DD. The PNG lands at --out, else in the configured\n\
         output dir, else the system temp dir. The matching tweet text is\n\
         printed to stdout."
    );
}
