use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use raylib::prelude::*;

use slides::config::{DeckConfig, DeckKind};
use slides::constants::*;
use slides::engine::Engine;
use slides::error::DeckError;
use slides::inline::engine::InlineEngine;
use slides::inline::page::load_page;
use slides::input;
use slides::remote::engine::RemoteEngine;
use slides::remote::loader::{FileFetcher, load_slides};
use slides::slide::Slide;

/// Present a slide deck described by a deck file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Deck file (TOML); locators and pages resolve relative to it
    deck: PathBuf,

    /// One-based slide to open on, overriding the deck file
    #[arg(short, long)]
    start: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let mut config = DeckConfig::load(&cli.deck)?;
    if let Some(start) = cli.start {
        config.start_slide = start;
    }
    let base = cli.deck.parent().unwrap_or(Path::new(".")).to_path_buf();

    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH / 2, RENDER_HEIGHT / 2)
        .title(&config.title)
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- Load Slides ---
    let slides = match load_deck(&config, &base) {
        Ok(slides) => slides,
        Err(e) => {
            log::error!("{:#}", e);
            show_error(&mut rl, &thread, &format!("Error: {}", e));
            return Err(e);
        }
    };

    if slides.is_empty() {
        log::error!("No slides were created successfully.");
        show_error(&mut rl, &thread, "Error: No slides loaded.");
        return Err(DeckError::Empty.into());
    }

    let start = config.start_index().min(slides.len() - 1);
    let mut engine: Box<dyn Engine> = match config.kind {
        DeckKind::Remote => {
            let source = slides[start].source().unwrap_or("?").to_string();
            log::info!("Presentation started from slide {} ({})", start + 1, source);
            log::info!("Navigation: Arrow keys, Space, Home/End");
            log::info!("Mouse: drag left/right to swipe, or click the footer controls");
            Box::new(RemoteEngine::new(config.title.clone(), slides, start)?)
        }
        DeckKind::Inline => {
            log::info!("Presentation started from slide {}", start + 1);
            log::info!("Navigation: Left/Right arrows, Space, footer controls; click tabs to switch examples");
            Box::new(InlineEngine::new(config.title.clone(), slides, start)?)
        }
    };

    let mut framebuffer = rl
        .load_render_texture(&thread, RENDER_WIDTH as u32, RENDER_HEIGHT as u32)
        .map_err(|e| anyhow::anyhow!("Failed to create render texture: {:?}", e))?;

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = FRAME_TIME;

        let input = input::poll(&mut rl);
        engine.handle_input(&input);
        engine.update(dt);

        // --- Render each frame into fixed size "framebuffer" ---
        rl.draw_texture_mode(&thread, &mut framebuffer, |mut tmd| {
            let mut d = tmd.begin_drawing(&thread);
            engine.draw(&mut d);
        });

        // Draw the framebuffer (stored upside down) scaled to the window
        let mut d = rl.begin_drawing(&thread);
        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;
        d.clear_background(BACKGROUND);
        d.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }

    Ok(())
}

/// Builds the deck's slides: sequential loading for remote decks, page
/// extraction for inline ones. A partial remote load still yields slides.
fn load_deck(config: &DeckConfig, base: &Path) -> Result<Vec<Slide>> {
    match config.kind {
        DeckKind::Remote => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .context("Failed to start loader runtime")?;
            let fetcher = FileFetcher::new(base);
            let mut slides = Vec::new();
            let report = runtime.block_on(load_slides(&config.locators, &fetcher, &mut slides));
            if !report.is_complete() {
                log::warn!("Showing the {} slide(s) loaded before the failure", slides.len());
            }
            if !report.skipped.is_empty() {
                log::warn!("Skipped {} locator(s) without a slide", report.skipped.len());
            }
            Ok(slides)
        }
        DeckKind::Inline => {
            // presence is checked when the deck file is parsed
            let page = config.page.as_deref().unwrap_or_default();
            load_page(&base.join(page))
        }
    }
}

fn show_error(rl: &mut RaylibHandle, thread: &RaylibThread, message: &str) {
    let mut d = rl.begin_drawing(thread);
    d.clear_background(Color::BLACK);
    d.draw_text(message, 20, 20, 20, Color::RED);
    drop(d);
    std::thread::sleep(Duration::from_secs(5));
}
