//! Interactive display of rendered figures.

use anyhow::Result;
use egui::{CentralPanel, ColorImage, TextureHandle, TextureOptions};
use tracing::{info, warn};

/// A rendered RGB bitmap ready for display.
#[derive(Clone, Debug)]
pub struct RenderedFrame {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

pub trait PlotViewer {
    /// Whether figures should be rendered for display at all.
    fn enabled(&self) -> bool;

    /// Show one figure. Blocks until the user closes it.
    fn show(&mut self, frame: RenderedFrame) -> Result<()>;
}

/// Discards every figure.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullViewer;

impl PlotViewer for NullViewer {
    fn enabled(&self) -> bool {
        false
    }

    fn show(&mut self, _frame: RenderedFrame) -> Result<()> {
        Ok(())
    }
}

/// Opens one native window per figure. Turns itself off after the first
/// failure to open a window, e.g. on a host without a display server.
#[derive(Debug)]
pub struct WindowViewer {
    available: bool,
}

impl WindowViewer {
    pub fn new() -> Self {
        let available = display_present();
        if !available {
            warn!("no display server found; plots will only be saved");
        }
        Self { available }
    }
}

impl Default for WindowViewer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "linux")]
fn display_present() -> bool {
    std::env::var_os("DISPLAY").is_some() || std::env::var_os("WAYLAND_DISPLAY").is_some()
}

#[cfg(not(target_os = "linux"))]
fn display_present() -> bool {
    true
}

impl PlotViewer for WindowViewer {
    fn enabled(&self) -> bool {
        self.available
    }

    fn show(&mut self, frame: RenderedFrame) -> Result<()> {
        if !self.available {
            return Ok(());
        }
        info!(title = %frame.title, "showing plot; close the window to continue");

        let native_options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(frame.title.clone())
                .with_inner_size([frame.width as f32, frame.height as f32]),
            ..Default::default()
        };
        let app_name = frame.title.clone();
        let result = eframe::run_native(
            &app_name,
            native_options,
            Box::new(|_cc| Ok(Box::new(FigureWindow::new(frame)))),
        );
        if let Err(err) = result {
            warn!(error = %err, "failed to open plot window; display disabled");
            self.available = false;
        }
        Ok(())
    }
}

struct FigureWindow {
    frame: RenderedFrame,
    texture: Option<TextureHandle>,
}

impl FigureWindow {
    fn new(frame: RenderedFrame) -> Self {
        Self {
            frame,
            texture: None,
        }
    }
}

impl eframe::App for FigureWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let figure = &self.frame;
        let texture = self.texture.get_or_insert_with(|| {
            let image = ColorImage::from_rgb(
                [figure.width as usize, figure.height as usize],
                &figure.rgb,
            );
            ctx.load_texture("figure", image, TextureOptions::LINEAR)
        });

        CentralPanel::default().show(ctx, |ui| {
            ui.image((texture.id(), texture.size_vec2()));
        });
    }
}
