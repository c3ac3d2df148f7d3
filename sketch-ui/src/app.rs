// Immediate-mode drawing widget: toolbar, canvas area, brush cursor,
// shortcuts and toasts around a single DrawingSurface.

use chrono::Utc;
use egui::{
    Align2, Color32, ColorImage, CursorIcon, Id, Margin, Pos2, Rect, RichText, Sense, Stroke,
    TextureHandle, TextureOptions, Ui,
};
use sketch_io::SketchConfig;
use tracing::{error, info};

use crate::editor::input::{canvas_len_to_screen, to_canvas_coords};
use crate::editor::DrawingSurface;
use crate::notify::{Notifications, ToastKind};
use crate::shortcuts::{self, Shortcut};

/// The drawing widget. Owns the surface once the first frame has sized it.
pub struct SketchApp {
    config: SketchConfig,
    surface: Option<DrawingSurface>,
    notifications: Notifications,
    texture: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
    canvas_rect: Option<Rect>,
    confirm_clear: bool,
    creation_failed: bool,
}

impl SketchApp {
    pub fn new(config: SketchConfig) -> Self {
        info!("sketch widget created");
        Self {
            notifications: Notifications::new(&config.notifications),
            config,
            surface: None,
            texture: None,
            uploaded_revision: None,
            canvas_rect: None,
            confirm_clear: false,
            creation_failed: false,
        }
    }

    pub fn surface(&self) -> Option<&DrawingSurface> {
        self.surface.as_ref()
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Screen rect the canvas occupied in the last frame.
    pub fn canvas_rect(&self) -> Option<Rect> {
        self.canvas_rect
    }

    /// Show the widget filling the central panel.
    pub fn show(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| self.ui(ui));
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        let now = ui.input(|i| i.time);

        self.fit_surface(ui);
        if self.surface.is_none() {
            ui.colored_label(Color32::RED, "Drawing surface could not be created");
            return;
        }

        self.handle_shortcuts(ui, now);
        self.toolbar(ui, now);
        ui.separator();
        self.canvas_area(ui);
        self.clear_dialog(ui.ctx());
        self.toasts(ui.ctx(), now);
    }

    // Create the surface on first layout; refit it when the viewport changes.
    fn fit_surface(&mut self, ui: &Ui) {
        let container_width = ui.available_width().max(0.0) as u32;
        let viewport_height = ui
            .input(|i| i.viewport().inner_rect)
            .map(|r| r.height())
            .unwrap_or_else(|| ui.available_height())
            .max(0.0) as u32;
        let (width, height) = self.config.canvas.fit(container_width, viewport_height);

        match self.surface.as_mut() {
            Some(surface) => {
                if !surface.is_drawing() && surface.resize(width, height) {
                    info!(width, height, "canvas refitted to viewport");
                }
            }
            None if self.creation_failed => {}
            None => match DrawingSurface::new(width, height, self.config.clone()) {
                Ok(surface) => self.surface = Some(surface),
                Err(err) => {
                    error!("failed to create drawing surface: {:#}", err);
                    self.creation_failed = true;
                }
            },
        }
    }

    fn handle_shortcuts(&mut self, ui: &Ui, now: f64) {
        if ui.ctx().wants_keyboard_input() {
            return;
        }
        for shortcut in ui.input(shortcuts::collect) {
            self.dispatch(shortcut, now);
        }
    }

    fn dispatch(&mut self, shortcut: Shortcut, now: f64) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        match shortcut {
            Shortcut::Save => self.save(now),
            Shortcut::Clear => self.confirm_clear = true,
            Shortcut::CancelStroke => {
                surface.cancel_stroke();
            }
            Shortcut::Undo => {
                surface.undo();
            }
            Shortcut::Redo => {
                surface.redo();
            }
        }
    }

    fn save(&mut self, now: f64) {
        let Some(surface) = self.surface.as_ref() else {
            return;
        };
        match surface.export_png_to_dir(Utc::now()) {
            Ok(path) => {
                info!(path = %path.display(), "drawing saved");
                self.notifications.success("Drawing saved!", now);
            }
            Err(err) => {
                error!("saving drawing failed: {}", err);
                self.notifications
                    .error("Could not save the drawing. Please try again.", now);
            }
        }
    }

    fn toolbar(&mut self, ui: &mut Ui, now: f64) {
        let mut save_clicked = false;
        let mut eraser_toggled = None;

        if let Some(surface) = self.surface.as_mut() {
            let availability = surface.availability();
            let brush_limits = surface.config().brush;

            ui.horizontal(|ui| {
                let [r, g, b, _] = surface.brush_color().to_srgba_unmultiplied();
                let mut rgb = [r, g, b];
                if ui.color_edit_button_srgb(&mut rgb).changed() {
                    surface.set_brush_color(Color32::from_rgb(rgb[0], rgb[1], rgb[2]));
                }

                let mut size = surface.brush_size();
                let slider = egui::Slider::new(&mut size, brush_limits.min_size..=brush_limits.max_size)
                    .text("Size")
                    .suffix(" px");
                if ui.add(slider).changed() {
                    surface.set_brush_size(size);
                }

                let mut eraser = surface.is_eraser();
                if ui.toggle_value(&mut eraser, "Eraser").clicked() {
                    eraser_toggled = Some(surface.toggle_eraser());
                }

                ui.separator();

                if ui
                    .add_enabled(availability.can_undo, egui::Button::new("Undo"))
                    .on_hover_text("Ctrl+Z")
                    .clicked()
                {
                    surface.undo();
                }
                if ui
                    .add_enabled(availability.can_redo, egui::Button::new("Redo"))
                    .on_hover_text("Ctrl+Y")
                    .clicked()
                {
                    surface.redo();
                }

                ui.separator();

                if ui.button("Clear").on_hover_text("Delete").clicked() {
                    self.confirm_clear = true;
                }
                if ui.button("Save PNG").on_hover_text("Ctrl+S").clicked() {
                    save_clicked = true;
                }
            });
        }

        match eraser_toggled {
            Some(true) => self.notifications.info("Eraser enabled", now),
            Some(false) => self.notifications.info("Eraser disabled", now),
            None => {}
        }
        if save_clicked {
            self.save(now);
        }
    }

    fn canvas_area(&mut self, ui: &mut Ui) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let (width, height) = (surface.canvas().width(), surface.canvas().height());

        if self.uploaded_revision != Some(surface.revision()) || self.texture.is_none() {
            let image = ColorImage::from_rgba_unmultiplied(
                [width as usize, height as usize],
                &surface.canvas().to_rgba_bytes(),
            );
            match self.texture.as_mut() {
                Some(texture) => texture.set(image, TextureOptions::NEAREST),
                None => {
                    self.texture =
                        Some(ui.ctx().load_texture("sketch_canvas", image, TextureOptions::NEAREST));
                }
            }
            self.uploaded_revision = Some(surface.revision());
        }

        let (response, painter) =
            ui.allocate_painter(egui::vec2(width as f32, height as f32), Sense::click_and_drag());
        let rect = response.rect;
        self.canvas_rect = Some(rect);

        painter.rect_filled(rect, 0.0, Color32::from_gray(220));
        if let Some(texture) = self.texture.as_ref() {
            let uv = Rect::from_min_max(Pos2::ZERO, egui::pos2(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }

        let (hover, pressed, released) = ui.input(|i| {
            (
                i.pointer.hover_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
            )
        });
        let inside = hover.filter(|p| rect.contains(*p));

        if let Some(pos) = inside {
            let (x, y) = to_canvas_coords(pos, rect, (width, height));
            if pressed && response.hovered() {
                surface.pointer_down(x, y);
            } else if surface.is_drawing() {
                surface.pointer_move(x, y);
            }
        }
        if surface.is_drawing() && (released || inside.is_none()) {
            surface.pointer_up();
        }

        // Brush-sized cursor outline replaces the OS pointer over the canvas.
        if let Some(pos) = inside {
            let radius = canvas_len_to_screen(surface.cursor_size() as f32, rect, width) / 2.0;
            let outline = if surface.is_eraser() {
                Color32::GRAY
            } else {
                surface.brush_color()
            };
            painter.circle_stroke(pos, radius.max(1.0), Stroke::new(1.0, outline));
            ui.ctx().set_cursor_icon(CursorIcon::None);
        }
    }

    fn clear_dialog(&mut self, ctx: &egui::Context) {
        if !self.confirm_clear {
            return;
        }
        let mut decided = None;
        egui::Window::new("Clear drawing?")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Are you sure you want to erase the whole drawing?");
                ui.horizontal(|ui| {
                    if ui.button("Clear").clicked() {
                        decided = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        decided = Some(false);
                    }
                });
            });

        match decided {
            Some(true) => {
                if let Some(surface) = self.surface.as_mut() {
                    surface.clear();
                    info!("canvas cleared");
                }
                self.confirm_clear = false;
            }
            Some(false) => self.confirm_clear = false,
            None => {}
        }
    }

    fn toasts(&mut self, ctx: &egui::Context, now: f64) {
        self.notifications.prune(now);
        if self.notifications.is_empty() {
            return;
        }

        egui::Area::new(Id::new("sketch_toasts"))
            .anchor(Align2::RIGHT_TOP, [-20.0, 20.0])
            .show(ctx, |ui| {
                for toast in self.notifications.active(now) {
                    let opacity = self.notifications.opacity(toast, now);
                    let fill = match toast.kind {
                        ToastKind::Success => Color32::from_rgb(64, 192, 87),
                        ToastKind::Error => Color32::from_rgb(238, 90, 82),
                        ToastKind::Info => Color32::from_rgb(102, 126, 234),
                    };
                    egui::Frame::new()
                        .fill(fill.gamma_multiply(opacity))
                        .corner_radius(8.0)
                        .inner_margin(Margin::symmetric(20, 15))
                        .show(ui, |ui| {
                            ui.label(
                                RichText::new(&toast.message)
                                    .strong()
                                    .color(Color32::WHITE.gamma_multiply(opacity)),
                            );
                        });
                }
            });

        // Keep repainting so the fade animates and expired toasts go away.
        ctx.request_repaint();
    }
}

impl Default for SketchApp {
    fn default() -> Self {
        Self::new(SketchConfig::default())
    }
}

impl std::fmt::Debug for SketchApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SketchApp")
            .field("surface", &self.surface.is_some())
            .field("confirm_clear", &self.confirm_clear)
            .field("creation_failed", &self.creation_failed)
            .field("toasts", &self.notifications.len())
            .finish()
    }
}
