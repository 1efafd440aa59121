use egui::{Color32, Context, RichText};
use glam::Vec3;
use crate::model::Camera;

pub const FPS_HISTORY_SIZE: usize = 100;

/// Upper bound of the FPS graph's y axis
const FPS_GRAPH_MAX: f32 = 200.0;

/// F3-style debug panel state. Hidden until toggled.
#[derive(Debug, Clone)]
pub struct DebugOverlay {
    visible: bool,
    fps_history: [f32; FPS_HISTORY_SIZE],
    history_index: usize,
}

impl Default for DebugOverlay {
    fn default() -> Self {
        Self {
            visible: false,
            fps_history: [0.0; FPS_HISTORY_SIZE],
            history_index: 0,
        }
    }
}

impl DebugOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
        tracing::debug!(visible = self.visible, "debug overlay toggled");
    }

    /// Samples are only recorded while the panel is shown.
    pub fn record_frame(&mut self, dt: f32) {
        if !self.visible {
            return;
        }
        self.fps_history[self.history_index] = fps_from_dt(dt);
        self.history_index = (self.history_index + 1) % FPS_HISTORY_SIZE;
    }

    /// Ring buffer contents, oldest sample first
    pub fn fps_history(&self) -> Vec<f32> {
        let (newer, older) = self.fps_history.split_at(self.history_index);
        older.iter().chain(newer).copied().collect()
    }

    pub fn average_fps(&self) -> f32 {
        self.fps_history.iter().sum::<f32>() / FPS_HISTORY_SIZE as f32
    }
}

/// Read-only snapshot of what the panel displays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugStats {
    pub frame_time: f32,
    pub fps: f32,
    pub position: Vec3,
    pub fov: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl DebugStats {
    pub fn capture(camera: &Camera, dt: f32) -> Self {
        Self {
            frame_time: dt,
            fps: fps_from_dt(dt),
            position: camera.position,
            fov: camera.fov(),
            yaw: camera.yaw(),
            pitch: camera.pitch(),
        }
    }

    /// One-line summary, used for the window title
    pub fn summary(&self) -> String {
        format!(
            "FPS {:.0} | X {:.2} Y {:.2} Z {:.2} | FOV {:.0}",
            self.fps, self.position.x, self.position.y, self.position.z, self.fov
        )
    }
}

fn fps_from_dt(dt: f32) -> f32 {
    if dt > 0.0 { 1.0 / dt } else { 0.0 }
}

/// Build the overlay UI and return egui output. Painting the output is left
/// to the renderer.
pub fn build_ui(
    egui_ctx: &Context,
    raw_input: egui::RawInput,
    overlay: &DebugOverlay,
    stats: &DebugStats,
) -> egui::FullOutput {
    egui_ctx.run(raw_input, |ctx| {
        if overlay.is_visible() {
            draw_debug_window(ctx, overlay, stats);
        }
    })
}

fn draw_debug_window(ctx: &Context, overlay: &DebugOverlay, stats: &DebugStats) {
    egui::Window::new("Debug Info [F3]")
        .fixed_pos([10.0, 10.0])
        .default_width(300.0)
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.label(RichText::new("[ Performance ]").color(Color32::YELLOW));
            ui.label(format!("FPS:        {:.1}", stats.fps));
            ui.label(format!("Frame time: {:.3} ms", stats.frame_time * 1000.0));
            ui.label(format!("Average:    {:.1}", overlay.average_fps()));
            draw_fps_graph(ui, &overlay.fps_history());
            ui.separator();

            ui.label(RichText::new("[ Camera ]").color(Color32::from_rgb(0, 255, 255)));
            ui.label(format!("X: {:.2}", stats.position.x));
            ui.label(format!("Y: {:.2}", stats.position.y));
            ui.label(format!("Z: {:.2}", stats.position.z));
            ui.label(format!("FOV: {:.1}", stats.fov));
            ui.label(format!("Yaw: {:.1} Pitch: {:.1}", stats.yaw, stats.pitch));
            ui.separator();

            ui.label(RichText::new("[ Controls ]").color(Color32::LIGHT_GRAY));
            ui.label("WASD    - Move");
            ui.label("Mouse   - Look");
            ui.label("Scroll  - Zoom");
            ui.label("F3      - Toggle debug");
            ui.label("ESC     - Quit");
        });
}

fn draw_fps_graph(ui: &mut egui::Ui, history: &[f32]) {
    let size = egui::vec2(ui.available_width(), 50.0);
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, Color32::from_black_alpha(96));

    if history.len() < 2 {
        return;
    }
    let step = rect.width() / (history.len() - 1) as f32;
    let points = history
        .iter()
        .enumerate()
        .map(|(i, fps)| {
            let t = (fps / FPS_GRAPH_MAX).clamp(0.0, 1.0);
            egui::pos2(rect.left() + i as f32 * step, rect.bottom() - t * rect.height())
        })
        .collect();
    painter.add(egui::Shape::line(points, egui::Stroke::new(1.0, Color32::LIGHT_GREEN)));
}
