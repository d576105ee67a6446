use std::time::{Duration, Instant};

use egui::{Color32, RichText, ViewportCommand};

use crate::sampler::{CpuSampler, MemorySampler};

/// Distance between the window and the monitor's top-right corner.
const EDGE_MARGIN: f32 = 10.0;

/// Cadence of the sample -> format -> display cycle.
const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Alpha applied to the readout text; the window itself stays transparent.
const OVERLAY_OPACITY: f32 = 0.85;

/// Point size of the monospace readout.
const READOUT_FONT_SIZE: f32 = 15.0;

/// Overlay state: the two samplers and the rendered readout.
pub struct HudApp {
    cpu: CpuSampler,
    memory: MemorySampler,
    readout: String,
    last_sample: Instant,
    last_size: Option<egui::Vec2>,
}

impl HudApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = HudApp {
            cpu: CpuSampler::new(),
            memory: MemorySampler::new(),
            readout: String::new(),
            last_sample: Instant::now(),
            last_size: None,
        };
        // First readout before the first tick elapses
        app.refresh_readout();
        app
    }

    /// Sample both sources and rebuild the displayed text.
    fn refresh_readout(&mut self) {
        let cpu = self.cpu.sample();
        let memory = self.memory.sample();
        self.readout = format_readout(cpu, memory);
        self.last_sample = Instant::now();
    }

    /// Move the window to the monitor's top-right corner whenever its outer
    /// size changes, including the frame where the size first becomes known.
    fn pin_to_corner(&mut self, ctx: &egui::Context) {
        let (outer_rect, monitor_size) =
            ctx.input(|i| (i.viewport().outer_rect, i.viewport().monitor_size));
        let (Some(outer_rect), Some(monitor_size)) = (outer_rect, monitor_size) else {
            return;
        };
        if self.last_size == Some(outer_rect.size()) {
            return;
        }
        self.last_size = Some(outer_rect.size());

        let corner = egui::pos2(
            monitor_size.x - outer_rect.width() - EDGE_MARGIN,
            EDGE_MARGIN,
        );
        ctx.send_viewport_cmd(ViewportCommand::OuterPosition(corner));
    }
}

/// Two-line human-readable readout, one decimal place per metric.
fn format_readout(cpu: f64, memory: f64) -> String {
    format!("💻 CPU: {cpu:.1}%\n🧠 RAM: {memory:.1}%")
}

impl eframe::App for HudApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.last_sample.elapsed() >= SAMPLE_INTERVAL {
            self.refresh_readout();
        }
        ctx.request_repaint_after(SAMPLE_INTERVAL);

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(&self.readout)
                        .monospace()
                        .size(READOUT_FONT_SIZE)
                        .color(Color32::WHITE.gamma_multiply(OVERLAY_OPACITY)),
                );
            });

        self.pin_to_corner(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::format_readout;

    #[test]
    fn readout_has_one_decimal_per_metric() {
        assert_eq!(
            format_readout(12.34, 56.78),
            "💻 CPU: 12.3%\n🧠 RAM: 56.8%"
        );
    }

    #[test]
    fn readout_renders_idle_system() {
        assert_eq!(format_readout(0.0, 0.0), "💻 CPU: 0.0%\n🧠 RAM: 0.0%");
    }
}
