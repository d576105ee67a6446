mod gui;
mod sampler;

use gui::HudApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Overlay presentation: dock-type hint, kept above normal windows,
    // chromeless, transparent, absent from taskbar and pager.
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Monitoring HUD")
            .with_inner_size([170.0, 54.0])
            .with_decorations(false)
            .with_resizable(false)
            .with_transparent(true)
            .with_always_on_top()
            .with_taskbar(false)
            .with_active(false)
            .with_window_type(egui::X11WindowType::Dock),
        ..Default::default()
    };

    // Run the GUI application
    eframe::run_native(
        "Monitoring HUD",
        options,
        Box::new(|cc| Box::new(HudApp::new(cc))),
    )
}
