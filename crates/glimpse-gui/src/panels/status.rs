use crate::app::GlimpseApp;

pub fn show(ctx: &egui::Context, app: &mut GlimpseApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Status line
        ui.horizontal(|ui| {
            ui.label(app.ui_state.status_label());
            ui.separator();
            ui.label(format!("Steps: {}", app.ui_state.steps_run));
            if app.ui_state.steps_failed > 0 {
                ui.separator();
                ui.colored_label(
                    egui::Color32::from_rgb(220, 80, 80),
                    format!("Failed: {}", app.ui_state.steps_failed),
                );
            }
        });

        ui.add_space(2.0);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .stick_to_bottom(true)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    show_placeholder(ui);
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });
    });
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new("Send steps on stdin: open <path>, close, teardown")
                .size(14.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
