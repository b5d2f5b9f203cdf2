use crate::app::SchedulerApp;
use egui::{menu, Button, RichText, Ui};

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut SchedulerApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button("  File  ", |ui| {
            if ui.button("  Open schedule...   Ctrl+O").clicked() {
                app.open_schedule();
                ui.close_menu();
            }
        });

        ui.menu_button("  View  ", |ui| {
            let mut show_minimap = app.prefs.get().show_minimap;
            if ui.checkbox(&mut show_minimap, "Overview strip").changed() {
                app.prefs.update(|p| p.show_minimap = show_minimap);
            }
            let mut show_tooltips = app.prefs.get().show_tooltips;
            if ui.checkbox(&mut show_tooltips, "Job tooltips").changed() {
                app.prefs.update(|p| p.show_tooltips = show_tooltips);
            }
        });

        ui.separator();

        let has_view = app.viewport.is_some();
        if ui
            .add_enabled(app.nav_history.can_undo(), Button::new("◀ Back"))
            .clicked()
        {
            app.back();
        }
        if ui
            .add_enabled(app.nav_history.can_redo(), Button::new("Forward ▶"))
            .clicked()
        {
            app.forward();
        }
        if ui.add_enabled(has_view, Button::new("Fit")).clicked() {
            app.fit_all();
        }
        if ui.add_enabled(has_view, Button::new("+")).clicked() {
            app.zoom_center(1.5);
        }
        if ui.add_enabled(has_view, Button::new("-")).clicked() {
            app.zoom_center(1.0 / 1.5);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(&app.schedule.name).size(11.0).weak());
        });
    });
}
