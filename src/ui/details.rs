use egui::{RichText, Ui};
use shopfloor_gantt::model::{Instant, Schedule};
use uuid::Uuid;

use crate::ui::{theme, tooltip};

/// Actions the details sidebar can request.
pub enum DetailsAction {
    None,
    Select(Uuid),
    /// Bring this instant to the centre of the chart.
    Focus(Instant),
}

/// Render the right-hand sidebar: machines, their jobs, and the selection.
pub fn show_details(schedule: &Schedule, selected_job: Option<Uuid>, ui: &mut Ui) -> DetailsAction {
    let mut action = DetailsAction::None;

    if let Some((lane, job)) = selected_job.and_then(|id| schedule.find_job(id)) {
        ui.label(RichText::new(&job.name).strong().size(15.0));
        ui.label(RichText::new(&lane.machine).color(theme::TEXT_SECONDARY));
        ui.add_space(4.0);
        egui::Grid::new("job_details").num_columns(2).show(ui, |ui| {
            ui.label("Start");
            ui.label(job.span.start().format("%Y-%m-%d %H:%M").to_string());
            ui.end_row();
            ui.label("End");
            ui.label(job.span.end().format("%Y-%m-%d %H:%M").to_string());
            ui.end_row();
            ui.label("Duration");
            ui.label(tooltip::format_duration(job.span.duration()));
            ui.end_row();
        });
        if ui.button("Show in timeline").clicked() {
            action = DetailsAction::Focus(job.span.start() + job.span.duration() / 2);
        }
        ui.separator();
    }

    ui.horizontal(|ui| {
        ui.label(RichText::new("Machines").strong().size(14.0));
        ui.label(
            RichText::new(format!("({})", schedule.lanes.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });

    egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        for (i, lane) in schedule.lanes.iter().enumerate() {
            egui::CollapsingHeader::new(
                RichText::new(format!("{}  ·  {} jobs", lane.machine, lane.jobs.len()))
                    .color(theme::lane_color(i)),
            )
            .id_salt(("lane", i))
            .show(ui, |ui| {
                for job in &lane.jobs {
                    let selected = selected_job == Some(job.id);
                    if ui.selectable_label(selected, &job.name).clicked() {
                        action = DetailsAction::Select(job.id);
                    }
                }
            });
        }
    });

    action
}
