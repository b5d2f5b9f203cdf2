use std::path::{Path, PathBuf};

use shopfloor_gantt::io::import_csv;
use shopfloor_gantt::layout::PlacementConfig;
use shopfloor_gantt::model::{History, Instant, Schedule, TimeDomain, Viewport};
use shopfloor_gantt::prefs::PreferenceStore;
use tracing::{info, warn};
use uuid::Uuid;

use crate::ui;

/// Main application state.
pub struct SchedulerApp {
    pub schedule: Schedule,
    pub domain: Option<TimeDomain>,
    pub viewport: Option<Viewport>,
    pub nav_history: History<Viewport>,
    pub prefs: PreferenceStore,
    pub selected_job: Option<Uuid>,
    pub status_message: String,
}

impl SchedulerApp {
    pub fn new(initial: Option<PathBuf>) -> Self {
        let mut prefs = PreferenceStore::default_path()
            .map(PreferenceStore::load)
            .unwrap_or_else(PreferenceStore::in_memory);
        prefs.subscribe(|p| info!(?p, "preferences changed"));

        let mut app = Self {
            schedule: Schedule::new("No schedule"),
            domain: None,
            viewport: None,
            nav_history: History::new(),
            prefs,
            selected_job: None,
            status_message: "Open a schedule CSV to begin (Ctrl+O)".to_string(),
        };
        if let Some(path) = initial {
            app.load_schedule(&path);
        }
        app
    }

    // --- File operations ---

    pub fn open_schedule(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Schedule CSV", &["csv", "txt", "tsv"])
            .pick_file()
        {
            self.load_schedule(&path);
        }
    }

    pub fn load_schedule(&mut self, path: &Path) {
        match import_csv(path) {
            Ok(report) => {
                let jobs = report.schedule.job_count();
                let machines = report.schedule.lanes.len();
                info!(path = %path.display(), jobs, machines, skipped = report.skipped, "schedule loaded");

                self.domain = report.schedule.domain();
                self.viewport = self.domain.as_ref().map(Viewport::full);
                self.schedule = report.schedule;
                self.selected_job = None;
                self.nav_history.clear();
                self.status_message = if report.skipped > 0 {
                    format!("Loaded {jobs} jobs on {machines} machines ({} rows skipped)", report.skipped)
                } else {
                    format!("Loaded {jobs} jobs on {machines} machines")
                };
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "schedule import failed");
                self.status_message = format!("Import failed: {e}");
            }
        }
    }

    // --- Navigation ---

    /// Move to `next`, recording the current view when `record` is set.
    fn navigate(&mut self, next: Viewport, record: bool) {
        let Some(current) = self.viewport else {
            return;
        };
        if next == current {
            return;
        }
        if record {
            self.nav_history.push(current);
        }
        self.viewport = Some(next);
    }

    pub fn recenter(&mut self, at: Instant, record: bool) {
        if let (Some(vp), Some(domain)) = (self.viewport, self.domain) {
            self.navigate(vp.recenter(at, &domain), record);
        }
    }

    pub fn zoom_at(&mut self, anchor: Instant, factor: f32) {
        if let (Some(vp), Some(domain)) = (self.viewport, self.domain) {
            self.navigate(vp.zoom_at(anchor, factor, &domain), false);
        }
    }

    pub fn zoom_center(&mut self, factor: f32) {
        if let (Some(vp), Some(domain)) = (self.viewport, self.domain) {
            self.navigate(vp.zoom_at(vp.center(), factor, &domain), true);
        }
    }

    pub fn fit_all(&mut self) {
        if let Some(domain) = self.domain {
            self.navigate(Viewport::full(&domain), true);
        }
    }

    pub fn back(&mut self) {
        if let Some(current) = self.viewport {
            if let Some(previous) = self.nav_history.undo(current) {
                self.viewport = Some(previous);
            }
        }
    }

    pub fn forward(&mut self) {
        if let Some(current) = self.viewport {
            if let Some(next) = self.nav_history.redo(current) {
                self.viewport = Some(next);
            }
        }
    }

    /// Popup rules for this frame, measured from the panels already laid out.
    fn placement_config(&self, ctx: &egui::Context) -> PlacementConfig {
        let screen = ctx.screen_rect();
        let free = ctx.available_rect();
        let mut config = self.prefs.get().placement_config(free.top() - screen.top());
        config.zones.sidebar_width = screen.right() - free.right();
        config.zones.bottom_margin = screen.bottom() - free.bottom();
        config
    }
}

impl eframe::App for SchedulerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        let should_open = ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::O));
        let should_back = ctx.input(|i| i.modifiers.alt && i.key_pressed(egui::Key::ArrowLeft));
        let should_forward = ctx.input(|i| i.modifiers.alt && i.key_pressed(egui::Key::ArrowRight));
        if should_open {
            self.open_schedule();
        }
        if should_back {
            self.back();
        }
        if should_forward {
            self.forward();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        let prefs = self.prefs.get().clone();

        if let (true, Some(domain), Some(viewport)) = (prefs.show_minimap, self.domain, self.viewport) {
            let nav = egui::TopBottomPanel::top("minimap")
                .exact_height(prefs.minimap_height)
                .frame(egui::Frame::default().fill(ui::theme::BG_HEADER))
                .show(ctx, |ui| ui::minimap::show_minimap(&self.schedule, &domain, &viewport, ui))
                .inner;
            if let Some(nav) = nav {
                self.recenter(nav.at, nav.started);
            }
        }

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_STATUS)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    if let Some(vp) = self.viewport {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                egui::RichText::new(format!(
                                    "{} → {}",
                                    vp.start().format("%Y-%m-%d %H:%M"),
                                    vp.end().format("%Y-%m-%d %H:%M"),
                                ))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                            );
                        });
                    }
                });
            });

        let details_action = egui::SidePanel::right("details")
            .exact_width(prefs.sidebar_width)
            .resizable(false)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| ui::details::show_details(&self.schedule, self.selected_job, ui))
            .inner;
        match details_action {
            ui::details::DetailsAction::Select(id) => self.selected_job = Some(id),
            ui::details::DetailsAction::Focus(at) => self.recenter(at, true),
            ui::details::DetailsAction::None => {}
        }

        let popup_config = self.placement_config(ctx);
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            let Some(viewport) = self.viewport else {
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new(&self.status_message).color(ui::theme::TEXT_DIM));
                });
                return;
            };
            let interaction = ui::timeline_chart::show_timeline_chart(
                &self.schedule,
                &viewport,
                &mut self.selected_job,
                &popup_config,
                prefs.show_tooltips,
                ui,
            );
            if let (Some(delta), Some(domain)) = (interaction.pan, self.domain) {
                self.navigate(viewport.pan(delta, &domain), interaction.pan_started);
            }
            if let Some((anchor, factor)) = interaction.zoom {
                self.zoom_at(anchor, factor);
            }
        });
    }
}
