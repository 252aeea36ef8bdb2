//! Analyze panel for the MenuMaster GUI
//!
//! Provides menu photo selection, preference input, analysis execution,
//! and result display.

use eframe::egui::{self, Color32, RichText, Ui};
use menumaster_app::{load_menu_image, AnalysisOutcome, AnalysisService, AnalysisSession, Config};
use menumaster_types::{AnalysisResult, DiningScenario, Error, Note, SpiceLevel};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

/// Status message from analysis thread
#[derive(Debug)]
pub enum AnalysisStatus {
    /// Calling the model
    CallingAI { model: String },
    /// Completed successfully
    Completed(Box<AnalysisOutcome>),
    /// Failed with error
    Failed(Error),
}

/// Preview bytes registered with the egui image loader
struct Preview {
    uri: String,
    bytes: Arc<[u8]>,
    /// The egui image loaders cannot decode HEIC/HEIF
    decodable: bool,
}

pub struct AnalyzePanel {
    session: AnalysisSession,
    /// Receiver for analysis status from background thread
    status_receiver: Option<Receiver<AnalysisStatus>>,
    current_status: Option<String>,
    start_time: Option<Instant>,
    preview: Option<Preview>,
    /// Problem reading the picked file (not an analysis failure)
    load_error: Option<String>,
    /// Elapsed time of the last successful attempt
    last_elapsed: Option<f64>,
    preview_counter: u64,
}

impl AnalyzePanel {
    pub fn new(config: &Config) -> Self {
        Self {
            session: AnalysisSession::new(config.initial_preferences()),
            status_receiver: None,
            current_status: None,
            start_time: None,
            preview: None,
            load_error: None,
            last_elapsed: None,
            preview_counter: 0,
        }
    }

    /// Render the analyze panel UI
    pub fn ui(&mut self, ui: &mut Ui, config: &Config) {
        self.poll_status(ui.ctx());

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading("Menu Analysis");
            ui.add_space(10.0);

            if self.session.result().is_some() {
                self.render_results(ui);
                return;
            }

            self.render_image_selection(ui);

            ui.add_space(10.0);
            ui.separator();
            ui.add_space(10.0);

            self.render_preferences(ui);

            ui.add_space(10.0);
            ui.separator();
            ui.add_space(10.0);

            self.render_analyze_button(ui, config);
            self.render_error(ui);
        });
    }

    /// Poll for status updates from background analysis thread
    fn poll_status(&mut self, ctx: &egui::Context) {
        let Some(receiver) = self.status_receiver.take() else {
            return;
        };

        loop {
            match receiver.try_recv() {
                Ok(status) => {
                    if self.handle_status(status) {
                        return;
                    }
                }
                Err(std::sync::mpsc::TryRecvError::Empty) => {
                    // No more messages, request repaint to check again
                    self.status_receiver = Some(receiver);
                    ctx.request_repaint();
                    break;
                }
                Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                    self.handle_status(AnalysisStatus::Failed(Error::Service(
                        "analysis thread exited unexpectedly".to_string(),
                    )));
                    return;
                }
            }
        }
    }

    /// Apply one status message. Returns true once the attempt is over.
    fn handle_status(&mut self, status: AnalysisStatus) -> bool {
        match status {
            AnalysisStatus::CallingAI { model } => {
                self.current_status = Some(format!("Asking {}...", model));
                false
            }
            AnalysisStatus::Completed(outcome) => {
                self.last_elapsed = Some(outcome.elapsed.as_secs_f64());
                self.session.complete_attempt(outcome.result);
                self.finish();
                true
            }
            AnalysisStatus::Failed(err) => {
                self.session.fail_attempt(&err);
                self.finish();
                true
            }
        }
    }

    fn finish(&mut self) {
        self.status_receiver = None;
        self.current_status = None;
        self.start_time = None;
    }

    fn render_image_selection(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let enabled = !self.session.is_loading();
            if ui
                .add_enabled(enabled, egui::Button::new("Upload Menu Photo..."))
                .clicked()
            {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Images", menumaster_app::menu_image::IMAGE_EXTENSIONS)
                    .pick_file()
                {
                    match load_menu_image(&path) {
                        Ok(image) => {
                            self.forget_preview(ui.ctx());
                            self.preview_counter += 1;
                            self.preview = Some(Preview {
                                uri: format!("bytes://menu-{}", self.preview_counter),
                                bytes: Arc::from(image.data()),
                                decodable: !matches!(
                                    image.mime_type(),
                                    "image/heic" | "image/heif"
                                ),
                            });
                            self.session.set_image(image);
                            self.load_error = None;
                        }
                        Err(e) => {
                            self.load_error = Some(e.to_string());
                        }
                    }
                }
            }

            ui.add_space(10.0);

            let picked = self
                .session
                .image()
                .map(|image| image.name().unwrap_or("(unnamed image)").to_string());
            match picked {
                Some(name) => {
                    ui.label(RichText::new(name).monospace().color(Color32::LIGHT_BLUE));
                    if ui.add_enabled(enabled, egui::Button::new("Clear")).clicked() {
                        self.clear_image(ui.ctx());
                    }
                }
                None => {
                    ui.label(
                        RichText::new("No image selected")
                            .italics()
                            .color(Color32::GRAY),
                    );
                }
            }
        });

        if let Some(ref preview) = self.preview {
            ui.add_space(8.0);
            if preview.decodable {
                ui.add(
                    egui::Image::from_bytes(preview.uri.clone(), preview.bytes.clone())
                        .max_height(320.0)
                        .corner_radius(4.0),
                );
            } else {
                ui.label(
                    RichText::new("Preview not available for HEIC/HEIF photos")
                        .italics()
                        .color(Color32::GRAY),
                );
            }
        }

        if let Some(ref err) = self.load_error {
            ui.add_space(5.0);
            ui.label(RichText::new(err).color(Color32::LIGHT_RED));
        }
    }

    fn render_preferences(&mut self, ui: &mut Ui) {
        let enabled = !self.session.is_loading();
        let prefs = self.session.preferences_mut();

        ui.label(RichText::new("Your Preferences").strong());
        ui.add_space(5.0);

        egui::Grid::new("preferences_grid")
            .num_columns(2)
            .spacing([20.0, 8.0])
            .show(ui, |ui| {
                ui.label("Likes:");
                ui.add_enabled(
                    enabled,
                    egui::TextEdit::singleline(&mut prefs.likes).hint_text("e.g., chicken, noodles"),
                );
                ui.end_row();

                ui.label("Dislikes / Allergies:");
                ui.add_enabled(
                    enabled,
                    egui::TextEdit::singleline(&mut prefs.dislikes).hint_text("e.g., peanuts"),
                );
                ui.end_row();

                ui.label("Spice Level:");
                ui.add_enabled_ui(enabled, |ui| {
                    egui::ComboBox::from_id_salt("spice_level")
                        .selected_text(prefs.spice_level.label())
                        .show_ui(ui, |ui| {
                            for level in SpiceLevel::ALL {
                                ui.selectable_value(&mut prefs.spice_level, level, level.label());
                            }
                        });
                });
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.label("Dining Goal:");
        ui.add_enabled_ui(enabled, |ui| {
            ui.horizontal_wrapped(|ui| {
                for scenario in DiningScenario::SELECTABLE {
                    let selected = prefs.dining_scenario == scenario;
                    if ui.selectable_label(selected, scenario.label()).clicked() {
                        prefs.dining_scenario = scenario;
                    }
                }
            });
        });
    }

    fn render_analyze_button(&mut self, ui: &mut Ui, config: &Config) {
        ui.horizontal(|ui| {
            let button_text = if self.session.is_loading() {
                "Analyzing..."
            } else {
                "Analyze Menu"
            };
            let button = egui::Button::new(RichText::new(button_text).size(16.0));

            if ui.add_enabled(self.session.can_analyze(), button).clicked() {
                self.start_analysis(config);
            }

            if self.session.is_loading() {
                ui.spinner();
            }
        });

        if self.session.is_loading() {
            ui.add_space(8.0);
            egui::Frame::new()
                .fill(Color32::from_gray(30))
                .inner_margin(10.0)
                .corner_radius(4.0)
                .show(ui, |ui| {
                    if let Some(start) = self.start_time {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new("Elapsed:").strong());
                            ui.label(format!("{:.1} s", start.elapsed().as_secs_f32()));
                        });
                    }
                    if let Some(ref status) = self.current_status {
                        ui.label(RichText::new(status).color(Color32::LIGHT_BLUE));
                    }
                });
        }
    }

    /// Start analysis in a background thread
    fn start_analysis(&mut self, config: &Config) {
        // Missing image sets the session banner; an in-flight attempt is left alone.
        let Ok(request) = self.session.begin_attempt() else {
            return;
        };

        self.start_time = Some(Instant::now());
        self.current_status = Some("Preparing...".to_string());

        let (sender, receiver): (Sender<AnalysisStatus>, Receiver<AnalysisStatus>) = channel();
        self.status_receiver = Some(receiver);

        let service = AnalysisService::from_config(config);
        let model = config.model.clone();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    let _ = sender.send(AnalysisStatus::Failed(e.into()));
                    return;
                }
            };

            let _ = sender.send(AnalysisStatus::CallingAI { model });

            let status =
                match runtime.block_on(service.analyze_once(&request.image, &request.preferences)) {
                    Ok(outcome) => AnalysisStatus::Completed(Box::new(outcome)),
                    Err(e) => AnalysisStatus::Failed(e),
                };
            let _ = sender.send(status);
        });
    }

    /// Drop the current image, result and error and start over
    fn scan_another(&mut self, ctx: &egui::Context) {
        self.forget_preview(ctx);
        self.session.reset();
        self.load_error = None;
        self.last_elapsed = None;
    }

    /// Drop the picked photo so another one can be chosen
    fn clear_image(&mut self, ctx: &egui::Context) {
        self.forget_preview(ctx);
        self.session.clear_image();
        self.load_error = None;
    }

    fn forget_preview(&mut self, ctx: &egui::Context) {
        if let Some(preview) = self.preview.take() {
            ctx.forget_image(&preview.uri);
        }
    }

    fn render_results(&mut self, ui: &mut Ui) {
        let Some(result) = self.session.result() else {
            return;
        };

        ui.horizontal(|ui| {
            ui.label(RichText::new("Your Menu Guide").strong().size(16.0));
            if let Some(elapsed) = self.last_elapsed {
                ui.label(
                    RichText::new(format!("({:.1} s)", elapsed))
                        .color(Color32::GRAY)
                        .small(),
                );
            }
        });
        ui.add_space(8.0);

        render_analysis(ui, result);

        ui.add_space(15.0);
        if ui
            .button(RichText::new("Scan Another Menu").size(16.0))
            .clicked()
        {
            self.scan_another(ui.ctx());
        }
    }

    fn render_error(&self, ui: &mut Ui) {
        if let Some(error) = self.session.error() {
            ui.add_space(10.0);
            egui::Frame::new()
                .fill(Color32::from_rgb(80, 20, 20))
                .inner_margin(8.0)
                .corner_radius(4.0)
                .show(ui, |ui| {
                    ui.label(RichText::new(error).color(Color32::LIGHT_RED));
                });
        }
    }
}

fn render_analysis(ui: &mut Ui, result: &AnalysisResult) {
    egui::CollapsingHeader::new("Menu Scan Results")
        .default_open(true)
        .show(ui, |ui| {
            let scan = &result.menu_scan_results;
            egui::Grid::new("scan_grid")
                .num_columns(2)
                .spacing([20.0, 6.0])
                .striped(true)
                .show(ui, |ui| {
                    ui.label(RichText::new("Cuisine:").strong());
                    ui.label(&scan.cuisine_type);
                    ui.end_row();

                    ui.label(RichText::new("Style:").strong());
                    ui.label(&scan.restaurant_style);
                    ui.end_row();

                    ui.label(RichText::new("Language:").strong());
                    ui.label(&scan.language);
                    ui.end_row();
                });
        });

    egui::CollapsingHeader::new(format!("Dish Decoder ({})", result.dish_decoder.len()))
        .default_open(true)
        .show(ui, |ui| {
            for (i, dish) in result.dish_decoder.iter().enumerate() {
                egui::CollapsingHeader::new(&dish.dish_name)
                    .id_salt(("dish", i))
                    .show(ui, |ui| {
                        ui.label(&dish.explanation);
                        ui.label(format!("Key ingredients: {}", dish.key_ingredients.join(", ")));
                        ui.label(format!("Taste: {}", dish.taste_profile));
                        if let Some(allergens) =
                            dish.allergen_alerts.as_ref().filter(|a| !a.is_empty())
                        {
                            ui.label(
                                RichText::new(format!("Allergens: {}", allergens.join(", ")))
                                    .color(Color32::YELLOW),
                            );
                        }
                    });
            }
        });

    egui::CollapsingHeader::new("Smart Recommendations")
        .default_open(true)
        .show(ui, |ui| {
            for rec in &result.smart_recommendations {
                ui.label(RichText::new(&rec.dish_name).strong());
                ui.label(&rec.reason);
                ui.add_space(4.0);
            }
        });

    egui::CollapsingHeader::new("Dietary Alerts")
        .default_open(true)
        .show(ui, |ui| {
            if result.dietary_alerts.is_empty() {
                ui.label(RichText::new("No conflicts found").color(Color32::LIGHT_GREEN));
            }
            for alert in &result.dietary_alerts {
                ui.label(
                    RichText::new(format!("{}: {}", alert.dish_name, alert.reason))
                        .color(Color32::LIGHT_RED),
                );
            }
        });

    render_note(ui, "Cultural Insights", &result.cultural_insights);
    render_note(ui, "Ordering Strategy", &result.ordering_strategy);
}

fn render_note(ui: &mut Ui, heading: &str, note: &Note) {
    egui::CollapsingHeader::new(heading)
        .default_open(true)
        .show(ui, |ui| {
            ui.label(RichText::new(&note.title).strong());
            ui.label(&note.content);
        });
}
