//! Settings panel for the MenuMaster GUI

use eframe::egui::{self, Color32, RichText, Ui};
use menumaster_app::Config;
use menumaster_types::{DiningScenario, SpiceLevel};
use menumaster_vision::{DEFAULT_API_BASE_URL, DEFAULT_MODEL};

/// Preset Gemini models with image input and JSON schema output
const GEMINI_MODELS: &[&str] = &["gemini-2.5-flash", "gemini-2.5-pro", "gemini-2.0-flash"];

pub struct SettingsPanel {
    model_input: String,
    api_key_input: String,
    base_url_input: String,
    spice_level: SpiceLevel,
    dining_scenario: DiningScenario,
    modified: bool,
    status_message: Option<(String, bool)>, // (message, is_error)
}

impl SettingsPanel {
    pub fn new(config: &Config) -> Self {
        Self {
            model_input: config.model.clone(),
            api_key_input: config.api_key.clone().unwrap_or_default(),
            base_url_input: config.api_base_url.clone(),
            spice_level: config.spice_level,
            dining_scenario: config.dining_scenario.clone(),
            modified: false,
            status_message: None,
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, config: &mut Config) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading("Settings");
            ui.add_space(10.0);

            // Model selection
            ui.label(RichText::new("Model").strong());
            ui.add_space(5.0);

            ui.horizontal_wrapped(|ui| {
                for model in GEMINI_MODELS {
                    if ui.small_button(*model).clicked() {
                        self.model_input = model.to_string();
                        self.modified = true;
                    }
                }
            });
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                ui.label("Custom:");
                if ui.text_edit_singleline(&mut self.model_input).changed() {
                    self.modified = true;
                }
            });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(15.0);

            // Credentials
            ui.label(RichText::new("Gemini API").strong());
            ui.add_space(5.0);
            egui::Grid::new("api_grid")
                .num_columns(2)
                .spacing([20.0, 6.0])
                .show(ui, |ui| {
                    ui.label("API key:");
                    if ui
                        .add(egui::TextEdit::singleline(&mut self.api_key_input).password(true))
                        .changed()
                    {
                        self.modified = true;
                    }
                    ui.end_row();

                    ui.label("Base URL:");
                    if ui.text_edit_singleline(&mut self.base_url_input).changed() {
                        self.modified = true;
                    }
                    ui.end_row();
                });
            ui.add_space(5.0);
            ui.label(
                RichText::new("GEMINI_API_KEY or API_KEY in the environment take precedence")
                    .color(Color32::GRAY)
                    .small(),
            );

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(15.0);

            // Defaults for new sessions
            ui.label(RichText::new("Default Preferences").strong());
            ui.add_space(5.0);
            egui::ComboBox::from_id_salt("default_spice_level")
                .selected_text(self.spice_level.label())
                .show_ui(ui, |ui| {
                    for level in SpiceLevel::ALL {
                        if ui
                            .selectable_value(&mut self.spice_level, level, level.label())
                            .changed()
                        {
                            self.modified = true;
                        }
                    }
                });
            ui.horizontal_wrapped(|ui| {
                for scenario in DiningScenario::SELECTABLE {
                    let selected = self.dining_scenario == scenario;
                    if ui.selectable_label(selected, scenario.label()).clicked() {
                        self.dining_scenario = scenario;
                        self.modified = true;
                    }
                }
            });

            ui.add_space(20.0);

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(
                        self.modified,
                        egui::Button::new(RichText::new("Save").size(16.0)),
                    )
                    .clicked()
                {
                    self.save_config(config);
                }

                if ui.button("Revert").clicked() {
                    *self = Self::new(config);
                }

                if self.modified {
                    ui.label(RichText::new("* Unsaved changes").color(Color32::YELLOW));
                }
            });

            if let Some((ref msg, is_error)) = self.status_message {
                ui.add_space(10.0);
                let color = if is_error {
                    Color32::LIGHT_RED
                } else {
                    Color32::LIGHT_GREEN
                };
                ui.label(RichText::new(msg).color(color));
            }
        });
    }

    /// Copy the inputs into `config`, filling blanks with defaults
    fn apply_to(&self, config: &mut Config) {
        let model = self.model_input.trim();
        config.model = if model.is_empty() {
            DEFAULT_MODEL.to_string()
        } else {
            model.to_string()
        };

        let api_key = self.api_key_input.trim();
        config.api_key = (!api_key.is_empty()).then(|| api_key.to_string());

        let base_url = self.base_url_input.trim();
        config.api_base_url = if base_url.is_empty() {
            DEFAULT_API_BASE_URL.to_string()
        } else {
            base_url.to_string()
        };

        config.spice_level = self.spice_level;
        config.dining_scenario = self.dining_scenario.clone();
    }

    fn save_config(&mut self, config: &mut Config) {
        self.apply_to(config);

        match config.save() {
            Ok(()) => {
                self.modified = false;
                self.status_message = Some(("Settings saved".to_string(), false));
            }
            Err(e) => {
                tracing::error!("failed to save config: {}", e);
                self.status_message = Some((format!("Save failed: {}", e), true));
            }
        }
    }
}
