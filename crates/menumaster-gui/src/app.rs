//! Main application structure with tab navigation

use eframe::egui;
use menumaster_app::Config;

use crate::analyze_panel::AnalyzePanel;
use crate::settings_panel::SettingsPanel;

/// Application tab selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Analyze,
    Settings,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Analyze => "Analyze",
            Tab::Settings => "Settings",
        }
    }
}

/// Main application state
pub struct MenuMasterApp {
    current_tab: Tab,
    analyze_panel: AnalyzePanel,
    settings_panel: SettingsPanel,
    config: Config,
}

impl MenuMasterApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Needed for the menu photo preview
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let mut style = (*cc.egui_ctx.style()).clone();
        style.interaction.tooltip_delay = 0.5;
        style.animation_time = 0.1;
        cc.egui_ctx.set_style(style);

        let config = Config::load().unwrap_or_else(|e| {
            tracing::warn!("failed to load config, using defaults: {}", e);
            Config::default()
        });

        Self {
            current_tab: Tab::default(),
            analyze_panel: AnalyzePanel::new(&config),
            settings_panel: SettingsPanel::new(&config),
            config,
        }
    }

    fn render_tab_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;

            for tab in [Tab::Analyze, Tab::Settings] {
                let selected = self.current_tab == tab;
                if ui.selectable_label(selected, tab.label()).clicked() {
                    self.current_tab = tab;
                }
                ui.add_space(8.0);
            }
        });
    }
}

impl eframe::App for MenuMasterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_tab_bar(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.current_tab {
            Tab::Analyze => {
                self.analyze_panel.ui(ui, &self.config);
            }
            Tab::Settings => {
                self.settings_panel.ui(ui, &mut self.config);
            }
        });
    }
}
