mod host;

use std::path::Path;
use std::time::Duration;

use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use log::info;
use panel::{PanelController, RenderCommand, draw_panel};
use simplelog::{ColorChoice, Config, LevelFilter, SimpleLogger, TermLogger, TerminalMode};
use stancecore::{StanceConfig, StanceContext, WheelIndex};

use crate::host::{DemoCar, DemoHost, EguiKeys};

const CONFIG_PATH: &str = "stance_config.json";

// Schematic drawing scale
const PX_PER_M: f32 = 600.0;
const HALF_TRACK_PX: f32 = 120.0;
const WHEEL_HEIGHT_PX: f32 = 60.0;
const WHEEL_WIDTH_PX: f32 = 18.0;

fn init_logging(level: LevelFilter) {
    if TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto).is_err() {
        let _ = SimpleLogger::init(level, Config::default());
    }
}

/// Read the config, start logging, then report how the config was resolved
fn load_config(path: &Path, init: impl FnOnce(LevelFilter)) -> StanceConfig {
    let loaded = StanceConfig::from_file(path);
    init(StanceConfig::startup_level(&loaded));
    StanceConfig::resolve(loaded, path)
}

fn main() -> eframe::Result<()> {
    let config = load_config(Path::new(CONFIG_PATH), init_logging);
    info!("presets stored in {}", config.preset_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_title("Wheel Stance"),
        ..Default::default()
    };
    eframe::run_native(
        "Wheel Stance",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(config)))),
    )
}

struct App {
    config: StanceConfig,
    stance: StanceContext,
    panel: PanelController,
    host: DemoHost,
}

impl App {
    fn new(config: StanceConfig) -> Self {
        let stance = StanceContext::from_config(&config);
        let panel = PanelController::new(config.toggle);
        let mut host = DemoHost::new();
        stance.apply(&mut host);

        Self { config, stance, panel, host }
    }

    fn chord_hint(&self) -> String {
        let chord = self.config.toggle;
        format!("{:?} + {:?} + {:?}", chord.modifiers[0], chord.modifiers[1], chord.trigger)
    }
}

/// Rear view of one axle with the wheels as the host would display them
fn draw_axle(ui: &mut egui::Ui, title: &str, car: &DemoCar, left: WheelIndex, right: WheelIndex) {
    let (response, painter) = ui.allocate_painter(Vec2::new(ui.available_width(), 220.0), Sense::hover());
    let rect = response.rect;
    let center_x = rect.center().x;
    let ground_y = rect.bottom() - 20.0;

    painter.text(rect.left_top() + Vec2::new(8.0, 8.0), Align2::LEFT_TOP, title, FontId::proportional(16.0), Color32::LIGHT_GRAY);
    painter.line_segment(
        [Pos2::new(rect.left(), ground_y), Pos2::new(rect.right(), ground_y)],
        Stroke::new(1.0, Color32::DARK_GRAY),
    );

    let body = Rect::from_center_size(
        Pos2::new(center_x, ground_y - WHEEL_HEIGHT_PX - 10.0),
        Vec2::new(2.0 * HALF_TRACK_PX + 40.0, 50.0),
    );
    painter.rect_filled(body, 6.0, Color32::from_rgb(70, 90, 130));

    for (wheel, side) in [(left, -1.0f32), (right, 1.0f32)] {
        let offset = car.offsets[wheel.slot()];
        let camber = car.cambers[wheel.slot()] as f32;

        let x = center_x + side * (HALF_TRACK_PX + offset.x as f32 * PX_PER_M);
        let mid_y = ground_y - WHEEL_HEIGHT_PX / 2.0 - offset.y as f32 * PX_PER_M;
        // negative camber leans the top of the wheel inward
        let lean = Vec2::new(-side * camber.sin(), -camber.cos()) * (WHEEL_HEIGHT_PX / 2.0);
        let mid = Pos2::new(x, mid_y);

        painter.line_segment([mid - lean, mid + lean], Stroke::new(WHEEL_WIDTH_PX, Color32::from_gray(30)));
        painter.text(
            Pos2::new(x, ground_y + 4.0),
            Align2::CENTER_TOP,
            wheel.short_label(),
            FontId::monospace(12.0),
            Color32::GRAY,
        );
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let keys = EguiKeys::capture(ctx);
        if let RenderCommand::Panel(view) = self.panel.tick(&keys, &self.stance) {
            for action in draw_panel(ctx, &view) {
                self.panel.handle(action, &mut self.stance, &mut self.host);
            }
        }

        egui::TopBottomPanel::top("status").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.label(format!("Press {} to toggle the stance panel", self.chord_hint()));
                ui.separator();
                if ui.checkbox(&mut self.host.car_loaded, "Car loaded").changed() && self.host.car_loaded {
                    self.stance.apply(&mut self.host);
                }
                if ui.button(if self.panel.is_visible() { "Hide panel" } else { "Show panel" }).clicked() {
                    self.panel.toggle();
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let car = &self.host.car;
            draw_axle(ui, "Front axle", car, WheelIndex::FRONT_LEFT, WheelIndex::FRONT_RIGHT);
            ui.separator();
            draw_axle(ui, "Rear axle", car, WheelIndex::REAR_LEFT, WheelIndex::REAR_RIGHT);
        });

        ctx.request_repaint_after(Duration::from_millis(16));
    }
}
