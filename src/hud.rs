use crate::state::HudInfo;
use egui::{Align2, Color32, RichText};
use egui_miniquad as egui_mq;
use miniquad::RenderingBackend;

const TEXT_SIZE: f32 = 24.0;
const MARGIN: f32 = 10.0;
const BACKING_ALPHA: u8 = 170;

/// Coin counter bottom-left, timer bottom-right, win banner centered.
pub struct Hud {
    egui_mq: egui_mq::EguiMq,
}

/// Dark backing so white text reads over both sky and tiles.
fn backing() -> egui::Frame {
    egui::Frame::new()
        .fill(Color32::from_black_alpha(BACKING_ALPHA))
        .corner_radius(4.0)
        .inner_margin(6.0)
}

fn label(ui: &mut egui::Ui, text: impl Into<String>) {
    ui.label(
        RichText::new(text)
            .size(TEXT_SIZE)
            .color(Color32::WHITE)
            .strong(),
    );
}

impl Hud {
    pub fn new(ctx: &mut dyn RenderingBackend) -> Self {
        Hud {
            egui_mq: egui_mq::EguiMq::new(ctx),
        }
    }

    pub fn draw(&mut self, ctx: &mut dyn RenderingBackend, info: &HudInfo) {
        self.egui_mq.run(ctx, |_mq_ctx, egui_ctx| {
            egui::Area::new(egui::Id::new("hud_coins"))
                .anchor(Align2::LEFT_BOTTOM, [MARGIN, -MARGIN])
                .show(egui_ctx, |ui| {
                    backing().show(ui, |ui| label(ui, info.coin_text()));
                });

            egui::Area::new(egui::Id::new("hud_timer"))
                .anchor(Align2::RIGHT_BOTTOM, [-MARGIN, -MARGIN])
                .show(egui_ctx, |ui| {
                    backing().show(ui, |ui| label(ui, info.timer_text()));
                });

            if info.won {
                egui::Area::new(egui::Id::new("hud_won"))
                    .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
                    .show(egui_ctx, |ui| {
                        backing().show(ui, |ui| {
                            ui.vertical_centered(|ui| {
                                label(ui, "All Coins Collected!");
                                label(ui, "Press R to Reset.");
                            });
                        });
                    });
            }
        });

        self.egui_mq.draw(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_backing_is_dark_and_translucent() {
        let fill = backing().fill;
        assert_eq!((fill.r(), fill.g(), fill.b()), (0, 0, 0));
        assert!(fill.a() > 0 && fill.a() < 255);
    }
}
