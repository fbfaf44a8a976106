//! Analysis dashboard: pure rendering of a critique result, plus the
//! loading and error views that stand in for it.

use std::time::{Duration, Instant};

use egui::{CollapsingHeader, RichText, Ui};
use quillcore::theme::Palette;
use quillcore::widgets::score_bar;
use quillcritic::schema::{ActionPlanItem, AnalysisResponse, GradeBand, Priority};

pub const LOADING_MESSAGES: &[&str] = &[
    "Analyzing argument structure...",
    "Stress-testing the thesis...",
    "Scanning for grammatical weak points...",
    "Crafting sentence-level improvements...",
    "Checking for thematic depth...",
    "Polishing prose and style...",
    "Assembling the action plan...",
];

const MESSAGE_ROTATION: Duration = Duration::from_millis(2500);
const COPY_FLASH: Duration = Duration::from_secs(2);

/// Message for the elapsed request time, rotating every 2.5 s.
pub fn loading_message(elapsed: Duration) -> &'static str {
    let i = (elapsed.as_millis() / MESSAGE_ROTATION.as_millis()) as usize;
    LOADING_MESSAGES[i % LOADING_MESSAGES.len()]
}

/// Action plan sorted by priority tier, P0 first. Ties keep model order.
pub fn sorted_plan(plan: &[ActionPlanItem]) -> Vec<&ActionPlanItem> {
    let mut items: Vec<&ActionPlanItem> = plan.iter().collect();
    items.sort_by_key(|item| item.priority);
    items
}

/// Tracks which copy button last fired, so it can read "Copied!" for a
/// couple of seconds before reverting.
#[derive(Default)]
pub struct CopyFlash {
    last: Option<(egui::Id, Instant)>,
}

impl CopyFlash {
    pub fn mark(&mut self, id: egui::Id) {
        self.mark_at(id, Instant::now());
    }

    pub fn mark_at(&mut self, id: egui::Id, now: Instant) {
        self.last = Some((id, now));
    }

    pub fn is_active(&self, id: egui::Id) -> bool {
        self.is_active_at(id, Instant::now())
    }

    pub fn is_active_at(&self, id: egui::Id, now: Instant) -> bool {
        matches!(self.last, Some((last_id, at)) if last_id == id && now.duration_since(at) < COPY_FLASH)
    }

    pub fn any_active(&self) -> bool {
        matches!(self.last, Some((_, at)) if at.elapsed() < COPY_FLASH)
    }
}

fn grade_label(band: GradeBand) -> &'static str {
    match band {
        GradeBand::A => "A",
        GradeBand::B => "B",
        GradeBand::C => "C",
        GradeBand::Unclear => "Unclear",
    }
}

fn priority_color(palette: &Palette, p: Priority) -> egui::Color32 {
    match p {
        Priority::P0 => palette.concern,
        Priority::P1 => palette.caution,
        Priority::P2 => palette.favorable,
    }
}

fn bullet_list(ui: &mut Ui, palette: &Palette, items: &[String]) {
    for item in items {
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new("\u{2022}").color(palette.text_dim));
            ui.label(RichText::new(item).color(palette.text).size(13.0));
        });
    }
}

fn labeled(ui: &mut Ui, palette: &Palette, label: &str, value: &str) {
    ui.label(RichText::new(label).color(palette.text_dim).size(12.0));
    ui.label(RichText::new(value).color(palette.text).size(13.0));
    ui.add_space(4.0);
}

/// Rewrite suggestion with a copy button; the button reads "Copied!" for
/// 2 s after a click.
fn copyable(
    ui: &mut Ui,
    palette: &Palette,
    flash: &mut CopyFlash,
    clipboard: &mut Option<arboard::Clipboard>,
    label: &str,
    text: &str,
) {
    let id = egui::Id::new(("copy", label));
    ui.horizontal(|ui| {
        ui.label(RichText::new(label).color(palette.text).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let caption = if flash.is_active(id) { "Copied!" } else { "Copy" };
            if ui.small_button(caption).clicked() {
                if let Some(cb) = clipboard {
                    if let Err(err) = cb.set_text(text.to_string()) {
                        log::warn!("clipboard write failed: {err}");
                    } else {
                        flash.mark(id);
                    }
                }
            }
        });
    });
    ui.label(RichText::new(text).color(palette.accent).size(13.0).italics());
    ui.add_space(6.0);
}

/// The loading card shown while a request is in flight.
pub fn show_loading(ui: &mut Ui, palette: &Palette, started: Instant) {
    palette.card_frame().show(ui, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(48.0);
            ui.spinner();
            ui.add_space(12.0);
            ui.label(
                RichText::new(loading_message(started.elapsed())).color(palette.text_dim),
            );
            ui.add_space(48.0);
        });
    });
}

/// The error card.
pub fn show_error(ui: &mut Ui, palette: &Palette, message: &str) {
    palette.card_frame().show(ui, |ui| {
        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new("\u{26A0}").color(palette.concern).size(16.0));
            ui.label(RichText::new(message).color(palette.concern));
        });
    });
}

/// The full dashboard for a completed analysis.
pub fn show_analysis(
    ui: &mut Ui,
    palette: &Palette,
    flash: &mut CopyFlash,
    clipboard: &mut Option<arboard::Clipboard>,
    analysis: &AnalysisResponse,
) {
    // Meta strip.
    palette.card_frame().show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!(
                    "Grade band: {}",
                    grade_label(analysis.meta.estimated_grade_band)
                ))
                .color(palette.text)
                .strong(),
            );
            ui.label(
                RichText::new(format!(
                    "~{:.0} min read \u{00B7} confidence {:.0}%{}",
                    analysis.meta.reading_time_minutes,
                    analysis.meta.confidence * 100.0,
                    if analysis.meta.ultra_mode_used { " \u{00B7} ultra" } else { "" },
                ))
                .color(palette.text_dim)
                .size(12.0),
            );
        });
    });
    ui.add_space(8.0);

    // Scores.
    palette.card_frame().show(ui, |ui| {
        ui.label(RichText::new("Overall Scores").color(palette.text).strong());
        ui.add_space(6.0);
        let s = &analysis.scores;
        egui::Grid::new("score-grid")
            .num_columns(2)
            .spacing([18.0, 8.0])
            .show(ui, |ui| {
                let half = ui.available_width() / 2.0 - 18.0;
                let mut cell = |ui: &mut Ui, label: &str, score: i64| {
                    ui.scope(|ui| {
                        ui.set_width(half);
                        score_bar(ui, palette, label, score);
                    });
                };
                cell(ui, "Thesis", s.thesis);
                cell(ui, "Argument", s.argumentation);
                ui.end_row();
                cell(ui, "Evidence", s.evidence);
                cell(ui, "Organization", s.organization);
                ui.end_row();
                cell(ui, "Style", s.style_and_voice);
                cell(ui, "Mechanics", s.mechanics);
                ui.end_row();
                cell(ui, "Citations", s.citation_integrity);
                cell(ui, "Originality risk", s.originality_risk);
                ui.end_row();
            });
    });
    ui.add_space(8.0);

    // Action plan, sorted P0 first.
    palette.card_frame().show(ui, |ui| {
        ui.label(
            RichText::new("Prioritized Action Plan")
                .color(palette.text)
                .strong(),
        );
        ui.add_space(6.0);
        for item in sorted_plan(&analysis.prioritized_action_plan) {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(item.priority.label())
                        .color(priority_color(palette, item.priority))
                        .monospace()
                        .strong(),
                );
                ui.label(RichText::new(&item.title).color(palette.text).strong());
            });
            ui.label(RichText::new(&item.why).color(palette.text_dim).size(12.0));
            bullet_list(ui, palette, &item.how);
            ui.add_space(6.0);
        }
    });
    ui.add_space(8.0);

    CollapsingHeader::new("Macro Feedback")
        .default_open(true)
        .show(ui, |ui| {
            let m = &analysis.macro_feedback;
            labeled(ui, palette, "Thesis diagnosis", &m.thesis_quality.diagnosis);
            labeled(ui, palette, "Why it matters", &m.thesis_quality.why_it_matters);
            labeled(ui, palette, "Fix", &m.thesis_quality.fix);
            copyable(
                ui,
                palette,
                flash,
                clipboard,
                "Exemplar thesis rewrite",
                &m.thesis_quality.exemplar_rewrite,
            );

            labeled(ui, palette, "Structure", &m.argument_structure.diagnosis);
            ui.label(RichText::new("Improved outline").color(palette.text_dim).size(12.0));
            bullet_list(ui, palette, &m.argument_structure.outline_improved);
            ui.add_space(4.0);

            labeled(ui, palette, "Thematic depth", &m.thematic_depth.diagnosis);
            bullet_list(ui, palette, &m.thematic_depth.missed_angles);
            ui.add_space(4.0);

            ui.label(RichText::new("Evidence gaps").color(palette.text_dim).size(12.0));
            bullet_list(ui, palette, &m.evidence_use.gaps);
            ui.add_space(4.0);

            labeled(ui, palette, "Counterargument", &m.counterargument.missing_or_weak);
            ui.label(RichText::new("Rubric pitfalls").color(palette.text_dim).size(12.0));
            bullet_list(ui, palette, &m.rubric_alignment.likely_pitfalls);
        });

    CollapsingHeader::new("Paragraph Feedback")
        .default_open(true)
        .show(ui, |ui| {
            for meso in &analysis.meso_feedback {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("Paragraph {}", meso.paragraph_index))
                            .color(palette.text)
                            .strong(),
                    );
                    ui.label(
                        RichText::new(format!("cohesion {}/10", meso.cohesion_score))
                            .color(palette.score_color(meso.cohesion_score))
                            .size(12.0),
                    );
                });
                labeled(
                    ui,
                    palette,
                    &format!("Topic sentence: {:?}", meso.topic_sentence_check.status),
                    &meso.topic_sentence_check.rewrite,
                );
                bullet_list(ui, palette, &meso.logic_flow.issues);
                bullet_list(ui, palette, &meso.logic_flow.bridges);
                labeled(
                    ui,
                    palette,
                    "Evidence tip",
                    &meso.evidence_binding.analysis_depth_tip,
                );
            }
        });

    CollapsingHeader::new("Sentence Feedback")
        .default_open(true)
        .show(ui, |ui| {
            for micro in &analysis.micro_feedback {
                let issues: Vec<&str> = micro.issues.iter().map(|i| i.label()).collect();
                ui.label(
                    RichText::new(format!("#{} \u{00B7} {}", micro.sentence_index, issues.join(", ")))
                        .color(palette.caution)
                        .size(12.0),
                );
                ui.label(
                    RichText::new(&micro.original)
                        .color(palette.text_dim)
                        .size(13.0)
                        .strikethrough(),
                );
                copyable(
                    ui,
                    palette,
                    flash,
                    clipboard,
                    &format!("Rewrite #{}", micro.sentence_index),
                    &micro.rewrite_stronger,
                );
                ui.label(
                    RichText::new(&micro.why_rewrite_is_better)
                        .color(palette.text_dim)
                        .size(12.0),
                );
                ui.add_space(6.0);
            }
        });

    CollapsingHeader::new("Style Tuning")
        .default_open(true)
        .show(ui, |ui| {
            let st = &analysis.style_tuning;
            labeled(ui, palette, "Target style", &st.target_style);
            bullet_list(ui, palette, &st.diction_suggestions);
            bullet_list(ui, palette, &st.syntax_variation_tips);
            bullet_list(ui, palette, &st.tone_consistency_notes);
        });

    CollapsingHeader::new("Citations & Originality")
        .default_open(true)
        .show(ui, |ui| {
            let c = &analysis.citation_review;
            labeled(
                ui,
                palette,
                "Declared style",
                &format!("{:?}", c.declared_style),
            );
            bullet_list(ui, palette, &c.formatting_issues);
            bullet_list(ui, palette, &c.missing_attributions);
            ui.add_space(4.0);
            let o = &analysis.originality_and_claims;
            bullet_list(ui, palette, &o.unsupported_claims);
            labeled(ui, palette, "Originality risk", &o.originality_risk_rationale);
        });

    CollapsingHeader::new("One-Pass Polish")
        .default_open(true)
        .show(ui, |ui| {
            let p = &analysis.one_pass_polish;
            copyable(
                ui,
                palette,
                flash,
                clipboard,
                "Thesis + roadmap rewrite",
                &p.thesis_plus_map_rewrite,
            );
            copyable(
                ui,
                palette,
                flash,
                clipboard,
                "Elevated conclusion",
                &p.elevated_conclusion_rewrite,
            );
            bullet_list(ui, palette, &p.global_rewrite_suggestions);
            ui.label(RichText::new("Transitions").color(palette.text_dim).size(12.0));
            bullet_list(ui, palette, &p.transitions_pack);
        });

    if let Some(extras) = &analysis.ultra_extras {
        CollapsingHeader::new("Ultra Extras")
            .default_open(true)
            .show(ui, |ui| {
                ui.label(RichText::new("Assumption stress tests").color(palette.text_dim).size(12.0));
                bullet_list(ui, palette, &extras.assumption_stress_tests);
                ui.label(RichText::new("Alternative theses").color(palette.text_dim).size(12.0));
                bullet_list(ui, palette, &extras.alternatives_to_thesis);
                ui.label(RichText::new("High-impact additions").color(palette.text_dim).size(12.0));
                bullet_list(ui, palette, &extras.high_impact_additions);
                ui.label(RichText::new("Examiner trap questions").color(palette.text_dim).size(12.0));
                bullet_list(ui, palette, &extras.examiner_trap_questions);
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_message_rotation() {
        assert_eq!(loading_message(Duration::ZERO), LOADING_MESSAGES[0]);
        assert_eq!(loading_message(Duration::from_millis(2499)), LOADING_MESSAGES[0]);
        assert_eq!(loading_message(Duration::from_millis(2500)), LOADING_MESSAGES[1]);
        // Wraps around past the end.
        let full = MESSAGE_ROTATION * LOADING_MESSAGES.len() as u32;
        assert_eq!(loading_message(full), LOADING_MESSAGES[0]);
    }

    #[test]
    fn test_sorted_plan_puts_p0_first() {
        let item = |p: Priority, title: &str| ActionPlanItem {
            priority: p,
            title: title.to_string(),
            why: String::new(),
            how: Vec::new(),
        };
        let plan = vec![
            item(Priority::P2, "later"),
            item(Priority::P0, "now"),
            item(Priority::P1, "soon"),
        ];
        let sorted = sorted_plan(&plan);
        let titles: Vec<&str> = sorted.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["now", "soon", "later"]);
    }

    #[test]
    fn test_sorted_plan_is_stable_within_tier() {
        let item = |p: Priority, title: &str| ActionPlanItem {
            priority: p,
            title: title.to_string(),
            why: String::new(),
            how: Vec::new(),
        };
        let plan = vec![item(Priority::P1, "a"), item(Priority::P1, "b")];
        let sorted = sorted_plan(&plan);
        assert_eq!(sorted[0].title, "a");
        assert_eq!(sorted[1].title, "b");
    }

    #[test]
    fn test_copy_flash_expires() {
        let t0 = Instant::now();
        let id = egui::Id::new("x");
        let other = egui::Id::new("y");
        let mut flash = CopyFlash::default();

        assert!(!flash.is_active_at(id, t0));
        flash.mark_at(id, t0);
        assert!(flash.is_active_at(id, t0 + Duration::from_millis(1999)));
        assert!(!flash.is_active_at(other, t0 + Duration::from_millis(100)));
        assert!(!flash.is_active_at(id, t0 + Duration::from_millis(2000)));
    }
}
