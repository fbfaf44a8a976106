//! Quill application shell: panel layout, event handling, persistence
//! wiring, and the critique request plumbing.

use std::path::{Path, PathBuf};

use eframe::CreationContext;
use egui::{CentralPanel, Context, Key, RichText, ScrollArea, SidePanel, TopBottomPanel};
use quillcore::storage::{config_dir, load_json, save_json, Debounce, SAVE_DEBOUNCE};
use quillcore::theme::{consume_special_keys_with_tab, install_fonts, FontCatalog, Palette};
use quillcore::widgets::{status_bar, toolbar_separator, IconToggle};
use quillcore::RepaintController;
use quillcritic::sample::SAMPLE_ESSAYS;
use quillcritic::{CritiqueService, EssayInputs};

use crate::critique::{AnalysisState, CritiqueRunner};
use crate::dashboard::{self, CopyFlash};
use crate::document::Document;
use crate::editor::{self, EditorState, EDITOR_ID};
use crate::settings::Preferences;
use crate::sound::TypingSound;
use crate::toolbar;

const TAB_SPACES: usize = 4;

fn draft_path() -> PathBuf {
    config_dir().join("draft.json")
}

/// Only plain-text drops import; any other file type is ignored.
fn accepts_dropped_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("txt"))
        .unwrap_or(false)
}

fn opt_field(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

pub struct QuillApp {
    doc: Document,
    editor_state: EditorState,
    prefs: Preferences,
    fonts: FontCatalog,
    palette: Palette,
    runner: CritiqueRunner,
    sound: TypingSound,
    clipboard: Option<arboard::Clipboard>,
    repaint: RepaintController,
    draft_debounce: Debounce,
    copy_flash: CopyFlash,

    // Critique parameters.
    style_target: String,
    prompt: String,
    rubric: String,
    constraints: String,
    ultra: bool,
}

impl QuillApp {
    pub fn new(cc: &CreationContext<'_>) -> Self {
        let prefs = Preferences::load();
        let palette = Palette::of(prefs.theme);
        palette.apply(&cc.egui_ctx);
        let fonts = install_fonts(&cc.egui_ctx);

        let doc: Document = load_json(&draft_path()).unwrap_or_default();

        let clipboard = match arboard::Clipboard::new() {
            Ok(cb) => Some(cb),
            Err(err) => {
                log::warn!("clipboard unavailable: {err}");
                None
            }
        };

        QuillApp {
            doc,
            editor_state: EditorState::default(),
            prefs,
            fonts,
            palette,
            runner: CritiqueRunner::new(CritiqueService::from_env()),
            sound: TypingSound::new(),
            clipboard,
            repaint: RepaintController::new(),
            draft_debounce: Debounce::new(SAVE_DEBOUNCE),
            copy_flash: CopyFlash::default(),
            style_target: String::new(),
            prompt: String::new(),
            rubric: String::new(),
            constraints: String::new(),
            ultra: false,
        }
    }

    fn set_theme(&mut self, ctx: &Context, theme: quillcore::ThemeKind) {
        self.prefs.theme = theme;
        self.palette = Palette::of(theme);
        self.palette.apply(ctx);
        self.prefs.save();
    }

    fn essay_inputs(&self) -> EssayInputs {
        EssayInputs {
            essay_text: self.doc.text.clone(),
            prompt: opt_field(&self.prompt),
            rubric: opt_field(&self.rubric),
            style_target: opt_field(&self.style_target),
            constraints: opt_field(&self.constraints),
            ultra: self.ultra,
        }
    }

    fn load_document(&mut self, doc: Document) {
        self.doc = doc;
        self.editor_state = EditorState::default();
        self.runner.invalidate();
        self.draft_debounce.mark_dirty();
    }

    /// Key blips while the editor is focused and sound mode is on.
    fn play_typing_sounds(&self, ctx: &Context) {
        if !self.prefs.sound {
            return;
        }
        if ctx.memory(|mem| mem.focused()) != Some(egui::Id::new(EDITOR_ID)) {
            return;
        }
        ctx.input(|i| {
            for event in &i.events {
                match event {
                    egui::Event::Text(t) if t == " " => self.sound.space(),
                    egui::Event::Text(_) => self.sound.key(),
                    egui::Event::Key {
                        key: Key::Enter,
                        pressed: true,
                        ..
                    } => self.sound.newline(),
                    _ => {}
                }
            }
        });
    }

    /// Import a dropped .txt file as a fresh document; anything else is
    /// ignored.
    fn handle_dropped_files(&mut self, ctx: &Context) {
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        for path in dropped {
            if !accepts_dropped_file(&path) {
                log::info!("ignoring dropped non-text file {path:?}");
                continue;
            }
            match std::fs::read_to_string(&path) {
                Ok(text) => {
                    self.load_document(Document::from_text(text));
                    self.repaint.mark_needs_repaint();
                }
                Err(err) => log::warn!("failed to read dropped file {path:?}: {err}"),
            }
        }
    }

    fn show_status_bar(&mut self, ctx: &Context) {
        let palette = self.palette;
        let mut theme_clicked = false;
        let save_pending = self.draft_debounce.is_pending();

        TopBottomPanel::bottom("status").show(ctx, |ui| {
            status_bar(ui, &palette, |ui| {
                ui.label(
                    RichText::new(format!(
                        "{} words \u{00B7} {} sentences",
                        self.doc.word_count(),
                        self.doc.sentence_count()
                    ))
                    .color(palette.text_dim)
                    .size(12.0),
                );

                toolbar_separator(ui, &palette);

                if ui
                    .add(IconToggle::new("Fo", &palette).active(self.prefs.focus_mode))
                    .on_hover_text("Focus mode: dim all but the current line")
                    .clicked()
                {
                    self.prefs.focus_mode = !self.prefs.focus_mode;
                }
                if ui
                    .add(IconToggle::new("Tw", &palette).active(self.prefs.typewriter))
                    .on_hover_text("Typewriter mode: keep the caret centered")
                    .clicked()
                {
                    self.prefs.typewriter = !self.prefs.typewriter;
                }
                if ui
                    .add(IconToggle::new("\u{266A}", &palette).active(self.prefs.sound))
                    .on_hover_text("Typing sounds")
                    .clicked()
                {
                    self.prefs.sound = !self.prefs.sound;
                }
                if ui
                    .add(IconToggle::new("Zen", &palette).active(self.prefs.zen))
                    .on_hover_text("Zen mode (Esc to exit)")
                    .clicked()
                {
                    self.prefs.zen = !self.prefs.zen;
                }

                toolbar_separator(ui, &palette);

                if ui
                    .button(self.prefs.theme.label())
                    .on_hover_text("Cycle theme")
                    .clicked()
                {
                    theme_clicked = true;
                }
                if ui
                    .button(self.prefs.font.label())
                    .on_hover_text("Cycle editor font")
                    .clicked()
                {
                    self.prefs.font = self.prefs.font.next();
                    self.prefs.save();
                }
                if ui.button("A-").clicked() {
                    self.prefs.bump_font_size(-1.0);
                    self.prefs.save();
                }
                if ui.button("A+").clicked() {
                    self.prefs.bump_font_size(1.0);
                    self.prefs.save();
                }
                if ui.button("\u{2195}-").on_hover_text("Tighter line height").clicked() {
                    self.prefs.bump_line_height(-0.1);
                    self.prefs.save();
                }
                if ui.button("\u{2195}+").on_hover_text("Looser line height").clicked() {
                    self.prefs.bump_line_height(0.1);
                    self.prefs.save();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if save_pending {
                        ui.label(RichText::new("saving\u{2026}").color(palette.text_dim).size(11.0));
                    }
                    if self.runner.is_offline() {
                        ui.label(
                            RichText::new("offline \u{00B7} sample critiques")
                                .color(palette.caution)
                                .size(11.0),
                        );
                    }
                });
            });
        });

        if theme_clicked {
            self.set_theme(ctx, self.prefs.theme.next());
        }
    }

    fn show_parameters(&mut self, ui: &mut egui::Ui) {
        let palette = self.palette;
        palette.card_frame().show(ui, |ui| {
            ui.label(RichText::new("Parameters").color(palette.text).strong());
            ui.add_space(6.0);

            let mut edited = false;
            edited |= ui
                .add(
                    egui::TextEdit::singleline(&mut self.style_target)
                        .hint_text("Style target, e.g. AP Lang 9/9")
                        .desired_width(f32::INFINITY),
                )
                .changed();
            edited |= ui
                .add(
                    egui::TextEdit::multiline(&mut self.prompt)
                        .hint_text("Optional: paste the assignment prompt...")
                        .desired_rows(3)
                        .desired_width(f32::INFINITY),
                )
                .changed();
            edited |= ui
                .add(
                    egui::TextEdit::multiline(&mut self.rubric)
                        .hint_text("Optional: paste the rubric...")
                        .desired_rows(3)
                        .desired_width(f32::INFINITY),
                )
                .changed();
            edited |= ui
                .add(
                    egui::TextEdit::singleline(&mut self.constraints)
                        .hint_text("Constraints, e.g. 1000 words max")
                        .desired_width(f32::INFINITY),
                )
                .changed();

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                edited |= ui.checkbox(&mut self.ultra, "Ultra mode").changed();
                ui.label(
                    RichText::new("adversarial deep analysis")
                        .color(palette.text_dim)
                        .size(11.0),
                );
            });

            if edited {
                self.runner.invalidate();
            }

            ui.add_space(8.0);
            ui.label(RichText::new("Load a sample").color(palette.text_dim).size(12.0));
            let mut load = None;
            for (i, sample) in SAMPLE_ESSAYS.iter().enumerate() {
                if ui.button(sample.title).clicked() {
                    load = Some(i);
                }
            }
            if let Some(i) = load {
                self.load_document(Document::from_text(SAMPLE_ESSAYS[i].text));
            }

            ui.add_space(10.0);
            let can_request =
                !self.doc.text.trim().is_empty() && !self.runner.state.is_requesting();
            if ui
                .add_enabled(
                    can_request,
                    egui::Button::new(RichText::new("Critique Essay").strong())
                        .min_size(egui::vec2(ui.available_width(), 32.0)),
                )
                .clicked()
            {
                let inputs = self.essay_inputs();
                self.runner.request(inputs);
            }
        });
    }

    fn show_side_panel(&mut self, ctx: &Context) {
        let palette = self.palette;
        SidePanel::right("analysis")
            .resizable(true)
            .default_width(460.0)
            .min_width(320.0)
            .show(ctx, |ui| match &self.runner.state {
                AnalysisState::Requesting { started } => {
                    dashboard::show_loading(ui, &palette, *started);
                }
                AnalysisState::Failed(message) => {
                    let message = message.clone();
                    dashboard::show_error(ui, &palette, &message);
                    ui.add_space(8.0);
                    self.show_parameters(ui);
                }
                AnalysisState::Success(analysis) => {
                    let copy_flash = &mut self.copy_flash;
                    let clipboard = &mut self.clipboard;
                    ScrollArea::vertical().show(ui, |ui| {
                        dashboard::show_analysis(ui, &palette, copy_flash, clipboard, analysis);
                    });
                }
                AnalysisState::Idle => {
                    self.show_parameters(ui);
                }
            });
    }

    fn show_editor(&mut self, ctx: &Context) {
        let palette = self.palette;
        let mut pending_action = None;

        CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                let margin = if self.prefs.zen {
                    (ui.available_width() * 0.15).max(24.0)
                } else {
                    16.0
                };
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.add_space(margin);
                    ui.vertical(|ui| {
                        ui.set_width(ui.available_width() - margin);
                        let output = editor::show(
                            ui,
                            &mut self.doc,
                            &self.prefs,
                            &self.fonts,
                            &palette,
                            &mut self.editor_state,
                        );

                        if output.changed {
                            let caret = output.caret.unwrap_or(self.editor_state.caret);
                            self.doc.sync_after_edit(caret);
                            self.runner.invalidate();
                            self.draft_debounce.mark_dirty();
                        }

                        if let (Some(selection), Some(anchor)) =
                            (output.selection, output.selection_anchor)
                        {
                            if let Some(action) =
                                toolbar::selection_toolbar(ctx, &palette, anchor)
                            {
                                pending_action = Some((selection, action));
                            }
                        }
                    });
                });
            });
        });

        if let Some((selection, action)) = pending_action {
            toolbar::apply_action(&mut self.doc, selection, action);
            self.runner.invalidate();
            self.draft_debounce.mark_dirty();
            self.repaint.mark_needs_repaint();
        }
    }
}

impl eframe::App for QuillApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.repaint.begin_frame();

        self.play_typing_sounds(ctx);
        consume_special_keys_with_tab(ctx, TAB_SPACES);
        self.editor_state.pending_retreat =
            editor::rewrite_pair_events(ctx, egui::Id::new(EDITOR_ID));
        self.handle_dropped_files(ctx);

        if ctx.input(|i| i.key_pressed(Key::Escape)) && self.prefs.zen {
            self.prefs.zen = false;
        }

        if self.runner.poll() {
            self.repaint.mark_needs_repaint();
            // A finished critique pulls the writer out of zen so the
            // dashboard is visible.
            if matches!(self.runner.state, AnalysisState::Success(_)) && self.prefs.zen {
                self.prefs.zen = false;
            }
        }

        if !self.prefs.zen {
            let palette = self.palette;
            TopBottomPanel::top("header").show(ctx, |ui| {
                status_bar(ui, &palette, |ui| {
                    ui.label(RichText::new("Quill").color(palette.text).strong());
                    ui.label(
                        RichText::new("essay editor & critique")
                            .color(palette.text_dim)
                            .size(12.0),
                    );
                });
            });
        }

        self.show_status_bar(ctx);
        if !self.prefs.zen {
            self.show_side_panel(ctx);
        }
        self.show_editor(ctx);

        if self.draft_debounce.ready() {
            if let Err(err) = save_json(&draft_path(), &self.doc) {
                log::warn!("failed to save draft: {err}");
            }
        }

        self.repaint.set_continuous(
            self.runner.state.is_requesting()
                || self.draft_debounce.is_pending()
                || self.copy_flash.any_active(),
        );
        self.repaint.end_frame(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if self.draft_debounce.is_pending() {
            if let Err(err) = save_json(&draft_path(), &self.doc) {
                log::warn!("failed to save draft on exit: {err}");
            }
        }
        self.prefs.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_txt_drops_import() {
        assert!(accepts_dropped_file(Path::new("/tmp/essay.txt")));
        assert!(accepts_dropped_file(Path::new("ESSAY.TXT")));

        assert!(!accepts_dropped_file(Path::new("notes.md")));
        assert!(!accepts_dropped_file(Path::new("paper.pdf")));
        assert!(!accepts_dropped_file(Path::new("draft.txt.bak")));
        assert!(!accepts_dropped_file(Path::new("no_extension")));
    }

    #[test]
    fn test_opt_field_trims_to_none() {
        assert_eq!(opt_field("  "), None);
        assert_eq!(opt_field(" AP Lang "), Some("AP Lang".to_string()));
    }
}
