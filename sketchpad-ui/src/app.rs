// egui front end for the editor.
// Widgets only produce Actions; applying them is the one place the editor is mutated.

use egui::{Key, KeyboardShortcut, Modifiers};
use sketchpad_core::{BrushWidth, Color32, Point, ShapeKind, ToolKind};
use sketchpad_io::{EXPORT_FILE_NAME, IMPORT_EXTENSIONS};
use tracing::{error, info};

use crate::editor::Editor;

/// One toolbar or keyboard command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    SelectPencil,
    SelectEraser,
    SelectFill,
    SelectShape(ShapeKind),
    SetShapeFilled(bool),
    SetColor(Color32),
    SetWidth(u32),
    Undo,
    Redo,
    Clear,
    Save,
    Load,
}

pub struct SketchpadApp {
    editor: Editor,
    texture: Option<egui::TextureHandle>,
    uploaded_revision: Option<u64>,
    status: String,
}

impl SketchpadApp {
    pub fn new(editor: Editor) -> Self {
        Self {
            editor,
            texture: None,
            uploaded_revision: None,
            status: String::new(),
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Apply one command. Save and Load open native file dialogs.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SelectPencil => self.editor.select_pencil(),
            Action::SelectEraser => self.editor.select_eraser(),
            Action::SelectFill => self.editor.select_fill(),
            Action::SelectShape(shape) => self.editor.select_shape(shape),
            Action::SetShapeFilled(filled) => self.editor.set_shape_filled(filled),
            Action::SetColor(color) => self.editor.set_color(color),
            Action::SetWidth(width) => self.editor.set_width(width),
            Action::Undo => {
                self.editor.undo();
            }
            Action::Redo => {
                self.editor.redo();
            }
            Action::Clear => {
                self.editor.clear();
                self.status = "Cleared".into();
            }
            Action::Save => self.save_with_dialog(),
            Action::Load => self.load_with_dialog(),
        }
    }

    fn save_with_dialog(&mut self) {
        let dialog = rfd::FileDialog::new()
            .set_title("Save drawing")
            .set_directory(self.editor.export_dir())
            .set_file_name(EXPORT_FILE_NAME)
            .add_filter("PNG image", &["png"]);

        let Some(path) = dialog.save_file() else {
            return;
        };

        match self.editor.save_to(&path) {
            Ok(()) => self.status = format!("Saved {}", path.display()),
            Err(e) => {
                error!(error = %format!("{e:#}"), "save failed");
                self.status = format!("Save failed: {e:#}");
            }
        }
    }

    fn load_with_dialog(&mut self) {
        let dialog = rfd::FileDialog::new()
            .set_title("Open image")
            .add_filter("Image", IMPORT_EXTENSIONS);

        let Some(path) = dialog.pick_file() else {
            return;
        };

        match self.editor.load(&path) {
            Ok(()) => self.status = format!("Loaded {}", path.display()),
            Err(e) => {
                error!(error = %format!("{e:#}"), "load failed");
                self.status = format!("Load failed: {e:#}");
            }
        }
    }

    fn toolbar(&self, ui: &mut egui::Ui) -> Vec<Action> {
        let mut actions = Vec::new();
        let tools = self.editor.tools();
        let history = self.editor.history();

        ui.horizontal_wrapped(|ui| {
            for (kind, action) in [
                (ToolKind::Pencil, Action::SelectPencil),
                (ToolKind::Eraser, Action::SelectEraser),
                (ToolKind::Fill, Action::SelectFill),
            ] {
                if ui.selectable_label(tools.tool == kind, kind.label()).clicked() {
                    actions.push(action);
                }
            }

            ui.separator();

            let mut shape = tools.shape;
            egui::ComboBox::from_label("Shape")
                .selected_text(shape.label())
                .show_ui(ui, |ui| {
                    for kind in ShapeKind::all() {
                        ui.selectable_value(&mut shape, *kind, kind.label());
                    }
                });
            if shape != tools.shape {
                actions.push(Action::SelectShape(shape));
            }

            let shape_tool = tools.tool == ToolKind::Shape;
            let mut filled = shape_tool && tools.filling;
            if ui
                .add_enabled(shape_tool, egui::Checkbox::new(&mut filled, "Filled"))
                .changed()
            {
                actions.push(Action::SetShapeFilled(filled));
            }

            ui.separator();

            let mut color = tools.color;
            if egui::color_picker::color_edit_button_srgba(
                ui,
                &mut color,
                egui::color_picker::Alpha::Opaque,
            )
            .changed()
            {
                actions.push(Action::SetColor(color));
            }

            let mut width = tools.width.get();
            if ui
                .add(egui::Slider::new(&mut width, BrushWidth::MIN..=BrushWidth::MAX).text("Width"))
                .changed()
            {
                actions.push(Action::SetWidth(width));
            }

            ui.separator();

            if ui
                .add_enabled(history.can_undo(), egui::Button::new("Undo"))
                .clicked()
            {
                actions.push(Action::Undo);
            }
            if ui
                .add_enabled(history.can_redo(), egui::Button::new("Redo"))
                .clicked()
            {
                actions.push(Action::Redo);
            }
            if ui.button("Clear").clicked() {
                actions.push(Action::Clear);
            }
            if ui.button("Save").clicked() {
                actions.push(Action::Save);
            }
            if ui.button("Load").clicked() {
                actions.push(Action::Load);
            }
        });

        actions
    }

    fn status_bar(&self, ui: &mut egui::Ui) {
        let tools = self.editor.tools();
        let history = self.editor.history();
        let position = history.cursor().map_or(0, |c| c + 1);

        ui.horizontal(|ui| {
            ui.label(format!("{} ({}px)", tools.tool.label(), tools.width.get()));
            ui.separator();
            ui.label(format!("History {}/{}", position, history.len()));
            if !self.status.is_empty() {
                ui.separator();
                ui.label(&self.status);
            }
        });
    }

    fn shortcuts(ctx: &egui::Context) -> Vec<Action> {
        let undo = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
        let redo = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);
        let redo_shifted = KeyboardShortcut::new(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z);

        ctx.input_mut(|i| {
            let mut actions = Vec::new();
            // Shift+Z first: the plain shortcut would also match it.
            if i.consume_shortcut(&redo_shifted) || i.consume_shortcut(&redo) {
                actions.push(Action::Redo);
            }
            if i.consume_shortcut(&undo) {
                actions.push(Action::Undo);
            }
            actions
        })
    }

    fn canvas_panel(&mut self, ui: &mut egui::Ui) {
        let size = ui.available_size();
        self.editor.resize(size.x.floor() as u32, size.y.floor() as u32);
        self.sync_texture(ui.ctx());

        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::drag());

        if let Some(texture) = &self.texture {
            let canvas = self.editor.canvas();
            let image_rect = egui::Rect::from_min_size(
                rect.min,
                egui::vec2(canvas.width() as f32, canvas.height() as f32),
            );
            let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            ui.painter()
                .image(texture.id(), image_rect, uv, egui::Color32::WHITE);
        }

        if let Some(hover) = response.hover_pos() {
            let radius = (self.editor.cursor_size() as f32 / 2.0).max(1.0);
            ui.painter()
                .circle_stroke(hover, radius, egui::Stroke::new(1.0, egui::Color32::GRAY));
        }

        let (pressed, released, moving, pos) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.is_moving(),
                i.pointer.interact_pos(),
            )
        });
        let Some(pos) = pos else {
            return;
        };
        let at = Point::new(pos.x - rect.min.x, pos.y - rect.min.y);

        if pressed && response.hovered() {
            self.editor.pointer_down(at);
        }
        if self.editor.is_drawing() {
            if moving {
                self.editor.pointer_move(at);
            }
            if released {
                self.editor.pointer_up(at);
            }
        }

        // Pixels may have changed this frame; upload before the next paint.
        if self.uploaded_revision != Some(self.editor.revision()) {
            ui.ctx().request_repaint();
        }
    }

    fn sync_texture(&mut self, ctx: &egui::Context) {
        let revision = self.editor.revision();
        if self.texture.is_some() && self.uploaded_revision == Some(revision) {
            return;
        }

        let canvas = self.editor.canvas();
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [canvas.width() as usize, canvas.height() as usize],
            &canvas.to_rgba(),
        );

        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                info!(
                    width = canvas.width(),
                    height = canvas.height(),
                    "uploading canvas texture"
                );
                self.texture =
                    Some(ctx.load_texture("sketchpad-canvas", image, egui::TextureOptions::NEAREST));
            }
        }
        self.uploaded_revision = Some(revision);
    }
}

impl eframe::App for SketchpadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions = Self::shortcuts(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            actions.extend(self.toolbar(ui));
        });
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            self.status_bar(ui);
        });

        for action in actions {
            self.apply(action);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.canvas_panel(ui));
    }
}
