use super::main::AttendanceApp;
use crate::attendance::core::{CameraStatus, FormField, Msg, Phase};
use crate::attendance_endpoint::interface::Location;
use chrono::Utc;
use egui::{Color32, ColorImage, RichText, TextureHandle, TextureOptions};
use image::RgbImage;

const PREVIEW_SIZE: [f32; 2] = [300.0, 200.0];

fn upload(
    ctx: &egui::Context,
    texture: &mut Option<TextureHandle>,
    name: &str,
    image: &RgbImage,
) {
    let size = [image.width() as usize, image.height() as usize];
    let color_image = ColorImage::from_rgb(size, image.as_raw());
    match texture {
        Some(texture) => texture.set(color_image, TextureOptions::LINEAR),
        None => *texture = Some(ctx.load_texture(name, color_image, TextureOptions::LINEAR)),
    }
}

impl AttendanceApp {
    fn refresh_textures(&mut self, ctx: &egui::Context) {
        if self.model.phase == Phase::Editing && self.model.camera == CameraStatus::Ready {
            if let Some(frame) = self.camera.latest_frame() {
                upload(ctx, &mut self.preview_texture, "camera-preview", &frame.0);
            }
        }

        match &self.model.photo {
            Some(photo) => upload(ctx, &mut self.photo_texture, "captured-photo", &photo.image),
            None => self.photo_texture = None,
        }
    }

    fn render_success(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(RichText::new("✔").size(48.0).color(Color32::from_rgb(34, 197, 94)));
            ui.label(RichText::new("Berhasil!").size(20.0).strong());
            ui.label("Absensi Anda telah direkam.");
            ui.add_space(24.0);
        });
    }

    fn render_camera(&self, ui: &mut egui::Ui, msgs: &mut Vec<Msg>) {
        let heading = match &self.model.camera {
            CameraStatus::Ready => "Ambil Foto",
            CameraStatus::Pending => "Menghubungkan kamera...",
            CameraStatus::Unavailable(_) => "Kamera Tidak Tersedia",
        };
        ui.label(RichText::new(heading).strong());

        let shown = self
            .photo_texture
            .as_ref()
            .or(self.preview_texture.as_ref().filter(|_| self.model.camera == CameraStatus::Ready));

        match shown {
            Some(texture) => {
                ui.image((texture.id(), egui::vec2(PREVIEW_SIZE[0], PREVIEW_SIZE[1])));
            }
            None => {
                let (rect, _) = ui.allocate_exact_size(
                    egui::vec2(PREVIEW_SIZE[0], PREVIEW_SIZE[1]),
                    egui::Sense::hover(),
                );
                ui.painter().rect_filled(rect, 8.0, Color32::from_gray(230));
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "📷",
                    egui::FontId::proportional(40.0),
                    Color32::GRAY,
                );
            }
        }

        if self.model.camera == CameraStatus::Ready {
            let label = if self.model.photo.is_some() {
                "Ambil Ulang Foto"
            } else {
                "Ambil Foto"
            };
            if ui.button(label).clicked() {
                msgs.push(Msg::CaptureRequested);
            }
        }
    }

    fn render_form(&self, ui: &mut egui::Ui, msgs: &mut Vec<Msg>) {
        self.render_camera(ui, msgs);

        ui.add_space(12.0);
        ui.label("Nama Lengkap");
        let mut name = self.model.form.name.clone();
        let name_error = self.model.errors.get(&FormField::Name);
        let mut name_edit = egui::TextEdit::singleline(&mut name).hint_text("Masukkan nama Anda");
        if name_error.is_some() {
            name_edit = name_edit.text_color(Color32::from_rgb(239, 68, 68));
        }
        if ui.add(name_edit).changed() {
            msgs.push(Msg::NameChanged(name));
        }
        if let Some(message) = name_error {
            ui.colored_label(Color32::from_rgb(239, 68, 68), message);
        }

        ui.add_space(12.0);
        ui.label("Lokasi Absensi");
        let mut location = self.model.form.location;
        egui::ComboBox::from_id_source("location")
            .selected_text(location.label())
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut location, Location::Office, Location::Office.label());
                ui.selectable_value(&mut location, Location::Home, Location::Home.label());
            });
        if location != self.model.form.location {
            msgs.push(Msg::LocationChanged(location));
        }

        ui.add_space(16.0);
        match self.model.phase {
            Phase::Submitting => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Mengirim...");
                });
            }
            _ => {
                if ui.button("Submit Absensi").clicked() {
                    msgs.push(Msg::SubmitRequested { at: Utc::now() });
                }
            }
        }
    }

    fn render_alert(&self, ctx: &egui::Context, msgs: &mut Vec<Msg>) {
        let Some(alert) = &self.model.alert else {
            return;
        };

        egui::Window::new("Pemberitahuan")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(alert.user_message());
                if ui.button("OK").clicked() {
                    msgs.push(Msg::AlertDismissed);
                }
            });
    }
}

impl eframe::App for AttendanceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_pending();
        self.refresh_textures(ctx);

        let mut msgs = Vec::new();

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("Data disimpan otomatis ke Spreadsheet Google")
                        .small()
                        .color(Color32::GRAY),
                );
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(&self.config.window_title);
            });
            ui.add_space(12.0);

            if self.model.phase == Phase::Submitted {
                self.render_success(ui);
                return;
            }

            let interactive = self.model.alert.is_none() && self.model.phase == Phase::Editing;
            ui.add_enabled_ui(interactive, |ui| self.render_form(ui, &mut msgs));
        });

        self.render_alert(ctx, &mut msgs);

        for msg in msgs {
            self.dispatch(msg);
        }

        ctx.request_repaint_after(self.config.preview_refresh_rate);
    }
}
