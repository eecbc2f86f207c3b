use eframe::egui;
use image::RgbaImage;

use tg_app::selection::{self, RectI32};
use tg_ui::{build_overlay_render_list, mask_rects, OverlayStyle, RenderItem};

/// Host state for one overlay session.
///
/// The frozen full-screen frame doubles as the overlay backdrop and as the
/// source the confirmed rectangle is cut from, so the delivered pixels are
/// exactly what the user saw under the selection.
pub struct OverlayState {
    active: bool,
    backdrop: Option<RgbaImage>,
    texture: Option<egui::TextureHandle>,
    style: OverlayStyle,
}

impl OverlayState {
    pub fn new() -> Self {
        Self {
            active: false,
            backdrop: None,
            texture: None,
            style: OverlayStyle::default(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn open(&mut self, frame: RgbaImage) {
        self.backdrop = Some(frame);
        self.texture = None;
        self.active = true;
    }

    /// Hide the overlay. The backdrop stays staged until the pending capture
    /// request consumes it.
    pub fn close(&mut self) {
        self.active = false;
        self.texture = None;
    }

    pub fn take_backdrop(&mut self) -> Option<RgbaImage> {
        self.backdrop.take()
    }
}

impl Default for OverlayState {
    fn default() -> Self {
        Self::new()
    }
}

/// Cut `rect` (screen pixels) out of the frozen frame.
///
/// The rectangle is clamped to the frame; a degenerate request yields an
/// empty image for the extraction path to deal with.
pub fn crop_region(frame: &RgbaImage, rect: RectI32) -> RgbaImage {
    let left = rect.left.clamp(0, frame.width() as i32);
    let top = rect.top.clamp(0, frame.height() as i32);
    let right = rect.right.clamp(0, frame.width() as i32);
    let bottom = rect.bottom.clamp(0, frame.height() as i32);

    let width = (right - left).max(0) as u32;
    let height = (bottom - top).max(0) as u32;
    if width == 0 || height == 0 {
        return RgbaImage::new(width, height);
    }

    image::imageops::crop_imm(frame, left as u32, top as u32, width, height).to_image()
}

/// Drive the overlay viewport for one frame.
///
/// Returns the selection actions produced by this frame's input; the caller
/// dispatches them into the reducer.
pub fn show(
    ctx: &egui::Context,
    state: &mut OverlayState,
    selection_rect: Option<RectI32>,
) -> Vec<selection::Action> {
    let mut actions = Vec::new();

    ctx.show_viewport_immediate(
        egui::ViewportId::from_hash_of("selection_overlay"),
        egui::ViewportBuilder::default()
            .with_title("Select Region")
            .with_fullscreen(true)
            .with_decorations(false)
            .with_always_on_top(),
        |ctx, _class| {
            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| {
                    ctx.output_mut(|o| o.cursor_icon = egui::CursorIcon::Crosshair);
                    let ppp = ctx.pixels_per_point();

                    if state.texture.is_none()
                        && let Some(frame) = &state.backdrop
                    {
                        let size = [frame.width() as usize, frame.height() as usize];
                        let pixels = egui::ColorImage::from_rgba_unmultiplied(size, frame.as_raw());
                        state.texture = Some(ctx.load_texture(
                            "overlay_backdrop",
                            pixels,
                            egui::TextureOptions::LINEAR,
                        ));
                    }

                    let (response, painter) =
                        ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());

                    if let Some(texture) = &state.texture {
                        painter.image(
                            texture.id(),
                            response.rect,
                            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                            egui::Color32::WHITE,
                        );
                    }

                    // Pointer input in physical screen pixels.
                    if let Some(pos) = response.interact_pointer_pos() {
                        let x = (pos.x * ppp).round() as i32;
                        let y = (pos.y * ppp).round() as i32;

                        if response.drag_started() {
                            actions.push(selection::Action::PointerDown { x, y });
                        } else if response.drag_stopped() {
                            actions.push(selection::Action::PointerUp { x, y });
                        } else if response.dragged() {
                            actions.push(selection::Action::PointerMove { x, y });
                        }
                    }

                    if ctx.input(|i| i.key_pressed(egui::Key::Escape))
                        || response.secondary_clicked()
                    {
                        actions.push(selection::Action::Cancel);
                    }

                    let screen_size = state
                        .backdrop
                        .as_ref()
                        .map(|f| (f.width() as i32, f.height() as i32))
                        .unwrap_or((0, 0));
                    let list = build_overlay_render_list(screen_size, selection_rect, &state.style);
                    paint_render_list(&painter, &list, ppp);
                });
        },
    );

    actions
}

fn paint_render_list(painter: &egui::Painter, list: &tg_ui::RenderList, ppp: f32) {
    for item in list.iter() {
        match item {
            RenderItem::SelectionMask {
                screen_rect,
                selection_rect,
                mask_color,
                ..
            } => {
                for strip in mask_rects(*screen_rect, *selection_rect) {
                    painter.rect_filled(to_ui_rect(&strip, ppp), 0.0, to_color32(*mask_color));
                }
            }

            RenderItem::SelectionFill { rect, color, .. } => {
                painter.rect_filled(to_ui_rect(rect, ppp), 0.0, to_color32(*color));
            }

            RenderItem::SelectionBorder {
                rect, color, width, ..
            } => {
                painter.rect_stroke(
                    to_ui_rect(rect, ppp),
                    0.0,
                    egui::Stroke::new(width / ppp, to_color32(*color)),
                );
            }

            RenderItem::SizeBadge {
                x,
                y,
                text,
                text_color,
                background,
                ..
            } => {
                let pos = egui::pos2(x / ppp, y / ppp);
                let galley = painter.layout_no_wrap(
                    text.clone(),
                    egui::FontId::proportional(13.0),
                    to_color32(*text_color),
                );
                let padding = egui::vec2(4.0, 2.0);
                painter.rect_filled(
                    egui::Rect::from_min_size(pos, galley.size() + padding * 2.0),
                    2.0,
                    to_color32(*background),
                );
                painter.galley(pos + padding, galley, to_color32(*text_color));
            }
        }
    }
}

#[inline]
fn to_ui_rect(rect: &tg_ui::Rectangle, ppp: f32) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(rect.x / ppp, rect.y / ppp),
        egui::vec2(rect.width / ppp, rect.height / ppp),
    )
}

#[inline]
fn to_color32(color: tg_ui::Color) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(
        (color.r * 255.0) as u8,
        (color.g * 255.0) as u8,
        (color.b * 255.0) as u8,
        (color.a * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use tg_app::selection::RectI32;

    fn checker(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        })
    }

    #[test]
    fn crop_cuts_exactly_the_requested_rect() {
        let frame = checker(100, 80);
        let rect = RectI32 {
            left: 10,
            top: 20,
            right: 40,
            bottom: 50,
        };

        let cut = super::crop_region(&frame, rect);
        assert_eq!((cut.width(), cut.height()), (30, 30));
        assert_eq!(cut.get_pixel(0, 0), frame.get_pixel(10, 20));
        assert_eq!(cut.get_pixel(29, 29), frame.get_pixel(39, 49));
    }

    #[test]
    fn crop_clamps_to_the_frame_bounds() {
        let frame = checker(50, 50);
        let rect = RectI32 {
            left: 40,
            top: 40,
            right: 90,
            bottom: 90,
        };

        let cut = super::crop_region(&frame, rect);
        assert_eq!((cut.width(), cut.height()), (10, 10));
    }

    #[test]
    fn degenerate_crop_yields_an_empty_image() {
        let frame = checker(50, 50);
        let rect = RectI32 {
            left: 25,
            top: 10,
            right: 25,
            bottom: 30,
        };

        let cut = super::crop_region(&frame, rect);
        assert_eq!(cut.width(), 0);
    }
}
