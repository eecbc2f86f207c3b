use crate::render::{z_order, Color, Rectangle, RenderItem, RenderList};

/// Platform-neutral integer rectangle.
///
/// We intentionally reuse the core `RectI32` so UI and core share the same
/// geometry type.
pub use tg_app::selection::RectI32;

#[inline]
fn to_rectangle_f32(rect: RectI32) -> Rectangle {
    Rectangle {
        x: rect.left as f32,
        y: rect.top as f32,
        width: (rect.right - rect.left) as f32,
        height: (rect.bottom - rect.top) as f32,
    }
}

/// Overlay cosmetics. The values are not contractual.
#[derive(Debug, Clone)]
pub struct OverlayStyle {
    pub mask_color: Color,

    pub fill_color: Color,
    pub border_color: Color,
    pub border_width: f32,

    pub badge_text_color: Color,
    pub badge_background: Color,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            mask_color: Color::rgba(0.0, 0.0, 0.0, 0.3),

            // Translucent blue-grey fill with a solid dark border.
            fill_color: Color::rgba(0.5, 0.5, 1.0, 0.5),
            border_color: Color::BLACK,
            border_width: 3.0,

            badge_text_color: Color::WHITE,
            badge_background: Color::rgba(0.0, 0.0, 0.0, 0.7),
        }
    }
}

/// Derive the overlay render list for one frame.
///
/// The mask is always present so the armed overlay reads as "selection mode"
/// even before the first pointer-down; fill, border and badge appear only
/// while a rectangle is being dragged.
pub fn build_overlay_render_list(
    screen_size: (i32, i32),
    selection_rect: Option<RectI32>,
    style: &OverlayStyle,
) -> RenderList {
    let mut render_list = RenderList::with_capacity(4);

    let screen_rect = Rectangle {
        x: 0.0,
        y: 0.0,
        width: screen_size.0 as f32,
        height: screen_size.1 as f32,
    };

    let selection = selection_rect.map(to_rectangle_f32);

    render_list.submit(RenderItem::SelectionMask {
        screen_rect,
        selection_rect: selection,
        mask_color: style.mask_color,
        z_order: z_order::MASK,
    });

    let (Some(rect), Some(selection_i32)) = (selection, selection_rect) else {
        return render_list;
    };

    render_list.submit(RenderItem::SelectionFill {
        rect,
        color: style.fill_color,
        z_order: z_order::SELECTION_FILL,
    });

    render_list.submit(RenderItem::SelectionBorder {
        rect,
        color: style.border_color,
        width: style.border_width,
        z_order: z_order::SELECTION_BORDER,
    });

    // Pixel dimensions next to the bottom-right corner, kept on screen.
    let badge_x = rect.x + rect.width + 8.0;
    let badge_y = rect.y + rect.height + 8.0;
    render_list.submit(RenderItem::SizeBadge {
        x: badge_x.min(screen_rect.width - 80.0).max(0.0),
        y: badge_y.min(screen_rect.height - 24.0).max(0.0),
        text: format!("{}×{}", selection_i32.width(), selection_i32.height()),
        text_color: style.badge_text_color,
        background: style.badge_background,
        z_order: z_order::SIZE_BADGE,
    });

    render_list
}

/// Split the mask into the strips around `selection` (the whole screen when
/// there is no selection). Zero-height/width strips are omitted.
pub fn mask_rects(screen_rect: Rectangle, selection: Option<Rectangle>) -> Vec<Rectangle> {
    let Some(sel) = selection else {
        return vec![screen_rect];
    };

    let sel_right = sel.x + sel.width;
    let sel_bottom = sel.y + sel.height;

    let candidates = [
        // Top strip, full width.
        Rectangle::new(screen_rect.x, screen_rect.y, screen_rect.width, sel.y),
        // Bottom strip, full width.
        Rectangle::new(
            screen_rect.x,
            sel_bottom,
            screen_rect.width,
            screen_rect.height - sel_bottom,
        ),
        // Left strip beside the selection.
        Rectangle::new(screen_rect.x, sel.y, sel.x, sel.height),
        // Right strip beside the selection.
        Rectangle::new(sel_right, sel.y, screen_rect.width - sel_right, sel.height),
    ];

    candidates
        .into_iter()
        .filter(|r| r.width > 0.0 && r.height > 0.0)
        .collect()
}
