//! Canvas 2D backend
//!
//! Two stacked canvases: the fog layer on top with secured cells punched
//! out, and the game layer with trail, player and probe.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use super::scene::{
    ADVERSARY_COLOR, ADVERSARY_OUTLINE_COLOR, ADVERSARY_OUTLINE_WIDTH, FOG_COLOR, FOG_TINT_COLOR,
    PLAYER_OUTLINE_COLOR, PLAYER_OUTLINE_WIDTH, Rect, SECURED_COLOR, Scene, TRAIL_COLOR,
};

/// Both drawing contexts
pub struct CanvasRenderer {
    game: CanvasRenderingContext2d,
    fog: CanvasRenderingContext2d,
}

fn context_2d(
    document: &Document,
    id: &str,
    width: u32,
    height: u32,
) -> Result<CanvasRenderingContext2d, JsValue> {
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
        .dyn_into()?;
    canvas.set_width(width);
    canvas.set_height(height);
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str(&format!("no 2d context on #{id}")))?
        .dyn_into()
        .map_err(JsValue::from)
}

fn fill(ctx: &CanvasRenderingContext2d, r: &Rect) {
    ctx.fill_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64);
}

impl CanvasRenderer {
    /// Look up `#gameCanvas` and `#fogCanvas` and size them to the board
    pub fn new(document: &Document, width: u32, height: u32) -> Result<Self, JsValue> {
        Ok(Self {
            game: context_2d(document, "gameCanvas", width, height)?,
            fog: context_2d(document, "fogCanvas", width, height)?,
        })
    }

    pub fn render(&self, scene: &Scene) {
        self.render_fog(scene);
        self.render_game(scene);
    }

    fn render_fog(&self, scene: &Scene) {
        let ctx = &self.fog;
        let (w, h) = (scene.width as f64, scene.height as f64);
        ctx.clear_rect(0.0, 0.0, w, h);
        ctx.set_fill_style_str(FOG_COLOR);
        ctx.fill_rect(0.0, 0.0, w, h);

        ctx.set_global_composite_operation("destination-out").ok();
        for r in &scene.secured {
            fill(ctx, r);
        }
        ctx.set_global_composite_operation("source-over").ok();

        ctx.set_fill_style_str(FOG_TINT_COLOR);
        for r in &scene.secured {
            fill(ctx, r);
        }
    }

    fn render_game(&self, scene: &Scene) {
        let ctx = &self.game;
        ctx.clear_rect(0.0, 0.0, scene.width as f64, scene.height as f64);

        ctx.set_fill_style_str(SECURED_COLOR);
        for r in &scene.secured {
            fill(ctx, r);
        }

        ctx.set_fill_style_str(TRAIL_COLOR);
        for r in &scene.trail {
            fill(ctx, r);
        }

        let p = &scene.player;
        ctx.set_fill_style_str(p.fill);
        fill(ctx, &p.rect);
        ctx.set_stroke_style_str(PLAYER_OUTLINE_COLOR);
        ctx.set_line_width(PLAYER_OUTLINE_WIDTH);
        ctx.stroke_rect(p.rect.x as f64, p.rect.y as f64, p.rect.w as f64, p.rect.h as f64);

        let a = &scene.adversary;
        ctx.begin_path();
        ctx.arc(
            a.center.x as f64,
            a.center.y as f64,
            a.radius as f64,
            0.0,
            std::f64::consts::PI * 2.0,
        )
        .ok();
        ctx.set_fill_style_str(ADVERSARY_COLOR);
        ctx.fill();
        ctx.set_line_width(ADVERSARY_OUTLINE_WIDTH);
        ctx.set_stroke_style_str(ADVERSARY_OUTLINE_COLOR);
        ctx.stroke();
    }
}
