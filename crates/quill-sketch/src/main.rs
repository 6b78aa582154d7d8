use log::info;

use quill_engine::core::{App, AppControl, FrameCtx};
use quill_engine::device::GpuInit;
use quill_engine::logging::{init_logging, LoggingConfig};
use quill_engine::window::{KeyCode, Runtime, RuntimeConfig};
use quill_engine::{Canvas, CanvasConfig, Color, PenShape, Vec2};

const MIN_WIDTH: f64 = 1.0;
const MAX_WIDTH: f64 = 64.0;

const PALETTE: [Color; 4] = [
    Color::rgb(0.10, 0.10, 0.12),
    Color::rgb(0.85, 0.25, 0.20),
    Color::rgb(0.15, 0.45, 0.80),
    Color::rgb(0.20, 0.65, 0.30),
];

/// One freehand stroke, replayed every frame.
struct Stroke {
    shape: PenShape,
    width: f64,
    color: Color,
    points: Vec<Vec2>,
}

struct Sketch {
    strokes: Vec<Stroke>,
    drawing: bool,
    right_held: bool,
    shape: PenShape,
    width: f64,
    color: usize,
}

impl Sketch {
    fn new() -> Self {
        Self {
            strokes: Vec::new(),
            drawing: false,
            right_held: false,
            shape: PenShape::Connected,
            width: 6.0,
            color: 0,
        }
    }

    fn handle_keys(&mut self, ctx: &FrameCtx<'_>) {
        let shapes = [
            (KeyCode::Digit1, PenShape::Connected),
            (KeyCode::Digit2, PenShape::Text),
            (KeyCode::Digit3, PenShape::Circle),
            (KeyCode::Digit4, PenShape::Square),
            (KeyCode::Digit5, PenShape::Triangle),
        ];
        for (key, shape) in shapes {
            if ctx.input.is_key_down(key) && self.shape != shape {
                info!("sketch: pen shape {shape}");
                self.shape = shape;
            }
        }

        if ctx.input.is_key_down(KeyCode::KeyC) && !self.strokes.is_empty() {
            info!("sketch: cleared {} strokes", self.strokes.len());
            self.strokes.clear();
            self.drawing = false;
        }
        // Right click cycles the palette once per press.
        let right = ctx.input.mouse_right();
        if right && !self.right_held {
            self.color = (self.color + 1) % PALETTE.len();
        }
        self.right_held = right;
    }

    fn track_pointer(&mut self, ctx: &mut FrameCtx<'_>) {
        let wheel = ctx.input.mouse_wheel();
        if wheel != 0.0 {
            self.width = (self.width + wheel).clamp(MIN_WIDTH, MAX_WIDTH);
        }

        let pointer = ctx.pointer_world();
        match (ctx.input.mouse_down(), pointer) {
            (true, Some(p)) => {
                if !self.drawing {
                    self.strokes.push(Stroke {
                        shape: self.shape,
                        width: self.width,
                        color: PALETTE[self.color],
                        points: Vec::new(),
                    });
                    self.drawing = true;
                }
                if let Some(stroke) = self.strokes.last_mut() {
                    stroke.points.push(p);
                }
            }
            _ => self.drawing = false,
        }
    }

    fn draw_frame(&self, canvas: &mut Canvas) {
        let bounds = canvas.bounds();

        // Paper margin and a corner swatch showing the active colour.
        canvas.rect(bounds.min, Vec2::new(bounds.max.x, bounds.min.y + 24.0), Color::rgb(0.90, 0.90, 0.88));
        let swatch = Vec2::new(bounds.max.x - 20.0, bounds.min.y + 4.0);
        canvas.triangle(
            swatch,
            swatch + Vec2::new(16.0, 0.0),
            swatch + Vec2::new(8.0, 16.0),
            PALETTE[self.color],
        );

        for stroke in &self.strokes {
            canvas.set_shape(stroke.shape);
            canvas.set_stroke_width(stroke.width);
            canvas.set_color(stroke.color);
            canvas.pen_down();
            for p in &stroke.points {
                canvas.move_to(p.x, p.y);
            }
            canvas.pen_up();
        }
    }
}

impl App for Sketch {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        if ctx.input.is_key_down(KeyCode::Escape) {
            return AppControl::Exit;
        }

        self.handle_keys(ctx);
        self.track_pointer(ctx);

        ctx.canvas.clear();
        self.draw_frame(ctx.canvas);
        AppControl::Continue
    }
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let canvas = CanvasConfig::default()
        .with_clear_color(Color::WHITE)
        .with_shape(PenShape::Connected);
    let config = RuntimeConfig::default()
        .with_title("quill sketch")
        .with_size(1280.0, 720.0)
        .with_canvas(canvas);

    Runtime::run(config, GpuInit::default(), Sketch::new())
}
