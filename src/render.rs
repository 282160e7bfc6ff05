use crate::resources::{Resources, Sprite};
use crate::state::{DrawCommand, Frame, TileKind, Vec2};

use miniquad::*;
use std::collections::HashMap;

#[repr(C)]
struct Uniforms {
    mvp: [f32; 16],
    color: [f32; 4],
    uv_base: [f32; 4],  // xy used
    uv_scale: [f32; 4], // xy used
}

#[repr(C)]
struct Vertex {
    pos: [f32; 2],
    uv: [f32; 2],
}

#[derive(Eq, PartialEq, Hash, Clone, Copy)]
enum TextureIndexes {
    White1x1,
    Sprite(Sprite),
}

struct TextureInfo {
    w: f32,
    h: f32,
    texture: TextureId,
}

const SKY_COLOR: (f32, f32, f32, f32) = (0.45, 0.70, 0.95, 1.0);
const SOLID_COLOR: [f32; 4] = [0.35, 0.25, 0.18, 1.0];
const COIN_COLOR: [f32; 4] = [1.0, 0.85, 0.2, 1.0];
const KILL_BLOCK_COLOR: [f32; 4] = [0.80, 0.12, 0.12, 1.0];

/// Coins are drawn as a centered square this fraction of a tile wide.
const COIN_SCALE: f32 = 0.5;

pub struct Renderer {
    pub ctx: Box<Context>,
    pipeline: Pipeline,
    bindings: Bindings,
    textures: HashMap<TextureIndexes, TextureInfo>,
    screen_w: f32,
    screen_h: f32,
}

fn upload_texture(ctx: &mut Context, w: u32, h: u32, rgba: &[u8]) -> TextureInfo {
    let texture = ctx.new_texture_from_rgba8(w as u16, h as u16, rgba);
    ctx.texture_set_filter(texture, FilterMode::Nearest, MipmapFilterMode::None);
    ctx.texture_set_wrap(texture, TextureWrap::Clamp, TextureWrap::Clamp);

    TextureInfo {
        w: w as f32,
        h: h as f32,
        texture,
    }
}

impl Renderer {
    pub fn new(resources: &Resources) -> Renderer {
        let mut ctx = window::new_rendering_backend();

        // unit quad with UVs (0..1)
        let vertices: [Vertex; 4] = [
            Vertex {
                pos: [0.0, 0.0],
                uv: [0.0, 0.0],
            },
            Vertex {
                pos: [1.0, 0.0],
                uv: [1.0, 0.0],
            },
            Vertex {
                pos: [1.0, 1.0],
                uv: [1.0, 1.0],
            },
            Vertex {
                pos: [0.0, 1.0],
                uv: [0.0, 1.0],
            },
        ];
        let indices: [u16; 6] = [0, 1, 2, 0, 2, 3];

        let vertex_buffer = ctx.new_buffer(
            BufferType::VertexBuffer,
            BufferUsage::Immutable,
            BufferSource::slice(&vertices),
        );
        let index_buffer = ctx.new_buffer(
            BufferType::IndexBuffer,
            BufferUsage::Immutable,
            BufferSource::slice(&indices),
        );

        let shader = ctx
            .new_shader(
                ShaderSource::Glsl {
                    vertex: VERTEX_SHADER,
                    fragment: FRAGMENT_SHADER,
                },
                ShaderMeta {
                    images: vec!["tex".to_string()],
                    uniforms: UniformBlockLayout {
                        uniforms: vec![
                            UniformDesc::new("mvp", UniformType::Mat4),
                            UniformDesc::new("color", UniformType::Float4),
                            UniformDesc::new("uv_base", UniformType::Float4),
                            UniformDesc::new("uv_scale", UniformType::Float4),
                        ],
                    },
                },
            )
            .expect("failed to compile shader");

        let pipeline = ctx.new_pipeline(
            &[BufferLayout::default()],
            &[
                VertexAttribute::new("pos", VertexFormat::Float2),
                VertexAttribute::new("uv", VertexFormat::Float2),
            ],
            shader,
            PipelineParams {
                color_blend: Some(BlendState::new(
                    Equation::Add,
                    BlendFactor::Value(BlendValue::SourceAlpha),
                    BlendFactor::OneMinusValue(BlendValue::SourceAlpha),
                )),
                cull_face: CullFace::Nothing,
                ..Default::default()
            },
        );

        let mut textures = HashMap::new();
        textures.insert(
            TextureIndexes::White1x1,
            upload_texture(&mut *ctx, 1, 1, &[255, 255, 255, 255]),
        );
        for sprite in Sprite::ALL {
            let image = resources.sprite(*sprite);
            textures.insert(
                TextureIndexes::Sprite(*sprite),
                upload_texture(&mut *ctx, image.w, image.h, &image.rgba),
            );
        }

        let bindings = Bindings {
            vertex_buffers: vec![vertex_buffer],
            index_buffer,
            images: vec![textures[&TextureIndexes::White1x1].texture],
        };

        let (screen_w, screen_h) = window::screen_size();

        Renderer {
            ctx,
            pipeline,
            bindings,
            textures,
            screen_w,
            screen_h,
        }
    }

    pub fn resize(&mut self, w: f32, h: f32) {
        self.screen_w = w;
        self.screen_h = h;
    }

    /// Draws one frame of world content. The caller commits the frame after any overlays.
    pub fn draw(&mut self, frame: &Frame) {
        let clear = PassAction::Clear {
            color: Some(SKY_COLOR),
            depth: Some(1.0),
            stencil: Some(0),
        };

        self.ctx.begin_default_pass(clear);
        self.ctx.apply_pipeline(&self.pipeline);
        self.ctx.apply_bindings(&self.bindings);

        for command in &frame.commands {
            match *command {
                DrawCommand::Tile { kind, x, y, size } => {
                    self.draw_tile(frame.camera_x, kind, x, y, size)
                }
                DrawCommand::Sprite { sprite, feet, flip } => {
                    self.draw_sprite(frame.camera_x, sprite, feet, flip)
                }
            }
        }

        self.ctx.end_render_pass();
    }

    fn draw_tile(&mut self, camera_x: f32, kind: TileKind, x: f32, y: f32, size: f32) {
        match kind {
            TileKind::Empty => {}
            TileKind::Solid => self.draw_rect(camera_x, x, y, size, size, SOLID_COLOR),
            TileKind::KillBlock => self.draw_rect(camera_x, x, y, size, size, KILL_BLOCK_COLOR),
            TileKind::Coin => {
                let coin = size * COIN_SCALE;
                let inset = (size - coin) / 2.0;
                self.draw_rect(camera_x, x + inset, y + inset, coin, coin, COIN_COLOR)
            }
        }
    }

    /// `feet` is the bottom-center of the image. Flipping mirrors the UVs.
    fn draw_sprite(&mut self, camera_x: f32, sprite: Sprite, feet: Vec2, flip: bool) {
        let (w, h, texture) = {
            let info = &self.textures[&TextureIndexes::Sprite(sprite)];
            (info.w, info.h, info.texture)
        };
        let px = feet.x - w / 2.0;
        let py = feet.y - h;

        let (uv_base_x, uv_scale_x) = if flip { (1.0, -1.0) } else { (0.0, 1.0) };

        self.draw_quad(
            camera_x,
            texture,
            px,
            py,
            w,
            h,
            [1.0, 1.0, 1.0, 1.0],
            [uv_base_x, 0.0],
            [uv_scale_x, 1.0],
        );
    }

    fn draw_rect(&mut self, camera_x: f32, px: f32, py: f32, w: f32, h: f32, color: [f32; 4]) {
        // white texture and full-quad UVs
        let white = self.textures[&TextureIndexes::White1x1].texture;
        self.draw_quad(camera_x, white, px, py, w, h, color, [0.0, 0.0], [1.0, 1.0]);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_quad(
        &mut self,
        camera_x: f32,
        texture: TextureId,
        px: f32,
        py: f32,
        w: f32,
        h: f32,
        color: [f32; 4],
        uv_base: [f32; 2],
        uv_scale: [f32; 2],
    ) {
        self.bindings.images[0] = texture;
        self.ctx.apply_bindings(&self.bindings);

        let view = Self::camera_view(camera_x);
        let proj = Self::ortho_mvp(self.screen_w, self.screen_h);
        let model = Self::mat4_mul(
            Self::mat4_translation(px, py),
            Self::mat4_scale(w, h),
        );
        let vp = Self::mat4_mul(proj, view);
        let mvp = Self::mat4_mul(vp, model);

        let uniforms = Uniforms {
            mvp,
            color,
            uv_base: [uv_base[0], uv_base[1], 0.0, 0.0],
            uv_scale: [uv_scale[0], uv_scale[1], 0.0, 0.0],
        };
        self.ctx.apply_uniforms(UniformsSource::table(&uniforms));
        self.ctx.draw(0, 6, 1);
    }

    fn ortho_mvp(screen_w: f32, screen_h: f32) -> [f32; 16] {
        let l = 0.0;
        let r = screen_w;
        let t = 0.0;
        let b = screen_h;
        let n = -1.0;
        let f = 1.0;
        let sx = 2.0 / (r - l);
        let sy = 2.0 / (t - b);
        let sz = -2.0 / (f - n);
        let tx = -((r + l) / (r - l));
        let ty = -((t + b) / (t - b));
        let tz = -((f + n) / (f - n));
        [
            sx, 0.0, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 0.0, sz, 0.0, tx, ty, tz, 1.0,
        ]
    }

    /// Pixel-snapped horizontal scroll.
    fn camera_view(camera_x: f32) -> [f32; 16] {
        Self::mat4_translation(-camera_x.round(), 0.0)
    }

    fn mat4_mul(a: [f32; 16], b: [f32; 16]) -> [f32; 16] {
        let mut out = [0.0f32; 16];
        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += a[k * 4 + row] * b[col * 4 + k];
                }
                out[col * 4 + row] = sum;
            }
        }
        out
    }

    fn mat4_translation(tx: f32, ty: f32) -> [f32; 16] {
        [
            1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, tx, ty, 0.0, 1.0,
        ]
    }

    fn mat4_scale(sx: f32, sy: f32) -> [f32; 16] {
        [
            sx, 0.0, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
        ]
    }
}

const VERTEX_SHADER: &str = r#"#version 100
attribute vec2 pos;
attribute vec2 uv;
uniform mat4 mvp;
uniform vec4 color;
uniform vec4 uv_base;
uniform vec4 uv_scale;
varying vec4 v_color;
varying vec2 v_uv;
void main() {
    gl_Position = mvp * vec4(pos, 0.0, 1.0);
    v_color = color;
    v_uv = uv_base.xy + uv * uv_scale.xy;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 100
precision mediump float;
varying vec4 v_color;
varying vec2 v_uv;
uniform sampler2D tex;
void main() {
    gl_FragColor = texture2D(tex, v_uv) * v_color;
}
"#;
