//! Ready-made renders of a mesh: solid silhouette, wireframe, flat shading and per-vertex shading.
//!
//! Each function issues its draw calls into the given frame buffer without clearing it first, so
//! callers reset the buffer between independent images.

use vek::*;

use super::{camera::rotation_y, normalized_or_zero, Mesh, Projection, Scene};
use crate::{
    shaders, FragmentAttributes, FrameBuffer, FrameBufferAttributes, Pipeline, Program,
    UniformAttributes, VertexAttributes,
};

/// Line thickness, in pixels, of wireframe edges.
pub const LINE_THICKNESS: f32 = 0.5;

/// How far behind the stored depth a wireframe overlay fragment may be and still be drawn.
pub const WIREFRAME_DEPTH_BIAS: f32 = 1e-3;

const RED: Rgba<f32> = Rgba {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

const BLACK: Rgba<f32> = Rgba {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// The position a fragment carries into the depth test, where smaller z is nearer.
///
/// The orthographic volume maps the near plane to +1, so its depth is negated. The perspective
/// volume already maps near to -1.
pub fn depth_position(position: Vec4<f32>, projection: Projection) -> Vec4<f32> {
    let ndc = if position.w != 0.0 {
        position / position.w
    } else {
        position
    };
    match projection {
        Projection::Orthographic => ndc * Vec4::new(1.0, 1.0, -1.0, 1.0),
        Projection::Perspective => ndc,
    }
}

/// Fragment shader for lit surfaces: the vertex colour at the depth-test position.
fn lit_fragment(
    projection: Projection,
) -> impl Fn(&VertexAttributes, &UniformAttributes) -> FragmentAttributes + Copy {
    move |va, uniform| FragmentAttributes {
        color: Rgba {
            a: uniform.color.a,
            ..va.color
        },
        position: depth_position(va.position, projection),
    }
}

/// Fragment shader for unlit edges: the uniform colour at the depth-test position.
fn edge_fragment(
    projection: Projection,
) -> impl Fn(&VertexAttributes, &UniformAttributes) -> FragmentAttributes + Copy {
    move |va, uniform| FragmentAttributes {
        color: uniform.color,
        position: depth_position(va.position, projection),
    }
}

/// Draw the mesh's edges in the uniform colour, merged into the frame by `blend`.
fn draw_edges<Bs>(
    scene: &Scene,
    mesh: &Mesh,
    uniform: &UniformAttributes,
    blend: Bs,
    frame: &mut FrameBuffer,
) where
    Bs: Fn(&FragmentAttributes, &FrameBufferAttributes) -> FrameBufferAttributes,
{
    let program = Program::new(shaders::transform, edge_fragment(scene.camera.projection), blend);
    program.rasterize_lines(uniform, &mesh.edge_vertices(), LINE_THICKNESS, frame);
}

/// The mesh as a solid red silhouette. Later triangles overwrite earlier ones.
pub fn simple_render(scene: &Scene, mesh: &Mesh, frame: &mut FrameBuffer) {
    let uniform = UniformAttributes {
        color: RED,
        ..scene.camera.build_uniform(Mat4::identity())
    };
    let program = Program::new(shaders::transform, shaders::uniform_color, shaders::overwrite);
    program.rasterize_triangles(&uniform, &mesh.triangle_vertices(), frame);
}

/// The mesh's edges in red, rotated by `alpha` radians about the y axis.
pub fn wireframe_render(scene: &Scene, mesh: &Mesh, alpha: f32, frame: &mut FrameBuffer) {
    let uniform = UniformAttributes {
        color: RED,
        ..scene.camera.build_uniform(rotation_y(alpha))
    };
    draw_edges(scene, mesh, &uniform, shaders::overwrite, frame);
}

/// Draw triangles lit by the scene's lights after placing them with `model`.
fn draw_lit(scene: &Scene, model: Mat4<f32>, vertices: &[VertexAttributes], frame: &mut FrameBuffer) {
    let vertex_shader = |va: &VertexAttributes, uniform: &UniformAttributes| {
        let world = model * va.position;
        let normal = normalized_or_zero((model * Vec4::from_direction(va.normal)).xyz());
        VertexAttributes {
            position: uniform.view * va.position,
            normal,
            color: scene.shade(world.xyz(), normal),
        }
    };
    let program = Program::new(
        vertex_shader,
        lit_fragment(scene.camera.projection),
        shaders::depth_test,
    );
    program.rasterize_triangles(&scene.camera.build_uniform(model), vertices, frame);
}

/// Draw black edges over whatever is already in the frame, hiding those behind stored depth.
fn wireframe_overlay(scene: &Scene, mesh: &Mesh, model: Mat4<f32>, frame: &mut FrameBuffer) {
    let uniform = UniformAttributes {
        color: BLACK,
        ..scene.camera.build_uniform(model)
    };
    let blend = shaders::biased_depth_test(WIREFRAME_DEPTH_BIAS);
    draw_edges(scene, mesh, &uniform, blend, frame);
}

/// Lit faces with one normal per face, with the wireframe drawn on top.
pub fn flat_shading(scene: &Scene, mesh: &Mesh, alpha: f32, frame: &mut FrameBuffer) {
    let model = rotation_y(alpha);
    draw_lit(scene, model, &mesh.flat_shaded_vertices(), frame);
    wireframe_overlay(scene, mesh, model, frame);
}

/// Lit faces with averaged per-vertex normals.
pub fn pv_shading(scene: &Scene, mesh: &Mesh, alpha: f32, frame: &mut FrameBuffer) {
    draw_lit(scene, rotation_y(alpha), &mesh.smooth_shaded_vertices(), frame);
}
