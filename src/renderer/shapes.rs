//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in play-area coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::sim::Aabb;

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a single filled triangle
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Player ship: nose up, swept wings, cockpit and an engine flame
pub fn ship(bounds: &Aabb) -> Vec<Vertex> {
    let Aabb { pos, size } = *bounds;
    let cx = pos.x + size.x / 2.0;
    let wing_y = pos.y + size.y * 0.8;

    let mut vertices = Vec::with_capacity(24);
    // Fuselage
    vertices.extend(triangle(
        Vec2::new(cx, pos.y),
        Vec2::new(cx + size.x * 0.2, wing_y),
        Vec2::new(cx - size.x * 0.2, wing_y),
        colors::SHIP_HULL,
    ));
    // Wings
    vertices.extend(triangle(
        Vec2::new(cx, pos.y + size.y * 0.35),
        Vec2::new(pos.x + size.x, wing_y),
        Vec2::new(pos.x, wing_y),
        colors::SHIP_HULL,
    ));
    // Cockpit
    vertices.extend(triangle(
        Vec2::new(cx, pos.y + size.y * 0.2),
        Vec2::new(cx + size.x * 0.08, pos.y + size.y * 0.45),
        Vec2::new(cx - size.x * 0.08, pos.y + size.y * 0.45),
        colors::SHIP_COCKPIT,
    ));
    // Flame
    vertices.extend(triangle(
        Vec2::new(cx - size.x * 0.12, wing_y),
        Vec2::new(cx + size.x * 0.12, wing_y),
        Vec2::new(cx, pos.y + size.y),
        colors::SHIP_FLAME,
    ));
    vertices
}

/// Enemy alien: round head with two eyes over a row of legs
pub fn alien(bounds: &Aabb) -> Vec<Vertex> {
    let Aabb { pos, size } = *bounds;
    let center = Vec2::new(pos.x + size.x / 2.0, pos.y + size.y * 0.4);
    let radius = size.x.min(size.y) * 0.4;

    let mut vertices = circle(center, radius, colors::ALIEN_BODY, 16);

    // Legs
    let leg_w = size.x / 7.0;
    let leg_top = pos.y + size.y * 0.6;
    for i in 0..3 {
        let x = pos.x + leg_w * (1.0 + 2.0 * i as f32);
        vertices.extend(rect(
            Vec2::new(x, leg_top),
            Vec2::new(leg_w, pos.y + size.y - leg_top),
            colors::ALIEN_BODY,
        ));
    }

    // Eyes
    let eye_r = radius * 0.22;
    let eye_dx = radius * 0.4;
    for dx in [-eye_dx, eye_dx] {
        vertices.extend(circle(
            center + Vec2::new(dx, -radius * 0.1),
            eye_r,
            colors::ALIEN_EYE,
            8,
        ));
    }

    vertices
}
