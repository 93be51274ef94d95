//! Shape generation for 2D primitives
//!
//! All shapes come out as triangle lists in screen space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Axis-aligned filled rectangle from its top-left corner
pub fn rect(top_left: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (top_left.x, top_left.y);
    let (x1, y1) = (top_left.x + size.x, top_left.y + size.y);
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Rectangle outline of the given stroke width, drawn inside the bounds
pub fn rect_outline(top_left: Vec2, size: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(24);
    vertices.extend(rect(top_left, Vec2::new(size.x, width), color));
    vertices.extend(rect(
        top_left + Vec2::new(0.0, size.y - width),
        Vec2::new(size.x, width),
        color,
    ));
    vertices.extend(rect(top_left, Vec2::new(width, size.y), color));
    vertices.extend(rect(
        top_left + Vec2::new(size.x - width, 0.0),
        Vec2::new(width, size.y),
        color,
    ));
    vertices
}

/// Thick line segment between two points
pub fn line(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a1 = a + perp;
    let a2 = a - perp;
    let b1 = b + perp;
    let b2 = b - perp;

    vec![
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b2.x, b2.y, color),
    ]
}

/// Filled convex polygon (fan from the first point)
pub fn polygon(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    for pair in points[1..].windows(2) {
        vertices.push(Vertex::new(points[0].x, points[0].y, color));
        vertices.push(Vertex::new(pair[0].x, pair[0].y, color));
        vertices.push(Vertex::new(pair[1].x, pair[1].y, color));
    }
    vertices
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

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let (s1, c1) = theta1.sin_cos();
        let (s2, c2) = theta2.sin_cos();
        let inner1 = center + Vec2::new(c1, s1) * inner_radius;
        let outer1 = center + Vec2::new(c1, s1) * outer_radius;
        let inner2 = center + Vec2::new(c2, s2) * inner_radius;
        let outer2 = center + Vec2::new(c2, s2) * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Seven-segment masks for 0-9 (bits: a b c d e f g)
const SEGMENTS: [u8; 10] = [
    0b111_1110, // 0
    0b011_0000, // 1
    0b110_1101, // 2
    0b111_1001, // 3
    0b011_0011, // 4
    0b101_1011, // 5
    0b101_1111, // 6
    0b111_0000, // 7
    0b111_1111, // 8
    0b111_1011, // 9
];

/// A single seven-segment digit with its top-left corner at `origin`
///
/// The digit is `height` tall and `height / 2` wide.
pub fn digit(d: u8, origin: Vec2, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    let Some(&mask) = SEGMENTS.get(d as usize) else {
        return Vec::new();
    };
    let w = height / 2.0;
    let half = height / 2.0;
    let stroke = (height / 8.0).max(1.0);

    // (start, end) of each segment, a..g
    let segs = [
        (Vec2::new(0.0, 0.0), Vec2::new(w, 0.0)),
        (Vec2::new(w, 0.0), Vec2::new(w, half)),
        (Vec2::new(w, half), Vec2::new(w, height)),
        (Vec2::new(0.0, height), Vec2::new(w, height)),
        (Vec2::new(0.0, half), Vec2::new(0.0, height)),
        (Vec2::new(0.0, 0.0), Vec2::new(0.0, half)),
        (Vec2::new(0.0, half), Vec2::new(w, half)),
    ];

    let mut vertices = Vec::new();
    for (i, (a, b)) in segs.iter().enumerate() {
        if mask & (1 << (6 - i)) != 0 {
            vertices.extend(line(origin + *a, origin + *b, stroke, color));
        }
    }
    vertices
}

/// A decimal number centred on `center`
pub fn number(value: u32, center: Vec2, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    let digits: Vec<u8> = value
        .to_string()
        .bytes()
        .map(|b| b - b'0')
        .collect();
    let advance = height * 0.75;
    let total = advance * digits.len() as f32 - height * 0.25;
    let mut x = center.x - total / 2.0;
    let y = center.y - height / 2.0;

    let mut vertices = Vec::new();
    for d in digits {
        vertices.extend(digit(d, Vec2::new(x, y), height, color));
        x += advance;
    }
    vertices
}
