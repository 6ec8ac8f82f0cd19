//! Force-directed graph embedding.
//!
//! This file computes 2-D positions for the clustered mesh by iterating a
//! spring model: all node pairs repel, linked nodes attract, and movement
//! is capped by a falling temperature. The final layout is centered and
//! scaled to the requested canvas size, then rounded to integer points.

use crate::layout::Point;

use super::graph::LabGraph;

/// Iterations of the spring model
const ITERATIONS: usize = 100;

/// Compute integer positions for every node, scaled to the canvas.
///
/// The initial placement is a circle, which keeps the embedding fully
/// deterministic for a given graph. `scale` is the canvas half-extent;
/// the caller passes sqrt(node_count) * distance.
pub fn force_directed(graph: &LabGraph, scale: f64) -> Vec<Point> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![Point::new(0, 0)];
    }

    let mut pos = initial_circle(n, scale);
    // optimal pairwise distance for the given canvas area
    let k = scale / (n as f64).sqrt();
    let mut temperature = scale * 0.1;
    let cooling = temperature / (ITERATIONS as f64 + 1.0);

    for _ in 0..ITERATIONS {
        let mut disp = vec![(0.0f64, 0.0f64); n];

        // repulsion between every pair
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = pos[i].0 - pos[j].0;
                let dy = pos[i].1 - pos[j].1;
                let dist = (dx * dx + dy * dy).sqrt().max(1e-9);
                let force = k * k / dist;
                let fx = dx / dist * force;
                let fy = dy / dist * force;
                disp[i].0 += fx;
                disp[i].1 += fy;
                disp[j].0 -= fx;
                disp[j].1 -= fy;
            }
        }

        // attraction along edges
        for &(a, b) in graph.edges() {
            let dx = pos[a].0 - pos[b].0;
            let dy = pos[a].1 - pos[b].1;
            let dist = (dx * dx + dy * dy).sqrt().max(1e-9);
            let force = dist * dist / k;
            let fx = dx / dist * force;
            let fy = dy / dist * force;
            disp[a].0 -= fx;
            disp[a].1 -= fy;
            disp[b].0 += fx;
            disp[b].1 += fy;
        }

        // move, capped by the current temperature
        for i in 0..n {
            let (dx, dy) = disp[i];
            let length = (dx * dx + dy * dy).sqrt();
            if length > 0.0 {
                let step = length.min(temperature);
                pos[i].0 += dx / length * step;
                pos[i].1 += dy / length * step;
            }
        }

        temperature = (temperature - cooling).max(1e-3);
    }

    rescale(&mut pos, scale);
    pos.iter()
        .map(|&(x, y)| Point::new(x.round() as i32, y.round() as i32))
        .collect()
}

/// Deterministic starting layout: nodes evenly spread on a circle
fn initial_circle(n: usize, scale: f64) -> Vec<(f64, f64)> {
    let radius = scale.max(1.0) / 2.0;
    (0..n)
        .map(|i| {
            let angle = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
            (radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Center the layout on the origin and stretch it to the canvas extent
fn rescale(pos: &mut [(f64, f64)], scale: f64) {
    let n = pos.len() as f64;
    let cx = pos.iter().map(|p| p.0).sum::<f64>() / n;
    let cy = pos.iter().map(|p| p.1).sum::<f64>() / n;
    let mut max_abs = 0.0f64;
    for p in pos.iter_mut() {
        p.0 -= cx;
        p.1 -= cy;
        max_abs = max_abs.max(p.0.abs()).max(p.1.abs());
    }
    if max_abs > 0.0 {
        let factor = scale / max_abs;
        for p in pos.iter_mut() {
            p.0 *= factor;
            p.1 *= factor;
        }
    }
}
