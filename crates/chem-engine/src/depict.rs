//! Depicción 2D en SVG.
//!
//! Coordenadas generadas con un embebido de resortes (Fruchterman-Reingold)
//! a partir de una espiral determinista, de modo que la misma molécula produce
//! siempre la misma imagen. No pretende calidad de publicación: sólo una vista
//! legible del grafo para el panel de compuestos.

use crate::element;
use crate::molecule::{Atom, BondOrder, Molecule};

const ITERATIONS: usize = 300;
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    x: f64,
    y: f64,
}

/// Renderiza `mol` como un documento SVG de `size`×`size` píxeles.
pub fn depict_svg(mol: &Molecule, size: u32) -> String {
    let size = size.max(32) as f64;
    let coords = fit(layout(mol), size);

    let mut svg = format!(r#"<svg xmlns="http://www.w3.org/2000/svg" width="{s}" height="{s}" viewBox="0 0 {s} {s}">"#,
                          s = size);
    svg.push_str(&format!(r#"<rect width="{s}" height="{s}" fill="white"/>"#, s = size));

    let offset = (size / 60.0).max(2.0);
    for bond in mol.bonds() {
        let (a, b) = (coords[bond.begin], coords[bond.end]);
        let (nx, ny) = normal(a, b);
        match bond.order {
            BondOrder::Single => svg.push_str(&line(a, b, 0.0, nx, ny, false)),
            BondOrder::Double => {
                svg.push_str(&line(a, b, offset / 2.0, nx, ny, false));
                svg.push_str(&line(a, b, -offset / 2.0, nx, ny, false));
            }
            BondOrder::Triple => {
                svg.push_str(&line(a, b, 0.0, nx, ny, false));
                svg.push_str(&line(a, b, offset, nx, ny, false));
                svg.push_str(&line(a, b, -offset, nx, ny, false));
            }
            BondOrder::Aromatic => {
                svg.push_str(&line(a, b, 0.0, nx, ny, false));
                svg.push_str(&line(a, b, offset, nx, ny, true));
            }
        }
    }

    let font = (size / 18.0).max(8.0);
    for (idx, atom) in mol.atoms().iter().enumerate() {
        let Some(text) = label(atom, mol.degree(idx)) else { continue };
        let p = coords[idx];
        svg.push_str(&format!(r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="white"/>"#, p.x, p.y, font * 0.7));
        svg.push_str(&format!(r#"<text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{:.1}" text-anchor="middle" dominant-baseline="central" fill="{}">{}</text>"#,
                              p.x,
                              p.y,
                              font,
                              color(atom.atomic_number),
                              text));
    }
    svg.push_str("</svg>");
    svg
}

fn line(a: Point, b: Point, shift: f64, nx: f64, ny: f64, dashed: bool) -> String {
    let dash = if dashed { r#" stroke-dasharray="4,3""# } else { "" };
    format!(r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="black" stroke-width="1.5"{}/>"#,
            a.x + nx * shift,
            a.y + ny * shift,
            b.x + nx * shift,
            b.y + ny * shift,
            dash)
}

fn normal(a: Point, b: Point) -> (f64, f64) {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len = (dx * dx + dy * dy).sqrt();
    if len < f64::EPSILON {
        return (0.0, 0.0);
    }
    (-dy / len, dx / len)
}

/// Etiqueta de heteroátomos (y de carbonos aislados o cargados).
fn label(atom: &Atom, degree: usize) -> Option<String> {
    let show = atom.atomic_number != 6 || degree == 0 || atom.charge != 0 || atom.isotope.is_some();
    if !show {
        return None;
    }
    let mut text = String::new();
    if let Some(iso) = atom.isotope {
        text.push_str(&iso.to_string());
    }
    text.push_str(element::symbol(atom.atomic_number).unwrap_or("?"));
    match atom.hydrogens {
        0 => {}
        1 => text.push('H'),
        h => text.push_str(&format!("H{h}")),
    }
    match atom.charge {
        0 => {}
        1 => text.push('+'),
        -1 => text.push('-'),
        c if c > 0 => text.push_str(&format!("{c}+")),
        c => text.push_str(&format!("{}-", -c)),
    }
    Some(text)
}

fn color(atomic_number: u8) -> &'static str {
    match atomic_number {
        7 => "#2040d0",
        8 => "#d02020",
        16 => "#b09000",
        9 | 17 => "#20a020",
        35 => "#a02828",
        53 => "#8020a0",
        15 => "#e07000",
        _ => "#202020",
    }
}

fn layout(mol: &Molecule) -> Vec<Point> {
    let n = mol.atom_count();
    let mut pos: Vec<Point> = (0..n).map(|i| {
                                        let r = (i as f64 + 0.5).sqrt();
                                        let theta = i as f64 * GOLDEN_ANGLE;
                                        Point { x: r * theta.cos(), y: r * theta.sin() }
                                    })
                                    .collect();
    if n < 2 {
        return pos;
    }

    let k = 1.0f64;
    for step in 0..ITERATIONS {
        let temperature = 0.5 * (1.0 - step as f64 / ITERATIONS as f64) + 0.01;
        let mut disp = vec![Point { x: 0.0, y: 0.0 }; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let (dx, dy) = (pos[i].x - pos[j].x, pos[i].y - pos[j].y);
                let dist = (dx * dx + dy * dy).sqrt().max(0.01);
                let force = k * k / dist;
                disp[i].x += dx / dist * force;
                disp[i].y += dy / dist * force;
                disp[j].x -= dx / dist * force;
                disp[j].y -= dy / dist * force;
            }
        }
        for bond in mol.bonds() {
            let (i, j) = (bond.begin, bond.end);
            let (dx, dy) = (pos[i].x - pos[j].x, pos[i].y - pos[j].y);
            let dist = (dx * dx + dy * dy).sqrt().max(0.01);
            let force = dist * dist / k;
            disp[i].x -= dx / dist * force;
            disp[i].y -= dy / dist * force;
            disp[j].x += dx / dist * force;
            disp[j].y += dy / dist * force;
        }
        for (p, d) in pos.iter_mut().zip(&disp) {
            let len = (d.x * d.x + d.y * d.y).sqrt();
            if len > 0.0 {
                let moved = len.min(temperature);
                p.x += d.x / len * moved;
                p.y += d.y / len * moved;
            }
        }
    }
    pos
}

/// Escala y centra las coordenadas dentro del lienzo con un margen.
fn fit(points: Vec<Point>, size: f64) -> Vec<Point> {
    if points.is_empty() {
        return points;
    }
    let margin = size * 0.12;
    let (min_x, max_x) = points.iter().fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
    let (min_y, max_y) = points.iter().fold((f64::MAX, f64::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
    let span = (max_x - min_x).max(max_y - min_y);
    // Una molécula diminuta no debe ocupar todo el lienzo.
    let scale = if span < f64::EPSILON { 0.0 } else { ((size - 2.0 * margin) / span).min(size / 4.0) };
    let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
    points.into_iter()
          .map(|p| Point { x: size / 2.0 + (p.x - cx) * scale, y: size / 2.0 + (p.y - cy) * scale })
          .collect()
}
