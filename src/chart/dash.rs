// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

type Point = (f64, f64);

/// Splits a polyline into the visible runs of a dash pattern.
///
/// `pattern` alternates on and off lengths, starting with on. The pattern
/// carries over from one segment to the next, so dashes bend around
/// vertices. An empty pattern returns the polyline as a single run.
pub fn dash(points: &[Point], pattern: &[f64]) -> Vec<Vec<Point>> {
    if points.len() < 2 {
        return Vec::new();
    }
    if pattern.is_empty() || pattern.iter().any(|len| *len <= 0.0) {
        return vec![points.to_vec()];
    }

    let mut runs = Vec::new();
    let mut current: Vec<Point> = vec![points[0]];
    let mut element = 0;
    let mut left = pattern[0];

    for pair in points.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let length = distance(start, end);
        let mut at = 0.0;

        while length - at > left {
            at += left;
            let point = along(start, end, length, at);
            if is_on(element) {
                current.push(point);
                runs.push(std::mem::take(&mut current));
            } else {
                current = vec![point];
            }
            element = (element + 1) % pattern.len();
            left = pattern[element];
        }

        left -= length - at;
        if is_on(element) {
            current.push(end);
        }
    }

    if is_on(element) && current.len() > 1 {
        runs.push(current);
    }

    runs
}

fn is_on(element: usize) -> bool {
    element % 2 == 0
}

fn distance(a: Point, b: Point) -> f64 {
    ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt()
}

// point `at` units from `a` towards `b`, where `length` is |ab|
fn along(a: Point, b: Point, length: f64, at: f64) -> Point {
    (
        a.0 + (b.0 - a.0) / length * at,
        a.1 + (b.1 - a.1) / length * at,
    )
}
