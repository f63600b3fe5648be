use crate::foundation::core::{Point, Rect, Vec2};

/// One positioned body handed to a [`LayoutSolver`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Current position.
    pub pos: Point,
    /// Pinned bodies act as fixed anchors and must not be moved.
    pub pinned: bool,
}

/// Layout collaborator: settles body positions one bounded iteration at a time.
///
/// `links` index into `bodies`. Implementations must leave pinned bodies where they are; the
/// [`crate::LayoutStore`] enforces this again on write-back.
pub trait LayoutSolver {
    /// Run a single iteration. Returns the largest displacement applied.
    fn step(&mut self, bodies: &mut [Body], links: &[(usize, usize)], bounds: Rect) -> f64;
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Tuning for [`ForceDirected`].
pub struct ForceOpts {
    /// Preferred link length in pixels.
    pub ideal_length: f64,
    /// Multiplier on pairwise repulsion.
    pub repulsion: f64,
    /// Multiplier on link attraction.
    pub attraction: f64,
    /// Maximum displacement per iteration.
    pub max_step: f64,
    /// Keep bodies this far inside the bounds.
    pub margin: f64,
}

impl Default for ForceOpts {
    fn default() -> Self {
        Self {
            ideal_length: 120.0,
            repulsion: 1.0,
            attraction: 1.0,
            max_step: 8.0,
            margin: 24.0,
        }
    }
}

/// Deterministic Fruchterman-Reingold style spring embedder.
#[derive(Clone, Debug, Default)]
pub struct ForceDirected {
    opts: ForceOpts,
}

impl ForceDirected {
    /// Solver with explicit tuning.
    pub fn new(opts: ForceOpts) -> Self {
        Self { opts }
    }

    /// Current tuning.
    pub fn opts(&self) -> &ForceOpts {
        &self.opts
    }
}

impl LayoutSolver for ForceDirected {
    fn step(&mut self, bodies: &mut [Body], links: &[(usize, usize)], bounds: Rect) -> f64 {
        let n = bodies.len();
        if n == 0 {
            return 0.0;
        }
        let k = self.opts.ideal_length.max(1.0);
        let mut disp = vec![Vec2::ZERO; n];

        for i in 0..n {
            for j in (i + 1)..n {
                let mut delta = bodies[i].pos - bodies[j].pos;
                let mut dist = delta.hypot();
                if dist < 1e-6 {
                    // Coincident bodies: separate along a direction derived from their indices.
                    let angle = (i * 31 + j * 17) as f64;
                    delta = Vec2::new(angle.cos(), angle.sin());
                    dist = 1.0;
                }
                let force = self.opts.repulsion * k * k / dist;
                let push = delta * (force / dist);
                disp[i] += push;
                disp[j] -= push;
            }
        }

        for &(a, b) in links {
            if a >= n || b >= n || a == b {
                continue;
            }
            let delta = bodies[a].pos - bodies[b].pos;
            let dist = delta.hypot();
            if dist < 1e-6 {
                continue;
            }
            let force = self.opts.attraction * dist * dist / k;
            let pull = delta * (force / dist);
            disp[a] -= pull;
            disp[b] += pull;
        }

        let inner = bounds.inset(-self.opts.margin);
        let mut max_moved = 0.0f64;
        for (body, d) in bodies.iter_mut().zip(disp) {
            if body.pinned {
                continue;
            }
            let len = d.hypot();
            if len < 1e-9 {
                continue;
            }
            let step = d * (len.min(self.opts.max_step) / len);
            let next = body.pos + step;
            let next = Point::new(
                next.x.clamp(inner.x0, inner.x1.max(inner.x0)),
                next.y.clamp(inner.y0, inner.y1.max(inner.y0)),
            );
            max_moved = max_moved.max((next - body.pos).hypot());
            body.pos = next;
        }
        max_moved
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/force.rs"]
mod tests;
