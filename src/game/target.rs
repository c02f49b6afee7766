// Heart targets and the play area they bounce around in.

use rand::Rng;

/// Play area size in px, as measured from the host element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayArea {
    pub width: f64,
    pub height: f64,
}

impl PlayArea {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Largest top-left coordinate a target of `size` may take on each axis.
    pub fn bounds(&self, size: f64) -> (f64, f64) {
        ((self.width - size).max(0.0), (self.height - size).max(0.0))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub collected: bool,
}

impl Target {
    /// Uniform position inside `bounds`, uniform velocity in [-1, 1] per axis.
    /// A zero velocity gives a stationary heart, which is fine.
    pub fn spawn(rng: &mut impl Rng, bounds: (f64, f64)) -> Self {
        Self {
            x: rng.gen_range(0.0..=bounds.0),
            y: rng.gen_range(0.0..=bounds.1),
            vx: rng.gen_range(-1.0..=1.0),
            vy: rng.gen_range(-1.0..=1.0),
            collected: false,
        }
    }

    /// Move one frame, then reflect on any axis that left [0, bound].
    ///
    /// Position is updated before the bounds check, so a heart can sit up to
    /// one velocity unit past an edge for a frame. Velocity is only inverted
    /// while it still points outward, which keeps a heart that overshot from
    /// flipping back and forth outside the area.
    pub fn step(&mut self, bounds: (f64, f64)) {
        if self.collected {
            return;
        }
        self.x += self.vx;
        self.y += self.vy;
        self.vx = reflect(self.x, self.vx, bounds.0);
        self.vy = reflect(self.y, self.vy, bounds.1);
    }
}

fn reflect(pos: f64, vel: f64, bound: f64) -> f64 {
    if (pos < 0.0 && vel < 0.0) || (pos > bound && vel > 0.0) { -vel } else { vel }
}
