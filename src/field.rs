//! CPU-side particle field.
//!
//! A [`ParticleField`] holds the positions for the active weather kind and
//! advances them once per frame. The renderer uploads the positions whenever
//! [`ParticleField::is_dirty`] reports a change.

use glam::Vec3;
use rand::Rng;

use crate::weather::{FieldStyle, WeatherKind};

/// Rain fall distance per frame at speed 1.0.
pub const RAIN_FALL: f32 = 0.1;
/// Snow fall distance per frame at speed 1.0.
pub const SNOW_FALL: f32 = 0.03;
/// Amplitude of the sideways snow drift per frame.
pub const SNOW_DRIFT: f32 = 0.01;
/// Cloud drift along +X per frame at speed 1.0.
pub const CLOUD_DRIFT: f32 = 0.01;
/// Falling particles below this height wrap to [`FALL_RESET_Y`].
pub const FALL_FLOOR_Y: f32 = -10.0;
pub const FALL_RESET_Y: f32 = 10.0;
/// Clouds past this X wrap to [`CLOUD_RESET_X`].
pub const CLOUD_EDGE_X: f32 = 10.0;
pub const CLOUD_RESET_X: f32 = -10.0;

/// Positions and shared appearance of one weather kind's particles.
#[derive(Debug, Clone)]
pub struct ParticleField {
    kind: WeatherKind,
    style: FieldStyle,
    positions: Vec<Vec3>,
    opacity: f32,
    dirty: bool,
}

impl ParticleField {
    /// Spawn a field for `kind`, or `None` if the kind has no particles.
    ///
    /// Every axis of every particle is an independent uniform draw inside the
    /// kind's spawn volume.
    pub fn spawn<R: Rng>(kind: WeatherKind, nominal_count: u32, rng: &mut R) -> Option<Self> {
        let style = kind.style()?;
        let count = style.count.resolve(nominal_count);
        let (min, max) = (style.volume.min, style.volume.max);

        let positions = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(min.x..max.x),
                    rng.gen_range(min.y..max.y),
                    rng.gen_range(min.z..max.z),
                )
            })
            .collect();

        Some(Self {
            kind,
            style,
            positions,
            opacity: style.opacity,
            dirty: true,
        })
    }

    #[inline]
    pub fn kind(&self) -> WeatherKind {
        self.kind
    }

    #[inline]
    pub fn style(&self) -> &FieldStyle {
        &self.style
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Current shared opacity. Animated for clear skies.
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Whether positions changed since the last [`mark_clean`](Self::mark_clean).
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called by the renderer once positions are uploaded.
    #[inline]
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Advance one frame.
    ///
    /// `elapsed` is seconds since the visualizer started and feeds the snow
    /// drift and star twinkle phases. `speed` scales fall and drift rates.
    pub fn step(&mut self, elapsed: f32, speed: f32) {
        match self.kind {
            WeatherKind::Rain => {
                for p in &mut self.positions {
                    p.y -= RAIN_FALL * speed;
                    if p.y < FALL_FLOOR_Y {
                        p.y = FALL_RESET_Y;
                    }
                }
            }
            WeatherKind::Snow => {
                for (i, p) in self.positions.iter_mut().enumerate() {
                    p.y -= SNOW_FALL * speed;
                    p.x += (elapsed + i as f32).sin() * SNOW_DRIFT;
                    if p.y < FALL_FLOOR_Y {
                        p.y = FALL_RESET_Y;
                    }
                }
            }
            WeatherKind::Cloud => {
                for p in &mut self.positions {
                    p.x += CLOUD_DRIFT * speed;
                    if p.x > CLOUD_EDGE_X {
                        p.x = CLOUD_RESET_X;
                    }
                }
            }
            WeatherKind::Clear => {
                // Every star shares one opacity; the last particle's phase is the one that shows.
                if let Some(last) = self.positions.len().checked_sub(1) {
                    self.opacity = twinkle(elapsed, last);
                }
            }
            WeatherKind::Unknown => {}
        }

        self.dirty = true;
    }
}

/// Star opacity for particle `index` at time `elapsed`.
#[inline]
pub fn twinkle(elapsed: f32, index: usize) -> f32 {
    0.5 + 0.3 * (elapsed + index as f32).sin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn field_with(kind: WeatherKind, positions: Vec<Vec3>) -> ParticleField {
        let style = kind.style().unwrap();
        ParticleField {
            kind,
            style,
            positions,
            opacity: style.opacity,
            dirty: false,
        }
    }

    #[test]
    fn test_spawn_counts() {
        let mut rng = rng();
        assert_eq!(ParticleField::spawn(WeatherKind::Rain, 100, &mut rng).unwrap().len(), 100);
        assert_eq!(ParticleField::spawn(WeatherKind::Snow, 100, &mut rng).unwrap().len(), 100);
        assert_eq!(ParticleField::spawn(WeatherKind::Cloud, 100, &mut rng).unwrap().len(), 50);
        assert_eq!(ParticleField::spawn(WeatherKind::Clear, 100, &mut rng).unwrap().len(), 200);
        assert!(ParticleField::spawn(WeatherKind::Unknown, 100, &mut rng).is_none());
    }

    #[test]
    fn test_spawn_inside_volume() {
        let mut rng = rng();
        for kind in [WeatherKind::Rain, WeatherKind::Snow, WeatherKind::Cloud, WeatherKind::Clear] {
            let field = ParticleField::spawn(kind, 500, &mut rng).unwrap();
            let volume = field.style().volume;
            assert!(field.positions().iter().all(|&p| volume.contains(p)), "{:?}", kind);
            assert!(field.is_dirty());
            assert_eq!(field.opacity(), field.style().opacity);
        }
    }

    #[test]
    fn test_rain_falls_and_wraps() {
        let mut field = field_with(WeatherKind::Rain, vec![Vec3::new(1.0, 5.0, 2.0), Vec3::new(0.0, -9.95, 0.0)]);
        field.step(0.0, 1.0);

        let p = field.positions();
        assert!((p[0].y - 4.9).abs() < 1e-5);
        assert_eq!(p[0].x, 1.0);
        assert_eq!(p[0].z, 2.0);
        // -9.95 - 0.1 = -10.05 < -10
        assert_eq!(p[1].y, FALL_RESET_Y);
        assert!(field.is_dirty());
    }

    #[test]
    fn test_wrap_requires_strictly_below_floor() {
        // Lands exactly on -10.0: not below, so no wrap yet
        let mut field = field_with(WeatherKind::Rain, vec![Vec3::new(0.0, -9.5, 0.0)]);
        field.step(0.0, 5.0);
        assert_eq!(field.positions()[0].y, -10.0);

        field.step(0.0, 0.01);
        assert_eq!(field.positions()[0].y, 10.0);
    }

    #[test]
    fn test_speed_scales_fall() {
        let mut field = field_with(WeatherKind::Rain, vec![Vec3::new(0.0, 5.0, 0.0)]);
        field.step(0.0, 2.0);
        assert!((field.positions()[0].y - 4.8).abs() < 1e-5);

        let mut frozen = field_with(WeatherKind::Snow, vec![Vec3::new(0.0, 5.0, 0.0)]);
        frozen.step(0.0, 0.0);
        assert_eq!(frozen.positions()[0].y, 5.0);
    }

    #[test]
    fn test_snow_drifts_and_wraps() {
        let mut field = field_with(
            WeatherKind::Snow,
            vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, -9.99, 0.0)],
        );
        let t = 0.5;
        field.step(t, 1.0);

        let p = field.positions();
        assert!((p[0].y + SNOW_FALL).abs() < 1e-6);
        assert!((p[0].x - t.sin() * SNOW_DRIFT).abs() < 1e-6);
        assert!((p[1].x - (t + 1.0).sin() * SNOW_DRIFT).abs() < 1e-6);
        assert_eq!(p[1].y, FALL_RESET_Y);
    }

    #[test]
    fn test_cloud_drifts_and_wraps() {
        let mut field = field_with(
            WeatherKind::Cloud,
            vec![Vec3::new(0.0, 4.0, 0.0), Vec3::new(9.995, 4.0, 0.0), Vec3::new(9.99, 5.0, 0.0)],
        );
        field.step(0.0, 1.0);

        let p = field.positions();
        assert!((p[0].x - 0.01).abs() < 1e-6);
        assert_eq!(p[1].x, CLOUD_RESET_X);
        // 9.99 + 0.01 lands on the edge, not past it
        assert!(p[2].x > 9.0 && p[2].x <= CLOUD_EDGE_X);
        assert_eq!(p[0].y, 4.0);
    }

    #[test]
    fn test_clear_twinkles_without_moving() {
        let mut rng = rng();
        let mut field = ParticleField::spawn(WeatherKind::Clear, 10, &mut rng).unwrap();
        let before = field.positions().to_vec();

        field.step(1.25, 1.0);

        assert_eq!(field.positions(), &before[..]);
        let expected = twinkle(1.25, field.len() - 1);
        assert!((field.opacity() - expected).abs() < 1e-6);
        assert!(field.opacity() >= 0.2 && field.opacity() <= 0.8);
    }

    #[test]
    fn test_mark_clean() {
        let mut rng = rng();
        let mut field = ParticleField::spawn(WeatherKind::Rain, 4, &mut rng).unwrap();
        field.mark_clean();
        assert!(!field.is_dirty());
        field.step(0.0, 1.0);
        assert!(field.is_dirty());
    }
}
