//! Weather classification and per-kind particle styles.
//!
//! A free-text condition such as `"light rain"` or `"Scattered Clouds"` is
//! reduced to a [`WeatherKind`], which in turn selects a [`FieldStyle`]: how
//! many particles to spawn, where, and how they look.

use glam::Vec3;

/// Categorical weather label driving the backdrop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeatherKind {
    /// Falling streaks. Matches "rain" and "drizzle".
    Rain,
    /// Slow flakes with lateral drift.
    Snow,
    /// Wide drifting band of large soft points.
    Cloud,
    /// Twinkling star field.
    Clear,
    /// Anything else. No particles.
    #[default]
    Unknown,
}

impl WeatherKind {
    /// Classify a condition label.
    ///
    /// Case-insensitive substring match, first rule wins:
    /// rain/drizzle, snow, cloud, clear.
    pub fn classify(label: &str) -> Self {
        let label = label.to_lowercase();

        if label.contains("rain") || label.contains("drizzle") {
            WeatherKind::Rain
        } else if label.contains("snow") {
            WeatherKind::Snow
        } else if label.contains("cloud") {
            WeatherKind::Cloud
        } else if label.contains("clear") {
            WeatherKind::Clear
        } else {
            WeatherKind::Unknown
        }
    }

    /// Visual style for this kind, or `None` for [`WeatherKind::Unknown`].
    pub fn style(self) -> Option<FieldStyle> {
        match self {
            WeatherKind::Rain => Some(FieldStyle {
                count: CountScale::Nominal,
                volume: SpawnVolume::new(Vec3::new(-10.0, 0.0, -10.0), Vec3::new(10.0, 20.0, 10.0)),
                point_size: 0.1,
                color: rgb(0x4fc3f7),
                opacity: 0.6,
            }),
            WeatherKind::Snow => Some(FieldStyle {
                count: CountScale::Nominal,
                volume: SpawnVolume::new(Vec3::new(-10.0, 0.0, -10.0), Vec3::new(10.0, 20.0, 10.0)),
                point_size: 0.15,
                color: rgb(0xffffff),
                opacity: 0.8,
            }),
            WeatherKind::Cloud => Some(FieldStyle {
                count: CountScale::Half,
                volume: SpawnVolume::new(Vec3::new(-10.0, 3.0, -10.0), Vec3::new(10.0, 8.0, 10.0)),
                point_size: 0.3,
                color: rgb(0xe0e0e0),
                opacity: 0.5,
            }),
            WeatherKind::Clear => Some(FieldStyle {
                count: CountScale::Double,
                volume: SpawnVolume::new(Vec3::splat(-20.0), Vec3::splat(20.0)),
                point_size: 0.05,
                color: rgb(0xffffff),
                opacity: 0.8,
            }),
            WeatherKind::Unknown => None,
        }
    }

    /// Short human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            WeatherKind::Rain => "rain",
            WeatherKind::Snow => "snow",
            WeatherKind::Cloud => "cloud",
            WeatherKind::Clear => "clear",
            WeatherKind::Unknown => "none",
        }
    }
}

/// Particle count relative to the configured nominal count `N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountScale {
    /// `N`
    Nominal,
    /// `N / 2`, rounded down.
    Half,
    /// `2 * N`
    Double,
}

impl CountScale {
    /// Resolve against a nominal count.
    pub fn resolve(self, nominal: u32) -> usize {
        let nominal = nominal as usize;
        match self {
            CountScale::Nominal => nominal,
            CountScale::Half => nominal / 2,
            CountScale::Double => nominal * 2,
        }
    }
}

/// Axis-aligned box particles are spawned in, bounds inclusive of `min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnVolume {
    pub min: Vec3,
    pub max: Vec3,
}

impl SpawnVolume {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Whether `p` lies inside the box.
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

/// Shared rendering attributes of a particle field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStyle {
    pub count: CountScale,
    pub volume: SpawnVolume,
    /// Point size in world units at unit distance.
    pub point_size: f32,
    /// Linear-ish RGB in 0.0-1.0, taken straight from the hex value.
    pub color: Vec3,
    /// Base opacity before any per-frame animation.
    pub opacity: f32,
}

fn rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rain_and_drizzle_anywhere_any_case() {
        for label in ["rain", "Light Rain", "heavy intensity RAIN", "drizzle", "Drizzle", "freezing drizzle"] {
            assert_eq!(WeatherKind::classify(label), WeatherKind::Rain, "{}", label);
        }
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(WeatherKind::classify("rain and clouds"), WeatherKind::Rain);
        assert_eq!(WeatherKind::classify("rain and snow"), WeatherKind::Rain);
        assert_eq!(WeatherKind::classify("snow clouds"), WeatherKind::Snow);
        assert_eq!(WeatherKind::classify("clearing clouds"), WeatherKind::Cloud);
    }

    #[test]
    fn test_single_matches() {
        assert_eq!(WeatherKind::classify("Snow"), WeatherKind::Snow);
        assert_eq!(WeatherKind::classify("scattered clouds"), WeatherKind::Cloud);
        assert_eq!(WeatherKind::classify("Clouds"), WeatherKind::Cloud);
        assert_eq!(WeatherKind::classify("clear sky"), WeatherKind::Clear);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(WeatherKind::classify("Thunderstorm"), WeatherKind::Unknown);
        assert_eq!(WeatherKind::classify("Mist"), WeatherKind::Unknown);
        assert_eq!(WeatherKind::classify(""), WeatherKind::Unknown);
        assert!(WeatherKind::Unknown.style().is_none());
    }

    #[test]
    fn test_count_scale() {
        assert_eq!(CountScale::Nominal.resolve(100), 100);
        assert_eq!(CountScale::Half.resolve(100), 50);
        assert_eq!(CountScale::Half.resolve(7), 3);
        assert_eq!(CountScale::Double.resolve(100), 200);
    }

    #[test]
    fn test_style_table() {
        let rain = WeatherKind::Rain.style().unwrap();
        assert_eq!(rain.point_size, 0.1);
        assert_eq!(rain.opacity, 0.6);
        assert_eq!(rain.volume.min.y, 0.0);
        assert_eq!(rain.volume.max.y, 20.0);
        assert!(rain.color.z > rain.color.x, "rain should be blue-ish");

        let cloud = WeatherKind::Cloud.style().unwrap();
        assert_eq!(cloud.count, CountScale::Half);
        assert_eq!(cloud.volume.min.y, 3.0);
        assert_eq!(cloud.volume.max.y, 8.0);

        let clear = WeatherKind::Clear.style().unwrap();
        assert_eq!(clear.count, CountScale::Double);
        assert_eq!(clear.volume.min, Vec3::splat(-20.0));
        assert_eq!(clear.color, Vec3::ONE);
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(rgb(0xffffff), Vec3::ONE);
        assert_eq!(rgb(0x000000), Vec3::ZERO);
        assert_eq!(rgb(0xff0000), Vec3::X);
    }
}
