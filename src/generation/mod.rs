use super::heightmap::HeightField;

use noise::{NoiseFn, Perlin};

/// `2 sin(r - shift)` with `r = sqrt(x² + y²)`: rings travelling outward as `shift` grows.
///
/// The derivatives divide by `r`, so both are defined as zero at the origin.
pub fn radial_wave(shift: f32) -> HeightField {
    let radius = |x: f32, y: f32| (x * x + y * y).sqrt();
    let partial = move |along: f32, x: f32, y: f32| {
        let r = radius(x, y);
        if r == 0. {
            return 0.;
        }
        2. * along * (r - shift).cos() / r
    };

    HeightField::analytic(
        move |x, y| 2. * (radius(x, y) - shift).sin(),
        move |x, y| partial(x, x, y),
        move |x, y| partial(y, x, y),
    )
}

/// `2 sin(0.01 (x² + y²) - shift)`, a wave whose rings tighten away from the centre.
pub fn ripple_wave(shift: f32) -> HeightField {
    let phase = move |x: f32, y: f32| (x * x + y * y) * 0.01 - shift;

    HeightField::analytic(
        move |x, y| 2. * phase(x, y).sin(),
        move |x, y| 0.04 * x * phase(x, y).cos(),
        move |x, y| 0.04 * y * phase(x, y).cos(),
    )
}

pub fn paraboloid() -> HeightField {
    HeightField::analytic(|x, y| x * x + y * y, |x, _| 2. * x, |_, y| 2. * y)
}

pub fn flat() -> HeightField {
    HeightField::analytic(|_, _| 0., |_, _| 0., |_, _| 0.)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseSettings {
    pub scale: f32,
    pub octaves: u32,
    pub amplitude: f32,
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            scale: 5e-2,
            octaves: 6,
            amplitude: 10.,
        }
    }
}

/// Fractal Perlin terrain in `0..amplitude`. Has no derivatives, so its
/// normals are always estimated from the mesh.
pub fn perlin_field(seed: u32, noise_settings: NoiseSettings) -> HeightField {
    let NoiseSettings {
        scale: scale_start,
        octaves,
        amplitude,
    } = noise_settings;
    // Zero octaves would leave nothing to normalize by
    let octaves = octaves.max(1);

    let perlin = Perlin::new(seed);

    // Calculate the maximum magnitude of the terrain
    let (max_magnitude, _) = (0..octaves).fold((0.0f32, 1.0f32), |(max_magnitude, scale), _| {
        (max_magnitude + scale, scale / 2.0)
    });

    HeightField::numeric(move |x, y| {
        let mut scale = 1.;
        let mut value = 0.;

        for i in 0..octaves {
            value += scale
                * perlin.get([
                    (i as f32 * 1000. + scale_start / scale * x) as f64,
                    (scale_start / scale * y) as f64,
                ]) as f32;
            scale /= 2.;
        }

        // Covert the value from -max_magnitude..max_magnitude to 0..amplitude
        (amplitude * (value / max_magnitude + 1.) / 2.).clamp(0., amplitude)
    })
}
