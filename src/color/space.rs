use crate::color::{Lab, Rgb8};

/// CIE standard illuminant D65 reference white in XYZ.
const D65_WHITE: [f64; 3] = [0.95047, 1.0, 1.08883];

/// CIE constants for the LAB companding function.
const EPSILON: f64 = 216.0 / 24389.0;
const KAPPA: f64 = 24389.0 / 27.0;

/// Converts an 8-bit sRGB color to CIE L\*a\*b\*.
///
/// One canonical mapping with no configuration: sRGB gamma expansion, then
/// the linear-RGB → XYZ matrix for a D65 white point, then the standard
/// XYZ → LAB transform. Pure and total over `[0,255]^3`; identical input
/// always yields identical output. Black maps to (0, 0, 0) and white to
/// (100, 0, 0).
pub fn rgb_to_lab(rgb: Rgb8) -> Lab {
    let [x, y, z] = rgb_to_xyz(rgb);
    let fx = lab_f(x / D65_WHITE[0]);
    let fy = lab_f(y / D65_WHITE[1]);
    let fz = lab_f(z / D65_WHITE[2]);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

fn srgb_to_linear(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn rgb_to_xyz(rgb: Rgb8) -> [f64; 3] {
    let r = srgb_to_linear(rgb.r);
    let g = srgb_to_linear(rgb.g);
    let b = srgb_to_linear(rgb.b);

    // sRGB → XYZ matrix, D65 white
    [
        0.4124564 * r + 0.3575761 * g + 0.1804375 * b,
        0.2126729 * r + 0.7151522 * g + 0.0721750 * b,
        0.0193339 * r + 0.1191920 * g + 0.9503041 * b,
    ]
}

fn lab_f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}
