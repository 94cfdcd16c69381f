use image::Rgb;

pub type Color = Rgb<u8>;

pub const WHITE: Color = Rgb([255, 255, 255]);
pub const BLACK: Color = Rgb([0, 0, 0]);
pub const DARK: Color = Rgb([34, 34, 34]);
pub const GRID: Color = Rgb([200, 200, 200]);
pub const FRAME: Color = Rgb([120, 120, 120]);
/// Default series colour (matplotlib `C0`).
pub const BLUE: Color = Rgb([31, 119, 180]);
pub const RED: Color = Rgb([214, 39, 40]);

/// Linear mix of `bg` towards `fg` by `alpha` in [0, 1].
pub fn blend(bg: Color, fg: Color, alpha: f32) -> Color {
    let a = alpha.clamp(0.0, 1.0);
    let mix = |b: u8, f: u8| (b as f32 * (1.0 - a) + f as f32 * a).round() as u8;
    Rgb([mix(bg[0], fg[0]), mix(bg[1], fg[1]), mix(bg[2], fg[2])])
}

/// Diverging blue-grey-red map, `t` in [0, 1].
pub fn coolwarm(t: f64) -> Color {
    const LOW: [f64; 3] = [59.0, 76.0, 192.0];
    const MID: [f64; 3] = [221.0, 220.0, 219.0];
    const HIGH: [f64; 3] = [180.0, 4.0, 38.0];

    let t = t.clamp(0.0, 1.0);
    let (a, b, f) = if t < 0.5 {
        (LOW, MID, t / 0.5)
    } else {
        (MID, HIGH, (t - 0.5) / 0.5)
    };
    let lerp = |i: usize| (a[i] + (b[i] - a[i]) * f).round() as u8;
    Rgb([lerp(0), lerp(1), lerp(2)])
}
