//! Colors are configured as 8-bit sRGB triples. The surface format is sRGB,
//! so they are converted to linear before reaching the GPU.

pub fn srgb_channel_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub fn srgb_to_linear(rgb: [u8; 3]) -> [f32; 4] {
    [
        srgb_channel_to_linear(rgb[0]),
        srgb_channel_to_linear(rgb[1]),
        srgb_channel_to_linear(rgb[2]),
        1.0,
    ]
}

pub fn clear_color(rgb: [u8; 3]) -> wgpu::Color {
    let [r, g, b, a] = srgb_to_linear(rgb);
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: a as f64,
    }
}
