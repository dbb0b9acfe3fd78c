use image::{
    RgbImage,
    imageops::{self, FilterType},
};

use crate::color::{ColorError, Rgb8};

/// Longest dimension the image is reduced to before quantization. Purely a
/// performance bound; album art is photographic enough that the dominant
/// colors survive the downscale.
const MAX_DIMENSION: u32 = 300;

/// Extracts the dominant colors of an image.
///
/// The image is downscaled, quantized to at most `palette_size` colors with
/// a median-cut palette reduction, and the palette entries are ranked by
/// descending pixel count (ties broken by ascending palette index, so the
/// result is reproducible). Returns the top `top_k` entries; an image with
/// fewer distinct palette colors returns fewer entries, down to a single one
/// for solid-color artwork.
///
/// # Errors
///
/// Fails with `ColorError::InvalidParameter` if `palette_size` or `top_k`
/// is zero, or if the image has no pixels.
pub fn dominant_colors(
    image: &RgbImage,
    palette_size: usize,
    top_k: usize,
) -> Result<Vec<Rgb8>, ColorError> {
    if palette_size == 0 {
        return Err(ColorError::InvalidParameter(
            "palette size must be at least 1".to_string(),
        ));
    }
    if top_k == 0 {
        return Err(ColorError::InvalidParameter(
            "top-k must be at least 1".to_string(),
        ));
    }

    let scaled;
    let image = if image.width().max(image.height()) > MAX_DIMENSION {
        scaled = downscale(image);
        &scaled
    } else {
        image
    };

    let pixels: Vec<[u8; 3]> = image.pixels().map(|p| p.0).collect();
    if pixels.is_empty() {
        return Err(ColorError::InvalidParameter(
            "image has no pixels".to_string(),
        ));
    }

    let boxes = median_cut(pixels, palette_size);

    let mut entries: Vec<(usize, usize, Rgb8)> = boxes
        .iter()
        .enumerate()
        .map(|(index, members)| (members.len(), index, average_color(members)))
        .collect();
    entries.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    Ok(entries
        .into_iter()
        .take(top_k)
        .map(|(_, _, color)| color)
        .collect())
}

fn downscale(image: &RgbImage) -> RgbImage {
    let (width, height) = image.dimensions();
    let scale = MAX_DIMENSION as f64 / width.max(height) as f64;
    let new_width = ((width as f64 * scale).round() as u32).max(1);
    let new_height = ((height as f64 * scale).round() as u32).max(1);
    imageops::resize(image, new_width, new_height, FilterType::Triangle)
}

/// Median-cut palette reduction: repeatedly split the box with the widest
/// single-channel range at the median of that channel until `palette_size`
/// boxes exist or no box can split further. Box creation order doubles as
/// the palette index.
fn median_cut(pixels: Vec<[u8; 3]>, palette_size: usize) -> Vec<Vec<[u8; 3]>> {
    let mut boxes = vec![pixels];

    while boxes.len() < palette_size {
        let mut candidate: Option<(usize, usize)> = None;
        let mut candidate_range = 0u8;
        for (index, members) in boxes.iter().enumerate() {
            if members.len() < 2 {
                continue;
            }
            let (channel, range) = widest_channel(members);
            if range > candidate_range {
                candidate = Some((index, channel));
                candidate_range = range;
            }
        }

        // every remaining box is a single color (or a single pixel)
        let Some((index, channel)) = candidate else {
            break;
        };

        let mut members = std::mem::take(&mut boxes[index]);
        // full-triple key so pixels equal on the split channel still sort
        // into a canonical order
        members.sort_unstable_by_key(|p| (p[channel], p[0], p[1], p[2]));
        let upper = members.split_off(members.len() / 2);
        boxes[index] = members;
        boxes.push(upper);
    }

    boxes
}

fn widest_channel(pixels: &[[u8; 3]]) -> (usize, u8) {
    let mut min = [u8::MAX; 3];
    let mut max = [u8::MIN; 3];
    for p in pixels {
        for c in 0..3 {
            min[c] = min[c].min(p[c]);
            max[c] = max[c].max(p[c]);
        }
    }

    let mut widest = 0;
    let mut widest_range = 0u8;
    for c in 0..3 {
        let range = max[c] - min[c];
        if range > widest_range {
            widest = c;
            widest_range = range;
        }
    }
    (widest, widest_range)
}

fn average_color(pixels: &[[u8; 3]]) -> Rgb8 {
    let count = pixels.len() as u64;
    let mut sum = [0u64; 3];
    for p in pixels {
        for c in 0..3 {
            sum[c] += p[c] as u64;
        }
    }
    Rgb8 {
        r: ((sum[0] + count / 2) / count) as u8,
        g: ((sum[1] + count / 2) / count) as u8,
        b: ((sum[2] + count / 2) / count) as u8,
    }
}
