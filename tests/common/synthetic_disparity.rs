/// Angle of Hough bin `deg`, computed the same way as the transform does.
pub fn bin_angle(deg: u32) -> f32 {
    deg as f32 * (std::f32::consts::PI / 180.0)
}

/// Rasterizes the v-disparity line `x·cos θ + y·sin θ = rho` (x = disparity,
/// y = row) into a `rows × cols` disparity map.
///
/// Every row below the horizon gets its first `road_cols` pixels set to a
/// disparity that truncates to the rounded line position. Rows above the
/// horizon, or beyond `max_dis`, stay invalid.
pub fn road_disparity(
    rows: usize,
    cols: usize,
    road_cols: usize,
    rho: f32,
    theta: f32,
    max_dis: usize,
) -> Vec<f32> {
    assert!(road_cols <= cols, "road wider than image");
    let mut data = vec![0.0f32; rows * cols];
    for y in 0..rows {
        let Some(bin) = road_bin(y, rho, theta, max_dis) else {
            continue;
        };
        for x in 0..road_cols {
            data[y * cols + x] = bin as f32 + 0.5;
        }
    }
    data
}

/// Disparity bin of the road line at row `y`, if the row sees the road.
pub fn road_bin(y: usize, rho: f32, theta: f32, max_dis: usize) -> Option<usize> {
    let x = (rho - y as f32 * theta.sin()) / theta.cos();
    if !x.is_finite() || x < 0.0 {
        return None;
    }
    let bin = x.round() as usize;
    (bin < max_dis).then_some(bin)
}

/// Deterministic linear congruential generator for reproducible clutter.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_f32(&mut self) -> f32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 40) as f32) / ((1u64 << 24) as f32)
    }
}

/// Adds a fronto-parallel obstacle, pixel dropouts on the road and sparse
/// random matches above the horizon.
pub fn add_clutter(
    data: &mut [f32],
    rows: usize,
    cols: usize,
    road_cols: usize,
    max_dis: usize,
    seed: u64,
) {
    let mut rng = Lcg::new(seed);
    let obstacle_rows = rows / 2..rows * 3 / 4;
    for y in 0..rows {
        let row = &mut data[y * cols..(y + 1) * cols];
        let sky = row[..road_cols].iter().all(|&v| v == 0.0);
        for (x, px) in row.iter_mut().enumerate() {
            if x < road_cols {
                if sky {
                    if rng.next_f32() < 0.05 {
                        *px = rng.next_f32() * max_dis as f32;
                    }
                } else if rng.next_f32() < 0.1 {
                    *px = 0.0;
                }
            } else if obstacle_rows.contains(&y) {
                *px = 20.25;
            }
        }
    }
}
