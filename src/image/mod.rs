pub mod disparity;
pub mod io;
pub mod traits;

pub use self::disparity::{DisparityImage, DisparityMap, DISPARITY_SCALE};
pub use self::traits::{ImageView, Rows};
