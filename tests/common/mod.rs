pub mod synthetic_disparity;
