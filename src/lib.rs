//! The endless March 2020, as a picture.
//!
//! [`calendar`] turns a date into a Sunday-first month grid of flagged
//! cells; [`render`] paints one big and two small grids onto a 1200x675
//! canvas. [`tweet`] formats the line that accompanies the image.

pub mod calendar;
pub mod config;
pub mod palette;
pub mod render;
pub mod tweet;
