//! Configuration types for path diagram assembly.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources; every field falls back to its default when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`LayoutConfig`] - Default placement and collision-avoidance constants.
//!
//! # Example
//!
//! ```
//! # use composer::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().column_spacing(), 250.0);
//! ```

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout configuration.
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Default placement of nodes that have no saved position.
///
/// Origins form the first row, each via order forms one row below it and
/// destinations form the last row. Nodes within a row are spaced by
/// [`column_spacing`](Self::column_spacing).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Vertical position of the origin row.
    origin_row_y: f64,
    /// Horizontal position of the first origin.
    origin_start_x: f64,
    /// Horizontal position of the first entity in each via row.
    via_start_x: f64,
    /// Horizontal position of the first destination.
    destination_start_x: f64,
    /// Horizontal distance between neighbouring nodes of a row.
    column_spacing: f64,
    /// Vertical distance between rows.
    row_spacing: f64,
    /// Two nodes closer than this on both axes collide.
    collision_threshold: f64,
    /// Diagonal shift applied to a colliding candidate position.
    collision_step: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_row_y: 50.0,
            origin_start_x: 100.0,
            via_start_x: 120.0,
            destination_start_x: 115.0,
            column_spacing: 250.0,
            row_spacing: 250.0,
            collision_threshold: 50.0,
            collision_step: 50.0,
        }
    }
}

impl LayoutConfig {
    pub fn origin_row_y(&self) -> f64 {
        self.origin_row_y
    }

    pub fn origin_start_x(&self) -> f64 {
        self.origin_start_x
    }

    pub fn via_start_x(&self) -> f64 {
        self.via_start_x
    }

    pub fn destination_start_x(&self) -> f64 {
        self.destination_start_x
    }

    pub fn column_spacing(&self) -> f64 {
        self.column_spacing
    }

    pub fn row_spacing(&self) -> f64 {
        self.row_spacing
    }

    pub fn collision_threshold(&self) -> f64 {
        self.collision_threshold
    }

    pub fn collision_step(&self) -> f64 {
        self.collision_step
    }

    /// Replaces the collision threshold and step.
    pub fn with_collision(mut self, threshold: f64, step: f64) -> Self {
        self.collision_threshold = threshold;
        self.collision_step = step;
        self
    }

    /// Vertical position of the row for a via of the given order.
    pub fn via_row_y(&self, order: u32) -> f64 {
        (f64::from(order) + 1.0) * self.row_spacing + self.origin_row_y
    }

    /// Vertical position of the destination row below `via_layers` via rows.
    pub fn destination_row_y(&self, via_layers: u64) -> f64 {
        (via_layers as f64 + 1.0) * self.row_spacing + self.origin_row_y
    }

    /// Checks that the collision search is guaranteed to make progress.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.collision_step.is_finite() && self.collision_step > 0.0) {
            return Err(format!(
                "collision_step must be a positive number, got {}",
                self.collision_step
            ));
        }
        if !(self.collision_threshold.is_finite() && self.collision_threshold >= 0.0) {
            return Err(format!(
                "collision_threshold must be a non-negative number, got {}",
                self.collision_threshold
            ));
        }
        Ok(())
    }
}
