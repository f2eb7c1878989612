//! World configuration
//!
//! Everything the headless driver needs to lay out a run. Stored as JSON;
//! missing fields fall back to the classic 800x600 layout.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::geometry::{Color, Point};
use crate::sim::block::NotifyPolicy;

/// One row of bricks, right-aligned against the right wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrickRow {
    pub count: u32,
    pub color: Color,
}

impl BrickRow {
    pub const fn new(count: u32, color: Color) -> Self {
        Self { count, color }
    }
}

/// Settings for one simulated run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    // === Field ===
    pub screen_width: f64,
    pub screen_height: f64,
    pub wall_thickness: f64,
    /// Height of the top border, taller than the side walls
    pub top_margin: f64,

    // === Balls ===
    pub ball_radius: u32,
    /// Displacement per frame
    pub ball_speed: f64,
    /// One ball spawns at each point
    pub ball_spawns: Vec<Point>,
    /// Launch heading range in degrees clockwise from up, `[min, max)`
    pub launch_angle_min: f64,
    pub launch_angle_max: f64,

    // === Paddle ===
    pub paddle_width: f64,
    pub paddle_height: f64,
    /// Upper edge of the paddle
    pub paddle_y: f64,
    pub paddle_step: f64,
    /// Move the paddle toward the lowest ball every frame
    pub autopilot: bool,

    // === Bricks ===
    pub brick_width: f64,
    pub brick_height: f64,
    /// Upper edge of the first row
    pub first_row_y: f64,
    pub rows: Vec<BrickRow>,
    pub hits_to_remove: u32,
    pub notify_policy: NotifyPolicy,

    // === Run ===
    pub seed: u64,
    /// Stop after this many frames even if the run is not over
    pub max_frames: u64,
    pub clear_bonus: i64,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            wall_thickness: WALL_THICKNESS,
            top_margin: 50.0,

            ball_radius: 5,
            ball_speed: 2.0 * std::f64::consts::SQRT_2,
            ball_spawns: vec![
                Point::new(150.0, 70.0),
                Point::new(100.0, 200.0),
                Point::new(107.0, 120.0),
            ],
            launch_angle_min: 100.0,
            launch_angle_max: 260.0,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_y: 560.0,
            paddle_step: PADDLE_STEP,
            autopilot: true,

            brick_width: 50.0,
            brick_height: 20.0,
            first_row_y: 200.0,
            rows: vec![
                BrickRow::new(12, Color::rgb(242, 140, 40)),
                BrickRow::new(11, Color::rgb(127, 0, 255)),
                BrickRow::new(10, Color::rgb(63, 0, 255)),
                BrickRow::new(9, Color::rgb(0, 150, 255)),
                BrickRow::new(8, Color::rgb(147, 197, 114)),
                BrickRow::new(7, Color::rgb(218, 112, 214)),
            ],
            hits_to_remove: 1,
            notify_policy: NotifyPolicy::default(),

            seed: 0x5EED,
            max_frames: 20_000,
            clear_bonus: CLEAR_BONUS,
        }
    }
}

impl WorldSettings {
    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings = Self::from_json(&json)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json).context("failed to parse settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize settings")
    }

    /// Reject layouts the driver cannot run
    pub fn validate(&self) -> Result<()> {
        if self.screen_width <= 2.0 * self.wall_thickness || self.screen_height <= self.top_margin {
            bail!(
                "field {}x{} leaves no room inside the walls",
                self.screen_width,
                self.screen_height
            );
        }
        if self.ball_radius == 0 {
            bail!("ball radius must be positive");
        }
        if !self.ball_speed.is_finite() || self.ball_speed < 0.0 {
            bail!("ball speed must be a finite non-negative number, got {}", self.ball_speed);
        }
        if self.launch_angle_min >= self.launch_angle_max {
            bail!(
                "empty launch angle range [{}, {})",
                self.launch_angle_min,
                self.launch_angle_max
            );
        }
        if self.paddle_width <= 0.0 || self.paddle_height <= 0.0 {
            bail!("paddle must have a positive size");
        }
        Ok(())
    }

    /// Bricks across every row
    pub fn brick_count(&self) -> u32 {
        self.rows.iter().map(|r| r.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_classic_layout() {
        let settings = WorldSettings::default();
        assert_eq!(settings.brick_count(), 57);
        assert_eq!(settings.ball_spawns.len(), 3);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = WorldSettings {
            seed: 42,
            autopilot: false,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(WorldSettings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = WorldSettings::from_json(r#"{ "seed": 7, "max_frames": 100 }"#).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.max_frames, 100);
        assert_eq!(settings.rows, WorldSettings::default().rows);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(WorldSettings::from_json(r#"{ "ball_radius": 0 }"#).is_err());
        assert!(WorldSettings::from_json(r#"{ "launch_angle_min": 10, "launch_angle_max": 10 }"#).is_err());
        assert!(WorldSettings::from_json("not json").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = WorldSettings::load("/nonexistent/brickbreak.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/brickbreak.json"));
    }
}
