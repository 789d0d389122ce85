//! Command-line argument parsing for the demo
//!
//! Flags override values loaded from `config.yaml`.

use clap::Parser;
use std::path::PathBuf;

use crate::config::SheetConfig;
use crate::sheet::SheetState;

/// Interactive demo of the expanding bottom sheet
#[derive(Parser, Debug, Default)]
#[command(name = "slide-sheet", version, about = "Expanding bottom sheet demo")]
pub struct CliArgs {
    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start with the sheet expanded
    #[arg(short = 'e', long)]
    pub expanded: bool,

    /// Do not dim the content behind an open sheet
    #[arg(long)]
    pub no_scrim: bool,

    /// Gap between the expanded sheet and the top of the window
    #[arg(long, value_name = "PX")]
    pub top_offset: Option<f32>,

    /// Expand only down to the bottom of the app bar
    #[arg(long)]
    pub below_app_bar: bool,

    /// Window width in logical pixels
    #[arg(long, value_name = "PX")]
    pub width: Option<u32>,

    /// Window height in logical pixels
    #[arg(long, value_name = "PX")]
    pub height: Option<u32>,
}

/// Configuration derived from CLI arguments and the config file
#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub config: SheetConfig,
    pub initial_state: SheetState,
}

impl CliArgs {
    /// Load the config this invocation points at
    pub fn load_config(&self) -> SheetConfig {
        match &self.config {
            Some(path) => SheetConfig::load_from(path),
            None => SheetConfig::load(),
        }
    }

    /// Apply the flags on top of `base`
    pub fn into_config(self, base: SheetConfig) -> Result<StartupConfig, String> {
        let mut config = base;

        if let Some(top_offset) = self.top_offset {
            if !top_offset.is_finite() || top_offset < 0.0 {
                return Err(format!("--top-offset must be >= 0, got {}", top_offset));
            }
            config.sheet.top_offset = top_offset;
        }
        if self.no_scrim {
            config.sheet.use_scrim = false;
        }
        if self.below_app_bar {
            config.sheet.draw_below_app_bar = true;
        }
        if let Some(width) = self.width {
            if width == 0 {
                return Err("--width must be greater than 0".to_string());
            }
            config.window.width = width;
        }
        if let Some(height) = self.height {
            if height == 0 {
                return Err("--height must be greater than 0".to_string());
            }
            config.window.height = height;
        }

        let initial_state = if self.expanded {
            SheetState::Expanded
        } else {
            SheetState::Collapsed
        };

        Ok(StartupConfig {
            config,
            initial_state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keeps_config() {
        let base = SheetConfig::default();
        let startup = CliArgs::default().into_config(base.clone()).unwrap();
        assert_eq!(startup.config, base);
        assert_eq!(startup.initial_state, SheetState::Collapsed);
    }

    #[test]
    fn test_flags_override_config() {
        let args = CliArgs::parse_from([
            "slide-sheet",
            "--expanded",
            "--no-scrim",
            "--below-app-bar",
            "--top-offset",
            "24",
            "--width",
            "600",
        ]);
        let startup = args.into_config(SheetConfig::default()).unwrap();
        assert_eq!(startup.initial_state, SheetState::Expanded);
        assert!(!startup.config.sheet.use_scrim);
        assert!(startup.config.sheet.draw_below_app_bar);
        assert_eq!(startup.config.sheet.top_offset, 24.0);
        assert_eq!(startup.config.window.width, 600);
        assert_eq!(startup.config.window.height, 780);
    }

    #[test]
    fn test_negative_top_offset_rejected() {
        let args = CliArgs {
            top_offset: Some(-4.0),
            ..CliArgs::default()
        };
        assert!(args.into_config(SheetConfig::default()).is_err());
    }

    #[test]
    fn test_zero_size_rejected() {
        let args = CliArgs {
            height: Some(0),
            ..CliArgs::default()
        };
        assert!(args.into_config(SheetConfig::default()).is_err());
    }
}
