//! Debug state dump for development diagnostics
//!
//! Serializes a snapshot of the sheet and the scene to JSON for easier
//! debugging. Triggered by F7.

use serde::Serialize;

use slide_sheet::config_paths;
use slide_sheet::geometry::Rect;
use slide_sheet::model::AppModel;
use slide_sheet::sheet::SheetSnapshot;

#[derive(Serialize)]
pub struct StateDump {
    pub timestamp: String,
    pub window_size: (u32, u32),
    pub scale_factor: f32,
    pub keyboard_visible: bool,
    /// Log file to read alongside the dump
    pub log_file: Option<String>,
    pub sheet: SheetSnapshot,
    pub nodes: Vec<NodeDump>,
}

#[derive(Serialize)]
pub struct NodeDump {
    pub kind: String,
    pub depth: usize,
    pub visible: bool,
    /// Window coordinates
    pub rect: Rect,
    pub alpha: f32,
}

impl StateDump {
    pub fn from_model(model: &AppModel) -> Self {
        let scene = &model.scene;
        let mut nodes = Vec::new();
        let mut stack = vec![(scene.root(), 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = scene.get(id) else { continue };
            nodes.push(NodeDump {
                kind: format!("{:?}", node.kind),
                depth,
                visible: node.visible,
                rect: scene.absolute_rect(id).unwrap_or_default(),
                alpha: node.alpha,
            });
            // Reversed so children come out in paint order
            for child in node.children().iter().rev() {
                stack.push((*child, depth + 1));
            }
        }

        Self {
            timestamp: chrono_timestamp(),
            window_size: model.window_size,
            scale_factor: model.scale_factor,
            keyboard_visible: model.keyboard_visible,
            log_file: config_paths::log_file().map(|p| p.display().to_string()),
            sheet: model.snapshot(),
            nodes,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }

    pub fn save_to_file(&self) -> Result<String, String> {
        let dir = config_paths::ensure_dumps_dir()?;
        let path = dir.join(format!("{}-state-dump.json", self.timestamp));
        std::fs::write(&path, self.to_json())
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        Ok(path.display().to_string())
    }
}

fn chrono_timestamp() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let secs = now.as_secs();

    let days_since_epoch = secs / 86400;
    let secs_today = secs % 86400;

    let hours = secs_today / 3600;
    let minutes = (secs_today % 3600) / 60;
    let seconds = secs_today % 60;

    let (year, month, day) = days_to_ymd(days_since_epoch as i64);

    format!(
        "{:04}-{:02}-{:02}-{:02}{:02}{:02}",
        year, month, day, hours, minutes, seconds
    )
}

/// Civil date from days since the Unix epoch
fn days_to_ymd(days: i64) -> (i32, u32, u32) {
    let days = days + 719468;
    let era = if days >= 0 { days } else { days - 146096 } / 146097;
    let doe = (days - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = if m <= 2 { y + 1 } else { y };
    (year as i32, m, d)
}
