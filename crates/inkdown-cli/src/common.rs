//! Shared helpers for board persistence and argument parsing.

use std::path::{Path, PathBuf};

use inkdown_core::{CoreError, Rect, TimerBoard, ValidationError};

use crate::settings::Settings;

/// Resolve the board file location from an explicit flag and the settings.
pub fn board_path(explicit: Option<PathBuf>) -> PathBuf {
    let settings = Settings::load().unwrap_or_default();
    settings.board_path(explicit)
}

/// Load the board, treating a missing file as an empty board.
pub fn load_board(path: &Path) -> Result<TimerBoard, CoreError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(TimerBoard::new()),
        Err(e) => Err(e.into()),
    }
}

/// Persist the board, creating parent directories if needed.
pub fn save_board(path: &Path, board: &TimerBoard) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(board)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Parse a scan region given as `x,y,width,height` in content units.
pub fn parse_region(raw: &str) -> Result<Rect, CoreError> {
    let parts: Vec<f64> = raw
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| ValidationError::InvalidValue {
            field: "region".to_string(),
            message: format!("expected x,y,width,height, got '{raw}'"),
        })?;
    if parts.len() != 4 {
        return Err(ValidationError::InvalidValue {
            field: "region".to_string(),
            message: format!("expected 4 components, got {}", parts.len()),
        }
        .into());
    }
    let rect = Rect::new(parts[0], parts[1], parts[2], parts[3]);
    if rect.is_degenerate() {
        return Err(ValidationError::DegenerateRegion {
            width: rect.width,
            height: rect.height,
        }
        .into());
    }
    Ok(rect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_region_accepts_four_components() {
        let rect = parse_region("0, 0, 1000, 500").unwrap();
        assert_eq!(rect, Rect::new(0.0, 0.0, 1000.0, 500.0));
    }

    #[test]
    fn parse_region_rejects_malformed_input() {
        assert!(parse_region("1,2,3").is_err());
        assert!(parse_region("a,b,c,d").is_err());
        assert!(parse_region("0,0,0,100").is_err());
    }

    #[test]
    fn missing_board_file_is_empty_board() {
        let board = load_board(Path::new("/nonexistent/inkdown-board.json")).unwrap();
        assert!(board.is_empty());
    }
}
