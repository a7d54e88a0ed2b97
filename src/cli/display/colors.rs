//! Color theme for CLI output

use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub warning: TableColor,
    pub error: TableColor,
    pub info: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            warning: TableColor::Yellow,
            error: TableColor::Red,
            info: TableColor::Cyan,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    /// Get color based on replica status
    pub fn get_replica_color(&self, ready: u32, total: u32) -> TableColor {
        if total == 0 {
            self.muted
        } else if ready == total {
            self.success
        } else if ready > 0 {
            self.warning
        } else {
            self.error
        }
    }

    pub fn get_phase_color(&self, phase: &str) -> TableColor {
        match phase {
            "Running" | "Succeeded" => self.success,
            "Pending" => self.warning,
            "Failed" => self.error,
            _ => self.muted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = ColorTheme::default();
        assert_eq!(theme.success, TableColor::Green);
        assert_eq!(theme.warning, TableColor::Yellow);
        assert_eq!(theme.error, TableColor::Red);
    }

    #[test]
    fn test_get_replica_color() {
        let theme = ColorTheme::default();
        assert_eq!(theme.get_replica_color(3, 3), TableColor::Green);
        assert_eq!(theme.get_replica_color(2, 3), TableColor::Yellow);
        assert_eq!(theme.get_replica_color(0, 3), TableColor::Red);
        assert_eq!(theme.get_replica_color(0, 0), TableColor::DarkGrey);
    }

    #[test]
    fn test_get_phase_color() {
        let theme = ColorTheme::default();
        assert_eq!(theme.get_phase_color("Succeeded"), TableColor::Green);
        assert_eq!(theme.get_phase_color("Pending"), TableColor::Yellow);
        assert_eq!(theme.get_phase_color("Evicted"), TableColor::DarkGrey);
    }
}
