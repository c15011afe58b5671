//! ESP-IDF toolchain.

use std::path::Path;

use crate::core::board::{Board, BoardInfo};
use crate::toolchain::{require_program, Availability, SerialConfig, ToolchainAdapter};

/// Check for the ESP-IDF project layout: a top-level `CMakeLists.txt` plus
/// either `sdkconfig` or a `main/` component.
pub(crate) fn is_espidf_layout(dir: &Path) -> bool {
    dir.join("CMakeLists.txt").is_file()
        && (dir.join("sdkconfig").is_file() || dir.join("main").join("CMakeLists.txt").is_file())
}

/// Espressif IoT Development Framework projects driven by `idf.py`.
#[derive(Debug, Default)]
pub struct EspIdfToolchain;

impl EspIdfToolchain {
    pub fn new() -> Self {
        EspIdfToolchain
    }
}

impl ToolchainAdapter for EspIdfToolchain {
    fn name(&self) -> &str {
        "espidf"
    }

    fn detect_project(&self, dir: &Path) -> bool {
        is_espidf_layout(dir)
    }

    fn compile_command(&self, _board: &Board) -> String {
        "idf.py build".to_string()
    }

    fn upload_command(&self, _board: &Board, port: &str) -> String {
        format!("idf.py -p {} flash", port)
    }

    fn monitor_command(&self, _board: &Board, port: &str) -> Option<String> {
        Some(format!("idf.py -p {} monitor", port))
    }

    fn serial_config(&self, board: &Board) -> SerialConfig {
        SerialConfig {
            baud_rate: board.baud_rate,
            boot_delay: 5,
        }
    }

    fn board_info(&self, board: &Board) -> BoardInfo {
        BoardInfo::notes_and_pitfalls(board)
    }

    fn setup_info(&self, _board: &Board) -> Option<String> {
        Some("Activate ESP-IDF before compiling: `source $IDF_PATH/export.sh`".to_string())
    }

    fn environment_check(&self) -> Availability {
        require_program(
            "idf.py",
            "https://docs.espressif.com/projects/esp-idf/en/latest/esp32/get-started/",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_detect_requires_cmakelists() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("sdkconfig"), "").unwrap();
        assert!(!EspIdfToolchain::new().detect_project(tmp.path()));
    }

    #[test]
    fn test_detect_with_sdkconfig() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("CMakeLists.txt"), "project(app)\n").unwrap();
        assert!(!EspIdfToolchain::new().detect_project(tmp.path()));

        fs::write(tmp.path().join("sdkconfig"), "CONFIG_IDF_TARGET=\"esp32\"\n").unwrap();
        assert!(EspIdfToolchain::new().detect_project(tmp.path()));
    }

    #[test]
    fn test_detect_with_main_component() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("CMakeLists.txt"), "project(app)\n").unwrap();
        fs::create_dir(tmp.path().join("main")).unwrap();
        fs::write(tmp.path().join("main/CMakeLists.txt"), "idf_component_register()\n").unwrap();
        assert!(EspIdfToolchain::new().detect_project(tmp.path()));
    }

    #[test]
    fn test_commands_and_boot_delay() {
        let idf = EspIdfToolchain::new();
        let board = Board::new("esp32", "ESP32", 115200);
        assert_eq!(idf.compile_command(&board), "idf.py build");
        assert_eq!(idf.upload_command(&board, "/dev/ttyUSB0"), "idf.py -p /dev/ttyUSB0 flash");
        assert_eq!(
            idf.monitor_command(&board, "/dev/ttyUSB0").as_deref(),
            Some("idf.py -p /dev/ttyUSB0 monitor")
        );
        assert_eq!(idf.serial_config(&board).boot_delay, 5);
        assert!(idf.setup_info(&board).unwrap().contains("export.sh"));
    }
}
