//! Zephyr RTOS toolchain.

use std::path::Path;

use crate::core::board::{Board, BoardInfo};
use crate::toolchain::{require_program, Availability, SerialConfig, ToolchainAdapter};
use crate::util::fs::file_contains_any;

pub(crate) const ZEPHYR_PACKAGE: &str = "find_package(Zephyr";

/// Zephyr applications built with `west`.
#[derive(Debug, Default)]
pub struct ZephyrToolchain;

impl ZephyrToolchain {
    pub fn new() -> Self {
        ZephyrToolchain
    }
}

impl ToolchainAdapter for ZephyrToolchain {
    fn name(&self) -> &str {
        "zephyr"
    }

    fn detect_project(&self, dir: &Path) -> bool {
        dir.join("prj.conf").is_file()
            || dir.join("west.yml").is_file()
            || file_contains_any(&dir.join("CMakeLists.txt"), &[ZEPHYR_PACKAGE])
    }

    fn compile_command(&self, board: &Board) -> String {
        format!("west build -b {} .", board.slug)
    }

    fn upload_command(&self, _board: &Board, _port: &str) -> String {
        "west flash".to_string()
    }

    fn monitor_command(&self, board: &Board, port: &str) -> Option<String> {
        Some(format!(
            "python -m serial.tools.miniterm {} {}",
            port, board.baud_rate
        ))
    }

    fn serial_config(&self, board: &Board) -> SerialConfig {
        SerialConfig {
            baud_rate: board.baud_rate,
            boot_delay: 3,
        }
    }

    fn board_info(&self, board: &Board) -> BoardInfo {
        BoardInfo::notes_and_pitfalls(board)
    }

    fn setup_info(&self, _board: &Board) -> Option<String> {
        Some(
            "Install Zephyr: https://docs.zephyrproject.org/latest/develop/getting_started/index.html"
                .to_string(),
        )
    }

    fn environment_check(&self) -> Availability {
        require_program("west", "pip install west")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_detect_markers() {
        let zephyr = ZephyrToolchain::new();
        for marker in ["prj.conf", "west.yml"] {
            let tmp = TempDir::new().unwrap();
            assert!(!zephyr.detect_project(tmp.path()));
            fs::write(tmp.path().join(marker), "").unwrap();
            assert!(zephyr.detect_project(tmp.path()), "{} not detected", marker);
        }
    }

    #[test]
    fn test_detect_cmake_find_package() {
        let zephyr = ZephyrToolchain::new();
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("CMakeLists.txt"), "project(app)\n").unwrap();
        assert!(!zephyr.detect_project(tmp.path()));

        fs::write(
            tmp.path().join("CMakeLists.txt"),
            "find_package(Zephyr REQUIRED HINTS $ENV{ZEPHYR_BASE})\nproject(app)\n",
        )
        .unwrap();
        assert!(zephyr.detect_project(tmp.path()));
    }

    #[test]
    fn test_compile_uses_board_slug() {
        let zephyr = ZephyrToolchain::new();
        let board = Board::new("stm32-nucleo", "STM32 Nucleo-64", 115200);
        assert_eq!(zephyr.compile_command(&board), "west build -b stm32-nucleo .");
        assert_eq!(zephyr.upload_command(&board, "/dev/ttyACM0"), "west flash");
        assert_eq!(
            zephyr.monitor_command(&board, "/dev/ttyACM0").as_deref(),
            Some("python -m serial.tools.miniterm /dev/ttyACM0 115200")
        );
    }
}
