//! MicroPython toolchain.

use std::path::Path;

use crate::core::board::{Board, BoardInfo};
use crate::toolchain::{require_program, Availability, SerialConfig, ToolchainAdapter};
use crate::util::fs::has_file_with_extension;

const PITFALLS: &[&str] = &[
    "MicroPython has no compile step: files are copied directly to the board.",
    "Use `mpremote` to copy files and interact with the REPL.",
    "After copying files, reset the board to run the new code.",
    "Memory is limited. Avoid large data structures.",
];

/// MicroPython projects deployed with `mpremote`.
#[derive(Debug, Default)]
pub struct MicroPythonToolchain;

impl MicroPythonToolchain {
    pub fn new() -> Self {
        MicroPythonToolchain
    }
}

impl ToolchainAdapter for MicroPythonToolchain {
    fn name(&self) -> &str {
        "micropython"
    }

    fn detect_project(&self, dir: &Path) -> bool {
        // Arduino sketch folders often carry helper scripts.
        if has_file_with_extension(dir, "ino") {
            return false;
        }
        dir.join("boot.py").is_file() || dir.join("main.py").is_file()
    }

    fn compile_command(&self, _board: &Board) -> String {
        "# No compile step: MicroPython runs .py files directly".to_string()
    }

    fn upload_command(&self, _board: &Board, port: &str) -> String {
        format!("mpremote connect {} cp main.py :main.py", port)
    }

    fn monitor_command(&self, _board: &Board, port: &str) -> Option<String> {
        Some(format!("mpremote connect {} repl", port))
    }

    fn serial_config(&self, board: &Board) -> SerialConfig {
        SerialConfig {
            baud_rate: board.baud_rate,
            boot_delay: 2,
        }
    }

    fn board_info(&self, board: &Board) -> BoardInfo {
        BoardInfo {
            pitfalls: Some(board.pitfalls.clone()),
            ..Default::default()
        }
        .with_leading_pitfalls(PITFALLS)
    }

    fn environment_check(&self) -> Availability {
        require_program("mpremote", "pip install mpremote")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_detects_main_or_boot() {
        let mp = MicroPythonToolchain::new();
        let tmp = TempDir::new().unwrap();
        assert!(!mp.detect_project(tmp.path()));

        fs::write(tmp.path().join("boot.py"), "").unwrap();
        assert!(mp.detect_project(tmp.path()));

        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("main.py"), "print('[READY]')\n").unwrap();
        assert!(mp.detect_project(tmp.path()));
    }

    #[test]
    fn test_ino_file_disables_detection() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("main.py"), "").unwrap();
        fs::write(tmp.path().join("sketch.ino"), "").unwrap();
        assert!(!MicroPythonToolchain::new().detect_project(tmp.path()));
    }

    #[test]
    fn test_pitfalls_lead_with_micropython_notes() {
        let mp = MicroPythonToolchain::new();
        let board = Board::new("esp32", "ESP32", 115200).with_pitfalls(&["board pitfall"]);
        let pitfalls = mp.board_info(&board).pitfalls.unwrap();
        assert_eq!(pitfalls.len(), PITFALLS.len() + 1);
        assert!(pitfalls[0].contains("no compile step"));
        assert_eq!(pitfalls.last().unwrap(), "board pitfall");
    }

    #[test]
    fn test_commands() {
        let mp = MicroPythonToolchain::new();
        let board = Board::new("esp32", "ESP32", 115200);
        assert!(mp.compile_command(&board).starts_with('#'));
        assert_eq!(
            mp.upload_command(&board, "/dev/ttyUSB0"),
            "mpremote connect /dev/ttyUSB0 cp main.py :main.py"
        );
        assert_eq!(mp.serial_config(&board).boot_delay, 2);
    }
}
