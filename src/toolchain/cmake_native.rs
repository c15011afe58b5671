//! Bare-metal CMake/Make toolchain for cross-compiled firmware.

use std::path::Path;

use crate::core::board::{Board, BoardInfo};
use crate::ops::overlay::JtagOverlay;
use crate::toolchain::espidf::is_espidf_layout;
use crate::toolchain::zephyr::ZEPHYR_PACKAGE;
use crate::toolchain::{require_program, Availability, SerialConfig, ToolchainAdapter};
use crate::util::fs::file_contains_any;
use crate::util::process::find_executable;

const MAKEFILE_HINTS: &[&str] = &["arm-none-eabi", "riscv32", "riscv64", "CROSS_COMPILE"];
const CMAKE_HINTS: &[&str] = &["CMAKE_TOOLCHAIN_FILE", "arm-none-eabi"];

/// Probe used when flashing a board with a known JTAG target.
const DEFAULT_PROBE: &str = "stlink";

/// Cross-compiled projects driven by CMake or Make.
#[derive(Debug, Default)]
pub struct CMakeNativeToolchain;

impl CMakeNativeToolchain {
    pub fn new() -> Self {
        CMakeNativeToolchain
    }

    fn cmake_project(dir: &Path) -> bool {
        let cmake = dir.join("CMakeLists.txt");
        if !cmake.is_file()
            || file_contains_any(&cmake, &[ZEPHYR_PACKAGE])
            || is_espidf_layout(dir)
        {
            return false;
        }
        file_contains_any(&cmake, CMAKE_HINTS)
    }
}

impl ToolchainAdapter for CMakeNativeToolchain {
    fn name(&self) -> &str {
        "cmake-native"
    }

    fn detect_project(&self, dir: &Path) -> bool {
        file_contains_any(&dir.join("Makefile"), MAKEFILE_HINTS)
            || Self::cmake_project(dir)
            || dir.join("toolchain.cmake").is_file()
            || dir.join("arm-none-eabi.cmake").is_file()
    }

    fn compile_command(&self, _board: &Board) -> String {
        "cmake --build build".to_string()
    }

    fn upload_command(&self, board: &Board, _port: &str) -> String {
        match &board.jtag_target {
            Some(target) => JtagOverlay::new(DEFAULT_PROBE, target).upload_command(),
            None => "make flash".to_string(),
        }
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
            "Install ARM toolchain: `apt install gcc-arm-none-eabi` (Linux) or `brew install arm-none-eabi-gcc` (macOS)"
                .to_string(),
        )
    }

    fn environment_check(&self) -> Availability {
        let gcc = find_executable("arm-none-eabi-gcc");
        let build_tool = ["cmake", "make"]
            .into_iter()
            .find(|tool| find_executable(tool).is_some());

        match (gcc, build_tool) {
            (Some(_), Some(tool)) => Availability::Available {
                detail: format!("arm-none-eabi-gcc and {} found", tool),
            },
            (None, _) => require_program(
                "arm-none-eabi-gcc",
                "apt install gcc-arm-none-eabi (Linux) or brew install arm-none-eabi-gcc (macOS)",
            ),
            (Some(_), None) => Availability::Missing {
                tool: "cmake or make".to_string(),
                install_hint: "https://cmake.org/download/".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn detect(files: &[(&str, &str)]) -> bool {
        let tmp = TempDir::new().unwrap();
        for (name, content) in files {
            let path = tmp.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        CMakeNativeToolchain::new().detect_project(tmp.path())
    }

    #[test]
    fn test_makefile_with_cross_compiler() {
        assert!(detect(&[("Makefile", "CC = arm-none-eabi-gcc\n")]));
        assert!(detect(&[("Makefile", "CROSS_COMPILE ?= riscv64-unknown-elf-\n")]));
        assert!(!detect(&[("Makefile", "CC = gcc\n")]));
    }

    #[test]
    fn test_cmake_with_toolchain_file() {
        assert!(detect(&[(
            "CMakeLists.txt",
            "set(CMAKE_TOOLCHAIN_FILE arm.cmake)\nproject(fw)\n"
        )]));
        assert!(!detect(&[("CMakeLists.txt", "project(host_tool)\n")]));
    }

    #[test]
    fn test_excludes_zephyr_and_espidf() {
        assert!(!detect(&[(
            "CMakeLists.txt",
            "find_package(Zephyr)\nset(CMAKE_TOOLCHAIN_FILE arm.cmake)\n"
        )]));
        assert!(!detect(&[
            ("CMakeLists.txt", "set(CMAKE_TOOLCHAIN_FILE x.cmake)\n"),
            ("sdkconfig", ""),
        ]));
        assert!(!detect(&[
            ("CMakeLists.txt", "arm-none-eabi\n"),
            ("main/CMakeLists.txt", ""),
        ]));
    }

    #[test]
    fn test_standalone_toolchain_files() {
        assert!(detect(&[("toolchain.cmake", "")]));
        assert!(detect(&[("arm-none-eabi.cmake", "")]));
    }

    #[test]
    fn test_upload_uses_openocd_when_board_has_target() {
        let cmake = CMakeNativeToolchain::new();
        let board = Board::new("stm32-nucleo", "STM32 Nucleo-64", 115200).with_jtag_target("stm32f4x");
        assert_eq!(
            cmake.upload_command(&board, "/dev/ttyACM0"),
            "openocd -f interface/stlink.cfg -f target/stm32f4x.cfg -c \"program build/firmware.elf verify reset exit\""
        );

        let plain = Board::new("custom", "Custom", 115200);
        assert_eq!(cmake.upload_command(&plain, "/dev/ttyACM0"), "make flash");
        assert_eq!(cmake.compile_command(&plain), "cmake --build build");
    }
}
