//! The built-in board catalog.
//!
//! Boards are defined once, in a fixed order, and looked up by slug. The
//! catalog is toolchain-agnostic: adapters decide which fields they use.

use std::sync::LazyLock;

use crate::core::board::Board;

const ESP32_INDEX: &str =
    "https://raw.githubusercontent.com/espressif/arduino-esp32/gh-pages/package_esp32_index.json";
const ESP8266_INDEX: &str = "https://arduino.esp8266.com/stable/package_esp8266com_index.json";
const RP2040_INDEX: &str =
    "https://github.com/earlephilhower/arduino-pico/releases/download/global/package_rp2040_index.json";
const TEENSY_INDEX: &str = "https://www.pjrc.com/teensy/package_teensy_index.json";
const STM32_INDEX: &str =
    "https://github.com/stm32duino/BoardManagerFiles/raw/main/package_stmicroelectronics_index.json";

/// USB VID/PID pairs of generic USB-serial bridge chips that carry no board
/// identity, with the boards they commonly sit on.
pub const VID_PID_HINTS: &[((u16, u16), &[&str])] = &[
    // CH340
    ((0x1A86, 0x7523), &["esp32", "esp8266", "arduino-nano"]),
    // CH9102
    ((0x1A86, 0x55D4), &["esp32"]),
    // CP2102
    ((0x10C4, 0xEA60), &["esp32", "esp8266"]),
];

/// Candidate board slugs for a USB VID/PID pair.
pub fn vid_pid_candidates(vid: u16, pid: u16) -> &'static [&'static str] {
    VID_PID_HINTS
        .iter()
        .find(|(key, _)| *key == (vid, pid))
        .map(|(_, slugs)| *slugs)
        .unwrap_or(&[])
}

/// Parse a hexadecimal USB identifier such as `0x1A86` or `1a86`.
pub fn parse_usb_id(s: &str) -> Option<u16> {
    let s = s.trim();
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u16::from_str_radix(digits, 16).ok()
}

static CATALOG: LazyLock<BoardCatalog> = LazyLock::new(BoardCatalog::builtin);

/// Immutable, ordered collection of known boards.
#[derive(Debug)]
pub struct BoardCatalog {
    boards: Vec<Board>,
}

impl BoardCatalog {
    /// The process-wide catalog.
    pub fn global() -> &'static BoardCatalog {
        &CATALOG
    }

    /// Look up a board by slug.
    pub fn get(&self, slug: &str) -> Option<&Board> {
        self.boards.iter().find(|b| b.slug == slug)
    }

    /// All boards, in catalog order.
    pub fn all(&self) -> &[Board] {
        &self.boards
    }

    /// All slugs, in catalog order.
    pub fn slugs(&self) -> Vec<&str> {
        self.boards.iter().map(|b| b.slug.as_str()).collect()
    }

    /// Find the board whose FQBN shares the `vendor:arch:board` prefix of `fqbn`.
    pub fn find_by_fqbn(&self, fqbn: &str) -> Option<&Board> {
        let target = base_fqbn(fqbn);
        if target.is_empty() {
            return None;
        }
        self.boards
            .iter()
            .find(|b| b.fqbn.as_deref().map(base_fqbn) == Some(target))
    }

    /// Boards hinted at by a USB VID/PID pair, in hint order.
    pub fn find_by_usb_id(&self, vid: u16, pid: u16) -> Vec<&Board> {
        vid_pid_candidates(vid, pid)
            .iter()
            .filter_map(|slug| self.get(slug))
            .collect()
    }

    fn builtin() -> Self {
        BoardCatalog {
            boards: vec![
                esp32(),
                esp32s3(),
                esp32c3(),
                esp32c6(),
                esp8266(),
                arduino_uno(),
                arduino_nano(),
                arduino_mega(),
                rp2040(),
                teensy40(),
                teensy41(),
                stm32_nucleo(),
            ],
        }
    }
}

/// The first three colon-separated segments of an FQBN.
pub fn base_fqbn(fqbn: &str) -> &str {
    match fqbn.match_indices(':').nth(2) {
        Some((idx, _)) => &fqbn[..idx],
        None => fqbn,
    }
}

const ESP_INCLUDES: &[(&str, &str)] = &[
    ("wifi", "#include <WiFi.h>"),
    ("http_server", "#include <WebServer.h>"),
    ("ota", "#include <ArduinoOTA.h>"),
    ("preferences", "#include <Preferences.h>"),
    ("spiffs", "#include <SPIFFS.h>"),
];

const AVR_CAPS: &[&str] = &["digital_io", "analog_input", "pwm", "i2c", "spi", "uart"];

fn esp32() -> Board {
    Board::new("esp32", "ESP32", 115200)
        .with_fqbn("esp32:esp32:esp32:UploadSpeed=115200")
        .with_package("esp32:esp32", ESP32_INDEX)
        .with_jtag_target("esp32")
        .with_capabilities(&[
            "wifi",
            "bluetooth",
            "ble",
            "http_server",
            "ota",
            "spiffs",
            "preferences",
        ])
        .with_pins(&[
            ("onboard_led", 2),
            ("boot_button", 0),
            ("i2c_sda", 21),
            ("i2c_scl", 22),
            ("spi_mosi", 23),
            ("spi_miso", 19),
            ("spi_sck", 18),
            ("spi_ss", 5),
            ("dac1", 25),
            ("dac2", 26),
        ])
        .with_pin_notes(&[
            "GPIO 0: Boot button, do not use for general I/O",
            "GPIO 2: Onboard LED",
            "GPIO 34-39: Input only (no pull-up/pull-down)",
            "ADC1: GPIO 32-39 (12-bit, works alongside WiFi)",
            "ADC2: GPIO 0,2,4,12-15,25-27 (does NOT work when WiFi is active)",
            "DAC: GPIO 25 (DAC1), GPIO 26 (DAC2)",
            "I2C default: SDA=21, SCL=22",
            "SPI default: MOSI=23, MISO=19, SCK=18, SS=5",
        ])
        .with_pitfalls(&[
            "ADC2 pins do not work when WiFi is active. Use ADC1 pins (32-39) if you need analog reads with WiFi.",
            "WiFi and Bluetooth at full power simultaneously will cause instability. Use one at a time or reduce power.",
            "If upload fails with 'connection timeout', hold the BOOT button while uploading.",
            "The ESP32 prints boot messages (rst:, boot:) on serial. Ignore these in your validation.",
            "delay() blocks the entire core. Use millis() for non-blocking timing.",
            "Stack size is 8KB per task by default. Use xTaskCreate() with a larger stack for complex tasks.",
            "OTA requires enough free flash for two firmware images. Use a partition scheme that supports this.",
            "String concatenation in loops causes heap fragmentation. Use char[] buffers for repeated operations.",
        ])
        .with_includes(&[
            ("wifi", "#include <WiFi.h>"),
            ("bluetooth", "#include <BluetoothSerial.h>"),
            ("http_server", "#include <WebServer.h>"),
            ("ota", "#include <ArduinoOTA.h>"),
            ("preferences", "#include <Preferences.h>"),
            ("spiffs", "#include <SPIFFS.h>"),
        ])
}

fn esp32s3() -> Board {
    Board::new("esp32s3", "ESP32-S3", 115200)
        .with_fqbn("esp32:esp32:esp32s3:UploadSpeed=115200")
        .with_package("esp32:esp32", ESP32_INDEX)
        .with_jtag_target("esp32s3")
        .with_capabilities(&[
            "wifi",
            "ble",
            "http_server",
            "ota",
            "spiffs",
            "preferences",
            "usb_native",
        ])
        .with_pins(&[
            ("onboard_led", 48),
            ("i2c_sda", 8),
            ("i2c_scl", 9),
            ("spi_mosi", 11),
            ("spi_miso", 13),
            ("spi_sck", 12),
            ("spi_ss", 10),
        ])
        .with_pin_notes(&[
            "GPIO 48: RGB LED (WS2812-style, not a simple HIGH/LOW LED)",
            "GPIO 19/20: USB D-/D+, do not use for general I/O",
            "GPIO 0: Boot button, do not use for general I/O",
            "ADC1: GPIO 1-10 (works alongside WiFi)",
            "ADC2: GPIO 11-20 (does NOT work when WiFi is active)",
            "I2C default: SDA=8, SCL=9",
            "SPI default: MOSI=11, MISO=13, SCK=12, SS=10",
        ])
        .with_pitfalls(&[
            "ADC2 pins do not work when WiFi is active. Use ADC1 pins (1-10) if you need analog reads with WiFi.",
            "GPIO 19/20 are USB pins. Do not use them for general I/O.",
            "RGB LED on GPIO 48 requires NeoPixel-style protocol, not simple digitalWrite.",
            "If upload fails, hold BOOT and press RST, then release BOOT after upload starts.",
            "delay() blocks the entire core. Use millis() for non-blocking timing.",
            "String concatenation in loops causes heap fragmentation. Use char[] buffers for repeated operations.",
        ])
        .with_includes(ESP_INCLUDES)
}

fn esp32c3() -> Board {
    Board::new("esp32c3", "ESP32-C3", 115200)
        .with_fqbn("esp32:esp32:esp32c3:UploadSpeed=115200")
        .with_package("esp32:esp32", ESP32_INDEX)
        .with_jtag_target("esp32c3")
        .with_capabilities(&["wifi", "ble", "http_server", "ota", "spiffs", "preferences"])
        .with_pins(&[
            ("onboard_led", 8),
            ("i2c_sda", 8),
            ("i2c_scl", 9),
            ("spi_mosi", 6),
            ("spi_miso", 5),
            ("spi_sck", 4),
            ("spi_ss", 7),
        ])
        .with_pin_notes(&[
            "GPIO 8: Onboard LED",
            "GPIO 9: Boot button, do not use for general I/O",
            "Only 22 GPIO pins available",
            "ADC1: GPIO 0-4 (no ADC2 on this chip)",
            "RISC-V single core architecture",
        ])
        .with_pitfalls(&[
            "Single-core RISC-V: no dual-core parallelism available.",
            "Only 22 GPIO pins. Plan pin usage carefully.",
            "GPIO 8 is shared between onboard LED and I2C SDA. Use a different SDA pin if LED is needed.",
            "GPIO 9 is the BOOT button. Do not use for general I/O.",
            "delay() blocks the entire core. Use millis() for non-blocking timing.",
            "No Bluetooth Classic. Only BLE is supported.",
        ])
        .with_includes(ESP_INCLUDES)
}

fn esp32c6() -> Board {
    Board::new("esp32c6", "ESP32-C6", 115200)
        .with_fqbn("esp32:esp32:esp32c6:UploadSpeed=115200")
        .with_package("esp32:esp32", ESP32_INDEX)
        .with_jtag_target("esp32c6")
        .with_capabilities(&[
            "wifi",
            "wifi6",
            "ble",
            "zigbee",
            "thread",
            "http_server",
            "ota",
            "spiffs",
            "preferences",
        ])
        .with_pins(&[
            ("onboard_led", 8),
            ("i2c_sda", 6),
            ("i2c_scl", 7),
            ("spi_mosi", 19),
            ("spi_miso", 20),
            ("spi_sck", 21),
            ("spi_ss", 18),
        ])
        .with_pin_notes(&[
            "GPIO 8: Onboard LED",
            "GPIO 9: Boot button, do not use for general I/O",
            "30 GPIO pins available",
            "ADC1: GPIO 0-6",
            "RISC-V architecture",
            "IEEE 802.15.4 radio for Zigbee/Thread",
        ])
        .with_pitfalls(&[
            "Single high-performance RISC-V core: no dual-core parallelism.",
            "WiFi 6 support requires ESP-IDF v5.1+ (check your Arduino core version).",
            "Zigbee and Thread share the 802.15.4 radio and cannot be used simultaneously.",
            "GPIO 9 is the BOOT button. Do not use for general I/O.",
            "delay() blocks the entire core. Use millis() for non-blocking timing.",
            "No Bluetooth Classic. Only BLE is supported.",
            "Newer chip: verify your Arduino ESP32 core version supports it.",
        ])
        .with_includes(ESP_INCLUDES)
}

fn esp8266() -> Board {
    Board::new("esp8266", "ESP8266", 115200)
        .with_fqbn("esp8266:esp8266:nodemcuv2")
        .with_package("esp8266:esp8266", ESP8266_INDEX)
        .with_capabilities(&["wifi", "http_server", "ota", "spiffs"])
        .with_pins(&[
            ("onboard_led", 2),
            ("i2c_sda", 4),
            ("i2c_scl", 5),
            ("spi_mosi", 13),
            ("spi_miso", 12),
            ("spi_sck", 14),
            ("spi_ss", 15),
        ])
        .with_pin_notes(&[
            "GPIO 2: Onboard LED (active LOW: LOW turns it ON)",
            "GPIO 0: Flash/boot mode, do not use for general I/O",
            "GPIO 16: Deep sleep wake, connect to RST for deep sleep wake-up",
            "1 ADC pin (A0), 10-bit resolution, 0-1V range",
            "I2C default: SDA=4 (D2), SCL=5 (D1)",
            "NodeMCU D-labels differ from GPIO numbers (D1=GPIO5, D2=GPIO4, etc.)",
        ])
        .with_pitfalls(&[
            "Only 80KB RAM. Avoid large buffers and dynamic memory allocation.",
            "Single core: delay() blocks WiFi stack. Use yield() or millis()-based timing.",
            "GPIO 6-11 are connected to flash. Do not use them.",
            "Onboard LED is active LOW: digitalWrite(2, LOW) turns it ON.",
            "ADC range is 0-1V (not 3.3V). Use a voltage divider for higher voltages.",
            "Watchdog timer will reset the chip if loop() takes too long. Use yield() in long operations.",
            "2.4GHz WiFi only, no 5GHz support.",
        ])
        .with_includes(&[
            ("wifi", "#include <ESP8266WiFi.h>"),
            ("http_server", "#include <ESP8266WebServer.h>"),
            ("ota", "#include <ArduinoOTA.h>"),
            ("spiffs", "#include <FS.h>"),
        ])
}

fn arduino_uno() -> Board {
    Board::new("arduino-uno", "Arduino Uno", 9600)
        .with_fqbn("arduino:avr:uno")
        .with_package("arduino:avr", "")
        .with_capabilities(AVR_CAPS)
        .with_pins(&[
            ("onboard_led", 13),
            ("i2c_sda", 18),
            ("i2c_scl", 19),
            ("spi_mosi", 11),
            ("spi_miso", 12),
            ("spi_sck", 13),
            ("spi_ss", 10),
        ])
        .with_pin_notes(&[
            "GPIO 13: Onboard LED (shared with SPI SCK)",
            "A0-A5: 10-bit analog input",
            "PWM: pins 3, 5, 6, 9, 10, 11",
            "I2C: SDA=A4, SCL=A5",
            "Pin 13 flickers during SPI communication",
            "Pins 0/1: Serial TX/RX (shared with USB)",
        ])
        .with_pitfalls(&[
            "Only 2KB SRAM and 32KB flash. Avoid String objects and large arrays.",
            "No floating-point hardware: float operations are slow and use flash.",
            "Pin 13 is shared with SPI SCK. LED flickers during SPI communication.",
            "Pins 0/1 are shared with USB serial. Do not use for I/O during serial communication.",
            "analogWrite() is PWM, not true analog output. No DAC available.",
            "External interrupts only on pins 2 and 3.",
            "delay() blocks the entire MCU. Use millis() for non-blocking timing.",
            "No WiFi or Bluetooth. Use external modules (ESP-01, HC-05) if needed.",
        ])
}

fn arduino_nano() -> Board {
    Board::new("arduino-nano", "Arduino Nano", 9600)
        .with_fqbn("arduino:avr:nano")
        .with_package("arduino:avr", "")
        .with_capabilities(AVR_CAPS)
        .with_pins(&[
            ("onboard_led", 13),
            ("i2c_sda", 18),
            ("i2c_scl", 19),
            ("spi_mosi", 11),
            ("spi_miso", 12),
            ("spi_sck", 13),
            ("spi_ss", 10),
        ])
        .with_pin_notes(&[
            "GPIO 13: Onboard LED",
            "A0-A7: analog input (A6/A7 are analog input only, no digital)",
            "PWM: pins 3, 5, 6, 9, 10, 11",
            "I2C: SDA=A4, SCL=A5",
            "Pins 0/1: Serial TX/RX (shared with USB)",
        ])
        .with_pitfalls(&[
            "Only 2KB SRAM and 32KB flash. Avoid String objects and large arrays.",
            "A6/A7 are analog input only and cannot be used as digital I/O.",
            "Clone Nanos often need old bootloader: use --fqbn arduino:avr:nano:cpu=atmega328old.",
            "No floating-point hardware: float operations are slow and use flash.",
            "Pins 0/1 are shared with USB serial. Do not use for I/O during serial communication.",
            "External interrupts only on pins 2 and 3.",
            "delay() blocks the entire MCU. Use millis() for non-blocking timing.",
            "No WiFi or Bluetooth. Use external modules if needed.",
        ])
}

fn arduino_mega() -> Board {
    Board::new("arduino-mega", "Arduino Mega 2560", 9600)
        .with_fqbn("arduino:avr:mega")
        .with_package("arduino:avr", "")
        .with_capabilities(AVR_CAPS)
        .with_capabilities(&["multi_serial"])
        .with_pins(&[
            ("onboard_led", 13),
            ("i2c_sda", 20),
            ("i2c_scl", 21),
            ("spi_mosi", 51),
            ("spi_miso", 50),
            ("spi_sck", 52),
            ("spi_ss", 53),
        ])
        .with_pin_notes(&[
            "GPIO 13: Onboard LED",
            "A0-A15: 16 analog input channels, 10-bit",
            "PWM: pins 2-13, 44-46",
            "I2C: SDA=20, SCL=21",
            "SPI: MOSI=51, MISO=50, SCK=52, SS=53",
            "4 serial ports: Serial (0/1), Serial1 (18/19), Serial2 (16/17), Serial3 (14/15)",
            "External interrupts: pins 2, 3, 18, 19, 20, 21",
        ])
        .with_pitfalls(&[
            "8KB SRAM and 256KB flash: more than Uno but still limited.",
            "No floating-point hardware: float operations are slow.",
            "SPI is on pins 50-53, NOT 11-13 like Uno. Code from Uno examples must be adapted.",
            "Pin 53 (SS) must be set as OUTPUT even if not used, or SPI will not work.",
            "analogWrite() is PWM, not true analog output. No DAC available.",
            "delay() blocks the entire MCU. Use millis() for non-blocking timing.",
            "No WiFi or Bluetooth. Use external modules if needed.",
        ])
}

fn rp2040() -> Board {
    Board::new("rp2040", "Raspberry Pi Pico (RP2040)", 115200)
        .with_fqbn("rp2040:rp2040:rpipico")
        .with_package("rp2040:rp2040", RP2040_INDEX)
        .with_jtag_target("rp2040")
        .with_capabilities(AVR_CAPS)
        .with_capabilities(&["pio", "dual_core", "usb_native"])
        .with_pins(&[
            ("onboard_led", 25),
            ("i2c_sda", 4),
            ("i2c_scl", 5),
            ("spi_mosi", 19),
            ("spi_miso", 16),
            ("spi_sck", 18),
            ("spi_ss", 17),
        ])
        .with_pin_notes(&[
            "GPIO 25: Onboard LED",
            "ADC: GPIO 26-28 (12-bit) + GPIO 29 (VSYS/3 voltage monitor)",
            "All GPIO pins support PWM",
            "I2C0: SDA=4, SCL=5 | I2C1: SDA=6, SCL=7",
            "SPI0: MOSI=19, MISO=16, SCK=18, SS=17 | SPI1: MOSI=15, MISO=12, SCK=14, SS=13",
            "UART0: TX=0, RX=1 | UART1: TX=8, RX=9",
            "2 PIO (Programmable I/O) blocks for custom protocols",
        ])
        .with_pitfalls(&[
            "264KB SRAM and 2MB flash. Adequate for most projects but plan large buffers carefully.",
            "First upload requires BOOTSEL mode: hold BOOTSEL while plugging in USB.",
            "Pico W has LED on different pin (via CYW43 WiFi chip). This definition is for Pico (non-W).",
            "ADC has known offset error. Calibrate if precision is needed.",
            "USB Serial is separate from UART. Serial is USB, Serial1/Serial2 are UART.",
            "No EEPROM. Use LittleFS for persistent storage.",
            "delay() only blocks the current core. Use millis() for non-blocking timing.",
            "Dual core: use setup1()/loop1() for second core tasks.",
        ])
}

const TEENSY_PINS: &[(&str, u32)] = &[
    ("onboard_led", 13),
    ("i2c_sda", 18),
    ("i2c_scl", 19),
    ("spi_mosi", 11),
    ("spi_miso", 12),
    ("spi_sck", 13),
    ("spi_ss", 10),
];

fn teensy40() -> Board {
    Board::new("teensy40", "Teensy 4.0", 115200)
        .with_fqbn("teensy:avr:teensy40")
        .with_package("teensy:avr", TEENSY_INDEX)
        .with_capabilities(AVR_CAPS)
        .with_capabilities(&["usb_native", "audio", "can_bus"])
        .with_pins(TEENSY_PINS)
        .with_pin_notes(&[
            "GPIO 13: Onboard LED",
            "14 ADC pins, 12-bit resolution",
            "PWM on many pins",
            "3 I2C buses",
            "2 SPI buses",
            "7 UART serial ports",
            "CAN bus support",
            "Native USB",
        ])
        .with_pitfalls(&[
            "Upload uses teensy_loader_cli, not standard serial upload.",
            "USB CDC: baud rate setting is ignored (always full USB speed).",
            "600MHz ARM Cortex-M7 runs hot. Consider heat management for sustained loads.",
            "1024KB flash, 512KB RAM: generous but not unlimited.",
            "No WiFi or Bluetooth. Use external modules if needed.",
            "Program button for bootloader mode.",
            "Use analogReadResolution(12) to get full 12-bit ADC resolution.",
            "Use elapsedMillis/elapsedMicros for non-blocking timing.",
        ])
}

fn teensy41() -> Board {
    Board::new("teensy41", "Teensy 4.1", 115200)
        .with_fqbn("teensy:avr:teensy41")
        .with_package("teensy:avr", TEENSY_INDEX)
        .with_capabilities(AVR_CAPS)
        .with_capabilities(&["usb_native", "audio", "can_bus", "ethernet", "sd_card"])
        .with_pins(TEENSY_PINS)
        .with_pin_notes(&[
            "GPIO 13: Onboard LED",
            "18 ADC pins",
            "PWM on many pins",
            "3 I2C buses",
            "2 SPI buses",
            "8 UART serial ports",
            "Native Ethernet (requires MagJack soldering)",
            "SD card via SDIO (bottom side)",
            "USB host support",
            "Optional PSRAM (solder pads on bottom)",
        ])
        .with_pitfalls(&[
            "Upload uses teensy_loader_cli, not standard serial upload.",
            "USB CDC: baud rate setting is ignored (always full USB speed).",
            "Ethernet requires soldering a MagJack connector to the board.",
            "SD card slot is on the bottom. Use the BUILTIN_SDCARD constant.",
            "PSRAM uses EXTMEM keyword for allocation.",
            "8MB flash, much more than Teensy 4.0.",
            "Program button for bootloader mode.",
            "Use elapsedMillis/elapsedMicros for non-blocking timing.",
        ])
}

fn stm32_nucleo() -> Board {
    Board::new("stm32-nucleo", "STM32 Nucleo-64", 115200)
        .with_fqbn("STMicroelectronics:stm32:Nucleo_64")
        .with_package("STMicroelectronics:stm32", STM32_INDEX)
        .with_jtag_target("stm32f4x")
        .with_capabilities(AVR_CAPS)
        .with_capabilities(&["dac", "can_bus"])
        .with_pins(&[
            ("onboard_led", 13),
            ("i2c_sda", 14),
            ("i2c_scl", 15),
            ("spi_mosi", 11),
            ("spi_miso", 12),
            ("spi_sck", 13),
            ("spi_ss", 10),
        ])
        .with_pin_notes(&[
            "LD2 on PA5/D13",
            "B1 user button on PC13",
            "Arduino-compatible headers: D0-D15, A0-A5",
            "ADC: 12-bit resolution",
            "DAC available on some variants",
            "I2C: D14 (SDA), D15 (SCL)",
            "SPI: D11 (MOSI), D12 (MISO), D13 (SCK)",
            "UART via ST-Link Virtual COM Port (VCP)",
        ])
        .with_pitfalls(&[
            "Nucleo-64 is a family with many chip variants. Verify your specific board variant.",
            "Upload is via ST-Link, not USB serial. Install ST-Link drivers.",
            "Serial output is via ST-Link VCP, not native USB serial.",
            "Arduino pin mapping differs from STM32 native pin names (PA0, PB3, etc.).",
            "Library compatibility varies: not all Arduino libraries work with STM32.",
            "Flash and RAM sizes vary by chip variant.",
            "ST-Link drivers required on Windows.",
            "delay() blocks. Use millis() or HAL_GetTick() for non-blocking timing.",
        ])
}
