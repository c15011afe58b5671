//! Static usage snippets for each debugging tool.
//!
//! Templates use `{name}` tokens. [`fill`] substitutes them from values
//! already in the synthesis context in a single pass over the template, so
//! a value that itself contains braces is copied through untouched. A
//! template token with no value is a bug in the template table, not a
//! runtime condition.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").expect("valid placeholder regex"));

/// Placeholder tokens still present in `text`.
pub fn unresolved_placeholders(text: &str) -> Vec<&str> {
    PLACEHOLDER.find_iter(text).map(|m| m.as_str()).collect()
}

fn lookup<'v>(values: &[(&str, &'v str)], name: &str) -> Option<&'v str> {
    values.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
}

/// Tokens in `template` that `values` does not supply.
pub fn missing_tokens<'t>(template: &'t str, values: &[(&str, &str)]) -> Vec<&'t str> {
    PLACEHOLDER
        .captures_iter(template)
        .filter(|caps| lookup(values, &caps[1]).is_none())
        .filter_map(|caps| caps.get(0).map(|m| m.as_str()))
        .collect()
}

/// Substitute `{name}` tokens in `template`.
///
/// Substituted values are never rescanned.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    debug_assert!(
        missing_tokens(template, values).is_empty(),
        "snippet tokens without a value: {:?}",
        missing_tokens(template, values)
    );
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match lookup(values, &caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

pub const SERIAL: &str = r#"### Serial Output

Use this Python snippet to capture serial output from the board:

```python
import serial, time
ser = serial.Serial('{port}', {baud_rate}, timeout=1)
time.sleep({boot_delay})  # Wait for boot
lines = []
start = time.time()
while time.time() - start < 10:  # Read for 10 seconds
    line = ser.readline().decode('utf-8', errors='ignore').strip()
    if line:
        lines.append(line)
        print(line)
ser.close()
```

Save this as `read_serial.py` and run with `python read_serial.py`. Parse the output to check if your firmware is behaving correctly.

**Important serial conventions for your firmware:**
- Configure your serial port at {baud_rate} baud
- Send complete lines (newline-terminated) so each message can be parsed
- Print `[READY]` when initialization is complete
- Print `[ERROR] <description>` for any error conditions
- Use tags for structured output: `[SENSOR] temp=23.4`, `[STATUS] running`"#;

pub const LOGIC_ANALYZER: &str = r#"### Logic Analyzer (Saleae Logic 2)

Logic 2 must be running with the automation server enabled (Preferences > Automation). Capture digital channels and export them for analysis:

```python
from saleae import automation

with automation.Manager.connect(port=10430) as manager:
    device_config = automation.LogicDeviceConfiguration(
        enabled_digital_channels=[0, 1, 2, 3],
        digital_sample_rate=10_000_000,
    )
    capture_config = automation.CaptureConfiguration(
        capture_mode=automation.TimedCaptureMode(duration_seconds=2.0)
    )
    with manager.start_capture(
        device_configuration=device_config,
        capture_configuration=capture_config,
    ) as capture:
        capture.wait()
        capture.export_raw_data_csv(directory='capture', digital_channels=[0, 1, 2, 3])
```

Flash the firmware first, then start the capture while the code under test runs. Inspect `capture/digital.csv` for edge timing; add protocol analyzers (I2C, SPI, Async Serial) in Logic 2 to decode bus traffic."#;

pub const JTAG_CONFIGURED: &str = r#"### JTAG/SWD Debugging (OpenOCD)

The board is connected through a `{interface}` probe, OpenOCD target `{target}`.

Start the debug server:
```
openocd -f interface/{interface}.cfg -f target/{target}.cfg
```

In a second terminal, attach GDB (use the GDB built for your chip, e.g. `arm-none-eabi-gdb`):
```
arm-none-eabi-gdb {firmware} -ex "target extended-remote :3333"
```

Useful GDB commands:
- `monitor reset halt` to stop the core at reset
- `break <function>` then `continue` to stop at a function
- `info registers` and `bt` after a crash or hard fault
- `x/16xw <address>` to inspect memory or peripheral registers"#;

pub const JTAG_BOARD_TARGET: &str = r#"### JTAG/SWD Debugging (OpenOCD)

This board's OpenOCD target is `{target}`. Connect a debug probe and start the debug server, replacing `stlink` with your probe (`jlink`, `cmsis-dap`):
```
openocd -f interface/stlink.cfg -f target/{target}.cfg
```

Flash over the probe:
```
openocd -f interface/stlink.cfg -f target/{target}.cfg -c "program {firmware} verify reset exit"
```

Attach GDB with `target extended-remote :3333`, then use `monitor reset halt`, `break`, `bt` and `info registers` to inspect the running firmware."#;

pub const JTAG_GENERIC: &str = r#"### JTAG/SWD Debugging (OpenOCD)

OpenOCD is installed. Pick the interface config for your probe (`stlink`, `jlink`, `cmsis-dap`) and the target config for your chip from OpenOCD's `scripts/target/` directory, then start the debug server:
```
openocd -f interface/stlink.cfg -f target/stm32f4x.cfg
```

Attach GDB with `target extended-remote :3333`, then use `monitor reset halt`, `break`, `bt` and `info registers` to inspect the running firmware."#;

pub const OSCILLOSCOPE: &str = r#"### Oscilloscope (PyVISA)

Query a USB or LAN oscilloscope over SCPI:

```python
import pyvisa
rm = pyvisa.ResourceManager()
resources = rm.list_resources()
print(resources)
scope = rm.open_resource(resources[0])
print(scope.query('*IDN?'))
scope.write(':MEASure:SOURce CHANnel1')
print('Vpp:', scope.query(':MEASure:VPP?'))
print('Freq:', scope.query(':MEASure:FREQuency?'))
scope.close()
```

SCPI command names vary by vendor; check the programming manual for your scope. Use it to verify PWM duty cycle, analog levels and signal integrity."#;

pub const DATASHEETS: &str = r#"## Datasheets

Before writing or debugging firmware, check for datasheets in this project:

1. **Check `datasheets/` folder first.** If it exists, read any relevant PDFs for pin configurations, register maps, timing specs, and electrical limits.
2. **Check the project root and subfolders** for any other .pdf files that may be component datasheets or reference manuals.

When you find a datasheet:
- Read it to understand the hardware you're interfacing with.
- Use the correct register addresses, pin assignments, and protocol settings from the datasheet, not from memory or guesswork.
- Pay attention to voltage levels, max current ratings, and timing requirements.
- If a datasheet contradicts the pin reference below, the datasheet is correct."#;

pub const TROUBLESHOOTING: &str = r#"## Troubleshooting

- **Port `{port}` not found**: replug the board and list ports again (`ls /dev/ttyUSB* /dev/ttyACM* /dev/cu.usb*`). The port name can change after a reset.
- **Permission denied on `{port}`**: on Linux, add your user to the `dialout` group and log in again.
- **Port busy during flash**: close any serial monitor or script holding `{port}` before flashing.
- **Garbled output**: the firmware and the reader must both use {baud_rate} baud.
- **No output after flashing**: wait {boot_delay} seconds for boot, press the reset button, and confirm the firmware initializes serial before printing."#;
