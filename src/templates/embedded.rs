//! Templates compiled into the binary from `templates/` at build time.

/// Every embedded template as `(name, source)`.
pub const TEMPLATES: &[(&str, &str)] = &[
    ("NGXGPActuator.cfg", include_str!("../../templates/NGXGPActuator.cfg")),
    ("alt_config.xml", include_str!("../../templates/alt_config.xml")),
    ("arar_constants.ini", include_str!("../../templates/arar_constants.ini")),
    ("canvas.yaml", include_str!("../../templates/canvas.yaml")),
    ("canvas_config.xml", include_str!("../../templates/canvas_config.xml")),
    ("credentials.json", include_str!("../../templates/credentials.json")),
    ("defaults.yaml", include_str!("../../templates/defaults.yaml")),
    ("dvc.ini", include_str!("../../templates/dvc.ini")),
    ("example_extraction.py", include_str!("../../templates/example_extraction.py")),
    ("example_post_equilibration.py", include_str!("../../templates/example_post_equilibration.py")),
    ("example_post_measurement.py", include_str!("../../templates/example_post_measurement.py")),
    ("example_procedure.py", include_str!("../../templates/example_procedure.py")),
    ("example_unknown.py", include_str!("../../templates/example_unknown.py")),
    ("experiment_defaults.yaml", include_str!("../../templates/experiment_defaults.yaml")),
    ("extractionline.ini", include_str!("../../templates/extractionline.ini")),
    ("general.ini", include_str!("../../templates/general.ini")),
    ("hops.yaml", include_str!("../../templates/hops.yaml")),
    ("initialization.xml", include_str!("../../templates/initialization.xml")),
    ("launcher_mac", include_str!("../../templates/launcher_mac")),
    ("launcher_mac_conda", include_str!("../../templates/launcher_mac_conda")),
    ("launcher_unix", include_str!("../../templates/launcher_unix")),
    ("mftable.csv", include_str!("../../templates/mftable.csv")),
    ("ngx.ini", include_str!("../../templates/ngx.ini")),
    ("ngx_switch_controller.cfg", include_str!("../../templates/ngx_switch_controller.cfg")),
    ("nominal.yaml", include_str!("../../templates/nominal.yaml")),
    ("spectrometer.ini", include_str!("../../templates/spectrometer.ini")),
    ("spectrometer_microcontroller.cfg", include_str!("../../templates/spectrometer_microcontroller.cfg")),
    ("startup_tests.yaml", include_str!("../../templates/startup_tests.yaml")),
    ("system_monitor.cfg", include_str!("../../templates/system_monitor.cfg")),
    ("update.ini", include_str!("../../templates/update.ini")),
    ("valves.yaml", include_str!("../../templates/valves.yaml")),
];

/// Look up the source of an embedded template by name.
#[must_use]
pub fn get_embedded(name: &str) -> Option<&'static str> {
    TEMPLATES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, source)| *source)
}
