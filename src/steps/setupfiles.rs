//! Step: hardware setup files.
use anyhow::Result;

use super::{Context, Step, StepResult, materialize_all};
use crate::resources::WriteStats;
use crate::templates::TemplateContext;

/// Valve entry appended to `valves.yaml` for NGX systems.
const NGX_VALVE_BLOCK: &str = "- name: MS_Inlet\n  address: PIV\n";

/// Device configuration files written only for NGX systems.
const NGX_DEVICES: &[&str] = &[
    "ngx_switch_controller.cfg",
    "spectrometer_microcontroller.cfg",
    "NGXGPActuator.cfg",
];

/// Write the hardware setup files under `<env>/setupfiles/`.
#[derive(Debug)]
pub struct WriteSetupFiles;

impl Step for WriteSetupFiles {
    fn name(&self) -> &'static str {
        "Setup files"
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        let ngx = ctx.options.ngx;
        let setupfiles = ctx.ensure_dir(&ctx.env_root(), &["setupfiles"])?;
        let mut stats = WriteStats::default();

        let canvas = ctx.ensure_dir(&setupfiles, &["canvas2D"])?;
        materialize_all(
            ctx,
            &canvas,
            &["canvas.yaml", "canvas_config.xml", "alt_config.xml"],
            &mut stats,
        )?;

        let extractionline = ctx.ensure_dir(&setupfiles, &["extractionline"])?;
        let valves = valves_yaml(ctx, ngx)?;
        stats.record(
            ctx.materializer()
                .write(&extractionline.join("valves.yaml"), &valves)?,
        );

        let monitors = ctx.ensure_dir(&setupfiles, &["monitors"])?;
        materialize_all(ctx, &monitors, &["system_monitor.cfg"], &mut stats)?;

        if ngx {
            let devices = ctx.ensure_dir(&setupfiles, &["devices"])?;
            materialize_all(ctx, &devices, NGX_DEVICES, &mut stats)?;
        }

        materialize_all(
            ctx,
            &setupfiles,
            &["startup_tests.yaml", "experiment_defaults.yaml"],
            &mut stats,
        )?;

        if ngx {
            let mftables = ctx.ensure_dir(&setupfiles, &["spectrometer", "mftables"])?;
            materialize_all(ctx, &mftables, &["mftable.csv"], &mut stats)?;
        }

        Ok(StepResult::from_writes(ctx, &stats))
    }
}

/// Render `valves.yaml`, appending the NGX inlet valve when `ngx` is set.
fn valves_yaml(ctx: &Context, ngx: bool) -> Result<String> {
    let mut text = ctx.render("valves.yaml", &TemplateContext::new())?;
    if ngx {
        if !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(NGX_VALVE_BLOCK);
    }
    Ok(text)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::platform::Os;
    use crate::steps::test_helpers::harness;

    fn valves(h: &crate::steps::test_helpers::Harness) -> String {
        std::fs::read_to_string(
            h.home
                .path()
                .join("Pychron/setupfiles/extractionline/valves.yaml"),
        )
        .unwrap()
    }

    #[test]
    fn without_ngx_valves_lack_inlet() {
        let h = harness(Os::Linux, vec![]);
        WriteSetupFiles.run(&h.ctx).unwrap();

        assert!(!valves(&h).contains("MS_Inlet"));
        let sf = h.home.path().join("Pychron/setupfiles");
        assert!(sf.join("canvas2D/canvas.yaml").is_file());
        assert!(sf.join("canvas2D/canvas_config.xml").is_file());
        assert!(sf.join("canvas2D/alt_config.xml").is_file());
        assert!(sf.join("monitors/system_monitor.cfg").is_file());
        assert!(sf.join("startup_tests.yaml").is_file());
        assert!(sf.join("experiment_defaults.yaml").is_file());
        assert!(!sf.join("devices").exists());
        assert!(!sf.join("spectrometer").exists());
    }

    #[test]
    fn with_ngx_valves_contain_inlet_and_devices_exist() {
        let mut h = harness(Os::Linux, vec![]);
        h.ctx.options.ngx = true;
        WriteSetupFiles.run(&h.ctx).unwrap();

        let text = valves(&h);
        assert!(text.ends_with("- name: MS_Inlet\n  address: PIV\n"));
        let parsed: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert!(parsed.as_sequence().unwrap().iter().any(|v| {
            v.get("name").and_then(serde_yaml::Value::as_str) == Some("MS_Inlet")
        }));

        let sf = h.home.path().join("Pychron/setupfiles");
        for device in NGX_DEVICES {
            assert!(sf.join("devices").join(device).is_file(), "missing {device}");
        }
        assert!(sf.join("spectrometer/mftables/mftable.csv").is_file());
    }

    #[test]
    fn declined_overwrite_keeps_custom_valves() {
        let h = harness(Os::Linux, vec![false]);
        let dir = h.home.path().join("Pychron/setupfiles/extractionline");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("valves.yaml"), "- name: Custom\n").unwrap();

        assert_eq!(WriteSetupFiles.run(&h.ctx).unwrap(), StepResult::Ok);
        assert_eq!(valves(&h), "- name: Custom\n");
    }
}
