//! Step: default and example pyscripts.
use anyhow::Result;

use super::{Context, Step, StepResult, materialize_all};
use crate::resources::WriteStats;

/// `(subdirectory of scripts/, template)` for each example script.
const EXAMPLE_SCRIPTS: &[(&str, &str)] = &[
    ("measurement", "example_unknown.py"),
    ("extraction", "example_extraction.py"),
    ("procedures", "example_procedure.py"),
    ("post_equilibration", "example_post_equilibration.py"),
    ("post_measurement", "example_post_measurement.py"),
];

/// `(subdirectory of scripts/measurement/, template)` for measurement
/// support files.
const MEASUREMENT_FILES: &[(&str, &str)] = &[("fits", "nominal.yaml"), ("hops", "hops.yaml")];

/// Write the default and example pyscripts under `<env>/scripts/`.
#[derive(Debug)]
pub struct WriteScripts;

impl Step for WriteScripts {
    fn name(&self) -> &'static str {
        "Scripts"
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        let env_root = ctx.env_root();
        let mut stats = WriteStats::default();

        let scripts = ctx.ensure_dir(&env_root, &["scripts"])?;
        materialize_all(ctx, &scripts, &["defaults.yaml"], &mut stats)?;

        for (dir, template) in EXAMPLE_SCRIPTS {
            let out = ctx.ensure_dir(&scripts, &[*dir])?;
            materialize_all(ctx, &out, &[*template], &mut stats)?;
        }

        for (dir, template) in MEASUREMENT_FILES {
            let out = ctx.ensure_dir(&scripts, &["measurement", *dir])?;
            materialize_all(ctx, &out, &[*template], &mut stats)?;
        }

        Ok(StepResult::from_writes(ctx, &stats))
    }
}
