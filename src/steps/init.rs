//! Step: initialization descriptor and preference files.
use anyhow::Result;

use super::{Context, Step, StepResult, materialize_all};
use crate::resources::WriteStats;
use crate::templates::TemplateContext;

/// Write `initialization.xml` and the preference files under
/// `<env>/preferences/`.
#[derive(Debug)]
pub struct WriteInitialization;

impl Step for WriteInitialization {
    fn name(&self) -> &'static str {
        "Initialization"
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        let env_root = ctx.env_root();
        let mut stats = WriteStats::default();

        let setupfiles = ctx.ensure_dir(&env_root, &["setupfiles"])?;
        let descriptor = ctx.render("initialization.xml", &TemplateContext::new())?;
        if ctx.verbose {
            ctx.log.info("======== Initialization.xml contents start ========");
            ctx.log.info(&descriptor);
            ctx.log.info("======== Initialization.xml contents end ========");
        }
        stats.record(
            ctx.materializer()
                .write(&setupfiles.join("initialization.xml"), &descriptor)?,
        );

        let preferences = ctx.ensure_dir(&env_root, &["preferences"])?;
        for (template, context) in preference_files(ctx) {
            stats.record(ctx.materialize(&preferences, template, &context)?);
        }
        if ctx.options.ngx {
            materialize_all(
                ctx,
                &preferences,
                &["ngx.ini", "spectrometer.ini"],
                &mut stats,
            )?;
        }

        Ok(StepResult::from_writes(ctx, &stats))
    }
}

/// Preference templates written on every system, with their contexts.
fn preference_files(ctx: &Context) -> Vec<(&'static str, TemplateContext)> {
    let opts = &ctx.options;
    let setupfiles = ctx.env_root().join("setupfiles");

    let general = TemplateContext::new()
        .with("general_organization", opts.organization.as_str())
        .with("general_remote", "{}/Laboratory");

    let update = TemplateContext::new()
        .with("build_repo", ctx.checkout_dir().as_path())
        .with("build_remote", format!("{}/pychron", opts.fork))
        .with("build_branch", opts.branch.as_str());

    let extractionline = TemplateContext::new()
        .with(
            "canvas_path",
            setupfiles.join("canvas2D").join("canvas.yaml").as_path(),
        )
        .with(
            "canvas_config_path",
            setupfiles
                .join("canvas2D")
                .join("canvas_config.xml")
                .as_path(),
        )
        .with(
            "valves_path",
            setupfiles
                .join("extractionline")
                .join("valves.yaml")
                .as_path(),
        );

    vec![
        ("general.ini", general),
        ("dvc.ini", TemplateContext::new()),
        ("update.ini", update),
        ("arar_constants.ini", TemplateContext::new()),
        ("extractionline.ini", extractionline),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::platform::Os;
    use crate::steps::test_helpers::harness;

    fn read(h: &crate::steps::test_helpers::Harness, rel: &str) -> String {
        std::fs::read_to_string(h.home.path().join("Pychron").join(rel)).unwrap()
    }

    #[test]
    fn writes_descriptor_and_preferences() {
        let mut h = harness(Os::Linux, vec![]);
        h.ctx.options.organization = "LabOrg".to_string();
        h.ctx.options.fork = "jirhiker".to_string();
        h.ctx.options.branch = "dev/dr".to_string();
        h.ctx.options.app_id = "2".to_string();
        WriteInitialization.run(&h.ctx).unwrap();

        assert!(read(&h, "setupfiles/initialization.xml").contains("<root>"));

        let general = read(&h, "preferences/general.ini");
        assert!(general.contains("organization = LabOrg"));
        assert!(general.contains("remote = {}/Laboratory"));

        let update = read(&h, "preferences/update.ini");
        let repo = h.home.path().join(".pychron.2").join("pychron");
        assert!(update.contains(&format!("build_repo = {}", repo.display())));
        assert!(update.contains("build_remote = jirhiker/pychron"));
        assert!(update.contains("build_branch = dev/dr"));

        let extractionline = read(&h, "preferences/extractionline.ini");
        let valves = h
            .home
            .path()
            .join("Pychron/setupfiles/extractionline/valves.yaml");
        assert!(extractionline.contains(&format!("valves_path = {}", valves.display())));

        assert!(h.home.path().join("Pychron/preferences/dvc.ini").is_file());
        assert!(
            h.home
                .path()
                .join("Pychron/preferences/arar_constants.ini")
                .is_file()
        );
        assert!(!h.home.path().join("Pychron/preferences/ngx.ini").exists());
    }

    #[test]
    fn ngx_adds_hardware_preferences() {
        let mut h = harness(Os::Linux, vec![]);
        h.ctx.options.ngx = true;
        WriteInitialization.run(&h.ctx).unwrap();
        assert!(h.home.path().join("Pychron/preferences/ngx.ini").is_file());
        assert!(
            h.home
                .path()
                .join("Pychron/preferences/spectrometer.ini")
                .is_file()
        );
    }

    #[test]
    fn dry_run_reports_dry_run() {
        let mut h = harness(Os::Linux, vec![]);
        h.ctx.dry_run = true;
        assert_eq!(WriteInitialization.run(&h.ctx).unwrap(), StepResult::DryRun);
        assert!(!h.home.path().join("Pychron").exists());
    }
}
