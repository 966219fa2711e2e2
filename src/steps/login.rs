//! Step: login session files.
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};

use super::{Context, Step, StepResult};
use crate::resources::WriteStats;

/// User that owns a freshly provisioned session.
const DEFAULT_USER: &str = "root";

/// Contents of `users.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Users {
    /// Known users.
    pub users: Vec<String>,
    /// User preselected in the login dialog.
    pub last_login: String,
}

/// Contents of `environments.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environments {
    /// Active environment root.
    pub env: String,
    /// Every known environment root.
    pub envs: Vec<String>,
}

/// Write the session files (`users.yaml`, `environments.yaml`) under
/// `<home>/.pychron.<app_id>/`.
#[derive(Debug)]
pub struct WriteLoginFiles;

impl Step for WriteLoginFiles {
    fn name(&self) -> &'static str {
        "Login files"
    }

    fn run(&self, ctx: &Context) -> Result<StepResult> {
        let app_dir = format!(".pychron.{}", ctx.options.app_id);
        let app_root = ctx.ensure_dir(&ctx.home, &[app_dir.as_str()])?;
        let env = ctx.env_root().display().to_string();

        let users = Users {
            users: vec![DEFAULT_USER.to_string()],
            last_login: DEFAULT_USER.to_string(),
        };
        let environments = Environments {
            env: env.clone(),
            envs: vec![env],
        };

        let materializer = ctx.materializer();
        let mut stats = WriteStats::default();
        stats.record(materializer.write(
            &app_root.join("users.yaml"),
            &serde_yaml::to_string(&users).context("serializing users.yaml")?,
        )?);
        stats.record(materializer.write(
            &app_root.join("environments.yaml"),
            &serde_yaml::to_string(&environments).context("serializing environments.yaml")?,
        )?);
        Ok(StepResult::from_writes(ctx, &stats))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::platform::Os;
    use crate::steps::test_helpers::harness;

    #[test]
    fn writes_session_files_for_app_id() {
        let mut h = harness(Os::Linux, vec![]);
        h.ctx.options.app_id = "1".to_string();
        WriteLoginFiles.run(&h.ctx).unwrap();

        let root = h.home.path().join(".pychron.1");
        let users: Users =
            serde_yaml::from_str(&std::fs::read_to_string(root.join("users.yaml")).unwrap())
                .unwrap();
        assert_eq!(users.users, vec!["root"]);
        assert_eq!(users.last_login, "root");

        let envs: Environments = serde_yaml::from_str(
            &std::fs::read_to_string(root.join("environments.yaml")).unwrap(),
        )
        .unwrap();
        let expected = h.home.path().join("Pychron").display().to_string();
        assert_eq!(envs.env, expected);
        assert_eq!(envs.envs, vec![expected]);
    }

    #[test]
    fn users_yaml_layout() {
        let users = Users {
            users: vec![DEFAULT_USER.to_string()],
            last_login: DEFAULT_USER.to_string(),
        };
        insta::assert_snapshot!(serde_yaml::to_string(&users).unwrap(), @r"
        users:
        - root
        last_login: root
        ");
    }
}
