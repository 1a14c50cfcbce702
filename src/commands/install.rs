//! Install command implementation
//!
//! Builds the installation request from `dropins.yaml` and the command line,
//! then either prints the planned placements (`--dry-run`) or writes the
//! dropin tree.

use serde::Serialize;

use crate::cli::InstallArgs;
use crate::config::{RequestConfig, RequestOverrides};
use crate::domain::InstallationRequest;
use crate::error::Result;
use crate::installer::{Installer, Placement};
use crate::resolver::RepositoryResolver;
use crate::ui;

use super::helpers::{absolutize, current_dir, print_json};

/// JSON shape of a dry run
#[derive(Serialize)]
struct PlanOutput<'a> {
    dropin_root: String,
    placements: &'a [Placement],
}

/// Run install command
pub fn run(args: InstallArgs) -> Result<()> {
    let cwd = current_dir()?;
    let request = build_request(&cwd, &args)?;
    tracing::debug!(?request, "installation request");

    let resolver = RepositoryResolver::scan(&request.repositories)?;
    let installer = Installer::new(&request).with_progress(!args.json && !args.dry_run);

    if args.dry_run {
        let plan = installer.plan(&resolver)?;
        let placements = plan.placements();
        if args.json {
            return print_json(&PlanOutput {
                dropin_root: installer.materializer().dropin_root().display().to_string(),
                placements: &placements,
            });
        }
        ui::display_plan(&placements, |id| {
            plan.catalog.get(id).is_some_and(|unit| !unit.is_reactor())
        });
        return Ok(());
    }

    let result = installer.install(&resolver)?;
    if args.json {
        print_json(&result)
    } else {
        ui::display_result(&result);
        Ok(())
    }
}

fn build_request(cwd: &std::path::Path, args: &InstallArgs) -> Result<InstallationRequest> {
    let config = RequestConfig::discover(args.config.as_deref(), cwd)?.unwrap_or_default();

    let overrides = RequestOverrides {
        build_root: args.build_root.clone().map(|p| absolutize(cwd, p)),
        dropin_dir: args.dropin_dir.clone(),
        main_package: args.main_package.clone(),
        artifacts: args.artifacts.clone(),
        packages: args.mappings.clone(),
        repositories: args
            .repositories
            .iter()
            .cloned()
            .map(|p| absolutize(cwd, p))
            .collect(),
    };

    let mut request = config.into_request(overrides)?;
    request.base_dir = cwd.to_path_buf();
    request.build_root = absolutize(cwd, request.build_root);
    Ok(request)
}
