//! `create-turbo-sanity` command handler

use anyhow::{anyhow, bail, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::sync::Mutex;

use indicatif::ProgressBar;
use turbo_sanity_core::types::{ProvisioningResult, User};
use turbo_sanity_core::{
    CreatedResource, Error as ProvisionError, FileCredentialStore, HierarchicalConfigLoader,
    SanityClient, ScaffoldConfig,
};
use turbo_sanity_provision::{
    CommandLogin, Prompter, ProvisionObserver, ProvisionSettings, Provisioner, Stage, Validator,
};
use turbo_sanity_templates::{
    absolute_directory, inspect_directory, project_name, validate_package_name, write_env_files,
    DirectoryState, PackageManager, TemplateManager, TemplateSource, TemplateVars,
    DEFAULT_PROJECT_DIRECTORY,
};

use crate::cli::Cli;
use crate::output;
use crate::prompt::TerminalPrompter;

const COMMUNITY_URL: &str = "https://www.sanity.io/community/join";

/// Provision a Sanity project and scaffold the monorepo
pub async fn run(cli: Cli) -> Result<()> {
    output::header("Create Turbo + Sanity");

    let config = HierarchicalConfigLoader::new()
        .and_then(|loader| loader.load())
        .context("Failed to load configuration")?;

    // Reject an unusable directory name before anything is created remotely
    if let Some(dir) = cli.project_directory.as_deref() {
        project_name(dir).context("Invalid project directory")?;
    }

    let prompter = TerminalPrompter;
    let result = provision(&cli, &config, &prompter).await?;

    println!();
    output::kv("Project", &format!("{} ({})", result.display_name, result.project_id));
    output::kv("Dataset", &result.dataset_name);
    println!();

    scaffold(&cli, &config, &prompter, &result)
        .await
        .with_context(|| {
            format!(
                "Project {} and dataset {} are ready; rerun with --project {} --dataset {} to reuse them",
                result.project_id, result.dataset_name, result.project_id, result.dataset_name
            )
        })
}

/// Write the monorepo for a provisioned project and install its dependencies
async fn scaffold(
    cli: &Cli,
    config: &ScaffoldConfig,
    prompter: &dyn Prompter,
    result: &ProvisioningResult,
) -> Result<()> {
    let project_dir =
        resolve_project_directory(cli.project_directory.as_deref(), cli.yes, prompter)?;
    let name = project_name(&project_dir).context("Invalid project directory")?;

    let source = TemplateSource::parse(cli.template.as_deref().unwrap_or(&config.defaults.template));
    let package_manager = match cli.package_manager {
        Some(pm) => pm,
        None => config
            .defaults
            .package_manager
            .parse::<PackageManager>()
            .context("Invalid defaults.package_manager in configuration")?,
    };

    let vars = TemplateVars::new(
        &name,
        &result.display_name,
        &result.project_id,
        &result.dataset_name,
    );

    let spinner = output::spinner(&format!("Scaffolding {} from template {}", name, source));
    let written = TemplateManager::new()
        .scaffold(&source, &project_dir, &vars)
        .await;
    spinner.finish_and_clear();
    let written = written.with_context(|| format!("Failed to scaffold {}", project_dir))?;
    output::success(&format!("Created {} files in {}", written.len(), project_dir));

    write_env_files(&project_dir, &result.project_id, &result.dataset_name)
        .context("Failed to write environment files")?;
    output::success("Wrote environment files");

    if cli.skip_install {
        output::info("Skipping dependency installation");
    } else {
        let spinner = output::spinner(&format!(
            "Installing dependencies with {}",
            package_manager
        ));
        let installed = package_manager.install(&project_dir).await;
        spinner.finish_and_clear();
        installed.context("Failed to install dependencies")?;
        output::success("Installed dependencies");
    }

    print_next_steps(&project_dir, package_manager, cli.skip_install, result);

    Ok(())
}

/// Run the provisioning state machine, giving up on Ctrl-C
async fn provision(
    cli: &Cli,
    config: &ScaffoldConfig,
    prompter: &dyn Prompter,
) -> Result<ProvisioningResult> {
    let client = SanityClient::new(&config.api).context("Failed to create API client")?;
    let store = FileCredentialStore::from_config(&config.auth)?;
    let login = CommandLogin::from_config(&config.auth);
    let observer = CliObserver::new(login.command_line());

    let provisioner = Provisioner::new(&client, &store, &login, prompter)
        .with_observer(&observer)
        .with_settings(ProvisionSettings::from_config(config));
    let options = cli.provision_options();

    let outcome = tokio::select! {
        outcome = provisioner.run(&options) => outcome,
        _ = tokio::signal::ctrl_c() => {
            observer.clear();
            bail!("Interrupted");
        }
    };
    observer.clear();

    outcome.map_err(|e| {
        if let ProvisionError::PartiallyProvisioned { created, .. } = &e {
            for resource in created {
                output::warning(&format!("Created {} before the failure", resource));
            }
        }
        anyhow!(e)
    })
}

/// Pick the target directory and make sure writing into it is acceptable.
///
/// The returned path is absolute.
fn resolve_project_directory(
    requested: Option<&Utf8Path>,
    yes: bool,
    prompter: &dyn Prompter,
) -> Result<Utf8PathBuf> {
    let dir = match requested {
        Some(dir) => dir.to_path_buf(),
        None if yes => Utf8PathBuf::from(DEFAULT_PROJECT_DIRECTORY),
        None => {
            let validate: Validator<'_> = &validate_package_name;
            let answer = prompter.text(
                "Project directory:",
                Some(DEFAULT_PROJECT_DIRECTORY),
                Some(validate),
            )?;
            Utf8PathBuf::from(answer)
        }
    };
    let target = absolute_directory(&dir)?;

    if inspect_directory(&target)? == DirectoryState::NonEmpty {
        if yes {
            bail!("Directory {} already exists and is not empty", dir);
        }
        let proceed = prompter.confirm(
            &format!("Directory {} already exists and is not empty. Continue?", dir),
            false,
        )?;
        if !proceed {
            bail!("Aborted.");
        }
    }

    Ok(target)
}

fn print_next_steps(
    project_dir: &Utf8Path,
    package_manager: PackageManager,
    skipped_install: bool,
    result: &ProvisioningResult,
) {
    println!();
    output::success(&format!("Your project is ready in {}", project_dir));
    println!();
    output::info("Next steps:");
    output::command(&format!("cd {}", project_dir));
    if skipped_install {
        output::command(&format!("{} install", package_manager));
    }
    output::command(&package_manager.run_script("dev"));
    println!();
    output::info("Deploy the studio and generate types with:");
    output::command(&package_manager.run_script("sanity:deploy"));
    output::command(&package_manager.run_script("sanity:typegen"));

    if result.is_first_project {
        println!();
        output::info(&format!(
            "New to Sanity? Join the community at {}",
            COMMUNITY_URL
        ));
    }
}

/// Prints provisioning progress to the terminal
struct CliObserver {
    login_command: String,
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliObserver {
    fn new(login_command: String) -> Self {
        Self {
            login_command,
            spinner: Mutex::new(None),
        }
    }

    fn clear(&self) {
        if let Some(spinner) = self.spinner.lock().unwrap().take() {
            spinner.finish_and_clear();
        }
    }
}

impl ProvisionObserver for CliObserver {
    fn on_stage_start(&self, stage: Stage) {
        tracing::debug!("Provisioning stage: {}", stage);
    }

    fn on_authenticated(&self, user: &User) {
        output::success(&format!("Logged in as {}", user.email));
    }

    fn on_login_required(&self) {
        output::info(&format!(
            "You need to log in to Sanity. Running: {}",
            self.login_command
        ));
    }

    fn on_creating(&self, what: &str) {
        self.clear();
        *self.spinner.lock().unwrap() = Some(output::spinner(&format!("Creating {}", what)));
    }

    fn on_created(&self, resource: &CreatedResource) {
        self.clear();
        output::success(&format!("Created {}", resource));
    }
}
