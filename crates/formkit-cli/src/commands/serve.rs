use std::sync::Arc;

use anyhow::Context;
use formkit_config::FormkitConfig;
use formkit_server::{DocumentStore, FormApp, FormServer};

use crate::cli::ServeArgs;
use crate::commands::shared::{apply_form_args, load_form};

/// Handle `formkit serve`.
///
/// The form is loaded before binding, so a missing or invalid schema or type
/// document stops startup.
pub async fn handle(args: &ServeArgs, mut config: FormkitConfig) -> anyhow::Result<()> {
    apply_serve_args(&mut config, args)?;

    let form = load_form(&config)?;
    let summary = form.summary();
    tracing::info!(
        schema = %config.form.schema_path.display(),
        fields = summary.fields,
        groups = summary.groups,
        encoding = %config.form.list_encoding,
        "form loaded"
    );

    let app = FormApp::new(
        Arc::new(form),
        config.form.list_encoding,
        config.form.title.clone(),
        DocumentStore::new(&config.form.output_path),
    );
    let addr = config.server.bind_addr();
    let server = FormServer::bind(&addr, app).context("failed to start HTTP server")?;
    let shutdown = server.shutdown_handle();
    let workers = config.server.workers;

    // tiny_http::recv blocks, so the worker pool runs off the async runtime.
    let mut serving = tokio::task::spawn_blocking(move || server.run(workers));

    tokio::select! {
        joined = &mut serving => {
            joined.context("server thread panicked")?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for ctrl-c")?;
            tracing::info!("shutting down");
            shutdown.shutdown();
            serving.await.context("server thread panicked")?;
        }
    }
    Ok(())
}

/// Apply command-line overrides, then validate the combined configuration.
fn apply_serve_args(config: &mut FormkitConfig, args: &ServeArgs) -> anyhow::Result<()> {
    apply_form_args(config, &args.form);
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(output) = &args.output {
        config.form.output_path.clone_from(output);
    }
    config.validate().context("invalid serve configuration")?;
    Ok(())
}
